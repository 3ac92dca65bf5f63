use std::env;

use anyhow::Context;
use portfolio_site_api::{
    db::{
        admin::{initialize_database, reset_database, seed_database},
        postgres::create_pool,
    },
    settings::AppConfig,
};

/// Schema administration for the portfolio database.
///
/// Usage: db_admin [init|reset|seed]
///   init   drop, recreate and seed everything (default)
///   reset  drop and recreate the tables without seed data
///   seed   replace the project rows with the sample set
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let command = env::args().nth(1).unwrap_or_else(|| "init".to_string());

    let config = AppConfig::new().context("Failed to load configuration")?;
    let pool = create_pool(&config.database_url)
        .await
        .context("Failed to connect to the database")?;

    match command.as_str() {
        "init" => initialize_database(&pool).await?,
        "reset" => reset_database(&pool).await?,
        "seed" => seed_database(&pool).await?,
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!("Usage: db_admin [init|reset|seed]");
            std::process::exit(1);
        }
    }

    Ok(())
}
