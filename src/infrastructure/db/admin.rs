use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::{
    entities::project::{NewProject, ProjectStatus},
    errors::AppError,
    repositories::{project::ProjectRepository, sqlx_repo::SqlxProjectRepo},
};

const CREATE_STATUS_ENUM: &str =
    "CREATE TYPE project_status AS ENUM ('In Progress', 'Complete', 'Planning', 'On Hold')";

const CREATE_PROJECTS_TABLE: &str = r#"
CREATE TABLE projects (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    long_description TEXT,
    technologies JSON NOT NULL DEFAULT '[]'::json,
    status project_status NOT NULL DEFAULT 'In Progress',
    category VARCHAR(100) NOT NULL,
    demo_url VARCHAR(500),
    github_url VARCHAR(500),
    image_url VARCHAR(500),
    thumbnail_url VARCHAR(500),
    screenshots JSON NOT NULL DEFAULT '[]'::json,
    start_date TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
    end_date TIMESTAMP WITH TIME ZONE,
    featured BOOLEAN NOT NULL DEFAULT FALSE,
    priority INTEGER NOT NULL DEFAULT 0,
    slug VARCHAR(255) NOT NULL UNIQUE,
    tags JSON NOT NULL DEFAULT '[]'::json,
    challenges TEXT,
    learnings TEXT,
    updated_at TIMESTAMP WITH TIME ZONE,
    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMP WITH TIME ZONE
)
"#;

const PROJECT_INDEXES: [&str; 7] = [
    "CREATE INDEX projects_status_idx ON projects(status)",
    "CREATE INDEX projects_featured_idx ON projects(featured)",
    "CREATE INDEX projects_priority_idx ON projects(priority)",
    "CREATE INDEX projects_category_idx ON projects(category)",
    "CREATE INDEX projects_slug_idx ON projects(slug)",
    "CREATE INDEX projects_created_at_idx ON projects(created_at)",
    "CREATE INDEX projects_deleted_at_idx ON projects(deleted_at)",
];

const CREATE_COMMENTS_TABLE: &str = r#"
CREATE TABLE comments (
    id SERIAL PRIMARY KEY,
    content TEXT NOT NULL,
    project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    user_id TEXT NOT NULL REFERENCES "user"(id) ON DELETE CASCADE,
    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMP WITH TIME ZONE
)
"#;

/// The auth provider owns these tables and normally migrates them
/// itself. They are created here only so the comments foreign keys
/// resolve in a fresh database; they are never dropped.
const AUTH_PROVIDER_TABLES: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS "user" (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        email_verified BOOLEAN NOT NULL DEFAULT FALSE,
        image TEXT,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "session" (
        id TEXT PRIMARY KEY,
        expires_at TIMESTAMP WITH TIME ZONE NOT NULL,
        token TEXT NOT NULL UNIQUE,
        ip_address TEXT,
        user_agent TEXT,
        user_id TEXT NOT NULL REFERENCES "user"(id) ON DELETE CASCADE,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "account" (
        id TEXT PRIMARY KEY,
        account_id TEXT NOT NULL,
        provider_id TEXT NOT NULL,
        user_id TEXT NOT NULL REFERENCES "user"(id) ON DELETE CASCADE,
        access_token TEXT,
        refresh_token TEXT,
        id_token TEXT,
        access_token_expires_at TIMESTAMP WITH TIME ZONE,
        refresh_token_expires_at TIMESTAMP WITH TIME ZONE,
        scope TEXT,
        password TEXT,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "verification" (
        id TEXT PRIMARY KEY,
        identifier TEXT NOT NULL,
        value TEXT NOT NULL,
        expires_at TIMESTAMP WITH TIME ZONE NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
    "#,
];

/// Drop, recreate and seed. The sequence is not transactional; a crash
/// mid-way leaves a partially migrated store that needs another run.
pub async fn initialize_database(pool: &PgPool) -> Result<(), AppError> {
    info!("Starting database initialization...");

    reset_database(pool).await?;
    seed_database(pool).await?;

    info!("Database initialized successfully!");
    Ok(())
}

/// Drop and recreate the content tables without seeding.
pub async fn reset_database(pool: &PgPool) -> Result<(), AppError> {
    info!("Resetting database...");

    sqlx::query("DROP TABLE IF EXISTS comments CASCADE")
        .execute(pool)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS projects CASCADE")
        .execute(pool)
        .await?;
    sqlx::query("DROP TYPE IF EXISTS project_status CASCADE")
        .execute(pool)
        .await?;

    sqlx::query(CREATE_STATUS_ENUM).execute(pool).await?;
    sqlx::query(CREATE_PROJECTS_TABLE).execute(pool).await?;

    for index in PROJECT_INDEXES {
        sqlx::query(index).execute(pool).await?;
    }

    for table in AUTH_PROVIDER_TABLES {
        sqlx::query(table).execute(pool).await?;
    }

    sqlx::query(CREATE_COMMENTS_TABLE).execute(pool).await?;

    info!("Database reset completed successfully!");
    Ok(())
}

/// Clear existing content rows and insert the sample projects. Inserts
/// go through the repository so seeding exercises the same validation
/// and slug-conflict path as any other create.
pub async fn seed_database(pool: &PgPool) -> Result<(), AppError> {
    info!("Seeding database...");

    sqlx::query("DELETE FROM comments").execute(pool).await?;
    sqlx::query("DELETE FROM projects").execute(pool).await?;

    let repo = SqlxProjectRepo::new(pool.clone());
    let mut inserted = 0usize;

    for project in sample_projects() {
        let slug = project.slug.clone().unwrap_or_default();
        match repo.create_project(&project.into()).await {
            Ok(_) => inserted += 1,
            Err(e) => {
                warn!("Skipping seed project '{}': {}", slug, e);
            }
        }
    }

    info!("Database seeded successfully! Inserted {} projects.", inserted);
    Ok(())
}

fn sample_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            title: "Portfolio Website".to_string(),
            description: "A modern, responsive portfolio website built with Next.js and TypeScript".to_string(),
            long_description: Some(
                "This portfolio website showcases my projects and skills using cutting-edge \
                 web technologies. Built with Next.js 15, it features server-side rendering, \
                 optimized images, and a clean, modern design system."
                    .to_string(),
            ),
            technologies: vec![
                "Next.js".to_string(),
                "TypeScript".to_string(),
                "Tailwind CSS".to_string(),
                "PostgreSQL".to_string(),
            ],
            status: ProjectStatus::Complete,
            category: "Web Development".to_string(),
            demo_url: Some("https://jeanluc-portfolio.vercel.app".to_string()),
            github_url: Some("https://github.com/JeanLucGaffud/JeanLuc-Portfolio".to_string()),
            image_url: Some("/projects/portfolio-hero.png".to_string()),
            thumbnail_url: Some("/projects/portfolio-thumb.png".to_string()),
            screenshots: vec![
                "/projects/portfolio-1.png".to_string(),
                "/projects/portfolio-2.png".to_string(),
            ],
            start_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).single(),
            end_date: Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).single(),
            featured: true,
            priority: 1,
            slug: Some("portfolio-website".to_string()),
            tags: vec![
                "React".to_string(),
                "Frontend".to_string(),
                "Full Stack".to_string(),
                "Responsive".to_string(),
            ],
            challenges: Some(
                "Implementing server-side rendering while maintaining optimal performance and \
                 SEO optimization."
                    .to_string(),
            ),
            learnings: Some(
                "Gained deeper understanding of the Next.js App Router, TypeScript best \
                 practices, and modern CSS techniques."
                    .to_string(),
            ),
        },
        NewProject {
            title: "Task Manager API".to_string(),
            description: "A RESTful task management service with team workspaces".to_string(),
            long_description: Some(
                "A backend service for organizing personal and team tasks, with workspaces, \
                 due-date reminders and activity history."
                    .to_string(),
            ),
            technologies: vec![
                "Rust".to_string(),
                "Actix Web".to_string(),
                "PostgreSQL".to_string(),
            ],
            status: ProjectStatus::InProgress,
            category: "Web Development".to_string(),
            demo_url: None,
            github_url: Some("https://github.com/JeanLucGaffud/task-manager-api".to_string()),
            image_url: None,
            thumbnail_url: None,
            screenshots: Vec::new(),
            start_date: Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).single(),
            end_date: None,
            featured: false,
            priority: 2,
            slug: Some("task-manager-api".to_string()),
            tags: vec!["Backend".to_string(), "REST".to_string()],
            challenges: None,
            learnings: None,
        },
        NewProject {
            title: "Weather Dashboard".to_string(),
            description: "A weather visualization dashboard with multi-city comparison".to_string(),
            long_description: None,
            technologies: vec!["React".to_string(), "D3.js".to_string()],
            status: ProjectStatus::Planning,
            category: "Data Visualization".to_string(),
            demo_url: None,
            github_url: None,
            image_url: None,
            thumbnail_url: None,
            screenshots: Vec::new(),
            start_date: None,
            end_date: None,
            featured: false,
            priority: 3,
            slug: Some("weather-dashboard".to_string()),
            tags: vec!["Frontend".to_string(), "Charts".to_string()],
            challenges: None,
            learnings: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn sample_projects_pass_validation() {
        for project in sample_projects() {
            assert!(project.validate().is_ok(), "invalid seed row: {}", project.title);
        }
    }

    #[test]
    fn sample_slugs_are_unique() {
        let mut slugs: Vec<String> = sample_projects()
            .into_iter()
            .filter_map(|p| p.slug)
            .collect();
        let total = slugs.len();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), total);
    }

    #[test]
    fn portfolio_website_row_is_the_featured_headliner() {
        let projects = sample_projects();
        let portfolio = projects
            .iter()
            .find(|p| p.slug.as_deref() == Some("portfolio-website"))
            .expect("seed data should include portfolio-website");

        assert!(portfolio.featured);
        assert_eq!(portfolio.priority, 1);
        assert_eq!(portfolio.category, "Web Development");
        assert_eq!(portfolio.status, ProjectStatus::Complete);
    }
}
