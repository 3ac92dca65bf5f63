use std::time::Duration;

mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{db, limiter, utils};
pub use interfaces::{handlers, middlewares, repositories, routes};

use limiter::rate_limiter::SubmissionLimiterStore;
use repositories::sqlx_repo::{SqlxCommentRepo, SqlxProjectRepo, SqlxSessionRepo};
use use_cases::{comments::CommentHandler, projects::ProjectHandler};

/// Idle limiter entries are evicted after this long without a
/// submission attempt.
const LIMITER_IDLE_TTL: Duration = Duration::from_secs(2 * 3600);

pub struct AppState {
    pub project_handler: ProjectHandler<SqlxProjectRepo>,
    pub comment_handler: CommentHandler<SqlxCommentRepo>,
    pub session_repo: SqlxSessionRepo,
    pub comment_limiter: SubmissionLimiterStore,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let project_handler = ProjectHandler::new(
            SqlxProjectRepo::new(pool.clone()),
            config.default_page_size,
        );
        let comment_handler = CommentHandler::new(SqlxCommentRepo::new(pool.clone()));
        let session_repo = SqlxSessionRepo::new(pool);

        let comment_limiter = SubmissionLimiterStore::new(
            config.comment_burst_capacity,
            config.comment_refill_per_sec,
            Duration::from_secs(config.comment_window_secs),
            config.comment_window_limit,
            LIMITER_IDLE_TTL,
        );

        AppState {
            project_handler,
            comment_handler,
            session_repo,
            comment_limiter,
        }
    }
}
