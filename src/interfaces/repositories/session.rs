use async_trait::async_trait;
use sqlx::PgPool;

use crate::{entities::user::CurrentUser, errors::AppError, repositories::sqlx_repo::SqlxSessionRepo};

#[async_trait]
pub trait SessionRepository: Sync + Send {
    /// Resolves an unexpired session token to its user. The session and
    /// user tables belong to the external auth provider; we only read
    /// the identity columns the comment feature needs.
    async fn find_user_by_session_token(&self, token: &str) -> Result<Option<CurrentUser>, AppError>;
}

impl SqlxSessionRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxSessionRepo { pool }
    }
}

#[async_trait]
impl SessionRepository for SqlxSessionRepo {
    async fn find_user_by_session_token(&self, token: &str) -> Result<Option<CurrentUser>, AppError> {
        let user = sqlx::query_as::<_, CurrentUser>(
            r#"
            SELECT u.id, u.name, u.email, u.image
            FROM "session" s
            INNER JOIN "user" u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
