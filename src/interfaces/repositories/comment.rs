use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::comment::{CommentWithUser, CommentWithUserRow},
    errors::AppError,
    repositories::sqlx_repo::SqlxCommentRepo,
};

#[async_trait]
pub trait CommentRepository: Sync + Send {
    /// Resolves an active project's id from its slug. `None` when the
    /// slug is unknown or the project is soft-deleted.
    async fn find_project_id_by_slug(&self, slug: &str) -> Result<Option<i32>, AppError>;
    async fn get_comments_for_project(&self, project_id: i32) -> Result<Vec<CommentWithUser>, AppError>;
    async fn insert_comment(&self, project_id: i32, user_id: &str, content: &str) -> Result<(), AppError>;
}

impl SqlxCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxCommentRepo { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepo {
    async fn find_project_id_by_slug(&self, slug: &str) -> Result<Option<i32>, AppError> {
        let id: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT id FROM projects
            WHERE slug = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get_comments_for_project(&self, project_id: i32) -> Result<Vec<CommentWithUser>, AppError> {
        let rows = sqlx::query_as::<_, CommentWithUserRow>(
            r#"
            SELECT
                c.id,
                c.content,
                c.created_at,
                u.name AS user_name,
                u.email AS user_email,
                u.image AS user_image
            FROM comments c
            INNER JOIN "user" u ON u.id = c.user_id
            WHERE c.project_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentWithUser::from).collect())
    }

    async fn insert_comment(&self, project_id: i32, user_id: &str, content: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO comments (content, project_id, user_id, created_at)
            VALUES ($1, $2, $3, NOW())
            "#,
        )
        .bind(content)
        .bind(project_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
