use validator::Validate;

use crate::{
    entities::{comment::{CommentWithUser, NewCommentForm}, user::CurrentUser},
    errors::AppError,
    repositories::comment::CommentRepository,
};

pub struct CommentHandler<R>
where
    R: CommentRepository,
{
    pub comment_repo: R,
}

impl<R> CommentHandler<R>
where
    R: CommentRepository,
{
    pub fn new(comment_repo: R) -> Self {
        CommentHandler { comment_repo }
    }

    /// Comments for the project behind `slug`, newest first. An unknown
    /// slug yields an empty list rather than an error so the detail
    /// page can render its empty state.
    pub async fn get_comments_for_slug(&self, slug: &str) -> Result<Vec<CommentWithUser>, AppError> {
        let Some(project_id) = self.comment_repo.find_project_id_by_slug(slug).await? else {
            return Ok(Vec::new());
        };

        self.comment_repo.get_comments_for_project(project_id).await
    }

    /// Inserts one comment for the signed-in user. The caller has
    /// already established the session; here only the payload and the
    /// slug resolution can fail.
    pub async fn submit_comment(&self, user: &CurrentUser, form: NewCommentForm) -> Result<(), AppError> {
        form.validate()?;

        let project_id = self
            .comment_repo
            .find_project_id_by_slug(form.project_slug.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        self.comment_repo
            .insert_comment(project_id, &user.id, form.comment.trim())
            .await?;

        tracing::info!(
            project_id,
            user_id = %user.id,
            "Comment submitted"
        );

        Ok(())
    }
}
