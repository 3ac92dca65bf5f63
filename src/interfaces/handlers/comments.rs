use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::comment::NewCommentForm,
    errors::AppError,
    use_cases::extractors::SessionUser,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_comments_for_project(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let comments = state.comment_handler.get_comments_for_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// Accepts the detail page's form payload. Success carries no body;
/// the page refetches the comment list afterwards.
#[instrument(skip(user, state, form))]
pub async fn submit_comment(
    user: SessionUser,
    state: web::Data<AppState>,
    form: web::Form<NewCommentForm>,
) -> Result<impl Responder, AppError> {
    let decision = state.comment_limiter.check(&user.0.id);
    if !decision.allowed {
        tracing::warn!(user_id = %user.0.id, "Comment rate limit hit");
        return Err(AppError::TooManyRequests {
            retry_after_secs: decision.retry_after_secs.unwrap_or(1),
        });
    }

    state
        .comment_handler
        .submit_comment(&user.0, form.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
