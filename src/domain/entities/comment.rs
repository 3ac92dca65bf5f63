use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

const MAX_COMMENT_LENGTH: u64 = 2000;

/// Flat join row produced by the comments-with-author query.
#[derive(Debug, sqlx::FromRow)]
pub struct CommentWithUserRow {
    pub id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
    pub user_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommentAuthor {
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithUser {
    pub id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user: CommentAuthor,
}

impl From<CommentWithUserRow> for CommentWithUser {
    fn from(row: CommentWithUserRow) -> Self {
        CommentWithUser {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
            user: CommentAuthor {
                name: row.user_name,
                email: row.user_email,
                image: row.user_image,
            },
        }
    }
}

/// Form payload submitted from the project detail page.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCommentForm {
    #[validate(
        length(max = MAX_COMMENT_LENGTH),
        custom(function = "validate_not_blank", message = "Comment cannot be empty")
    )]
    pub comment: String,

    #[serde(rename = "projectSlug")]
    #[validate(custom(function = "validate_not_blank", message = "Project slug is required"))]
    pub project_slug: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}
