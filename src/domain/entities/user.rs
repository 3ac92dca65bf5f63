use serde::Serialize;

/// The slice of the auth provider's `user` record the core reads. The
/// provider owns the full identity/credential records; ids are the
/// provider's opaque text keys, not UUIDs.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}
