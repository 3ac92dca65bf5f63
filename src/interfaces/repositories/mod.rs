pub mod comment;
pub mod project;
pub mod session;
pub mod sqlx_repo;
