pub mod comments;
pub mod extractors;
pub mod projects;
