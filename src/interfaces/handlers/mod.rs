pub mod comments;
pub mod home;
pub mod projects;
pub mod system;
