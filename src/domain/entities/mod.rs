pub mod comment;
pub mod option_fields;
pub mod project;
pub mod user;
