pub mod admin;
pub mod postgres;
