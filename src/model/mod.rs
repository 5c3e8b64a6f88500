pub mod config;
pub mod mode;
pub mod note;
pub mod store;
pub mod text;
