pub mod config;
pub mod context;
pub mod coordinator;
pub mod source;
pub mod types;
