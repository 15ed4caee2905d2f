pub mod api;
pub mod config;
pub mod coordinator;
pub mod session;
