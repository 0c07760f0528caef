pub mod auth;
pub mod config;
pub mod generate;
pub mod lock;
pub mod secrets;
