//! Typed client for the PassKind backend API.

mod client;
mod models;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use models::{HistoryEvent, Secret, SecretInput, User};
