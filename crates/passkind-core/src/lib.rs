//! # PassKind Core Library
//!
//! Client-side logic for the PassKind vault. Everything of real
//! consequence -- encryption, persistence, authentication, audit
//! history -- lives in the backend API; this crate covers the pieces
//! the client owns:
//!
//! - **Auto-lock**: an inactivity state machine that warns and then
//!   forcibly ends an authenticated session. All scheduling goes through
//!   a pluggable timer driver so the timing contract is testable with
//!   virtual time.
//! - **Session store**: bearer token and auto-lock preferences, persisted
//!   in a local key-value store.
//! - **Password generator**: character-set composition, random sampling,
//!   and strength scoring.
//! - **Backend client**: typed HTTP calls for auth, secrets CRUD, and
//!   audit history.
//!
//! ## Key Components
//!
//! - [`AutoLockController`]: the inactivity auto-lock state machine
//! - [`AuthSession`]: persisted session store
//! - [`ApiClient`]: HTTP client for the backend API
//! - [`Config`] / [`Database`]: TOML configuration and local kv storage

pub mod api;
pub mod autolock;
pub mod error;
pub mod events;
pub mod generator;
pub mod session;
pub mod storage;

pub use api::{ApiClient, HistoryEvent, Secret, SecretInput, User};
pub use autolock::{
    ActivityKind, AutoLockConfig, AutoLockController, LockPhase, LockWarning, ManualDriver,
    Navigator, TimerDriver, TimerId, WallClockDriver,
};
pub use error::{ApiError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use generator::GeneratorOptions;
pub use session::{AuthSession, SessionHandle};
pub use storage::{Config, Database};
