//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `AuthService`: login, logout, password recovery and change; owns the
//!   `Unknown -> Anonymous <-> Authenticated` state machine
//! - `SessionStore`: persists token and user under two fixed keys
//! - `KeyValueStore` backends: `FileStore`, `KeyringStore`, `MemoryStore`
//!
//! The session is loaded once at start-up and has no client-side expiry;
//! the server decides when a token stops being accepted.

pub mod credentials;
pub mod error;
pub mod service;
pub mod session;
pub mod store;

pub use credentials::KeyringStore;
pub use error::AuthError;
pub use service::{AuthApi, AuthService, AuthState};
pub use session::{Session, SessionStore, TOKEN_KEY, USER_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
