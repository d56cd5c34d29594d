//! Core library for the Ministerio de Medio Ambiente RD client.
//!
//! - [`api`]: HTTP client for the ministry's REST service
//! - [`auth`]: session persistence and the auth service
//! - [`models`]: server data types
//! - [`validation`]: form checks shared by every front end
//! - [`config`]: configuration file and environment overrides

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;
pub mod validation;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthError, AuthService, AuthState, Session, SessionStore};
pub use config::Config;
