//! REST API client module for the ministry service.
//!
//! This module provides the `ApiClient` for communicating with the
//! Ministerio de Medio Ambiente API: public content (news, videos,
//! protected areas, measures, services, staff), account endpoints
//! (login, password recovery and change, volunteer registration) and the
//! signed-in user's reports.
//!
//! Authenticated endpoints take the session token as an
//! `Authorization: Bearer` header. Mutating endpoints are form-encoded and
//! answer with an `{exito, mensaje}` envelope.

pub mod client;
pub mod error;

pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::ApiError;
