use thiserror::Error;

use crate::api::ApiError;
use crate::validation::ValidationError;

/// Generic login failure text when neither the server nor the transport
/// gave anything better
pub const LOGIN_FALLBACK: &str = "Error al iniciar sesión";

/// Generic recovery failure text
pub const RECOVERY_FALLBACK: &str = "Error al recuperar contraseña";

/// Generic password change failure text
pub const CHANGE_PASSWORD_FALLBACK: &str = "No se pudo cambiar la contraseña";

/// The single error surfaced by the auth service. `Display` is always a
/// non-empty message suitable for showing to the user.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Network failure, timeout, or an HTTP error without a server message
    #[error("{0}")]
    Transport(String),

    /// The server answered `exito: false`
    #[error("{0}")]
    Rejected(String),

    /// The server claimed success but left out required fields
    #[error("{0}")]
    Malformed(String),

    /// Remote login succeeded but the session could not be persisted
    #[error("No se pudo guardar la sesión: {0}")]
    Storage(String),

    #[error("Debe iniciar sesión")]
    NotAuthenticated,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AuthError {
    /// User-facing message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Map a client error, preferring the server's message, then the
    /// transport error text, then `fallback`.
    pub fn from_api(err: ApiError, fallback: &str) -> Self {
        if let Some(mensaje) = err.server_supplied_message() {
            return AuthError::Rejected(mensaje.to_string());
        }
        let text = non_empty_or(err.to_string(), fallback);
        match err {
            ApiError::Malformed(_) => AuthError::Malformed(text),
            ApiError::MissingToken => AuthError::NotAuthenticated,
            _ => AuthError::Transport(text),
        }
    }
}

pub(crate) fn non_empty_or(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}
