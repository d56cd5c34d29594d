use serde::{Deserialize, Serialize};

use super::Usuario;

/// Generic `{exito, mensaje}` envelope returned by every mutating endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub exito: bool,
    #[serde(default)]
    pub mensaje: Option<String>,
}

impl ApiMessage {
    /// Server message if present and not blank
    pub fn message(&self) -> Option<&str> {
        self.mensaje
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// Response from `iniciar_sesion/`.
///
/// Token and user are only guaranteed when `exito` is true; even then the
/// backend has been seen to omit them, so both stay optional here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub exito: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub usuario: Option<Usuario>,
    #[serde(default)]
    pub mensaje: Option<String>,
}

impl LoginResponse {
    pub fn message(&self) -> Option<&str> {
        self.mensaje
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}
