use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unauthorized - session may be expired")]
    Unauthorized,

    /// Non-success HTTP status. `mensaje` is the server message when the
    /// body was a `{exito, mensaje}` envelope.
    #[error("Request failed with status {status}: {body}")]
    Status {
        status: u16,
        mensaje: Option<String>,
        body: String,
    },

    /// Server answered with `exito: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    Malformed(String),

    #[error("Authentication required - no session token")]
    MissingToken,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        let chars = body.chars().count();
        if chars <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... (truncated, {} total chars)", cut, chars)
        }
    }

    /// Extract `mensaje` from a JSON error body, if it is one
    fn server_message(body: &str) -> Option<String> {
        serde_json::from_str::<crate::models::ApiMessage>(body)
            .ok()
            .and_then(|m| m.message().map(str::to_string))
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let mensaje = Self::server_message(body);
        match status.as_u16() {
            401 if mensaje.is_none() => ApiError::Unauthorized,
            code => ApiError::Status {
                status: code,
                mensaje,
                body: Self::truncate_body(body),
            },
        }
    }

    /// Server-supplied message carried by this error, if any
    pub fn server_supplied_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { mensaje, .. } => mensaje.as_deref(),
            ApiError::Rejected(m) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_extracts_server_message() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"exito":false,"mensaje":"Correo no registrado"}"#,
        );
        assert_eq!(err.server_supplied_message(), Some("Correo no registrado"));
        assert!(err.to_string().contains("status 400"));
    }

    #[test]
    fn test_from_status_unauthorized_without_message() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_from_status_unauthorized_keeps_message() {
        let err = ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"exito":false,"mensaje":"Token inválido"}"#,
        );
        assert_eq!(err.server_supplied_message(), Some("Token inválido"));
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(800);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &long);
        match err {
            ApiError::Status { status, mensaje, body } => {
                assert_eq!(status, 500);
                assert!(mensaje.is_none());
                assert!(body.contains("truncated, 800 total chars"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncate_body_counts_chars_not_bytes() {
        // 400 chars, 800 bytes
        let spanish = "ñ".repeat(400);
        assert_eq!(ApiError::truncate_body(&spanish), spanish);

        let long = "á".repeat(600);
        let cut = ApiError::truncate_body(&long);
        assert!(cut.starts_with(&"á".repeat(500)));
        assert!(cut.ends_with("... (truncated, 600 total chars)"));
    }
}
