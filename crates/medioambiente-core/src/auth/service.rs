//! Session state machine and identity operations.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{ApiMessage, LoginResponse, Usuario};

use super::error::{
    non_empty_or, AuthError, CHANGE_PASSWORD_FALLBACK, LOGIN_FALLBACK, RECOVERY_FALLBACK,
};
use super::session::{Session, SessionStore};

/// Shown when the server confirms success without saying anything
const INCOMPLETE_RESPONSE: &str = "Respuesta incompleta del servidor";

/// Remote identity endpoints the auth service depends on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, correo: &str, clave: &str) -> Result<LoginResponse, ApiError>;

    async fn recover_password(&self, correo: &str) -> Result<ApiMessage, ApiError>;

    async fn change_password(
        &self,
        token: &str,
        clave_actual: &str,
        clave_nueva: &str,
    ) -> Result<ApiMessage, ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, correo: &str, clave: &str) -> Result<LoginResponse, ApiError> {
        ApiClient::login(self, correo, clave).await
    }

    async fn recover_password(&self, correo: &str) -> Result<ApiMessage, ApiError> {
        ApiClient::recover_password(self, correo).await
    }

    async fn change_password(
        &self,
        token: &str,
        clave_actual: &str,
        clave_nueva: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.with_token(token.to_string())
            .change_password(clave_actual, clave_nueva)
            .await
    }
}

/// Where the service is in the session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The store has not been read yet
    Unknown,
    Anonymous,
    Authenticated(Session),
}

/// Owns the session: in-memory state plus its persisted copy.
///
/// Constructed once and passed to whatever needs identity; nothing else
/// mutates the session.
pub struct AuthService<A: AuthApi = ApiClient> {
    api: A,
    sessions: SessionStore,
    state: AuthState,
}

impl<A: AuthApi> AuthService<A> {
    pub fn new(api: A, sessions: SessionStore) -> Self {
        Self {
            api,
            sessions,
            state: AuthState::Unknown,
        }
    }

    /// Load the persisted session. Only the first call reads the store.
    pub fn initialize(&mut self) -> &AuthState {
        if self.state == AuthState::Unknown {
            self.state = match self.sessions.load() {
                Some(session) => {
                    info!(user_id = session.usuario.id, "Restored stored session");
                    AuthState::Authenticated(session)
                }
                None => AuthState::Anonymous,
            };
        }
        &self.state
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == AuthState::Unknown
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn usuario(&self) -> Option<&Usuario> {
        self.session().map(|s| &s.usuario)
    }

    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.token.as_str())
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Sign in with email and password.
    ///
    /// The session is written to the store before memory is updated. If the
    /// write fails the previous persisted state is put back and the state
    /// machine does not move. The store is read first if `initialize` has not
    /// run, so a rollback never discards a session it has not seen.
    pub async fn login(&mut self, correo: &str, clave: &str) -> Result<Usuario, AuthError> {
        self.initialize();
        debug!("Sending login request");
        let response = self
            .api
            .login(correo, clave)
            .await
            .map_err(|e| AuthError::from_api(e, LOGIN_FALLBACK))?;

        let session = Self::session_from_response(response)?;

        if let Err(e) = self.sessions.save(&session) {
            warn!(error = %e, "Failed to persist session, rolling back");
            self.restore_persisted_state();
            return Err(AuthError::Storage(e.to_string()));
        }

        info!(user_id = session.usuario.id, "Signed in");
        let usuario = session.usuario.clone();
        self.state = AuthState::Authenticated(session);
        Ok(usuario)
    }

    fn session_from_response(response: LoginResponse) -> Result<Session, AuthError> {
        if !response.exito {
            let text = response.message().unwrap_or(LOGIN_FALLBACK).to_string();
            return Err(AuthError::Rejected(text));
        }
        let message = response.message().map(str::to_string);
        let token = response.token.filter(|t| !t.trim().is_empty());
        match (token, response.usuario) {
            (Some(token), Some(usuario)) => Ok(Session::new(token, usuario)),
            (token, usuario) => {
                debug!(
                    has_token = token.is_some(),
                    has_user = usuario.is_some(),
                    "Login reported success without a complete session"
                );
                Err(AuthError::Malformed(
                    message.unwrap_or_else(|| INCOMPLETE_RESPONSE.to_string()),
                ))
            }
        }
    }

    /// Put the store back in line with the in-memory state after a failed write
    fn restore_persisted_state(&self) {
        let result = match &self.state {
            AuthState::Authenticated(previous) => self.sessions.save(previous),
            _ => self.sessions.clear(),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to restore stored session");
        }
    }

    /// Sign out. Store failures are logged, never returned.
    pub fn logout(&mut self) {
        if let Err(e) = self.sessions.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
        if self.is_authenticated() {
            info!("Signed out");
        }
        self.state = AuthState::Anonymous;
    }

    /// Ask the server to send a password reset. Returns its confirmation
    /// message. Session state is not touched.
    pub async fn recover_password(&self, correo: &str) -> Result<String, AuthError> {
        debug!("Sending password recovery request");
        let response = self
            .api
            .recover_password(correo)
            .await
            .map_err(|e| AuthError::from_api(e, RECOVERY_FALLBACK))?;

        if !response.exito {
            let text = response.message().unwrap_or(RECOVERY_FALLBACK).to_string();
            return Err(AuthError::Rejected(text));
        }
        response
            .message()
            .map(str::to_string)
            .ok_or_else(|| AuthError::Malformed(INCOMPLETE_RESPONSE.to_string()))
    }

    /// Change the signed-in user's password. The session stays as it is.
    pub async fn change_password(
        &self,
        clave_actual: &str,
        clave_nueva: &str,
    ) -> Result<String, AuthError> {
        let token = self.token().ok_or(AuthError::NotAuthenticated)?;
        debug!("Sending password change request");
        let response = self
            .api
            .change_password(token, clave_actual, clave_nueva)
            .await
            .map_err(|e| AuthError::from_api(e, CHANGE_PASSWORD_FALLBACK))?;

        if !response.exito {
            let text = response.message().unwrap_or(CHANGE_PASSWORD_FALLBACK).to_string();
            return Err(AuthError::Rejected(text));
        }
        Ok(non_empty_or(
            response.message().unwrap_or_default().to_string(),
            "Contraseña actualizada",
        ))
    }
}

impl AuthService<ApiClient> {
    /// Client carrying the session token, for report and regulation calls
    pub fn authorized_client(&self) -> Result<ApiClient, AuthError> {
        let token = self.token().ok_or(AuthError::NotAuthenticated)?;
        Ok(self.api.with_token(token.to_string()))
    }
}
