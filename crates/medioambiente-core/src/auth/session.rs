use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::Usuario;

use super::store::{KeyValueStore, StoreError};

/// Key holding the raw bearer token
pub const TOKEN_KEY: &str = "userToken";

/// Key holding the user profile as JSON
pub const USER_KEY: &str = "userData";

/// A bearer token paired with the user it was issued to.
///
/// Only ever constructed with both halves present; a token without a user
/// (or the reverse) is not a session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub usuario: Usuario,
}

impl Session {
    pub fn new(token: String, usuario: Usuario) -> Self {
        Self { token, usuario }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("usuario", &self.usuario)
            .finish()
    }
}

/// Persists the session as two entries in a key-value store.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the persisted session.
    ///
    /// Never fails: unreadable or unparsable entries are logged and treated
    /// as no session.
    pub fn load(&self) -> Option<Session> {
        let token = match self.store.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                return None;
            }
        };
        let user_json = match self.store.get(USER_KEY) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Failed to read stored user");
                return None;
            }
        };

        let (token, user_json) = match (token, user_json) {
            (Some(t), Some(u)) if !t.is_empty() && !u.is_empty() => (t, u),
            (None, None) => {
                debug!("No stored session");
                return None;
            }
            _ => {
                debug!("Incomplete stored session ignored");
                return None;
            }
        };

        match serde_json::from_str::<Usuario>(&user_json) {
            Ok(usuario) => Some(Session::new(token, usuario)),
            Err(e) => {
                warn!(error = %e, "Stored user is not valid JSON");
                None
            }
        }
    }

    /// Write token then user. No cross-entry atomicity.
    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        let user_json = serde_json::to_string(&session.usuario)?;
        self.store.set(TOKEN_KEY, &session.token)?;
        self.store.set(USER_KEY, &user_json)?;
        Ok(())
    }

    /// Remove both entries. Both removals are attempted even if the first fails.
    pub fn clear(&self) -> Result<(), StoreError> {
        let token_result = self.store.remove(TOKEN_KEY);
        let user_result = self.store.remove(USER_KEY);
        token_result.and(user_result)
    }
}
