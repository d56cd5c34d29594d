use serde::{Deserialize, Serialize};

use super::de::{deserialize_i64_lenient, deserialize_string_lenient};

/// Registered volunteer as returned by the login endpoint.
///
/// Created server-side and mirrored locally after login; the client never
/// edits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub cedula: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub nombre: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub correo: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub telefono: String,
}

impl Usuario {
    /// Name to greet the user with, falling back to the email address
    pub fn display_name(&self) -> &str {
        if self.nombre.trim().is_empty() {
            &self.correo
        } else {
            &self.nombre
        }
    }
}

/// Volunteer registration form (`voluntarios/`).
#[derive(Debug, Clone, Default)]
pub struct Voluntario {
    pub cedula: String,
    pub nombre: String,
    pub correo: String,
    pub clave: String,
    pub telefono: String,
}

impl Voluntario {
    /// Form fields in the order the endpoint expects, values trimmed
    pub fn form_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("cedula", self.cedula.trim()),
            ("nombre", self.nombre.trim()),
            ("correo", self.correo.trim()),
            ("clave", self.clave.trim()),
            ("telefono", self.telefono.trim()),
        ]
    }
}
