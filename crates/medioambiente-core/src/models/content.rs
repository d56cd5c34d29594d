use serde::{Deserialize, Serialize};

use super::de::{deserialize_f64_lenient, deserialize_i64_lenient, deserialize_string_lenient};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Noticia {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub titulo: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub contenido: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub fecha: String,
    pub imagen: Option<String>,
    pub fuente: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub titulo: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub descripcion: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub duracion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaProtegida {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub nombre: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub descripcion: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub tipo: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub ubicacion: String,
    #[serde(deserialize_with = "deserialize_f64_lenient")]
    pub latitud: f64,
    #[serde(deserialize_with = "deserialize_f64_lenient")]
    pub longitud: f64,
    pub area: Option<String>,
    pub imagen: Option<String>,
    pub fecha_creacion: Option<String>,
}

impl AreaProtegida {
    /// Pin colour on the protected-areas map
    pub const MARKER_COLOR: &'static str = "#2E7D32";

    /// Case-insensitive match against name, type and location, as the area
    /// search box does
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        [&self.nombre, &self.tipo, &self.ubicacion]
            .iter()
            .any(|field| field.to_lowercase().contains(&q))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medida {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub titulo: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub descripcion: String,
    pub categoria: Option<String>,
    pub icono: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Servicio {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub nombre: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub descripcion: String,
    pub icono: Option<String>,
}

/// Ministry staff member (`personal/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personal {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub nombre: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub cargo: String,
    pub departamento: Option<String>,
    pub foto: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
}

/// Environmental regulation; only listed for signed-in users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Normativa {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub titulo: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub descripcion: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub tipo: String,
    pub numero: Option<String>,
    pub fecha: Option<String>,
    pub documento_url: Option<String>,
}
