use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::de::{deserialize_f64_lenient, deserialize_i64_lenient, deserialize_string_lenient};

/// Processing state of a submitted report, as assigned by the ministry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    Pendiente,
    EnProceso,
    Resuelto,
    /// Anything the server sends that we don't know yet
    Other(String),
}

impl From<String> for ReportStatus {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pendiente" => ReportStatus::Pendiente,
            "en proceso" | "en_proceso" => ReportStatus::EnProceso,
            "resuelto" => ReportStatus::Resuelto,
            _ => ReportStatus::Other(s),
        }
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        status.label().to_string()
    }
}

impl ReportStatus {
    pub fn label(&self) -> &str {
        match self {
            ReportStatus::Pendiente => "Pendiente",
            ReportStatus::EnProceso => "En Proceso",
            ReportStatus::Resuelto => "Resuelto",
            ReportStatus::Other(s) => s,
        }
    }

    /// Marker colour used for list badges and map pins
    pub fn color(&self) -> &'static str {
        match self {
            ReportStatus::Pendiente => "#FF9800",
            ReportStatus::EnProceso => "#2196F3",
            ReportStatus::Resuelto => "#4CAF50",
            ReportStatus::Other(_) => "#999999",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ReportStatus::Resuelto)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Environmental incident reported by the signed-in user.
///
/// The map endpoint only returns id, code, title, coordinates and status, so
/// the remaining fields default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reporte {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub codigo: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub titulo: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub descripcion: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub foto: String,
    #[serde(deserialize_with = "deserialize_f64_lenient")]
    pub latitud: f64,
    #[serde(deserialize_with = "deserialize_f64_lenient")]
    pub longitud: f64,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub fecha: String,
    pub estado: ReportStatus,
    #[serde(default)]
    pub comentario_ministerio: Option<String>,
}

impl Reporte {
    pub fn has_ministry_comment(&self) -> bool {
        self.comentario_ministerio
            .as_deref()
            .map(|c| !c.trim().is_empty())
            .unwrap_or(false)
    }
}

/// A new report ready to be submitted (`reportes/`).
#[derive(Debug, Clone)]
pub struct NuevoReporte {
    pub titulo: String,
    pub descripcion: String,
    /// Raw photo bytes; encoded to base64 on submission
    pub foto: Vec<u8>,
    pub latitud: f64,
    pub longitud: f64,
}

impl NuevoReporte {
    /// Form fields as sent to the server
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("titulo", self.titulo.trim().to_string()),
            ("descripcion", self.descripcion.trim().to_string()),
            ("foto", STANDARD.encode(&self.foto)),
            ("latitud", self.latitud.to_string()),
            ("longitud", self.longitud.to_string()),
        ]
    }
}
