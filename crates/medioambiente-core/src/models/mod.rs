//! Data models for the ministry API.
//!
//! This module contains all the data structures used to represent
//! ministry data including:
//!
//! - `Usuario`, `Voluntario`: signed-in user and volunteer registration
//! - `Reporte`, `ReportStatus`, `NuevoReporte`: incident reports
//! - Content types: `Noticia`, `Video`, `AreaProtegida`, `Medida`,
//!   `Servicio`, `Personal`, `Normativa`
//! - Envelopes: `ApiMessage`, `LoginResponse`
//! - `SobreNosotros`: institutional text bundled with the client
//!
//! Field names follow the server's Spanish JSON keys.

mod de;

pub mod about;
pub mod content;
pub mod message;
pub mod report;
pub mod user;

pub use about::{Seccion, SobreNosotros};
pub use content::{AreaProtegida, Medida, Normativa, Noticia, Personal, Servicio, Video};
pub use message::{ApiMessage, LoginResponse};
pub use report::{NuevoReporte, ReportStatus, Reporte};
pub use user::{Usuario, Voluntario};
