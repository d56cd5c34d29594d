//! Form checks run before any request is sent.
//!
//! Messages are the user-facing Spanish texts shown by the app.

use thiserror::Error;

use crate::models::{NuevoReporte, Voluntario};

/// Minimum length for a new password
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ingrese su correo electrónico")]
    MissingEmail,

    #[error("Correo electrónico inválido")]
    InvalidEmail,

    #[error("Ingrese su contraseña")]
    MissingPassword,

    #[error("Todos los campos son obligatorios")]
    MissingFields,

    #[error("Las contraseñas nuevas no coinciden")]
    PasswordMismatch,

    #[error("La contraseña debe tener al menos 6 caracteres")]
    PasswordTooShort,

    #[error("Ingrese un título")]
    MissingTitle,

    #[error("Ingrese una descripción")]
    MissingDescription,

    #[error("Debe tomar una foto")]
    MissingPhoto,

    #[error("Debe obtener la ubicación")]
    MissingLocation,

    #[error("Coordenadas fuera de rango")]
    InvalidLocation,
}

/// `local@domain.tld` with no whitespace and a single `@`
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // At least one dot with something on both sides of it
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len(),
        None => false,
    }
}

pub fn validate_login(correo: &str, clave: &str) -> Result<(), ValidationError> {
    let correo = correo.trim();
    if correo.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !is_valid_email(correo) {
        return Err(ValidationError::InvalidEmail);
    }
    if clave.trim().is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(())
}

pub fn validate_recovery_email(correo: &str) -> Result<(), ValidationError> {
    if is_valid_email(correo.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_volunteer(v: &Voluntario) -> Result<(), ValidationError> {
    let any_blank = v.form_fields().iter().any(|(_, value)| value.is_empty());
    if any_blank {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_email(v.correo.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password_change(
    actual: &str,
    nueva: &str,
    confirmacion: &str,
) -> Result<(), ValidationError> {
    if actual.is_empty() || nueva.is_empty() || confirmacion.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if nueva != confirmacion {
        return Err(ValidationError::PasswordMismatch);
    }
    if nueva.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Check a report draft. Coordinates are optional until the location is
/// captured, hence the separate arguments.
pub fn validate_report(
    titulo: &str,
    descripcion: &str,
    foto: Option<&[u8]>,
    latitud: Option<f64>,
    longitud: Option<f64>,
) -> Result<(), ValidationError> {
    if titulo.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if descripcion.trim().is_empty() {
        return Err(ValidationError::MissingDescription);
    }
    match foto {
        Some(bytes) if !bytes.is_empty() => {}
        _ => return Err(ValidationError::MissingPhoto),
    }
    let (Some(lat), Some(lon)) = (latitud, longitud) else {
        return Err(ValidationError::MissingLocation);
    };
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(ValidationError::InvalidLocation);
    }
    Ok(())
}

/// Validate a draft and build the submission
pub fn build_report(
    titulo: &str,
    descripcion: &str,
    foto: Option<Vec<u8>>,
    latitud: Option<f64>,
    longitud: Option<f64>,
) -> Result<NuevoReporte, ValidationError> {
    validate_report(titulo, descripcion, foto.as_deref(), latitud, longitud)?;
    match (foto, latitud, longitud) {
        (Some(foto), Some(latitud), Some(longitud)) => Ok(NuevoReporte {
            titulo: titulo.trim().to_string(),
            descripcion: descripcion.trim().to_string(),
            foto,
            latitud,
            longitud,
        }),
        (None, _, _) => Err(ValidationError::MissingPhoto),
        _ => Err(ValidationError::MissingLocation),
    }
}
