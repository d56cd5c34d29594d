//! Institutional text shown on the "Sobre Nosotros" screen.
//!
//! The server has no endpoint for it; it ships with the client.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seccion {
    pub titulo: &'static str,
    pub texto: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SobreNosotros {
    pub secciones: Vec<Seccion>,
    pub valores: Vec<&'static str>,
    pub creditos: &'static str,
}

const HISTORIA: &str = "El Ministerio de Medio Ambiente y Recursos Naturales fue creado \
mediante la Ley 64-00 sobre Medio Ambiente y Recursos Naturales, con la misión de \
establecer la política nacional sobre medio ambiente y recursos naturales del país.";

const MISION: &str = "Proteger, conservar y promover el uso sostenible de los recursos \
naturales y el medio ambiente de la República Dominicana para las presentes y futuras \
generaciones, mediante la formulación y aplicación de políticas, normas y estrategias.";

const VISION: &str = "Ser una institución modelo en la gestión ambiental, reconocida por \
su efectividad, transparencia y compromiso con el desarrollo sostenible del país, \
garantizando un ambiente sano para todos los dominicanos.";

const VALORES: [&str; 5] = [
    "Compromiso con el medio ambiente",
    "Transparencia y rendición de cuentas",
    "Participación ciudadana",
    "Innovación y sostenibilidad",
    "Responsabilidad intergeneracional",
];

const CREDITOS: &str =
    "Aplicación desarrollada como proyecto final del curso de Desarrollo de Apps en ITLA, periodo 3-2025.";

impl SobreNosotros {
    pub fn ministerio() -> Self {
        Self {
            secciones: vec![
                Seccion {
                    titulo: "Historia",
                    texto: HISTORIA,
                },
                Seccion {
                    titulo: "Misión",
                    texto: MISION,
                },
                Seccion {
                    titulo: "Visión",
                    texto: VISION,
                },
            ],
            valores: VALORES.to_vec(),
            creditos: CREDITOS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ministerio_sections_in_screen_order() {
        let about = SobreNosotros::ministerio();
        let titles: Vec<_> = about.secciones.iter().map(|s| s.titulo).collect();
        assert_eq!(titles, ["Historia", "Misión", "Visión"]);
        assert_eq!(about.valores.len(), 5);
        assert!(about.secciones[0].texto.contains("Ley 64-00"));
    }
}
