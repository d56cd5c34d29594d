//! Plain-text rendering of API data.
//!
//! Each function turns one model into the lines a screen would show; the
//! caller prints them.

use medioambiente_core::models::{
    AreaProtegida, Medida, Normativa, Noticia, Personal, ReportStatus, Reporte, Servicio,
    SobreNosotros, Usuario, Video,
};
use medioambiente_core::utils::{format_coordinates, format_date, format_optional, truncate_string};

/// Width for one-line descriptions in lists
const SUMMARY_WIDTH: usize = 80;

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

pub fn user(u: &Usuario) -> String {
    format!(
        "{}\n  Cédula:   {}\n  Correo:   {}\n  Teléfono: {}",
        u.display_name(),
        or_dash(&u.cedula),
        u.correo,
        or_dash(&u.telefono),
    )
}

pub fn news_item(n: &Noticia) -> String {
    let mut out = format!("[{}] {}", format_date(&n.fecha), n.titulo);
    if let Some(fuente) = n.fuente.as_deref().filter(|f| !f.trim().is_empty()) {
        out.push_str(&format!(" ({})", fuente));
    }
    out.push_str(&format!("\n  {}", truncate_string(&n.contenido, SUMMARY_WIDTH)));
    out
}

pub fn video(v: &Video) -> String {
    let duracion = v
        .duracion
        .as_deref()
        .map(|d| format!(" [{}]", d))
        .unwrap_or_default();
    format!("{}{}\n  {}", v.titulo, duracion, v.url)
}

pub fn area_summary(a: &AreaProtegida) -> String {
    format!("#{} {} - {} ({})", a.id, a.nombre, a.tipo, a.ubicacion)
}

pub fn area_detail(a: &AreaProtegida) -> String {
    let mut out = format!(
        "{}\n  Tipo:      {}\n  Ubicación: {}\n  {}",
        a.nombre,
        a.tipo,
        a.ubicacion,
        format_coordinates(a.latitud, a.longitud)
    );
    if let Some(area) = a.area.as_deref() {
        out.push_str(&format!("\n  Extensión: {} km²", area));
    }
    if let Some(fecha) = a.fecha_creacion.as_deref() {
        out.push_str(&format!("\n  Creada:    {}", format_date(fecha)));
    }
    out.push_str(&format!("\n\n{}", a.descripcion));
    out
}

/// One map pin per area, coordinates to 4 decimals as in the detail card
pub fn area_marker(a: &AreaProtegida) -> String {
    format!(
        "{:>8.4} {:>9.4}  {} {} - {}",
        a.latitud,
        a.longitud,
        AreaProtegida::MARKER_COLOR,
        a.nombre,
        or_dash(&a.tipo)
    )
}

pub fn about(s: &SobreNosotros) -> String {
    let mut out = String::new();
    for seccion in &s.secciones {
        out.push_str(&format!("{}\n  {}\n\n", seccion.titulo, seccion.texto));
    }
    out.push_str("Nuestros Valores\n");
    for valor in &s.valores {
        out.push_str(&format!("  * {}\n", valor));
    }
    out.push_str(&format!("\n{}", s.creditos));
    out
}

pub fn measure(m: &Medida, detailed: bool) -> String {
    let categoria = format_optional(&m.categoria, "General");
    if detailed {
        format!("{} [{}]\n\n{}", m.titulo, categoria, m.descripcion)
    } else {
        format!("#{} {} [{}]", m.id, m.titulo, categoria)
    }
}

pub fn service(s: &Servicio) -> String {
    format!("{}\n  {}", s.nombre, truncate_string(&s.descripcion, SUMMARY_WIDTH))
}

pub fn staff(p: &Personal) -> String {
    let mut out = format!("{} - {}", p.nombre, p.cargo);
    if let Some(dep) = p.departamento.as_deref() {
        out.push_str(&format!(" ({})", dep));
    }
    if let Some(email) = p.email.as_deref() {
        out.push_str(&format!("\n  {}", email));
    }
    out
}

pub fn regulation(n: &Normativa) -> String {
    let numero = n
        .numero
        .as_deref()
        .map(|num| format!(" N° {}", num))
        .unwrap_or_default();
    let mut out = format!("[{}{}] {}\n  {}", n.tipo, numero, n.titulo, n.descripcion);
    if let Some(fecha) = n.fecha.as_deref() {
        out.push_str(&format!("\n  Fecha: {}", format_date(fecha)));
    }
    if let Some(url) = n.documento_url.as_deref() {
        out.push_str(&format!("\n  Documento: {}", url));
    }
    out
}

pub fn report_summary(r: &Reporte) -> String {
    format!(
        "{} [{}] {} - {}",
        r.codigo,
        r.estado,
        r.titulo,
        format_date(&r.fecha)
    )
}

pub fn report_detail(r: &Reporte) -> String {
    let mut out = format!(
        "{} - {}\n  Estado: {}\n  Fecha:  {}\n  {}\n  Foto:   {}\n\n{}",
        r.codigo,
        r.titulo,
        r.estado,
        format_date(&r.fecha),
        format_coordinates(r.latitud, r.longitud),
        or_dash(&r.foto),
        r.descripcion
    );
    if r.has_ministry_comment() {
        out.push_str(&format!(
            "\n\nComentario del ministerio:\n{}",
            r.comentario_ministerio.as_deref().unwrap_or_default()
        ));
    }
    out
}

pub fn report_marker(r: &Reporte) -> String {
    format!(
        "{:>10.6} {:>11.6}  {} {} - {} ({})",
        r.latitud,
        r.longitud,
        r.estado.color(),
        r.codigo,
        r.titulo,
        r.estado
    )
}

/// Counts per status, in legend order
pub fn status_legend(reports: &[Reporte]) -> String {
    let count = |status: &ReportStatus| reports.iter().filter(|r| &r.estado == status).count();
    let others = reports
        .iter()
        .filter(|r| matches!(r.estado, ReportStatus::Other(_)))
        .count();
    let mut out = format!(
        "{} Pendiente: {}  {} En Proceso: {}  {} Resuelto: {}",
        ReportStatus::Pendiente.color(),
        count(&ReportStatus::Pendiente),
        ReportStatus::EnProceso.color(),
        count(&ReportStatus::EnProceso),
        ReportStatus::Resuelto.color(),
        count(&ReportStatus::Resuelto),
    );
    if others > 0 {
        out.push_str(&format!("  Otros: {}", others));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(estado: &str) -> Reporte {
        serde_json::from_str(&format!(
            r#"{{"id":1,"codigo":"REP-1","titulo":"Tala","descripcion":"Árboles","foto":"",
                "latitud":18.5,"longitud":-69.9,"fecha":"2024-05-01 10:00:00","estado":"{}"}}"#,
            estado
        ))
        .expect("report")
    }

    #[test]
    fn test_user_blank_fields() {
        let u: Usuario = serde_json::from_str(r#"{"id":1,"nombre":"Ana","correo":"ana@test.com"}"#)
            .expect("user");
        let text = user(&u);
        assert!(text.starts_with("Ana\n"));
        assert!(text.contains("Cédula:   -"));
    }

    #[test]
    fn test_report_summary() {
        assert_eq!(report_summary(&report("Pendiente")), "REP-1 [Pendiente] Tala - 01/05/2024");
    }

    #[test]
    fn test_report_detail_includes_comment_only_when_present() {
        let mut r = report("Resuelto");
        assert!(!report_detail(&r).contains("Comentario"));
        r.comentario_ministerio = Some("Caso cerrado".into());
        let detail = report_detail(&r);
        assert!(detail.contains("Comentario del ministerio:\nCaso cerrado"));
        assert!(detail.contains("Foto:   -"));
    }

    #[test]
    fn test_status_legend_counts() {
        let reports = vec![
            report("Pendiente"),
            report("Pendiente"),
            report("Resuelto"),
            report("Archivado"),
        ];
        let legend = status_legend(&reports);
        assert!(legend.contains("Pendiente: 2"));
        assert!(legend.contains("En Proceso: 0"));
        assert!(legend.contains("Resuelto: 1"));
        assert!(legend.ends_with("Otros: 1"));
    }

    #[test]
    fn test_report_marker_uses_status_color() {
        assert!(report_marker(&report("En Proceso")).contains("#2196F3 REP-1"));
    }

    #[test]
    fn test_area_marker() {
        let a: AreaProtegida = serde_json::from_str(
            r#"{"id":3,"nombre":"Parque Nacional del Este","tipo":"Parque Nacional",
                "latitud":"18.2345678","longitud":-68.6543219}"#,
        )
        .expect("area");
        assert_eq!(
            area_marker(&a),
            " 18.2346  -68.6543  #2E7D32 Parque Nacional del Este - Parque Nacional"
        );
    }

    #[test]
    fn test_about_lists_mission_and_values() {
        let text = about(&SobreNosotros::ministerio());
        assert!(text.starts_with("Historia\n"));
        assert!(text.contains("Misión\n  Proteger, conservar"));
        assert!(text.contains("Visión\n  Ser una institución modelo"));
        assert!(text.contains("  * Participación ciudadana\n"));
        assert!(text.ends_with("periodo 3-2025."));
    }

    #[test]
    fn test_regulation_optional_parts() {
        let n: Normativa = serde_json::from_str(
            r#"{"id":1,"titulo":"Ley General","descripcion":"Medio ambiente","tipo":"Ley","numero":"64-00"}"#,
        )
        .expect("normativa");
        let text = regulation(&n);
        assert!(text.starts_with("[Ley N° 64-00] Ley General"));
        assert!(!text.contains("Documento"));
    }
}
