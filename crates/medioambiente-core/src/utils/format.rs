use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated.trim_end())
    }
}

/// Format an optional string, returning a default if None or blank
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Format a server date as `DD/MM/YYYY`.
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and plain `YYYY-MM-DD`; anything
/// else is returned unchanged.
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        dt.format("%d/%m/%Y").to_string()
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S") {
        dt.format("%d/%m/%Y").to_string()
    } else if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        d.format("%d/%m/%Y").to_string()
    } else {
        date.to_string()
    }
}

/// Format a coordinate pair with 6 decimals, as shown after a GPS fix
pub fn format_coordinates(latitud: f64, longitud: f64) -> String {
    format!("Lat: {:.6}, Lon: {:.6}", latitud, longitud)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hola", 10), "Hola");
        assert_eq!(truncate_string("Hola Mundo", 8), "Hola...");
        assert_eq!(truncate_string("Sí", 2), "Sí");
        // Multi-byte characters count as one
        assert_eq!(truncate_string("Área protegida", 7), "Área...");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(&Some("Ley".into()), "-"), "Ley");
        assert_eq!(format_optional(&Some("  ".into()), "-"), "-");
        assert_eq!(format_optional(&None, "N/D"), "N/D");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-05-01T10:20:00Z"), "01/05/2024");
        assert_eq!(format_date("2024-05-01 10:20:00"), "01/05/2024");
        assert_eq!(format_date("2024-05-01"), "01/05/2024");
        assert_eq!(format_date("ayer"), "ayer");
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(format_coordinates(18.4861, -69.9312), "Lat: 18.486100, Lon: -69.931200");
    }
}
