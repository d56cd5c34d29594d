//! Lenient deserializers for the ministry API.
//!
//! The backend is inconsistent about numeric fields: ids and coordinates
//! arrive as JSON numbers on some endpoints and as numeric strings on others.

use serde::de;

// Helper to deserialize an integer sent either as a number or a numeric string
pub(crate) fn deserialize_i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct I64Visitor;

    impl<'de> de::Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("an integer or numeric string")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i64::try_from(v).map_err(|_| E::custom(format!("integer out of range: {}", v)))
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            v.trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid integer: {:?}", v)))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

// Helper to deserialize a coordinate sent either as a number or a numeric string
pub(crate) fn deserialize_f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct F64Visitor;

    impl<'de> de::Visitor<'de> for F64Visitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number or numeric string")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            v.trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid number: {:?}", v)))
        }
    }

    deserializer.deserialize_any(F64Visitor)
}

// Helper to deserialize a string field that may come back as null or a number
pub(crate) fn deserialize_string_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct StringVisitor;

    impl<'de> de::Visitor<'de> for StringVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string, number or null")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(StringVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "super::deserialize_i64_lenient")]
        id: i64,
        #[serde(deserialize_with = "super::deserialize_f64_lenient")]
        lat: f64,
        #[serde(default, deserialize_with = "super::deserialize_string_lenient")]
        phone: String,
    }

    #[test]
    fn test_lenient_numbers_accept_strings() {
        let p: Probe =
            serde_json::from_str(r#"{"id": "42", "lat": "18.4861", "phone": 8095551234}"#)
                .expect("parse");
        assert_eq!(p.id, 42);
        assert!((p.lat - 18.4861).abs() < 1e-9);
        assert_eq!(p.phone, "8095551234");
    }

    #[test]
    fn test_lenient_numbers_accept_numbers() {
        let p: Probe = serde_json::from_str(r#"{"id": 7, "lat": -69, "phone": null}"#)
            .expect("parse");
        assert_eq!(p.id, 7);
        assert_eq!(p.lat, -69.0);
        assert_eq!(p.phone, "");
    }

    #[test]
    fn test_lenient_numbers_reject_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"id": "abc", "lat": 1}"#).is_err());
    }
}
