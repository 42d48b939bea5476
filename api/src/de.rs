//! Lenient field readers for upstream JSON.
//!
//! Every reader accepts any JSON value. A value of the wrong shape reads as
//! absent rather than failing the record it belongs to.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Non-blank string, or a number rendered as text (ids arrive as both).
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Number, or a string holding one ("145", " 18.2").
pub(crate) fn number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().parse().ok(),
        value @ Value::Number(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Nested object; anything that is not an object reads as absent.
pub(crate) fn nested<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// List of objects. Non-list values read as empty, non-object items are skipped.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

pub(crate) fn text_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    text(deserializer).map(Option::unwrap_or_default)
}

/// Loose truthiness for status fields: `true`, a non-zero number, or "1"/"true"/"yes".
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "text")]
        id: Option<String>,
        #[serde(default, deserialize_with = "number")]
        runs: Option<u32>,
        #[serde(default, deserialize_with = "number")]
        overs: Option<f64>,
        #[serde(default, deserialize_with = "list")]
        items: Vec<Sample>,
    }

    fn sample(value: serde_json::Value) -> Sample {
        serde_json::from_value(value).expect("lenient readers never fail an object")
    }

    #[test]
    fn ids_accept_strings_and_numbers() {
        assert_eq!(sample(json!({"id": 42})).id.as_deref(), Some("42"));
        assert_eq!(sample(json!({"id": "abc"})).id.as_deref(), Some("abc"));
        assert_eq!(sample(json!({"id": "  "})).id, None);
        assert_eq!(sample(json!({"id": null})).id, None);
        assert_eq!(sample(json!({"id": [1]})).id, None);
    }

    #[test]
    fn numbers_parse_from_strings_and_reject_garbage() {
        let p = sample(json!({"runs": "145", "overs": "18.2"}));
        assert_eq!(p.runs, Some(145));
        assert_eq!(p.overs, Some(18.2));

        let p = sample(json!({"runs": "lots", "overs": {"x": 1}}));
        assert_eq!(p.runs, None);
        assert_eq!(p.overs, None);

        assert_eq!(sample(json!({"runs": -3})).runs, None);
    }

    #[test]
    fn lists_skip_non_objects() {
        let p = sample(json!({"items": [{"id": 1}, 7, "x", {"id": "2"}]}));
        let ids: Vec<_> = p.items.iter().filter_map(|i| i.id.as_deref()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        assert!(sample(json!({"items": {"id": 1}})).items.is_empty());
    }

    #[test]
    fn truthiness_matches_loose_status_fields() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("true")));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!(null)));
    }
}
