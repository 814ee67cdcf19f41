//! Lenient scalar decoding for backend payloads
//!
//! The BOM API returns identifiers and counters either as JSON numbers or
//! as strings depending on which system produced the row. Everything is
//! canonicalised to one representation here so equality checks downstream
//! never depend on the wire type.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn into_key(self) -> Option<String> {
        match self {
            Scalar::Int(v) => Some(v.to_string()),
            Scalar::Float(v) => Some(float_key(v)),
            Scalar::Bool(v) => Some(u8::from(v).to_string()),
            Scalar::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }

    fn into_i64(self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(v),
            Scalar::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Scalar::Float(_) => None,
            Scalar::Bool(v) => Some(i64::from(v)),
            Scalar::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64))
            }
        }
    }

    fn into_f64(self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(v as f64),
            Scalar::Float(v) => Some(v),
            Scalar::Bool(v) => Some(if v { 1.0 } else { 0.0 }),
            Scalar::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        }
    }
}

/// Renders a float without a trailing `.0` when it holds an integral value.
fn float_key(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// Normalizes an identifier-like value to its string form.
///
/// Blank strings are treated as absent.
pub fn normalize_key(raw: &str) -> Option<String> {
    Scalar::Text(raw.to_string()).into_key()
}

pub fn opt_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.and_then(Scalar::into_key))
}

pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.and_then(Scalar::into_i64))
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.and_then(Scalar::into_f64))
}

/// Seconds arrive as a number or as `HH:MM:SS` text; negative values
/// from hand-edited rows are dropped.
pub fn opt_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.and_then(|scalar| match scalar {
        Scalar::Text(s) if s.contains(':') => s
            .parse::<super::StepDuration>()
            .ok()
            .map(|duration| duration.as_secs()),
        other => other.into_i64().and_then(|v| u64::try_from(v).ok()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "opt_key")]
        key: Option<String>,
        #[serde(default, deserialize_with = "opt_i64")]
        count: Option<i64>,
        #[serde(default, deserialize_with = "opt_f64")]
        qty: Option<f64>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_number_and_string_keys_compare_equal() {
        assert_eq!(sample(r#"{"key": 42}"#).key, sample(r#"{"key": "42"}"#).key);
        assert_eq!(sample(r#"{"key": 42.0}"#).key.as_deref(), Some("42"));
    }

    #[test]
    fn test_blank_key_is_absent() {
        assert!(sample(r#"{"key": "   "}"#).key.is_none());
        assert!(sample(r#"{"key": null}"#).key.is_none());
        assert!(sample("{}").key.is_none());
    }

    #[test]
    fn test_counter_from_string() {
        assert_eq!(sample(r#"{"count": "3"}"#).count, Some(3));
        assert_eq!(sample(r#"{"count": "abc"}"#).count, None);
    }

    #[test]
    fn test_quantity_accepts_decimal_comma() {
        assert_eq!(sample(r#"{"qty": "2,5"}"#).qty, Some(2.5));
    }

    #[test]
    fn test_normalize_key_trims() {
        assert_eq!(normalize_key(" B1 ").as_deref(), Some("B1"));
        assert_eq!(normalize_key(""), None);
    }
}
