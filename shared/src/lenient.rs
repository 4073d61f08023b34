//! Tolerant deserializers for stored documents.
//!
//! Earlier servers accepted form-encoded bodies and stored values verbatim,
//! so a number may appear in the data file as a JSON number or as a string
//! (`"300"`, `" 12.5 "`, `""`). Request bodies do not use these; they stay
//! strictly typed.

use serde::de::{Deserializer, Error};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Parse a stored value into a number; blank text counts as absent
fn to_number(value: Option<NumberOrText>) -> Result<Option<f64>, String> {
    match value {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>()
                .map(Some)
                .map_err(|_| format!("expected a number, found {:?}", text))
        }
    }
}

/// `Option<f64>` field that may be stored as a number, a numeric string,
/// an empty string or null
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    to_number(value).map_err(D::Error::custom)
}

/// Non-negative whole number (days, chick counts); null or blank reads as 0
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    match to_number(value).map_err(D::Error::custom)? {
        None => Ok(0),
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => Ok(n as u32),
        Some(n) => Err(D::Error::custom(format!(
            "expected a non-negative whole number, found {}",
            n
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "count")]
        count: u32,
        #[serde(default, deserialize_with = "optional_number")]
        weight: Option<f64>,
    }

    fn parse(json: &str) -> Result<Sample, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        let sample = parse(r#"{"count": "42", "weight": "1.75"}"#).unwrap();
        assert_eq!(sample.count, 42);
        assert_eq!(sample.weight, Some(1.75));

        let sample = parse(r#"{"count": 7, "weight": 2}"#).unwrap();
        assert_eq!(sample.count, 7);
        assert_eq!(sample.weight, Some(2.0));
    }

    #[test]
    fn test_blank_and_null_values() {
        let sample = parse(r#"{"count": "", "weight": null}"#).unwrap();
        assert_eq!(sample.count, 0);
        assert_eq!(sample.weight, None);

        let sample = parse("{}").unwrap();
        assert_eq!(sample.count, 0);
        assert_eq!(sample.weight, None);
    }

    #[test]
    fn test_rejects_values_that_are_not_counts() {
        assert!(parse(r#"{"count": "abc"}"#).is_err());
        assert!(parse(r#"{"count": -3}"#).is_err());
        assert!(parse(r#"{"count": 2.5}"#).is_err());
        assert!(parse(r#"{"weight": "heavy"}"#).is_err());
    }
}
