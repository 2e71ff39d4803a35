/// Serde helpers for request payloads and query strings.
///
/// Clients send blank strings for unset filter fields and may send amounts
/// either as JSON numbers or as numeric strings. These helpers normalise both
/// to `Option` values so handlers only see meaningful input.
use serde::{Deserialize, Deserializer};

pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|v| !v.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Accepts `12.5`, `"12.5"`, `""` or `null`. Blank and null map to `None`;
/// anything that is not a finite number is rejected.
pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrString> = Option::deserialize(deserializer)?;
    let value = match raw {
        None => return Ok(None),
        Some(NumberOrString::Number(n)) => n,
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => return Ok(None),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {s}")))?,
    };

    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(serde::de::Error::custom("amount must be a finite number"))
    }
}

/// Amount of a record already on disk. Older writers stored `null` when a
/// client sent a non-numeric amount; such values read as `0.0` so one bad
/// row does not make the whole file unreadable.
pub fn deserialize_stored_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrString> = Option::deserialize(deserializer)?;
    let value = match raw {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        None => None,
    };

    Ok(value.unwrap_or_else(|| {
        tracing::warn!("Stored amount is not a number, reading it as 0");
        0.0
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "deserialize_optional_amount")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        category: Option<String>,
    }

    fn parse(json: &str) -> Result<Payload, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_amount_from_number() {
        let p = parse(r#"{"amount": -12.5}"#).unwrap();
        assert_eq!(p.amount, Some(-12.5));
    }

    #[test]
    fn test_amount_from_string() {
        let p = parse(r#"{"amount": " 42.10 "}"#).unwrap();
        assert_eq!(p.amount, Some(42.10));
    }

    #[test]
    fn test_amount_blank_or_missing() {
        assert_eq!(parse(r#"{"amount": ""}"#).unwrap().amount, None);
        assert_eq!(parse(r#"{"amount": null}"#).unwrap().amount, None);
        assert_eq!(parse("{}").unwrap().amount, None);
    }

    #[test]
    fn test_amount_rejects_garbage() {
        assert!(parse(r#"{"amount": "twelve"}"#).is_err());
        assert!(parse(r#"{"amount": "NaN"}"#).is_err());
        assert!(parse(r#"{"amount": "inf"}"#).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Stored {
        #[serde(default, deserialize_with = "deserialize_stored_amount")]
        amount: f64,
    }

    fn stored(json: &str) -> f64 {
        serde_json::from_str::<Stored>(json).unwrap().amount
    }

    #[test]
    fn test_stored_amount_tolerates_legacy_values() {
        assert_eq!(stored(r#"{"amount": -7.5}"#), -7.5);
        assert_eq!(stored(r#"{"amount": "12"}"#), 12.0);
        assert_eq!(stored(r#"{"amount": null}"#), 0.0);
        assert_eq!(stored(r#"{"amount": "abc"}"#), 0.0);
        assert_eq!(stored("{}"), 0.0);
    }

    #[test]
    fn test_blank_string_is_none() {
        assert_eq!(parse(r#"{"category": "  "}"#).unwrap().category, None);
        assert_eq!(
            parse(r#"{"category": "Food"}"#).unwrap().category.as_deref(),
            Some("Food")
        );
    }
}
