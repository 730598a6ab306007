//! Nullable values as they arrive from the budget API
//!
//! The server encodes optional numbers and dates either as a bare value, as
//! `null`, or as a presence wrapper (`{ "value": .., "isPresent": .. }`, or
//! the raw `{ "Float64": .., "Valid": .. }` / `{ "Time": .., "Valid": .. }`
//! shapes). Every domain field that carries such a value goes through
//! [`extract_amount`] or [`extract_date`]; nothing else inspects the shapes.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::money::Money;

/// A possibly-absent amount in any of the server's encodings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NullableAmount {
    Bare(Money),
    Wrapped {
        #[serde(rename = "value", alias = "Float64", default)]
        value: Option<Money>,
        #[serde(rename = "isPresent", alias = "Valid")]
        is_present: bool,
    },
}

/// A possibly-absent date in any of the server's encodings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NullableDate {
    Bare(WireDate),
    Wrapped {
        #[serde(rename = "value", alias = "Time", default)]
        value: Option<WireDate>,
        #[serde(rename = "isPresent", alias = "Valid")]
        is_present: bool,
    },
}

/// A calendar date accepting both `YYYY-MM-DD` and RFC 3339 timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WireDate(pub NaiveDate);

impl<'de> Deserialize<'de> for WireDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_wire_date(&raw)
            .map(WireDate)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
    }
}

fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// The amount if the server marked it present, else `None`
pub fn extract_amount(raw: Option<&NullableAmount>) -> Option<Money> {
    match raw? {
        NullableAmount::Bare(amount) => Some(*amount),
        NullableAmount::Wrapped { value, is_present } => {
            if *is_present {
                *value
            } else {
                None
            }
        }
    }
}

/// The date if the server marked it present, else `None`
pub fn extract_date(raw: Option<&NullableDate>) -> Option<NaiveDate> {
    match raw? {
        NullableDate::Bare(date) => Some(date.0),
        NullableDate::Wrapped { value, is_present } => {
            if *is_present {
                value.map(|d| d.0)
            } else {
                None
            }
        }
    }
}

/// serde adapter: read any amount encoding into `Option<Money>`
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NullableAmount> = Option::deserialize(deserializer)?;
    Ok(extract_amount(raw.as_ref()))
}

/// serde adapter: like [`deserialize_amount`], with an absent value read as zero
pub fn deserialize_amount_or_zero<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_amount(deserializer)?.unwrap_or_default())
}

/// serde adapter: read any date encoding into `Option<NaiveDate>`
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NullableDate> = Option::deserialize(deserializer)?;
    Ok(extract_date(raw.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(json: &str) -> Option<Money> {
        let raw: Option<NullableAmount> = serde_json::from_str(json).unwrap();
        extract_amount(raw.as_ref())
    }

    fn date(json: &str) -> Option<NaiveDate> {
        let raw: Option<NullableDate> = serde_json::from_str(json).unwrap();
        extract_date(raw.as_ref())
    }

    #[test]
    fn test_bare_amount() {
        assert_eq!(amount("95000"), Some(Money::from_units(95000)));
        assert_eq!(amount("12.34"), Some(Money::from_cents(1234)));
    }

    #[test]
    fn test_null_amount() {
        assert_eq!(amount("null"), None);
    }

    #[test]
    fn test_wrapped_amount() {
        assert_eq!(
            amount(r#"{"value": 10.5, "isPresent": true}"#),
            Some(Money::from_cents(1050))
        );
        assert_eq!(amount(r#"{"value": 10.5, "isPresent": false}"#), None);
    }

    #[test]
    fn test_server_wrapped_amount() {
        assert_eq!(
            amount(r#"{"Float64": 260, "Valid": true}"#),
            Some(Money::from_units(260))
        );
        assert_eq!(amount(r#"{"Float64": 0, "Valid": false}"#), None);
    }

    #[test]
    fn test_present_zero_is_not_absent() {
        assert_eq!(amount(r#"{"Float64": 0, "Valid": true}"#), Some(Money::zero()));
    }

    #[test]
    fn test_dates() {
        let jan_15 = NaiveDate::from_ymd_opt(2025, 1, 15);
        assert_eq!(date(r#""2025-01-15""#), jan_15);
        assert_eq!(date(r#""2025-01-15T10:00:00Z""#), jan_15);
        assert_eq!(
            date(r#"{"Time": "2025-01-15T00:00:00Z", "Valid": true}"#),
            jan_15
        );
        assert_eq!(
            date(r#"{"Time": "0001-01-01T00:00:00Z", "Valid": false}"#),
            None
        );
        assert_eq!(date("null"), None);
    }

    #[test]
    fn test_invalid_date_is_an_error() {
        assert!(serde_json::from_str::<Option<NullableDate>>(r#""yesterday""#).is_err());
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_amount")]
        actual: Option<Money>,
    }

    #[test]
    fn test_field_adapter() {
        let missing: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.actual, None);

        let wrapped: Row =
            serde_json::from_str(r#"{"actual": {"Float64": 1.5, "Valid": true}}"#).unwrap();
        assert_eq!(wrapped.actual, Some(Money::from_cents(150)));
    }
}
