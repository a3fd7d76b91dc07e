//! Fail-soft form inputs.
//!
//! Draft invoices arrive straight from the browser form while the user is
//! still typing, so numeric fields may be blank, half-typed (`"12."`,
//! `"abc"`) or sent as strings. [`FormNumber`] keeps what was typed so the
//! strict validator can report it, while [`FormNumber::value`] always yields a
//! usable number (`0` for anything that is not one) for the live preview.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::str::FromStr;

/// A numeric form field as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormNumber {
    /// Field left empty or absent
    #[default]
    Blank,
    /// Field holds a parseable number
    Value(Decimal),
    /// Field holds something that is not a number
    Invalid(String),
}

impl FormNumber {
    /// Parse raw text the way the form does: surrounding whitespace is
    /// ignored, empty text is blank, scientific notation is accepted.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FormNumber::Blank;
        }

        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(FormNumber::Value)
            .unwrap_or_else(|_| FormNumber::Invalid(raw.to_string()))
    }

    /// Numeric value with the coerce-to-zero contract applied
    pub fn value(&self) -> Decimal {
        match self {
            FormNumber::Value(value) => *value,
            FormNumber::Blank | FormNumber::Invalid(_) => Decimal::ZERO,
        }
    }

    /// Numeric value, or `default` when the field is blank
    pub fn value_or(&self, default: Decimal) -> Decimal {
        match self {
            FormNumber::Blank => default,
            other => other.value(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, FormNumber::Blank)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, FormNumber::Invalid(_))
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FormNumber::Blank,
            Value::String(text) => FormNumber::parse(&text),
            Value::Number(number) => FormNumber::parse(&number.to_string()),
            other => FormNumber::Invalid(other.to_string()),
        }
    }
}

impl From<Decimal> for FormNumber {
    fn from(value: Decimal) -> Self {
        FormNumber::Value(value)
    }
}

impl From<i64> for FormNumber {
    fn from(value: i64) -> Self {
        FormNumber::Value(Decimal::from(value))
    }
}

impl From<&str> for FormNumber {
    fn from(raw: &str) -> Self {
        FormNumber::parse(raw)
    }
}

impl<'de> Deserialize<'de> for FormNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(FormNumber::from_json)
    }
}

impl Serialize for FormNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FormNumber::Blank => serializer.serialize_none(),
            FormNumber::Value(value) => rust_decimal::serde::float::serialize(value, serializer),
            FormNumber::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

/// Deserialize a reference id (`productId`, `taxId`) leniently.
///
/// Select boxes post either a number or its string form; anything else,
/// including an empty selection, becomes `0`, which means "unset".
pub fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => number.as_i64().unwrap_or(0),
        Value::String(text) => text.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
