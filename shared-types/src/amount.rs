//! Money amounts as they travel over the wire.
//!
//! The backend serializes `NUMERIC` columns as strings (`"100.50"`) while
//! freshly created rows and form input produce plain numbers. Everything is
//! coerced to `f64` here so downstream code never has to care.

use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountError {
    #[error("Сумма не указана")]
    Empty,

    #[error("Сумма не является числом: {0}")]
    NotANumber(String),
}

/// Parse a user- or server-provided amount.
///
/// Accepts a decimal comma (`"1500,50"`), spaces used as thousands
/// separators (`"1 500"`) and a trailing rouble sign.
pub fn parse_amount(raw: &str) -> Result<f64, AmountError> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('₽')
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return Err(AmountError::Empty);
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AmountError::NotANumber(raw.to_string())),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// `deserialize_with` target for amount fields.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => Ok(value),
        RawAmount::Text(text) => parse_amount(&text).map_err(de::Error::custom),
    }
}
