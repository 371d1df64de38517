/*
[INPUT]:  Raw JSON field values from CoinAPI payloads
[OUTPUT]: Field deserializers that never fail the enclosing body
[POS]:    Data layer - serde helpers shared by REST models and stream messages
[UPDATE]: When a field type needs a new lenient decoder
*/

//! A field whose JSON value its Rust type cannot hold reads as `None` (or is
//! skipped, inside a sequence) instead of failing the whole body.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Decimal from a JSON number or numeric string, out-of-range values read as `None`
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(raw) => parse_decimal(raw.trim()),
        Value::Number(number) => parse_decimal(&number.to_string()),
        _ => None,
    })
}

/// A non-array reads as empty; entries that do not decode are skipped
pub fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
