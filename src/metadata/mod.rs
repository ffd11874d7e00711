//! Transaction metadata module - buy/sell provider records for display
//!
//! Provider payloads are untrusted JSON. Every accessor here degrades to
//! `None` on a missing or mistyped field instead of failing, and the
//! projections fill the gaps with `"unknown"` or `0`.

mod display;
mod provider;
mod trade;

pub use display::*;
pub use provider::*;
pub use trade::*;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Direction of a provider transaction from the user's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Buy,
    Sell,
}

/// Buy/sell providers the wallet integrates with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Moonpay,
    Onramper,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Moonpay => f.write_str("Moonpay"),
            Provider::Onramper => f.write_str("Onramper"),
        }
    }
}

/// Non-empty text value; numbers are rendered as text
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Finite numeric value; numeric strings are parsed
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Text at a JSON pointer such as `/baseCurrency/code`
pub(crate) fn text_at(raw: &Value, pointer: &str) -> Option<String> {
    raw.pointer(pointer).and_then(as_text)
}

/// Number at a JSON pointer
pub(crate) fn number_at(raw: &Value, pointer: &str) -> Option<f64> {
    raw.pointer(pointer).and_then(as_number)
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_text))
}

pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_number))
}

pub(crate) fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_bool))
}

/// A provider record; anything but a JSON object reads as absent
pub(crate) fn lenient_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|record| serde_json::from_value(record).ok()))
}
