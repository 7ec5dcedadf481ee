//! Tolerant `deserialize_with` helpers for the page payload.
//!
//! The storefront's page state is not schema-stable: prices arrive as numbers
//! or numeric strings, flags as booleans or `0`/`1`, lists as arrays or
//! `null`. Each helper reads the raw JSON value and maps anything it does not
//! recognise to "absent" so one odd field never fails the whole page.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings pass through, numbers are rendered as text, anything else is absent.
pub(crate) fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Integers, floats (truncated) and numeric strings.
pub(crate) fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(value_to_i64(&Value::deserialize(d)?))
}

/// Category level: JSON numbers, or strings made only of ASCII digits.
pub(crate) fn level<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().ok()
        }
        n @ Value::Number(_) => value_to_i64(&n),
        _ => None,
    })
}

/// Truthiness: `true`, non-zero numbers, non-empty strings/arrays/objects.
pub(crate) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

/// Arrays keep every element that decodes as `T`; non-arrays become empty.
pub(crate) fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Non-empty objects that decode as `T`. Empty objects count as absent.
pub(crate) fn object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(d)? {
        Value::Object(map) if !map.is_empty() => {
            serde_json::from_value(Value::Object(map)).ok()
        }
        _ => None,
    })
}

/// Any object, including `{}`, decodes as `T`; non-objects are absent.
///
/// For sections whose mere presence matters, where an empty object still
/// means "this page has one".
pub(crate) fn section<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(d)? {
        Value::Object(map) => Some(serde_json::from_value(Value::Object(map)).unwrap_or_default()),
        _ => None,
    })
}

#[allow(clippy::cast_possible_truncation)]
fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}
