//! Serde helpers for numbers that arrive either as JSON numbers or as
//! numeric strings.
//!
//! The endpoint is inconsistent: the same id can be `5` in one response and
//! `"5"` in another. Every helper here accepts both, treats `null` and `""`
//! as absent, and rejects text that is not a number.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

fn raw_to_int<E: serde::de::Error>(raw: Raw) -> Result<Option<i64>, E> {
    match raw {
        Raw::Int(n) => Ok(Some(n)),
        Raw::Float(f) => float_to_int(f).map(Some),
        Raw::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            if let Ok(n) = s.parse::<i64>() {
                return Ok(Some(n));
            }
            match s.parse::<f64>() {
                Ok(f) => float_to_int(f).map(Some),
                Err(_) => Err(E::custom(format!("expected an integer, got {s:?}"))),
            }
        }
        Raw::Bool(b) => Err(E::custom(format!("expected an integer, got {b}"))),
    }
}

fn float_to_int<E: serde::de::Error>(f: f64) -> Result<i64, E> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(E::custom(format!("expected an integer, got {f}")))
    }
}

fn raw_to_float<E: serde::de::Error>(raw: Raw) -> Result<Option<f64>, E> {
    match raw {
        Raw::Int(n) => Ok(Some(n as f64)),
        Raw::Float(f) => Ok(Some(f)),
        Raw::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("expected a number, got {s:?}")))
        }
        Raw::Bool(b) => Err(E::custom(format!("expected a number, got {b}"))),
    }
}

/// `Option<i64>` from `5`, `"5"`, `5.0`, `null` or `""`.
pub fn int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Raw>::deserialize(deserializer)? {
        Some(raw) => raw_to_int(raw),
        None => Ok(None),
    }
}

/// `Option<f64>` from `12.5`, `"12.5"`, `12`, `null` or `""`.
pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Raw>::deserialize(deserializer)? {
        Some(raw) => raw_to_float(raw),
        None => Ok(None),
    }
}

/// `Vec<i64>` where each element may be a number or a numeric string.
/// `null` decodes to an empty list; empty-string elements are dropped.
pub fn int_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Raw>>::deserialize(deserializer)?.unwrap_or_default();
    let mut out = Vec::with_capacity(items.len());
    for raw in items {
        if let Some(n) = raw_to_int(raw)? {
            out.push(n);
        }
    }
    Ok(out)
}

/// `Vec<T>` that also accepts `null`.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `Option<bool>` from `true`/`false`, `1`/`0` or their string forms.
pub fn opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Bool(b)) => Ok(Some(b)),
        Some(Raw::Int(n)) => Ok(Some(n != 0)),
        Some(Raw::Float(f)) => Ok(Some(f != 0.0)),
        Some(Raw::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            "" => Ok(None),
            other => Err(D::Error::custom(format!("expected a boolean, got {other:?}"))),
        },
    }
}

/// Like [`opt_flag`], with absent meaning `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_flag(deserializer)?.unwrap_or(false))
}
