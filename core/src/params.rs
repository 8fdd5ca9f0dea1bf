//! Parameter sets sent alongside an action.
//!
//! # Design
//! `ParamValue` is a closed sum over the value kinds the endpoint accepts.
//! Each kind has an "unset" sentinel (empty text, zero, `false`) which the
//! `*_opt` helpers use to leave a field out of the payload entirely, so
//! optional arguments never reach the wire as `0` or `""`.
//!
//! `Params` is backed by a `BTreeMap`, which gives a deterministic field
//! order in the encoded body.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// A single form value before encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    /// Coerce any displayable value to text.
    pub fn display(value: impl fmt::Display) -> Self {
        ParamValue::Text(value.to_string())
    }

    /// True when the value equals its kind's sentinel.
    pub fn is_unset(&self) -> bool {
        match self {
            ParamValue::Text(s) => s.is_empty(),
            ParamValue::Int(n) => *n == 0,
            ParamValue::Float(f) => *f == 0.0,
            ParamValue::Bool(b) => !*b,
        }
    }

    /// The textual form written into the request body.
    pub fn to_form_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
            // `f64` Display is the shortest round-trip form and never uses an exponent.
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(value.into())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// One or several ids sent as a single comma-separated field.
///
/// An empty list is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList(pub Vec<i64>);

impl IdList {
    pub fn none() -> Self {
        IdList(Vec::new())
    }
}

impl From<i64> for IdList {
    fn from(id: i64) -> Self {
        // Zero is the sentinel for a single id.
        if id == 0 {
            IdList::none()
        } else {
            IdList(vec![id])
        }
    }
}

impl From<i32> for IdList {
    fn from(id: i32) -> Self {
        IdList::from(i64::from(id))
    }
}

impl From<Vec<i64>> for IdList {
    fn from(ids: Vec<i64>) -> Self {
        IdList(ids)
    }
}

impl From<&[i64]> for IdList {
    fn from(ids: &[i64]) -> Self {
        IdList(ids.to_vec())
    }
}

impl From<IdList> for ParamValue {
    fn from(ids: IdList) -> Self {
        let joined = ids
            .0
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        ParamValue::Text(joined)
    }
}

/// Field name to value mapping for one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    fields: BTreeMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field unconditionally.
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a field unless its value is the sentinel.
    pub fn with_opt(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert_opt(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.fields.insert(key.to_string(), value.into())
    }

    /// Insert unless the value is the sentinel. Returns whether it was stored.
    pub fn insert_opt(&mut self, key: &str, value: impl Into<ParamValue>) -> bool {
        let value = value.into();
        if value.is_unset() {
            return false;
        }
        self.fields.insert(key.to_string(), value);
        true
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_render_as_form_text() {
        assert_eq!(ParamValue::from("abc").to_form_value(), "abc");
        assert_eq!(ParamValue::from(42).to_form_value(), "42");
        assert_eq!(ParamValue::from(-7i64).to_form_value(), "-7");
        assert_eq!(ParamValue::from(9_000_000_000i64).to_form_value(), "9000000000");
        assert_eq!(ParamValue::from(12.5).to_form_value(), "12.5");
        assert_eq!(ParamValue::from(100.0).to_form_value(), "100");
        assert_eq!(ParamValue::from(0.0001).to_form_value(), "0.0001");
        assert_eq!(ParamValue::from(true).to_form_value(), "true");
        assert_eq!(ParamValue::from(false).to_form_value(), "false");
    }

    #[test]
    fn display_coerces_other_types_to_text() {
        let value = ParamValue::display('x');
        assert_eq!(value, ParamValue::Text("x".to_string()));
    }

    #[test]
    fn sentinels_are_unset() {
        assert!(ParamValue::from("").is_unset());
        assert!(ParamValue::from(0).is_unset());
        assert!(ParamValue::from(0.0).is_unset());
        assert!(ParamValue::from(false).is_unset());
        assert!(!ParamValue::from(" ").is_unset());
        assert!(!ParamValue::from(-1).is_unset());
        assert!(!ParamValue::from(true).is_unset());
    }

    #[test]
    fn with_opt_skips_sentinels() {
        let params = Params::new()
            .with("folder_id", 3)
            .with_opt("offset", 0)
            .with_opt("date_from", "")
            .with_opt("task_id", 17);
        assert_eq!(params.len(), 2);
        assert!(!params.contains_key("offset"));
        assert!(!params.contains_key("date_from"));
        assert_eq!(params.get("task_id"), Some(&ParamValue::Int(17)));
    }

    #[test]
    fn with_opt_keeps_offset_one_hundred() {
        let params = Params::new().with_opt("offset", 100);
        assert_eq!(params.get("offset").map(ParamValue::to_form_value).as_deref(), Some("100"));
    }

    #[test]
    fn required_fields_keep_zero() {
        let params = Params::new().with("folder_id", 0);
        assert_eq!(params.get("folder_id"), Some(&ParamValue::Int(0)));
    }

    #[test]
    fn id_list_joins_with_commas() {
        assert_eq!(ParamValue::from(IdList::from(vec![1, 2, 3])).to_form_value(), "1,2,3");
        assert_eq!(ParamValue::from(IdList::from(5)).to_form_value(), "5");
        assert!(ParamValue::from(IdList::from(0)).is_unset());
        assert!(ParamValue::from(IdList::none()).is_unset());
    }

    #[test]
    fn iteration_is_sorted_by_key() {
        let params: Params = [("zeta", 1), ("alpha", 2), ("mid", 3)].into_iter().collect();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }
}
