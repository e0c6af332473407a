//! Canonical request payloads
//!
//! A [`Payload`] is an ordered list of key/value pairs. It is serialized exactly once
//! into a form-urlencoded string; that string is both what gets signed and what gets
//! transmitted, as the query string for GET or the body for POST.

use crate::error::Result;

/// Ordered key/value mapping sent with every API call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    pairs: Vec<(String, String)>,
}

impl Payload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, keeping insertion order
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append a field only when a value is present
    pub fn push_opt(&mut self, key: impl Into<String>, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Look up the first value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Serialize to the canonical `key=value&...` form
    pub fn encode(&self) -> Result<String> {
        Ok(serde_urlencoded::to_string(&self.pairs)?)
    }
}

impl<K, V> FromIterator<(K, V)> for Payload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
