//! # Bundle
//!
//! The associative payload representation of the intent bus. A bundle is an
//! ordered map from string keys to [`BundleValue`]s, which may themselves be
//! nested bundles or lists of bundles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single value stored under a bundle key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleValue {
    /// Plain string extra.
    String(String),
    /// Boolean extra.
    Bool(bool),
    /// Integer extra.
    Int(i64),
    /// A single byte array.
    Bytes(Vec<u8>),
    /// A list of byte arrays (e.g. multi-segment decode data).
    ByteList(Vec<Vec<u8>>),
    /// A string array.
    StringArray(Vec<String>),
    /// A nested bundle.
    Bundle(Bundle),
    /// A list of nested bundles (parcelable array list).
    BundleList(Vec<Bundle>),
}

impl BundleValue {
    /// Short name of the value shape, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Bytes(_) => "bytes",
            Self::ByteList(_) => "byte_list",
            Self::StringArray(_) => "string_array",
            Self::Bundle(_) => "bundle",
            Self::BundleList(_) => "bundle_list",
        }
    }

    /// Borrow the value as a string, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the value as a nested bundle, if it is one.
    #[must_use]
    pub fn as_bundle(&self) -> Option<&Bundle> {
        match self {
            Self::Bundle(b) => Some(b),
            _ => None,
        }
    }
}

impl From<&str> for BundleValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for BundleValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for BundleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for BundleValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<u8>> for BundleValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<Vec<u8>>> for BundleValue {
    fn from(value: Vec<Vec<u8>>) -> Self {
        Self::ByteList(value)
    }
}

impl From<Vec<String>> for BundleValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringArray(value)
    }
}

impl From<Bundle> for BundleValue {
    fn from(value: Bundle) -> Self {
        Self::Bundle(value)
    }
}

impl From<Vec<Bundle>> for BundleValue {
    fn from(value: Vec<Bundle>) -> Self {
        Self::BundleList(value)
    }
}

/// Associative payload of an intent.
///
/// Keys are kept ordered so that rendering and comparisons are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    entries: BTreeMap<String, BundleValue>,
}

impl Bundle {
    /// Create an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value stored under `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<BundleValue>,
    ) -> Option<BundleValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<BundleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&BundleValue> {
        self.entries.get(key)
    }

    /// Get a string extra. Values of any other shape read as absent.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(BundleValue::as_str)
    }

    /// Get a nested bundle extra.
    #[must_use]
    pub fn get_bundle(&self, key: &str) -> Option<&Bundle> {
        self.get(key).and_then(BundleValue::as_bundle)
    }

    /// Get a byte payload as a list of segments.
    ///
    /// A single byte array reads as one segment; a list of byte arrays is
    /// returned as-is.
    #[must_use]
    pub fn get_byte_segments(&self, key: &str) -> Option<Vec<Vec<u8>>> {
        match self.get(key)? {
            BundleValue::Bytes(bytes) => Some(vec![bytes.clone()]),
            BundleValue::ByteList(list) => Some(list.clone()),
            _ => None,
        }
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<BundleValue> {
        self.entries.remove(key)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bundle has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BundleValue)> {
        self.entries.iter()
    }

    /// Render the bundle as compact JSON for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self.entries))
    }
}

impl FromIterator<(String, BundleValue)> for Bundle {
    fn from_iter<I: IntoIterator<Item = (String, BundleValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let inner = Bundle::new().with("NOTIFICATION_TYPE", "SCANNER_STATUS");
        let bundle = Bundle::new()
            .with("RESULT", "SUCCESS")
            .with("COUNT", 3_i64)
            .with("NOTIFICATION", inner.clone());

        assert_eq!(bundle.get_str("RESULT"), Some("SUCCESS"));
        assert_eq!(bundle.get_str("COUNT"), None);
        assert_eq!(bundle.get_bundle("NOTIFICATION"), Some(&inner));
        assert_eq!(bundle.get_bundle("RESULT"), None);
        assert_eq!(bundle.len(), 3);
    }

    #[test]
    fn test_byte_segments() {
        let bundle = Bundle::new()
            .with("single", vec![0x41_u8, 0x42])
            .with("multi", vec![vec![1_u8], vec![2_u8, 3]]);

        assert_eq!(
            bundle.get_byte_segments("single"),
            Some(vec![vec![0x41, 0x42]])
        );
        assert_eq!(
            bundle.get_byte_segments("multi"),
            Some(vec![vec![1], vec![2, 3]])
        );
        assert_eq!(bundle.get_byte_segments("missing"), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut bundle = Bundle::new();
        assert!(bundle.insert("k", "a").is_none());
        let previous = bundle.insert("k", "b");
        assert_eq!(previous, Some(BundleValue::from("a")));
        assert_eq!(bundle.get_str("k"), Some("b"));
    }

    #[test]
    fn test_describe_is_json() {
        let bundle = Bundle::new().with("PROFILE_NAME", "Main");
        let rendered = bundle.describe();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["PROFILE_NAME"]["string"], "Main");
    }

    #[test]
    fn test_serde_roundtrip_nested() {
        let bundle = Bundle::new()
            .with("PLUGIN_CONFIG", vec![Bundle::new().with("PLUGIN_NAME", "BARCODE")]);
        let json = serde_json::to_string(&bundle).unwrap();
        let back: Bundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
    }
}
