//! Ordered query parameters and the empty-value sanitizer.
//!
//! Form submissions produce every field, filled or not. Before a query is put
//! back into a URL, [`QueryMap::reject_empty`] drops the blank ones so that
//! navigations don't carry `?path_prefix=&status=` noise.

use crate::uri::{decode_form_component, encode_component};

/// Insertion-ordered query parameters.
///
/// A key maps to `None` when the caller knows about the field but has no
/// value for it; such keys are never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: Vec<(String, Option<String>)>,
}

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (with or without the leading `?`).
    ///
    /// Keys and values are form-decoded. A key without `=` maps to an empty
    /// value; a repeated key keeps its first position and its last value.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut map = Self::new();
        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            map.insert(decode_form_component(key), Some(decode_form_component(value)));
        }
        map
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        let key = key.into();
        let value = value.map(Into::into);
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        self.entries.remove(pos).1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only the keys whose value is present and non-empty, in order.
    pub fn reject_empty(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(_, v)| v.as_deref().is_some_and(|v| !v.is_empty()))
                .cloned()
                .collect(),
        }
    }

    /// Serialize to `?k=v&...`, or `""` when nothing would be emitted.
    pub fn to_query_string(&self) -> String {
        let pairs: Vec<String> = self
            .entries
            .iter()
            .filter_map(|(k, v)| {
                v.as_deref()
                    .map(|v| format!("{}={}", encode_component(k), encode_component(v)))
            })
            .collect();
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for QueryMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QueryMap {
        QueryMap::new()
            .with("path_prefix", Some(""))
            .with("status", Some("enabled"))
            .with("mtime_after", None::<String>)
            .with("limit", Some("20"))
    }

    #[test]
    fn reject_empty_drops_blank_and_missing_values() {
        let sanitized = sample().reject_empty();
        let keys: Vec<&str> = sanitized.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["status", "limit"]);
    }

    #[test]
    fn reject_empty_is_idempotent() {
        let once = sample().reject_empty();
        assert_eq!(once.reject_empty(), once);
    }

    #[test]
    fn reject_empty_keeps_input_order() {
        let map = QueryMap::new()
            .with("b", Some("2"))
            .with("a", Some("1"))
            .with("c", Some("3"));
        let sanitized = map.reject_empty();
        let keys: Vec<&str> = sanitized.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn query_string_encodes_values() {
        let map = QueryMap::new().with("path_prefix", Some("data/archives"));
        assert_eq!(map.to_query_string(), "?path_prefix=data%2Farchives");
    }

    #[test]
    fn query_string_is_empty_without_values() {
        assert_eq!(QueryMap::new().to_query_string(), "");
        let map = QueryMap::new().with("x", None::<String>);
        assert_eq!(map.to_query_string(), "");
    }

    #[test]
    fn parse_decodes_form_encoding() {
        let map = QueryMap::parse("?path_prefix=data%2Fa+b&status=&flag");
        assert_eq!(map.get("path_prefix"), Some("data/a b"));
        assert_eq!(map.get("status"), Some(""));
        assert_eq!(map.get("flag"), Some(""));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut map = QueryMap::parse("a=1&b=2");
        map.insert("a", Some("3"));
        assert_eq!(map.to_query_string(), "?a=3&b=2");
    }

    #[test]
    fn remove_returns_value() {
        let mut map = QueryMap::parse("up=1&a=2");
        assert_eq!(map.remove("up"), Some("1".to_string()));
        assert!(!map.contains_key("up"));
        assert_eq!(map.remove("missing"), None);
    }
}
