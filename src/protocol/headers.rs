//! Insertion-ordered frame headers.
//!
//! STOMP headers are semantically an unordered set of unique keys, but the
//! order they were set in is preserved on the wire. Setting an existing key
//! again overwrites its value without moving it.

use indexmap::IndexMap;

/// Ordered mapping from header name to header value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: IndexMap<String, String>,
}

impl Headers {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    /// Set a header. A later set of the same key overwrites the earlier
    /// value and keeps the original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(name.into(), value.into());
    }

    /// Get a header value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    /// Check whether a header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Remove a header, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        // shift_remove keeps the remaining wire order intact
        self.inner.shift_remove(name)
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut headers = Headers::new();
        headers.set("destination", "/queue/a");
        headers.set("receipt", "msg-1");
        headers.set("persistent", "true");

        let names: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["destination", "receipt", "persistent"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut headers = Headers::new();
        headers.set("a", "1");
        headers.set("b", "2");
        headers.set("a", "3");

        assert_eq!(headers.get("a"), Some("3"));
        assert_eq!(headers.len(), 2);
        let names: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_remove() {
        let mut headers = Headers::new();
        headers.set("a", "1");
        headers.set("b", "2");

        assert_eq!(headers.remove("a"), Some("1".to_string()));
        assert!(!headers.contains("a"));
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.remove("a"), None);
    }

    #[test]
    fn test_empty() {
        let headers = Headers::new();
        assert!(headers.is_empty());
        assert_eq!(headers.get("anything"), None);
    }
}
