use std::fmt;

use indexmap::IndexMap;
use url::form_urlencoded;

use crate::{Error, Result, encode::Encode};

/// An ordered key to values multimap for building URL-encoded query strings.
///
/// Nullable types write into this through [`Encode::encode_values`]. Keys keep their first insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryValues(IndexMap<String, Vec<String>>);

impl QueryValues {
    /// Creates a new, empty `QueryValues` collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` string. Repeated keys accumulate.
    pub fn parse(query: &str) -> Self {
        let mut values = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            values.add(key, value);
        }
        values
    }

    /// Sets `key` to the single value `value`, replacing any existing values for that key.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// Appends `value` to the values for `key`.
    pub fn add<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Returns the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Returns every value for `key`, empty if the key is absent.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns `true` if `key` is present.
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key`, returning its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.0.shift_remove(key)
    }

    /// Encodes `value` under `key` through its query hook. Null values leave the collection unchanged.
    pub fn insert<V>(&mut self, key: &str, value: V) -> Result<()>
    where
        V: Encode,
    {
        value
            .encode_values(key, self)
            .map_err(|source| Error::KeyEncode {
                key: key.to_string(),
                source,
            })
    }

    /// Consumes `self`, inserts a key-value pair, and returns `Self` for
    /// chaining.
    pub fn val<V>(mut self, key: &str, value: V) -> Result<Self>
    where
        V: Encode,
    {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Returns `true` if the collection contains no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of keys in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over keys and their values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Render as an `application/x-www-form-urlencoded` string in insertion order.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.0 {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

impl fmt::Display for QueryValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use serde::ser::Error as _;

    use super::*;
    use crate::EncodeError;

    #[derive(serde::Serialize)]
    struct Unencodable;

    impl Encode for Unencodable {
        fn encode_text(&self) -> std::result::Result<String, EncodeError> {
            Ok(String::new())
        }

        fn encode_values(
            &self,
            _: &str,
            _: &mut QueryValues,
        ) -> std::result::Result<(), EncodeError> {
            Err(serde_json::Error::custom("unencodable").into())
        }

        fn write_record<W: std::io::Write>(&self, _: W) -> std::result::Result<(), EncodeError> {
            Ok(())
        }
    }

    #[test]
    fn test_insert_error_names_key() {
        let mut values = QueryValues::new();
        values.set("other", "x");
        let err = values.insert("when", Unencodable).unwrap_err();
        assert!(matches!(err, Error::KeyEncode { ref key, .. } if key == "when"));
        assert!(err.to_string().contains("when"));
        assert_eq!(values.get("other"), Some("x"));
        assert!(!values.has("when"));
    }

    #[test]
    fn test_set_replaces() {
        let mut values = QueryValues::new();
        values.add("a", "1");
        values.add("a", "2");
        assert_eq!(values.get_all("a"), ["1", "2"]);

        values.set("a", "3");
        assert_eq!(values.get_all("a"), ["3"]);
        assert_eq!(values.get("a"), Some("3"));
    }

    #[test]
    fn test_missing_key() {
        let values = QueryValues::new();
        assert!(!values.has("a"));
        assert_eq!(values.get("a"), None);
        assert!(values.get_all("a").is_empty());
    }

    #[test]
    fn test_encode_order_and_escaping() {
        let mut values = QueryValues::new();
        values.set("z", "last one");
        values.set("a", "x&y");
        values.add("z", "again");
        assert_eq!(values.encode(), "z=last+one&z=again&a=x%26y");
        assert_eq!(values.to_string(), values.encode());
    }

    #[test]
    fn test_parse() {
        let values = QueryValues::parse("a=1&b=hello+world&a=2");
        assert_eq!(values.len(), 2);
        assert_eq!(values.get_all("a"), ["1", "2"]);
        assert_eq!(values.get("b"), Some("hello world"));
    }

    #[test]
    fn test_remove() {
        let mut values = QueryValues::parse("a=1&b=2");
        assert_eq!(values.remove("a"), Some(vec!["1".to_string()]));
        assert_eq!(values.keys().collect::<Vec<_>>(), ["b"]);
        assert!(!values.is_empty());
    }
}
