//! URL query string encoding with repeated keys.

use std::fmt;

use url::form_urlencoded;

/// Value stored under one query key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    /// Key occurred more than once, in first-occurrence order
    Many(Vec<String>),
}

impl QueryValue {
    /// All values under the key, in order
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    /// First value under the key, if any
    pub fn first(&self) -> Option<&str> {
        self.values().first().map(String::as_str)
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Single(first) => {
                let first = std::mem::take(first);
                *self = Self::Many(vec![first, value]);
            }
            Self::Many(values) => values.push(value),
        }
    }
}

/// Ordered key to value(s) mapping backing a query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: Vec<(String, QueryValue)>,
}

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        let mut map = Self::new();
        for (key, value) in form_urlencoded::parse(input.as_bytes()) {
            map.append(key.into_owned(), value.into_owned());
        }
        map
    }

    /// Add a value under `key`, keeping earlier values for the same key
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => existing.push(value),
            None => self.entries.push((key, QueryValue::Single(value))),
        }
    }

    /// Add `value` under `key` when present
    pub fn append_opt<T: ToString>(&mut self, key: &str, value: Option<T>) {
        if let Some(value) = value {
            self.append(key, value.to_string());
        }
    }

    /// Add every value under `key`
    pub fn append_all<I, T>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for value in values {
            self.append(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as `key=value` pairs joined by `&`.
    ///
    /// Keys and values are percent-encoded one by one. A key holding several
    /// values is written once per value.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            for item in value.values() {
                serializer.append_pair(key, item);
            }
        }
        serializer.finish()
    }
}

impl fmt::Display for QueryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.append(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryMap, QueryValue};

    #[test]
    fn repeated_keys_are_emitted_separately() {
        let map: QueryMap = [
            ("location", "Andheri West"),
            ("location", "Bandra"),
            ("minPrice", "5000000"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            map.encode(),
            "location=Andheri+West&location=Bandra&minPrice=5000000",
        );
    }

    #[test]
    fn parse_groups_repeated_keys_in_order() {
        let map = QueryMap::parse("?bedrooms=2BHK&location=Powai&bedrooms=3BHK&bedrooms=1BHK");

        assert_eq!(
            map.get("bedrooms"),
            Some(&QueryValue::Many(vec![
                "2BHK".into(),
                "3BHK".into(),
                "1BHK".into(),
            ])),
        );
        assert_eq!(map.get("location"), Some(&QueryValue::Single("Powai".into())));
        let keys: Vec<_> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["bedrooms", "location"]);
    }

    #[test]
    fn special_characters_survive() {
        let mut map = QueryMap::new();
        map.append("keywords", "sea view & 24x7 water = yes?");
        map.append("propertyStatus", "Ready to Move");

        let encoded = map.encode();
        assert!(!encoded.contains(' '));
        assert_eq!(encoded.matches('&').count(), 1);
        assert_eq!(QueryMap::parse(&encoded), map);
    }

    #[test]
    fn percent_encoded_input() {
        let map = QueryMap::parse("keywords=sea%20view&pincode=400050");
        assert_eq!(map.get("keywords").and_then(QueryValue::first), Some("sea view"));
    }

    #[test]
    fn empty_segments_and_bare_keys() {
        let map = QueryMap::parse("&&floor&pincode=");
        assert_eq!(map.get("floor"), Some(&QueryValue::Single(String::new())));
        assert_eq!(map.get("pincode"), Some(&QueryValue::Single(String::new())));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn absent_values_are_omitted() {
        let mut map = QueryMap::new();
        map.append_opt::<i64>("minPrice", None);
        map.append_opt("maxPrice", Some(8_000_000));
        map.append_all::<_, String>("location", Vec::new());

        assert_eq!(map.encode(), "maxPrice=8000000");
    }

    #[test]
    fn empty_map_encodes_to_empty_string() {
        assert_eq!(QueryMap::new().encode(), "");
        assert!(QueryMap::parse("").is_empty());
        assert!(QueryMap::parse("?").is_empty());
    }
}
