//! Multi-valued request parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the free-text query parameter.
pub const QUERY_PARAM: &str = "q";

/// Request parameters, where each name may carry several values.
///
/// Mirrors how browsers submit forms: repeated checkboxes produce repeated
/// names (`socket=AM5&socket=LGA1700`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    values: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query string. A leading
    /// `?` is ignored.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Appends a value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// The last value submitted for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name)?.last().map(String::as_str)
    }

    /// Every value submitted for `name`, in submission order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The trimmed free-text query, if one was given.
    pub fn query(&self) -> Option<&str> {
        self.get(QUERY_PARAM)
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_and_encoded_values() {
        let params = QueryParams::from_query_string("?q=ryzen+7&socket=AM5&socket=LGA%201700&tdp_max=");
        assert_eq!(params.query(), Some("ryzen 7"));
        assert_eq!(params.get_all("socket"), ["AM5".to_string(), "LGA 1700".to_string()]);
        assert_eq!(params.get("socket"), Some("LGA 1700"));
        assert_eq!(params.get("tdp_max"), Some(""));
        assert!(params.get_all("missing").is_empty());
    }

    #[test]
    fn blank_query_is_absent() {
        let params = QueryParams::new().with("q", "   ");
        assert_eq!(params.query(), None);
    }
}
