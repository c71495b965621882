//! Decoded query-string parameters
//!
//! [`QueryParams`] is an ordered multi-map: repeated keys such as
//! `?sort=a&sort=b` keep every value, while [`QueryParams::get`] returns the
//! first one.
//!
//! # Example
//!
//! ```rust
//! use pageable::QueryParams;
//!
//! let params: QueryParams = [("page", "2"), ("sort", "name"), ("sort", "id,desc")]
//!     .into_iter()
//!     .collect();
//!
//! assert_eq!(params.get("page"), Some("2"));
//! assert_eq!(params.get_all("sort").collect::<Vec<_>>(), ["name", "id,desc"]);
//! assert_eq!(params.positive_int("page"), Some(2));
//! ```

use serde::Deserialize;

/// Ordered multi-map of query parameters
///
/// Deserializes from a URL-encoded query string, so it can be used with
/// `axum::extract::Query<QueryParams>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the query component of a request URI
    ///
    /// A malformed query string yields an empty set; pagination parameters
    /// are optional, so a bad query never fails the request here.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn from_uri(uri: &axum::http::Uri) -> Self {
        match axum::extract::Query::<Self>::try_from_uri(uri) {
            Ok(axum::extract::Query(params)) => params,
            Err(rejection) => {
                tracing::debug!(error = %rejection, "ignoring malformed query string");
                Self::default()
            }
        }
    }

    /// First value for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order of appearance
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether any value is present for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// First value for `key` parsed as a strictly positive decimal integer
    ///
    /// Returns `None` when the key is missing, the value is not a number, or
    /// the number is zero or negative.
    #[must_use]
    pub fn positive_int(&self, key: &str) -> Option<i64> {
        self.get(key)
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|n| *n > 0)
    }

    /// Append a parameter
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Number of key/value pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
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
