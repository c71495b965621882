//! Cursor pagination request parameters
//!
//! Cursor requests over-fetch by one: [`CursorRequest::limit`] is
//! `size + 1`, so the caller learns whether another page exists without a
//! count query. The caller trims the extra row before building the
//! [`CursorPage`](crate::CursorPage).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::config::SizeLimits;
use crate::cursor::{decode_cursor, CursorData};
use crate::error::Result;
use crate::query::QueryParams;
use crate::sort::{self, Sort};

/// Cursor-based pagination parameters
///
/// An empty `cursor` means "first page". Deserialized values go through
/// [`CursorRequest::new`], so the size is clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCursorRequest")]
pub struct CursorRequest {
    /// Opaque cursor token, empty for the first page
    pub cursor: String,
    /// Number of items per page
    pub size: u32,
    /// Sort directives, `None` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Sort>>,
}

/// Unclamped wire form of [`CursorRequest`]
#[derive(Deserialize)]
struct RawCursorRequest {
    #[serde(default)]
    cursor: String,
    #[serde(default)]
    size: i64,
    #[serde(default)]
    sort: Option<Vec<Sort>>,
}

impl From<RawCursorRequest> for CursorRequest {
    fn from(raw: RawCursorRequest) -> Self {
        Self::new(raw.cursor, raw.size, raw.sort)
    }
}

impl Default for CursorRequest {
    fn default() -> Self {
        Self {
            cursor: String::new(),
            size: SizeLimits::CURSOR.default_size,
            sort: None,
        }
    }
}

impl CursorRequest {
    /// Create a request, clamping the size
    ///
    /// The cursor is kept verbatim.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pageable::CursorRequest;
    ///
    /// assert_eq!(CursorRequest::new("abc", 0, None).size, 10);
    /// assert_eq!(CursorRequest::new("abc", 5000, None).size, 1000);
    /// assert_eq!(CursorRequest::new("abc", 25, None).limit(), 26);
    /// ```
    pub fn new(cursor: impl Into<String>, size: i64, sort: Option<Vec<Sort>>) -> Self {
        Self::with_limits(cursor, size, sort, &SizeLimits::CURSOR)
    }

    /// Same as [`CursorRequest::new`] with caller-supplied size limits
    pub fn with_limits(
        cursor: impl Into<String>,
        size: i64,
        sort: Option<Vec<Sort>>,
        limits: &SizeLimits,
    ) -> Self {
        Self {
            cursor: cursor.into(),
            size: limits.clamp(size),
            sort,
        }
    }

    /// Read `cursor`, `size` and repeated `sort` parameters
    ///
    /// Missing, non-numeric or non-positive sizes leave the default in
    /// place; larger sizes are capped.
    #[must_use]
    pub fn from_query(params: &QueryParams) -> Self {
        Self::from_query_with_limits(params, &SizeLimits::CURSOR)
    }

    /// Same as [`CursorRequest::from_query`] with caller-supplied size limits
    #[must_use]
    pub fn from_query_with_limits(params: &QueryParams, limits: &SizeLimits) -> Self {
        let cursor = params.get("cursor").unwrap_or_default().to_string();
        let size = params
            .positive_int("size")
            .map_or(limits.default_size, |s| limits.clamp(s));
        let sort = sort::parse_sorts(params.get_all("sort"));

        tracing::trace!(
            has_cursor = !cursor.is_empty(),
            size,
            sorts = sort.as_ref().map_or(0, Vec::len),
            "parsed cursor request"
        );

        Self { cursor, size, sort }
    }

    /// Rows to fetch: one more than the page size
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.size.saturating_add(1)
    }

    /// Whether a cursor was supplied
    #[must_use]
    pub fn has_cursor(&self) -> bool {
        !self.cursor.is_empty()
    }

    /// Decode the cursor token
    ///
    /// An empty cursor is not an error: it yields empty [`CursorData`].
    /// A malformed token is returned as an error for the request layer to
    /// reject.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pageable::{CursorData, CursorRequest};
    ///
    /// let first = CursorRequest::new("", 10, None);
    /// assert_eq!(first.decoded_cursor()?, CursorData::default());
    ///
    /// let token = CursorData::new("42").encode()?;
    /// let next = CursorRequest::new(token, 10, None);
    /// assert_eq!(next.decoded_cursor()?.value, "42");
    ///
    /// assert!(CursorRequest::new("!!!", 10, None).decoded_cursor().is_err());
    /// # Ok::<(), pageable::Error>(())
    /// ```
    pub fn decoded_cursor(&self) -> Result<CursorData> {
        if self.cursor.is_empty() {
            return Ok(CursorData::default());
        }
        decode_cursor(&self.cursor)
    }

    /// `ORDER BY` body such as `created_at desc, id asc`, empty when unsorted
    #[must_use]
    pub fn order_by(&self) -> String {
        sort::order_by(self.sort.as_deref())
    }

    /// Whether any sort is set
    #[must_use]
    pub fn has_sort(&self) -> bool {
        self.sort.is_some()
    }

    /// Drop sorts on fields outside `fields`
    #[must_use]
    pub fn sortable_fields(mut self, fields: &[&str]) -> Self {
        self.sort = sort::filter_sorts_by_fields(self.sort, fields);
        self
    }

    /// Rename sort fields, e.g. API names to column names
    #[must_use]
    pub fn map_sort_fields<K, V>(mut self, field_map: &HashMap<K, V>) -> Self
    where
        K: Borrow<str> + Eq + Hash,
        V: AsRef<str>,
    {
        self.sort = sort::map_sort_fields(self.sort, field_map);
        self
    }

    /// Use `defaults` as the sort only when no sort is set
    ///
    /// An empty `defaults` leaves the sort unset.
    #[must_use]
    pub fn with_default_sort(mut self, defaults: Vec<Sort>) -> Self {
        if self.sort.is_none() {
            self.sort = sort::non_empty(defaults);
        }
        self
    }
}
