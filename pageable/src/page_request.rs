//! Offset pagination request parameters
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use pageable::{PageRequest, QueryParams, Sort};
//!
//! let params: QueryParams = [("page", "3"), ("size", "20"), ("sort", "createdAt,desc")]
//!     .into_iter()
//!     .collect();
//!
//! let request = PageRequest::from_query(&params)
//!     .sortable_fields(&["createdAt", "name"])
//!     .map_sort_fields(&HashMap::from([("createdAt", "created_at")]))
//!     .with_default_sort(vec![Sort::asc("id")]);
//!
//! assert_eq!(request.offset(), 40);
//! assert_eq!(request.limit(), 20);
//! assert_eq!(request.order_by(), "created_at desc");
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::config::{SizeLimits, DEFAULT_PAGE};
use crate::query::QueryParams;
use crate::sort::{self, Sort};

/// Offset-based pagination parameters
///
/// `page` is 1-indexed. An unset sort is `None`; there is no
/// "present but empty" sort list. Deserialized values go through
/// [`PageRequest::new`], so they are clamped like any other input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPageRequest")]
pub struct PageRequest {
    /// Page number (1-indexed)
    pub page: u64,
    /// Number of items per page
    pub size: u32,
    /// Sort directives, `None` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Sort>>,
}

/// Unclamped wire form of [`PageRequest`]
#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default)]
    page: i64,
    #[serde(default)]
    size: i64,
    #[serde(default)]
    sort: Option<Vec<Sort>>,
}

impl From<RawPageRequest> for PageRequest {
    fn from(raw: RawPageRequest) -> Self {
        Self::new(raw.page, raw.size, raw.sort)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: SizeLimits::OFFSET.default_size,
            sort: None,
        }
    }
}

impl PageRequest {
    /// Create a request, clamping out-of-range values
    ///
    /// A page below 1 becomes 1. A size below 1 becomes the default size
    /// (10); a size above the maximum (1000) is capped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pageable::PageRequest;
    ///
    /// let request = PageRequest::new(-1, -5, None);
    /// assert_eq!((request.page, request.size), (1, 10));
    ///
    /// let request = PageRequest::new(1, 5000, None);
    /// assert_eq!(request.size, 1000);
    /// ```
    #[must_use]
    pub fn new(page: i64, size: i64, sort: Option<Vec<Sort>>) -> Self {
        Self::with_limits(page, size, sort, &SizeLimits::OFFSET)
    }

    /// Same as [`PageRequest::new`] with caller-supplied size limits
    #[must_use]
    pub fn with_limits(
        page: i64,
        size: i64,
        sort: Option<Vec<Sort>>,
        limits: &SizeLimits,
    ) -> Self {
        let page = u64::try_from(page)
            .ok()
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE);
        Self {
            page,
            size: limits.clamp(size),
            sort,
        }
    }

    /// Read `page`, `size` and repeated `sort` parameters
    ///
    /// Missing, non-numeric or non-positive `page`/`size` values leave the
    /// defaults in place. Sizes above the maximum are capped. Invalid sort
    /// entries are dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pageable::{PageRequest, QueryParams};
    ///
    /// let params: QueryParams = [("page", "abc"), ("size", "0")].into_iter().collect();
    /// let request = PageRequest::from_query(&params);
    /// assert_eq!((request.page, request.size), (1, 10));
    /// ```
    #[must_use]
    pub fn from_query(params: &QueryParams) -> Self {
        Self::from_query_with_limits(params, &SizeLimits::OFFSET)
    }

    /// Same as [`PageRequest::from_query`] with caller-supplied size limits
    #[must_use]
    pub fn from_query_with_limits(params: &QueryParams, limits: &SizeLimits) -> Self {
        let page = params
            .positive_int("page")
            .and_then(|p| u64::try_from(p).ok())
            .unwrap_or(DEFAULT_PAGE);
        let size = params
            .positive_int("size")
            .map_or(limits.default_size, |s| limits.clamp(s));
        let sort = sort::parse_sorts(params.get_all("sort"));

        tracing::trace!(
            page,
            size,
            sorts = sort.as_ref().map_or(0, Vec::len),
            "parsed page request"
        );

        Self { page, size, sort }
    }

    /// Zero-based row offset: `(page - 1) * size`
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(u64::from(self.size))
    }

    /// Row limit, equal to the page size
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.size
    }

    /// `ORDER BY` body such as `name desc, id asc`, empty when unsorted
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
    ///
    /// The sort becomes unset if nothing survives.
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
    ///
    /// # Example
    ///
    /// ```rust
    /// use pageable::{PageRequest, Sort};
    ///
    /// let request = PageRequest::new(1, 10, Some(vec![Sort::desc("name")]))
    ///     .with_default_sort(vec![Sort::asc("id")]);
    /// assert_eq!(request.order_by(), "name desc");
    /// ```
    #[must_use]
    pub fn with_default_sort(mut self, defaults: Vec<Sort>) -> Self {
        if self.sort.is_none() {
            self.sort = sort::non_empty(defaults);
        }
        self
    }
}
