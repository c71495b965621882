//! Offset pagination response envelope
//!
//! # Example
//!
//! ```rust
//! use pageable::{Page, PageRequest};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User { id: u64, name: String }
//!
//! let request = PageRequest::new(1, 10, None);
//! let users = vec![
//!     User { id: 1, name: "Alice".to_string() },
//!     User { id: 2, name: "Bob".to_string() },
//! ];
//! let page = Page::new(users, &request, 95);
//!
//! assert_eq!(page.metadata.total_pages, 10);
//! let json = serde_json::to_value(&page).unwrap();
//! assert_eq!(json["metadata"]["totalItems"], 95);
//! ```

#[cfg(feature = "http")]
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::page_request::PageRequest;

/// Offset pagination metadata
///
/// Serialized with camelCase keys: `page`, `size`, `totalItems`,
/// `totalPages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Current page number (1-indexed)
    pub page: u64,
    /// Number of items per page
    pub size: u32,
    /// Total number of items across all pages
    pub total_items: u64,
    /// Total number of pages
    pub total_pages: u64,
}

impl PageMetadata {
    /// Build metadata for `request`, deriving `total_pages` from `total_items`
    ///
    /// `page` and `size` are copied from the request as-is.
    #[must_use]
    pub fn new(request: &PageRequest, total_items: u64) -> Self {
        Self {
            page: request.page,
            size: request.size,
            total_items,
            total_pages: total_pages(total_items, request.size),
        }
    }

    /// Whether a page follows this one
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a page precedes this one
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Ceiling of `total_items / size`, or 0 when either is 0
fn total_pages(total_items: u64, size: u32) -> u64 {
    if total_items == 0 || size == 0 {
        return 0;
    }
    total_items.div_ceil(u64::from(size))
}

/// Page of items with offset pagination metadata
///
/// `items` always serializes as a JSON array, never `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Items on this page
    #[serde(default, deserialize_with = "nullable_items")]
    pub items: Vec<T>,
    /// Pagination metadata
    pub metadata: PageMetadata,
}

impl<T> Page<T> {
    /// Wrap fetched items with metadata derived from `request`
    ///
    /// `items` may be any iterable; pass `None` when the fetch produced
    /// nothing at all.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pageable::{Page, PageRequest};
    ///
    /// let request = PageRequest::new(1, 10, None);
    /// let page = Page::new(None::<u32>, &request, 0);
    /// assert!(page.items.is_empty());
    /// assert_eq!(page.metadata.total_pages, 0);
    /// ```
    pub fn new(
        items: impl IntoIterator<Item = T>,
        request: &PageRequest,
        total_items: u64,
    ) -> Self {
        Self {
            items: items.into_iter().collect(),
            metadata: PageMetadata::new(request, total_items),
        }
    }

    /// Page with no items and a total of zero
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Transform the items, keeping the metadata
    ///
    /// # Example
    ///
    /// ```rust
    /// use pageable::{Page, PageRequest};
    ///
    /// let page = Page::new(vec![1, 2], &PageRequest::default(), 2);
    /// let page = page.map(|n| n.to_string());
    /// assert_eq!(page.items, ["1", "2"]);
    /// ```
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            metadata: self.metadata,
        }
    }

    /// Number of items on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(feature = "http")]
impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Deserialize a missing or `null` item list as empty
pub(crate) fn nullable_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_pages() {
        let request = PageRequest::new(1, 10, None);
        let cases = [(95, 10), (100, 10), (101, 11), (1, 1), (0, 0)];
        for (total, expected) in cases {
            let page = Page::new(Vec::<u8>::new(), &request, total);
            assert_eq!(page.metadata.total_pages, expected, "total {total}");
        }
    }

    #[test]
    fn test_total_pages_zero_size() {
        assert_eq!(total_pages(50, 0), 0);
        assert_eq!(total_pages(0, 0), 0);
    }

    #[test]
    fn test_metadata_copies_request() {
        let request = PageRequest::new(7, 25, None);
        let page = Page::new(vec!["a"], &request, 10);
        assert_eq!(page.metadata.page, 7);
        assert_eq!(page.metadata.size, 25);
        assert_eq!(page.metadata.total_items, 10);
        assert_eq!(page.metadata.total_pages, 1);
    }

    #[test]
    fn test_new_with_two_items() {
        let page = Page::new(vec![1, 2], &PageRequest::new(1, 10, None), 95);
        assert_eq!(page.len(), 2);
        assert_eq!(page.metadata.total_pages, 10);
        assert!(page.metadata.has_next());
        assert!(!page.metadata.has_prev());
    }

    #[test]
    fn test_none_items_serialize_as_empty_array() {
        let page = Page::new(None::<String>, &PageRequest::default(), 0);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"], json!([]));
    }

    #[test]
    fn test_empty_page() {
        let page: Page<u32> = Page::empty(&PageRequest::new(3, 20, None));
        assert!(page.is_empty());
        assert_eq!(page.metadata.page, 3);
        assert_eq!(page.metadata.size, 20);
        assert_eq!(page.metadata.total_items, 0);
        assert_eq!(page.metadata.total_pages, 0);
    }

    #[test]
    fn test_serialized_shape() {
        let page = Page::new(vec![json!({"id": 1})], &PageRequest::new(2, 10, None), 15);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            json!({
                "items": [{"id": 1}],
                "metadata": {"page": 2, "size": 10, "totalItems": 15, "totalPages": 2}
            })
        );
    }

    #[test]
    fn test_deserialize_null_items() {
        let page: Page<u32> = serde_json::from_value(json!({
            "items": null,
            "metadata": {"page": 1, "size": 10, "totalItems": 0, "totalPages": 0}
        }))
        .unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], &PageRequest::new(2, 3, None), 9);
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20, 30]);
        assert_eq!(mapped.metadata.page, 2);
        assert_eq!(mapped.metadata.total_pages, 3);
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_into_response() {
        let page = Page::new(vec![1, 2], &PageRequest::default(), 2);
        let response = page.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["items"], json!([1, 2]));
        assert_eq!(json["metadata"]["totalPages"], 1);
    }
}
