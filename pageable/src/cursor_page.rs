//! Cursor pagination response envelope

#[cfg(feature = "http")]
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::page::nullable_items;

/// Cursor pagination metadata
///
/// Cursor tokens are passed through untouched. An absent cursor is an
/// empty string, so `nextCursor`/`prevCursor` are always present in JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPageMetadata {
    /// Token for the following page, empty when there is none
    #[serde(default)]
    pub next_cursor: String,
    /// Token for the preceding page, empty when there is none
    #[serde(default)]
    pub prev_cursor: String,
    /// Whether a following page exists
    pub has_next: bool,
    /// Whether a preceding page exists
    pub has_prev: bool,
    /// Number of items per page
    pub size: u32,
}

/// Page of items with cursor pagination metadata
///
/// # Example
///
/// ```rust
/// use pageable::{CursorData, CursorPage, CursorRequest};
///
/// let request = CursorRequest::new("", 2, None);
///
/// // Rows fetched with `LIMIT request.limit()`
/// let mut rows = vec![1, 2, 3];
/// let has_next = rows.len() > request.size as usize;
/// rows.truncate(request.size as usize);
///
/// let next = match rows.last() {
///     Some(last) if has_next => CursorData::new(last.to_string()).encode()?,
///     _ => String::new(),
/// };
///
/// let page = CursorPage::new(rows, next, "", has_next, false, request.size);
/// assert_eq!(page.items, [1, 2]);
/// assert!(page.metadata.has_next);
/// # Ok::<(), pageable::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct CursorPage<T> {
    /// Items on this page
    #[serde(default, deserialize_with = "nullable_items")]
    pub items: Vec<T>,
    /// Pagination metadata
    pub metadata: CursorPageMetadata,
}

impl<T> CursorPage<T> {
    /// Wrap fetched items with already-encoded cursor tokens
    pub fn new(
        items: impl IntoIterator<Item = T>,
        next_cursor: impl Into<String>,
        prev_cursor: impl Into<String>,
        has_next: bool,
        has_prev: bool,
        size: u32,
    ) -> Self {
        Self {
            items: items.into_iter().collect(),
            metadata: CursorPageMetadata {
                next_cursor: next_cursor.into(),
                prev_cursor: prev_cursor.into(),
                has_next,
                has_prev,
                size,
            },
        }
    }

    /// Page with no items, no cursors and no neighbours
    pub fn empty(size: u32) -> Self {
        Self::new(Vec::new(), "", "", false, false, size)
    }

    /// Transform the items, keeping the metadata
    pub fn map<U, F>(self, f: F) -> CursorPage<U>
    where
        F: FnMut(T) -> U,
    {
        CursorPage {
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
impl<T: Serialize> IntoResponse for CursorPage<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_passes_metadata_through() {
        let page = CursorPage::new(vec!["a", "b"], "next123", "prev456", true, true, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page.metadata.next_cursor, "next123");
        assert_eq!(page.metadata.prev_cursor, "prev456");
        assert!(page.metadata.has_next);
        assert!(page.metadata.has_prev);
        assert_eq!(page.metadata.size, 2);
    }

    #[test]
    fn test_empty() {
        let page: CursorPage<u32> = CursorPage::empty(20);
        assert!(page.is_empty());
        assert_eq!(
            page.metadata,
            CursorPageMetadata {
                size: 20,
                ..CursorPageMetadata::default()
            }
        );
    }

    #[test]
    fn test_none_items_serialize_as_empty_array() {
        let page = CursorPage::new(None::<u32>, "", "", false, false, 10);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"], json!([]));
    }

    #[test]
    fn test_empty_cursors_serialize_as_strings() {
        let json = serde_json::to_value(CursorPage::<u32>::empty(10)).unwrap();
        assert_eq!(
            json,
            json!({
                "items": [],
                "metadata": {
                    "nextCursor": "",
                    "prevCursor": "",
                    "hasNext": false,
                    "hasPrev": false,
                    "size": 10
                }
            })
        );
    }

    #[test]
    fn test_deserialize_null_items() {
        let page: CursorPage<String> = serde_json::from_value(json!({
            "items": null,
            "metadata": {"nextCursor": "abc", "hasNext": true, "hasPrev": false, "size": 5}
        }))
        .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.metadata.next_cursor, "abc");
        assert_eq!(page.metadata.prev_cursor, "");
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = CursorPage::new(vec![1, 2], "n", "", true, false, 2).map(|n| n + 1);
        assert_eq!(page.items, vec![2, 3]);
        assert_eq!(page.metadata.next_cursor, "n");
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_into_response() {
        let response = CursorPage::new(vec!["x"], "tok", "", true, false, 1).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["metadata"]["nextCursor"], "tok");
        assert_eq!(json["items"], json!(["x"]));
    }
}
