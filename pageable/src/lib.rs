//! # pageable
//!
//! Pagination helpers for REST APIs. Parses pagination parameters from a
//! query string, clamps them, and wraps fetched rows in a serializable
//! response envelope. Nothing here talks to a database: requests only
//! compute `LIMIT`, `OFFSET` and `ORDER BY` fragments plus cursor tokens.
//!
//! ## Features
//!
//! - **Offset pagination**: [`PageRequest`] and [`Page`] with total counts
//! - **Cursor pagination**: [`CursorRequest`] (over-fetch by one) and [`CursorPage`]
//! - **Sorting**: `field,direction` parsing with an identifier whitelist
//! - **Cursors**: URL-safe base64 over a small JSON payload ([`CursorData`])
//! - **HTTP** (`http` feature, on by default): axum extractors and responses
//!
//! ## Example
//!
//! ```rust
//! use pageable::prelude::*;
//!
//! let params: QueryParams = [("page", "2"), ("size", "20"), ("sort", "name,desc")]
//!     .into_iter()
//!     .collect();
//!
//! let request = PageRequest::from_query(&params)
//!     .sortable_fields(&["name", "created_at"])
//!     .with_default_sort(vec![Sort::asc("id")]);
//!
//! let sql = format!(
//!     "SELECT id, name FROM users ORDER BY {} LIMIT {} OFFSET {}",
//!     request.order_by(),
//!     request.limit(),
//!     request.offset(),
//! );
//! assert_eq!(sql, "SELECT id, name FROM users ORDER BY name desc LIMIT 20 OFFSET 20");
//!
//! let page = Page::new(vec!["Zoe", "Yan"], &request, 42);
//! assert_eq!(page.metadata.total_pages, 3);
//! ```

pub mod config;
pub mod cursor;
pub mod cursor_page;
pub mod cursor_request;
pub mod error;
pub mod observability;
pub mod page;
pub mod page_request;
pub mod query;
pub mod sort;

#[cfg(feature = "http")]
mod extract;

pub use config::{
    Config, SizeLimits, DEFAULT_CURSOR_SIZE, DEFAULT_PAGE, DEFAULT_SIZE, MAX_CURSOR_SIZE, MAX_SIZE,
};
pub use cursor::{decode_cursor, encode_cursor, CursorData, CursorDirection};
pub use cursor_page::{CursorPage, CursorPageMetadata};
pub use cursor_request::CursorRequest;
pub use error::{Error, ErrorResponse, Result};
pub use page::{Page, PageMetadata};
pub use page_request::PageRequest;
pub use query::QueryParams;
pub use sort::{
    filter_sorts_by_fields, is_safe_identifier, map_sort_fields, parse_sort, parse_sorts,
    Direction, Sort,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, SizeLimits};
    pub use crate::cursor::{CursorData, CursorDirection};
    pub use crate::cursor_page::{CursorPage, CursorPageMetadata};
    pub use crate::cursor_request::CursorRequest;
    pub use crate::error::{Error, Result};
    pub use crate::observability::init_tracing;
    pub use crate::page::{Page, PageMetadata};
    pub use crate::page_request::PageRequest;
    pub use crate::query::QueryParams;
    pub use crate::sort::{Direction, Sort};
}
