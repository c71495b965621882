//! Axum extractors for pagination requests
//!
//! Both extractors read the request URI query and never reject: bad
//! `page`/`size`/`sort` values fall back to defaults. A malformed cursor
//! surfaces later, from [`CursorRequest::decoded_cursor`], and converts to
//! a 400 response through [`Error`](crate::Error).
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use pageable::{CursorPage, CursorRequest, Page, PageRequest};
//!
//! async fn list_users(request: PageRequest) -> Page<String> {
//!     let request = request.sortable_fields(&["name", "created_at"]);
//!     // ORDER BY {request.order_by()} LIMIT {request.limit()} OFFSET {request.offset()}
//!     Page::empty(&request)
//! }
//!
//! async fn feed(request: CursorRequest) -> pageable::Result<CursorPage<String>> {
//!     let _position = request.decoded_cursor()?;
//!     Ok(CursorPage::empty(request.size))
//! }
//!
//! let app: Router = Router::new()
//!     .route("/users", get(list_users))
//!     .route("/feed", get(feed));
//! ```

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::cursor_request::CursorRequest;
use crate::page_request::PageRequest;
use crate::query::QueryParams;

impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query(&QueryParams::from_uri(&parts.uri)))
    }
}

impl<S> FromRequestParts<S> for CursorRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query(&QueryParams::from_uri(&parts.uri)))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Json, Router,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::cursor::CursorData;
    use crate::cursor_page::CursorPage;
    use crate::error::Result;
    use crate::sort::Sort;

    async fn echo_page(request: PageRequest) -> Json<PageRequest> {
        Json(request)
    }

    async fn echo_cursor(request: CursorRequest) -> Result<CursorPage<String>> {
        let data = request.decoded_cursor()?;
        Ok(CursorPage::new(
            vec![data.value],
            "",
            "",
            false,
            request.has_cursor(),
            request.size,
        ))
    }

    fn app() -> Router {
        Router::new()
            .route("/page", get(echo_page))
            .route("/cursor", get(echo_cursor))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_page_request_extractor() {
        let (status, json) = get_json("/page?page=3&size=20&sort=name,desc&sort=id").await;
        assert_eq!(status, StatusCode::OK);

        let request: PageRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.page, 3);
        assert_eq!(request.size, 20);
        assert_eq!(request.sort, Some(vec![Sort::desc("name"), Sort::asc("id")]));
    }

    #[tokio::test]
    async fn test_page_request_extractor_defaults() {
        let (status, json) = get_json("/page?page=abc&size=-1").await;
        assert_eq!(status, StatusCode::OK);

        let request: PageRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request, PageRequest::default());
    }

    #[tokio::test]
    async fn test_cursor_request_extractor() {
        let token = CursorData::new("42").encode().unwrap();
        let (status, json) = get_json(&format!("/cursor?cursor={token}&size=5")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["items"], serde_json::json!(["42"]));
        assert_eq!(json["metadata"]["size"], 5);
        assert_eq!(json["metadata"]["hasPrev"], true);
    }

    #[tokio::test]
    async fn test_cursor_request_without_cursor() {
        let (status, json) = get_json("/cursor").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["metadata"]["size"], 10);
        assert_eq!(json["metadata"]["hasPrev"], false);
    }

    #[tokio::test]
    async fn test_invalid_cursor_is_bad_request() {
        let (status, json) = get_json("/cursor?cursor=!!!invalid!!!").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_CURSOR");
        assert_eq!(json["status"], 400);
    }
}
