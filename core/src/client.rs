//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state between
//! calls. Each listing is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Page, PageQuery, Post, PostPage, Product, ProductPage};
use crate::validate::{validate_page, Resource};

/// Public catalog API the client talks to unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Synchronous, stateless client for the catalog API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_products(&self, query: &PageQuery) -> HttpRequest {
        self.build_list::<Product>(query)
    }

    pub fn build_list_posts(&self, query: &PageQuery) -> HttpRequest {
        self.build_list::<Post>(query)
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<ProductPage, ApiError> {
        parse_list(response)
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<PostPage, ApiError> {
        parse_list(response)
    }

    fn build_list<T: Resource>(&self, query: &PageQuery) -> HttpRequest {
        let mut params = vec![
            ("skip".to_string(), query.skip.to_string()),
            ("limit".to_string(), query.limit.to_string()),
        ];
        if let Some(sort) = &query.sort {
            params.push(("sortBy".to_string(), sort.field.clone()));
            params.push(("order".to_string(), sort.direction.as_param().to_string()));
        }
        debug!(
            collection = T::COLLECTION,
            skip = query.skip,
            limit = query.limit.get(),
            sort = ?query.sort,
            "Building list request"
        );
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{}", self.base_url, T::COLLECTION),
            query: params,
            headers: Vec::new(),
        }
    }
}

fn parse_list<T: Resource>(response: HttpResponse) -> Result<Page<T>, ApiError> {
    check_status(&response)?;
    let body: Value = serde_json::from_str(&response.body).map_err(|e| {
        warn!(collection = T::COLLECTION, error = %e, "Response body is not JSON");
        ApiError::decode(e.to_string())
    })?;
    validate_page(&body).map_err(|e| {
        warn!(
            collection = T::COLLECTION,
            violations = e.violations().len(),
            "Response failed validation"
        );
        ApiError::from(e)
    })
}

/// Map non-2xx responses to a transport error.
///
/// The server's `{"message": ...}` payload wins when present.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = server_message(&response.body)
        .unwrap_or_else(|| format!("request failed with status {}", response.status));
    warn!(status = response.status, %message, "Request failed");
    Err(ApiError::status(response.status, message))
}

fn server_message(body: &str) -> Option<String> {
    let payload: Value = serde_json::from_str(body).ok()?;
    payload.get("message")?.as_str().map(str::to_string)
}
