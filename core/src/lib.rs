//! Client core for the product and post catalog API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Every successful response is
//! validated against the strict record schemas before any typed data is
//! handed back.
//!
//! # Design
//! - `CatalogClient` is stateless; it holds only `base_url`.
//! - Each listing is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `validate` collects every violation in one pass; `ApiError` flattens
//!   them into a single message at the client boundary.
//! - `paging` and `sort` hold the table bookkeeping: page offsets, page
//!   counts and in-place column sorts of a fetched page.

pub mod client;
pub mod error;
pub mod http;
pub mod paging;
pub mod sort;
pub mod types;
pub mod validate;

pub use client::{CatalogClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use paging::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use sort::{sort_posts, sort_products, PostColumn, ProductColumn, UnknownColumn};
pub use types::{
    Page, PageQuery, Post, PostPage, Product, ProductPage, Reactions, SortDirection, SortSpec,
};
pub use validate::{validate_page, validate_post, validate_product, Resource, ValidationError, Violation};
