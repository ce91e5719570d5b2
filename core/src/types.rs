//! Domain types for the catalog API.
//!
//! # Design
//! Records are only ever produced by the validators in `validate`, never by
//! deserializing directly, so every value of these types already satisfies
//! its field constraints. They derive `Serialize` with the API's camelCase
//! names so a validated page serializes back to the shape it was read from.
//! The mock-server crate defines its own DTOs; integration tests catch drift.

use std::num::NonZeroU64;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::validate::Resource;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    pub stock: u64,
    pub brand: String,
    pub category: String,
    pub thumbnail: String,
    pub images: Vec<String>,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: i64,
    pub tags: Vec<String>,
    pub reactions: Reactions,
}

/// Reaction counts on a post. Either count may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Reactions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dislikes: Option<u64>,
}

/// One page of a paginated collection.
///
/// `items.len()` may be smaller than `limit` on the last page; `total` is the
/// server's count of all matching records.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

pub type ProductPage = Page<Product>;
pub type PostPage = Page<Post>;

impl<T: Resource + Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Page", 4)?;
        state.serialize_field(T::COLLECTION, &self.items)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("skip", &self.skip)?;
        state.serialize_field("limit", &self.limit)?;
        state.end()
    }
}

/// Sort order requested from the server or applied locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Value of the `order` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Server-side sort: the field name is passed through as `sortBy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

/// Parameters for one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub skip: u64,
    pub limit: NonZeroU64,
    pub sort: Option<SortSpec>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: crate::paging::DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl PageQuery {
    pub fn new(skip: u64, limit: NonZeroU64) -> Self {
        Self {
            skip,
            limit,
            sort: None,
        }
    }

    pub fn sorted_by(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }
}
