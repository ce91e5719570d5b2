//! Client-side column sorting of an already fetched page.
//!
//! Table headers name a column; the page's items are re-ordered in place
//! without another request. Sorts are stable, so rows that compare equal
//! keep their server order.

use std::cmp::Ordering;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{Post, Product, SortDirection, SortSpec};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column `{0}` is not sortable")]
pub struct UnknownColumn(pub String);

/// Sortable columns of the products table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductColumn {
    Title,
    Price,
    Rating,
    Brand,
}

/// Sortable columns of the posts table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostColumn {
    Title,
    /// Ordered by like count; a missing count sorts as zero.
    Reactions,
}

impl ProductColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductColumn::Title => "title",
            ProductColumn::Price => "price",
            ProductColumn::Rating => "rating",
            ProductColumn::Brand => "brand",
        }
    }

    /// The same ordering requested from the server instead.
    pub fn server_sort(self, direction: SortDirection) -> SortSpec {
        SortSpec::new(self.as_str(), direction)
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            ProductColumn::Title => a.title.cmp(&b.title),
            ProductColumn::Price => a.price.total_cmp(&b.price),
            ProductColumn::Rating => a.rating.total_cmp(&b.rating),
            ProductColumn::Brand => a.brand.cmp(&b.brand),
        }
    }
}

impl PostColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            PostColumn::Title => "title",
            PostColumn::Reactions => "reactions",
        }
    }

    fn compare(self, a: &Post, b: &Post) -> Ordering {
        match self {
            PostColumn::Title => a.title.cmp(&b.title),
            PostColumn::Reactions => likes(a).cmp(&likes(b)),
        }
    }
}

fn likes(post: &Post) -> u64 {
    post.reactions.likes.unwrap_or(0)
}

impl FromStr for ProductColumn {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(ProductColumn::Title),
            "price" => Ok(ProductColumn::Price),
            "rating" => Ok(ProductColumn::Rating),
            "brand" => Ok(ProductColumn::Brand),
            other => Err(UnknownColumn(other.to_string())),
        }
    }
}

impl FromStr for PostColumn {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(PostColumn::Title),
            "reactions" => Ok(PostColumn::Reactions),
            other => Err(UnknownColumn(other.to_string())),
        }
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

pub fn sort_products(products: &mut [Product], column: ProductColumn, direction: SortDirection) {
    products.sort_by(|a, b| directed(column.compare(a, b), direction));
}

pub fn sort_posts(posts: &mut [Post], column: PostColumn, direction: SortDirection) {
    posts.sort_by(|a, b| directed(column.compare(a, b), direction));
}
