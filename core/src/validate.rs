//! Response validation for catalog records and their paginated envelope.
//!
//! # Design
//! Each record type has one explicit check function that walks the decoded
//! JSON object field by field and pushes a `Violation` for every constraint
//! it breaks. Nothing short-circuits: a product with a bad title and a bad
//! price reports both. The envelope check maps the record check over the
//! item list, prefixing paths with the item index (`products[1].rating`).
//!
//! Only the strict schema is accepted. Post reactions must be the structured
//! `{likes, dislikes}` record; the older bare-count shape is rejected.

use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

use crate::types::{Page, Post, Product, Reactions};

/// One broken constraint: where it happened and why.
///
/// `path` is empty when the value itself (not one of its fields) is wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub reason: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Every violation found in a value, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_reasons(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The first violation recorded at exactly `path`.
    pub fn at(&self, path: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.path == path)
    }

    /// All reasons joined with `", "`.
    pub fn message(&self) -> String {
        join_reasons(&self.violations)
    }
}

fn join_reasons(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.reason.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A record type served as a paginated collection.
pub trait Resource: Sized {
    /// Envelope key and URL path segment, e.g. `products`.
    const COLLECTION: &'static str;
    /// Human-readable singular name used in reasons.
    const NAME: &'static str;

    /// Check `value` found at `path`, pushing violations as they are found.
    ///
    /// Returns the typed record only if every field was valid.
    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) -> Option<Self>;

    fn validate(value: &Value) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();
        match Self::check(value, "", &mut violations) {
            Some(record) if violations.is_empty() => Ok(record),
            _ => Err(ValidationError::new(violations)),
        }
    }
}

impl Resource for Product {
    const COLLECTION: &'static str = "products";
    const NAME: &'static str = "Product";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) -> Option<Self> {
        let mut fields = Fields::open(value, path, Self::NAME, violations)?;
        let id = fields.integer("id", "Id");
        let title = fields.required_text("title", "Title");
        let description = fields.required_text("description", "Description");
        let price = fields.number("price", "Price", 0.0, None);
        let discount_percentage =
            fields.number("discountPercentage", "Discount percentage", 0.0, Some(100.0));
        let rating = fields.number("rating", "Rating", 0.0, Some(5.0));
        let stock = fields.count("stock", "Stock");
        let brand = fields.required_text("brand", "Brand");
        let category = fields.required_text("category", "Category");
        let thumbnail = fields.url("thumbnail", "Thumbnail");
        let images = fields.each("images", "Images", |item, path, violations| {
            url_item(item, path, "Image", violations)
        });

        Some(Product {
            id: id?,
            title: title?,
            description: description?,
            price: price?,
            discount_percentage: discount_percentage?,
            rating: rating?,
            stock: stock?,
            brand: brand?,
            category: category?,
            thumbnail: thumbnail?,
            images: images?,
        })
    }
}

impl Resource for Post {
    const COLLECTION: &'static str = "posts";
    const NAME: &'static str = "Post";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) -> Option<Self> {
        let mut fields = Fields::open(value, path, Self::NAME, violations)?;
        let id = fields.integer("id", "Id");
        let title = fields.text("title", "Title");
        let body = fields.text("body", "Body");
        let user_id = fields.integer("userId", "User id");
        let tags = fields.each("tags", "Tags", |item, path, violations| {
            text_item(item, path, "Tag", violations)
        });
        let reactions = check_reactions(&mut fields);

        Some(Post {
            id: id?,
            title: title?,
            body: body?,
            user_id: user_id?,
            tags: tags?,
            reactions: reactions?,
        })
    }
}

fn check_reactions(fields: &mut Fields<'_>) -> Option<Reactions> {
    let value = fields.get("reactions", "Reactions")?;
    if value.is_number() {
        fields.report(
            "reactions",
            "Reactions must be an object with likes and dislikes counts".to_string(),
        );
        return None;
    }
    let mut reactions = fields.nested("reactions", "Reactions")?;
    let likes = reactions.optional_count("likes", "Likes");
    let dislikes = reactions.optional_count("dislikes", "Dislikes");
    Some(Reactions {
        likes: likes?,
        dislikes: dislikes?,
    })
}

/// Validate a product object.
pub fn validate_product(value: &Value) -> Result<Product, ValidationError> {
    Product::validate(value)
}

/// Validate a post object.
pub fn validate_post(value: &Value) -> Result<Post, ValidationError> {
    Post::validate(value)
}

/// Validate a paginated envelope `{<collection>: [...], total, skip, limit}`.
pub fn validate_page<T: Resource>(value: &Value) -> Result<Page<T>, ValidationError> {
    let mut violations = Vec::new();
    match check_page(value, &mut violations) {
        Some(page) if violations.is_empty() => Ok(page),
        _ => Err(ValidationError::new(violations)),
    }
}

fn check_page<T: Resource>(value: &Value, violations: &mut Vec<Violation>) -> Option<Page<T>> {
    let mut fields = Fields::open(value, "", "Response", violations)?;
    let list_label = format!("{} list", T::NAME);
    let items = fields.each(T::COLLECTION, &list_label, T::check);
    let total = fields.count("total", "Total");
    let skip = fields.count("skip", "Skip");
    let limit = fields.positive("limit", "Limit");

    Some(Page {
        items: items?,
        total: total?,
        skip: skip?,
        limit: limit?,
    })
}

fn url_item(item: &Value, path: &str, label: &str, violations: &mut Vec<Violation>) -> Option<String> {
    match item.as_str() {
        Some(s) if is_absolute_url(s) => Some(s.to_string()),
        Some(_) => {
            violations.push(Violation::new(path, format!("{label} must be a valid URL")));
            None
        }
        None => {
            violations.push(Violation::new(path, format!("{label} must be a string")));
            None
        }
    }
}

fn text_item(item: &Value, path: &str, label: &str, violations: &mut Vec<Violation>) -> Option<String> {
    match item.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            violations.push(Violation::new(path, format!("{label} must be a string")));
            None
        }
    }
}

// `Url::parse` has no base, so relative references fail.
fn is_absolute_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Field reader over one JSON object that records violations as it goes.
struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: String,
    violations: &'a mut Vec<Violation>,
}

impl<'a> Fields<'a> {
    fn open(
        value: &'a Value,
        path: &str,
        name: &str,
        violations: &'a mut Vec<Violation>,
    ) -> Option<Self> {
        match value.as_object() {
            Some(map) => Some(Self {
                map,
                path: path.to_string(),
                violations,
            }),
            None => {
                violations.push(Violation::new(path, format!("{name} must be an object")));
                None
            }
        }
    }

    fn report(&mut self, key: &str, reason: String) {
        let path = child_path(&self.path, key);
        self.violations.push(Violation::new(path, reason));
    }

    /// Required field lookup; a missing key is a violation.
    fn get(&mut self, key: &str, label: &str) -> Option<&'a Value> {
        let map = self.map;
        let value = map.get(key);
        if value.is_none() {
            self.report(key, format!("{label} is required"));
        }
        value
    }

    fn nested(&mut self, key: &str, label: &str) -> Option<Fields<'_>> {
        let value = self.get(key, label)?;
        let path = child_path(&self.path, key);
        Fields::open(value, &path, label, &mut *self.violations)
    }

    fn integer(&mut self, key: &str, label: &str) -> Option<i64> {
        let value = self.get(key, label)?;
        let n = value.as_i64();
        if n.is_none() {
            self.report(key, format!("{label} must be an integer"));
        }
        n
    }

    /// Non-negative integer.
    fn count(&mut self, key: &str, label: &str) -> Option<u64> {
        let value = self.get(key, label)?;
        self.count_value(key, label, value)
    }

    fn optional_count(&mut self, key: &str, label: &str) -> Option<Option<u64>> {
        let map = self.map;
        match map.get(key) {
            None => Some(None),
            Some(value) => self.count_value(key, label, value).map(Some),
        }
    }

    fn count_value(&mut self, key: &str, label: &str, value: &Value) -> Option<u64> {
        if let Some(n) = value.as_u64() {
            return Some(n);
        }
        if value.as_i64().is_some() {
            self.report(key, format!("{label} must be non-negative"));
        } else {
            self.report(key, format!("{label} must be an integer"));
        }
        None
    }

    fn positive(&mut self, key: &str, label: &str) -> Option<u64> {
        let n = self.count(key, label)?;
        if n == 0 {
            self.report(key, format!("{label} must be positive"));
            return None;
        }
        Some(n)
    }

    /// Number within `[min, max]`, inclusive at both ends.
    fn number(&mut self, key: &str, label: &str, min: f64, max: Option<f64>) -> Option<f64> {
        let value = self.get(key, label)?;
        let Some(n) = value.as_f64() else {
            self.report(key, format!("{label} must be a number"));
            return None;
        };
        let in_range = n >= min && max.map_or(true, |max| n <= max);
        if in_range {
            return Some(n);
        }
        let reason = match max {
            Some(max) => format!("{label} must be between {min} and {max}"),
            None if min == 0.0 => format!("{label} must be non-negative"),
            None => format!("{label} must be at least {min}"),
        };
        self.report(key, reason);
        None
    }

    fn text(&mut self, key: &str, label: &str) -> Option<String> {
        let value = self.get(key, label)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.report(key, format!("{label} must be a string"));
                None
            }
        }
    }

    fn required_text(&mut self, key: &str, label: &str) -> Option<String> {
        let text = self.text(key, label)?;
        if text.is_empty() {
            self.report(key, format!("{label} is required"));
            return None;
        }
        Some(text)
    }

    fn url(&mut self, key: &str, label: &str) -> Option<String> {
        let value = self.get(key, label)?;
        let path = child_path(&self.path, key);
        url_item(value, &path, label, &mut *self.violations)
    }

    /// Check every element of an array field with `check`.
    ///
    /// Yields the full list only if every element passed.
    fn each<T, F>(&mut self, key: &str, label: &str, mut check: F) -> Option<Vec<T>>
    where
        F: FnMut(&Value, &str, &mut Vec<Violation>) -> Option<T>,
    {
        let value = self.get(key, label)?;
        let Some(values) = value.as_array() else {
            self.report(key, format!("{label} must be an array"));
            return None;
        };
        let base = child_path(&self.path, key);
        let mut out = Vec::with_capacity(values.len());
        let mut all_valid = true;
        for (i, item) in values.iter().enumerate() {
            let item_path = format!("{base}[{i}]");
            match check(item, &item_path, &mut *self.violations) {
                Some(checked) => out.push(checked),
                None => all_valid = false,
            }
        }
        all_valid.then_some(out)
    }
}
