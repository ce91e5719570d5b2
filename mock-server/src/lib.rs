use std::{cmp::Ordering, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Page size the catalog API uses when `limit` is not given.
pub const DEFAULT_LIMIT: usize = 30;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    pub stock: i64,
    pub brand: String,
    pub category: String,
    pub thumbnail: String,
    pub images: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: i64,
    pub tags: Vec<String>,
    pub reactions: Reactions,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reactions {
    pub likes: u64,
    pub dislikes: u64,
}

/// Read-only data set served by the mock.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

type Failure = (StatusCode, Json<ErrorBody>);
pub type Db = Arc<Catalog>;

pub fn app() -> Router {
    app_with(Catalog::sample())
}

pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    Router::new()
        .route("/products", get(list_products))
        .route("/posts", get(list_posts))
        .fallback(not_found)
        .with_state(db)
}

/// Log filter from `RUST_LOG` directives, falling back to `info` so the
/// listening address is always printed.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Catalog::sample()).await
}

pub async fn run_with(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(catalog)).await
}

async fn list_products(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, Failure> {
    paginate("products", &db.products, &params).map(Json)
}

async fn list_posts(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, Failure> {
    paginate("posts", &db.posts, &params).map(Json)
}

async fn not_found() -> Failure {
    failure(StatusCode::NOT_FOUND, "Not found")
}

fn failure(status: StatusCode, message: &str) -> Failure {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
}

/// Slice `items` the way the catalog API does: optional sort, then
/// `skip`/`limit`. `limit=0` returns every remaining item; the reported
/// limit stays positive even for an empty collection.
fn paginate<T: Serialize>(key: &str, items: &[T], params: &ListParams) -> Result<Value, Failure> {
    let descending = match params.order.as_deref() {
        None | Some("asc") => false,
        Some("desc") => true,
        Some(_) => {
            return Err(failure(
                StatusCode::BAD_REQUEST,
                "Order can be: 'asc' or 'desc'",
            ))
        }
    };

    let mut values = items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?;

    if let Some(field) = params.sort_by.as_deref() {
        values.sort_by(|a, b| {
            let ordering = compare_field(a, b, field);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    let total = values.len();
    let skip = params.skip.unwrap_or(0);
    let limit = match params.limit.unwrap_or(DEFAULT_LIMIT) {
        0 => total.max(1),
        n => n,
    };
    let page: Vec<Value> = values.into_iter().skip(skip).take(limit).collect();
    debug!(key, total, skip, limit, returned = page.len(), "List");

    let mut body = Map::new();
    body.insert(key.to_string(), Value::Array(page));
    body.insert("total".to_string(), total.into());
    body.insert("skip".to_string(), skip.into());
    body.insert("limit".to_string(), limit.into());
    Ok(Value::Object(body))
}

/// Numbers compare numerically, strings lexically; anything else is a tie.
fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

impl Catalog {
    /// Small fixed data set shaped like the public catalog API.
    pub fn sample() -> Self {
        let products = [
            ("Essence Mascara Lash Princess", "Essence", "beauty", 9.99, 7.17, 4.94, 5),
            ("Eyeshadow Palette with Mirror", "Glamour Beauty", "beauty", 19.99, 5.5, 3.28, 44),
            ("Powder Canister", "Velvet Touch", "beauty", 14.99, 18.14, 3.82, 59),
            ("Red Lipstick", "Chic Cosmetics", "beauty", 12.99, 19.03, 2.51, 68),
            ("Calvin Klein CK One", "Calvin Klein", "fragrances", 49.99, 0.32, 4.85, 17),
            ("Annibale Colombo Bed", "Annibale Colombo", "furniture", 1899.99, 8.57, 4.77, 88),
            ("Apple", "Fresh Farms", "groceries", 1.99, 12.62, 4.19, 8),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (title, brand, category, price, discount, rating, stock))| {
            let slug = title.to_lowercase().replace(' ', "-");
            let base = format!("https://cdn.dummyjson.com/products/images/{category}/{slug}");
            Product {
                id: i as i64 + 1,
                title: title.to_string(),
                description: format!("{title} from {brand}."),
                price,
                discount_percentage: discount,
                rating,
                stock,
                brand: brand.to_string(),
                category: category.to_string(),
                thumbnail: format!("{base}/thumbnail.png"),
                images: vec![format!("{base}/1.png"), format!("{base}/2.png")],
            }
        })
        .collect();

        let posts = [
            ("His mother had always taught him", 121, &["history", "american", "crime"][..], 192, 25),
            ("He was an expert but not in a discipline", 91, &["french", "fiction", "english"][..], 859, 32),
            ("Dave watched as the forest burned up on the hill.", 16, &["magical", "history", "french"][..], 1448, 39),
            ("All he wanted was a candy bar.", 47, &["mystery", "english", "american"][..], 359, 18),
            ("Hopes and dreams were dashed that day.", 131, &["crime", "mystery", "love"][..], 119, 30),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (title, user_id, tags, likes, dislikes))| Post {
            id: i as i64 + 1,
            title: title.to_string(),
            body: format!("{title} It should have been expected."),
            user_id,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reactions: Reactions { likes, dislikes },
        })
        .collect();

        Self { products, posts }
    }
}
