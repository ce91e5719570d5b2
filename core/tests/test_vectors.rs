//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes page inputs, expected requests, simulated
//! responses, and either the expected validated page or the expected error.
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences.

use std::num::NonZeroU64;

use catalog_core::{
    ApiError, CatalogClient, ErrorKind, HttpMethod, HttpRequest, HttpResponse, PageQuery,
    SortDirection, SortSpec,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> CatalogClient {
    CatalogClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> ErrorKind {
    match s {
        "Transport" => ErrorKind::Transport,
        "Decode" => ErrorKind::Decode,
        "Validation" => ErrorKind::Validation,
        other => panic!("unknown error kind: {other}"),
    }
}

fn parse_query(input: &Value) -> PageQuery {
    let skip = input["skip"].as_u64().unwrap();
    let limit = NonZeroU64::new(input["limit"].as_u64().unwrap()).unwrap();
    let query = PageQuery::new(skip, limit);
    match input.get("sortBy").and_then(Value::as_str) {
        Some(field) => {
            let direction = match input["order"].as_str() {
                Some("desc") => SortDirection::Descending,
                _ => SortDirection::Ascending,
            };
            query.sorted_by(SortSpec::new(field, direction))
        }
        None => query,
    }
}

/// Simulated bodies are either a raw string or inline JSON.
fn simulated_response(sim: &Value) -> HttpResponse {
    let body = match &sim["body"] {
        Value::String(raw) => raw.clone(),
        json => json.to_string(),
    };
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body,
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    let expected_query: Vec<(String, String)> = expected["query"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.query, expected_query, "{name}: query");
    assert!(req.headers.is_empty(), "{name}: headers");
}

fn assert_outcome<T: serde::Serialize>(name: &str, case: &Value, result: Result<T, ApiError>) {
    if let Some(expected_error) = case.get("expected_error") {
        let err = match result {
            Ok(_) => panic!("{name}: expected an error"),
            Err(err) => err,
        };
        assert_eq!(err.kind(), parse_kind(expected_error["kind"].as_str().unwrap()), "{name}: kind");
        assert_eq!(err.message(), expected_error["message"].as_str().unwrap(), "{name}: message");
    } else {
        let page = match result {
            Ok(page) => page,
            Err(err) => panic!("{name}: unexpected error: {err}"),
        };
        assert_eq!(serde_json::to_value(&page).unwrap(), case["expected_result"], "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[test]
fn products_test_vectors() {
    let raw = include_str!("../../test-vectors/products.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        // Verify build
        let req = c.build_list_products(&parse_query(&case["input"]));
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let result = c.parse_list_products(simulated_response(&case["simulated_response"]));
        assert_outcome(name, case, result);
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[test]
fn posts_test_vectors() {
    let raw = include_str!("../../test-vectors/posts.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        // Verify build
        let req = c.build_list_posts(&parse_query(&case["input"]));
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let result = c.parse_list_posts(simulated_response(&case["simulated_response"]));
        assert_outcome(name, case, result);
    }
}
