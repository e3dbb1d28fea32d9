//! Axum route handlers for the Generation API.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::info;

use crate::errors::AppError;
use crate::generation::generator::BusinessSnapshot;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body of POST /business-data.
///
/// Fields stay raw JSON: a falsy value (`null`, `false`, `0`, `""`) counts as
/// missing, anything else is converted to text before generation.
#[derive(Debug, Default, Deserialize)]
pub struct BusinessRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
}

/// Query string of GET /regenerate-headline.
#[derive(Debug, Default, Deserialize)]
pub struct HeadlineQuery {
    pub name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HeadlineResponse {
    pub headline: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /business-data
///
/// Returns a fresh rating, review count and headline for the business.
pub async fn handle_business_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<BusinessSnapshot>, AppError> {
    let body = body.map_err(|rejection| AppError::MalformedRequest(rejection.body_text()))?;
    let request = parse_business_request(&headers, &body)?;

    let name = field_text(request.name.as_ref());
    let location = field_text(request.location.as_ref());

    let snapshot = state
        .random
        .with_rng(|rng| state.generator.generate(rng, &name, &location))?;

    info!(
        name = %name,
        location = %location,
        rating = snapshot.rating,
        reviews = snapshot.reviews,
        "Generated business data"
    );

    Ok(Json(snapshot))
}

/// GET /regenerate-headline?name=..&location=..
///
/// Returns only a new headline. Rating and reviews are not touched.
pub async fn handle_regenerate_headline(
    State(state): State<AppState>,
    query: Result<Query<HeadlineQuery>, QueryRejection>,
) -> Result<Json<HeadlineResponse>, AppError> {
    let Query(query) =
        query.map_err(|rejection| AppError::MalformedRequest(rejection.body_text()))?;

    let name = query.name.unwrap_or_default();
    let location = query.location.unwrap_or_default();

    let headline = state
        .random
        .with_rng(|rng| state.generator.regenerate_headline(rng, &name, &location))?;

    info!(name = %name, location = %location, "Regenerated headline");

    Ok(Json(HeadlineResponse { headline }))
}

// ────────────────────────────────────────────────────────────────────────────
// Body parsing
// ────────────────────────────────────────────────────────────────────────────

/// A body that is not JSON, or is blank, carries no fields.
fn parse_business_request(
    headers: &HeaderMap,
    body: &[u8],
) -> Result<BusinessRequest, AppError> {
    if !has_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(BusinessRequest::default());
    }

    Json::<BusinessRequest>::from_bytes(body)
        .map(|Json(request)| request)
        .map_err(|rejection| AppError::MalformedRequest(rejection.body_text()))
}

/// `application/json` or any `application/*+json`, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Text for a body field; empty when absent or falsy.
fn field_text(value: Option<&Value>) -> String {
    value.and_then(truthy_text).unwrap_or_default()
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(to_text(other)),
    }
}

/// Browser-style string conversion: arrays join with commas, objects
/// become `[object Object]`, null inside an array is empty.
fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(to_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }

    let f = n.as_f64().unwrap_or_default();
    // 42.0 prints as 42
    if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}
