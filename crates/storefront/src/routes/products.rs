//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderName, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Deserializer};
use tracing::instrument;

use minishop_core::{NewProduct, PageRequest, Product, ProductId, ProductSort};

use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

/// Response header carrying the total number of products in the catalog.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Deserialize empty strings as None for optional numeric parameters.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Listing query parameters.
///
/// `?page=&limit=` is treated the same as omitting them.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<u32>,
    pub sort: Option<String>,
}

/// List one page of products.
///
/// The body is the page as a JSON array; the catalog size travels in the
/// `x-total-count` header.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = PageRequest::new(query.page, query.limit)?;
    let sort = ProductSort::parse(query.sort.as_deref());

    let listing = state.catalog().list(sort, page).await?;

    Ok((
        [(HeaderName::from_static(TOTAL_COUNT_HEADER), listing.total.to_string())],
        Json(listing.products),
    ))
}

/// Fetch a product by ID.
///
/// An ID that is not a well-formed UUID cannot name a product, so it is
/// reported as not found rather than as a bad request.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id: ProductId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("product {id} not found")))?;

    Ok(Json(state.catalog().get(id).await?))
}

/// Create a product.
#[instrument(skip(state, product))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(product): ApiJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    let created = state.catalog().create(product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

