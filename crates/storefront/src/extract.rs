//! Request extractors whose rejections render as [`AppError`].
//!
//! Axum's stock `Json` and `Query` reject with plain-text bodies and a mix of
//! 400/415/422 statuses. These wrappers funnel every rejection through
//! `AppError::BadRequest` so clients always get `400 {"error": ...}`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query-string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
