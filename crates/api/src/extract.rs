//! Request extractors with JSON error bodies.

use axum::extract::FromRequest;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] whose rejections render as
/// [`AppError::BadRequest`] (400) instead of axum's plain-text 4xx bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
