// src/extract.rs

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections go through `AppError`, so a body that does
/// not deserialize gets a 400 with a JSON `error` field instead of a plain
/// text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
