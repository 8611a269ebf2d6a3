//! Request extractors that reject with the application's JSON error shape.
//!
//! Axum's stock `Json` and `Query` extractors reject with plain-text bodies
//! (and 422 for some body errors). The API contract is 400 + `{ "message" }`
//! for every malformed input, so handlers use these wrappers instead.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor; malformed bodies become 400 `{ "message": ... }`.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string extractor; unparsable parameters become 400 `{ "message": ... }`.
#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path parameter extractor; non-numeric ids become 400 `{ "message": ... }`.
#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
