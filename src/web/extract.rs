//! `Query`/`Path` wrappers whose rejections become [`WebError::Input`] (422)
//! instead of axum's plain-text 400.

use axum::extract::{FromRequestParts, Path, Query};

use super::WebError;

#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(WebError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(WebError))]
pub struct ApiPath<T>(pub T);
