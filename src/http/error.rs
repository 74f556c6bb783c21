//! Handler error type.
//!
//! Bureau and store failures both surface as `500` with the error text as a
//! plain-text body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::bureaus::BureauError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Bureau(#[from] BureauError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
