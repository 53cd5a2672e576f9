//! `axum` integration (feature `axum`).
//!
//! Handlers can return `Result<T, ClassifiedError>` directly: the error is
//! projected with the canonical status table and written as a JSON body.
//!
//! ```rust,ignore
//! async fn get_order(Path(id): Path<u64>) -> Result<Json<Order>, ClassifiedError> {
//!     let order = repo.find(id).await.map_err(|e| {
//!         ClassifiedError::wrapping(e, "order not found")
//!             .code(definitions::NOT_FOUND)
//!             .context("order_id", id)
//!             .build()
//!     })?;
//!     Ok(Json(order))
//! }
//! ```
//!
//! Use [`respond_with`] for foreign error types or a non-canonical
//! [`StatusLookup`].

use crate::{ClassifiedError, ErrorResponse, StatusLookup};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::error::Error;

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for ClassifiedError {
    fn into_response(self) -> Response {
        ErrorResponse::from_classified(&self).into_response()
    }
}

/// Build a response for any failure with a caller-chosen status lookup.
pub fn respond_with<L>(err: &(dyn Error + 'static), lookup: &L) -> Response
where
    L: StatusLookup + ?Sized,
{
    ErrorResponse::from_error_with(err, lookup).into_response()
}
