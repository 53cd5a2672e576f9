//! Projection of classified errors into a boundary-facing response shape.
//!
//! # Shape
//!
//! ```json
//! {
//!   "message": "Request validation failed",
//!   "code": "invalid_input",
//!   "context": { "form": "signup" },
//!   "details": [ { "message": "...", "code": "...", "context": { ... } } ]
//! }
//! ```
//!
//! - `message` is always present
//! - `code`, `context` and `details` are omitted when empty
//! - `status_code` is carried on the struct for the transport layer but is
//!   never serialized into the body
//!
//! # Entry Points
//!
//! - Typed: [`ErrorResponse::from_classified`] when a `ClassifiedError` is in hand.
//! - Generic: [`ErrorResponse::from_error`] for any `&dyn Error`. The chain is
//!   searched for the first `ClassifiedError`; if there is none, the response
//!   describes a generic internal error instead. This entry point cannot fail
//!   and there is no "absent error" input: the signature requires a value.
//!
//! Each has a `_with` variant taking a [`StatusLookup`]. Without it, the
//! canonical [`StatusTable`] is used.
//!
//! # Recursion
//!
//! Details are projected recursively, preserving order. Context is copied per
//! node; a parent's context is never pushed into its children.

use crate::{ClassifiedError, Context, StatusLookup, StatusTable, as_classified, definitions};
use serde::Serialize;
use std::error::Error;

/// Serialization-ready description of a classified error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// Transport status resolved from `code`. Not part of the serialized body.
    #[serde(skip)]
    pub status_code: u16,
    /// The error's message, without its cause.
    pub message: String,
    /// The code text; empty when unclassified.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub code: String,
    /// Copy of the error's own context.
    #[serde(skip_serializing_if = "Context::is_empty")]
    pub context: Context,
    /// Projection of each detail, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorResponse>,
}

impl ErrorResponse {
    /// Project a classified error using the canonical status table.
    #[inline]
    pub fn from_classified(err: &ClassifiedError) -> Self {
        Self::from_classified_with(err, &StatusTable)
    }

    /// Project a classified error, resolving statuses with `lookup`.
    pub fn from_classified_with<L>(err: &ClassifiedError, lookup: &L) -> Self
    where
        L: StatusLookup + ?Sized,
    {
        Self {
            status_code: lookup.status_for(err.code()),
            message: err.message().to_owned(),
            code: err.code().as_str().to_owned(),
            context: err.context().clone(),
            details: err
                .details()
                .iter()
                .map(|detail| Self::from_classified_with(detail, lookup))
                .collect(),
        }
    }

    /// Project any failure using the canonical status table.
    #[inline]
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        Self::from_error_with(err, &StatusTable)
    }

    /// Project any failure, resolving statuses with `lookup`.
    ///
    /// Falls back to a generic `internal_error` response when no
    /// `ClassifiedError` exists anywhere in the chain.
    pub fn from_error_with<L>(err: &(dyn Error + 'static), lookup: &L) -> Self
    where
        L: StatusLookup + ?Sized,
    {
        match as_classified(Some(err)) {
            Some(classified) => Self::from_classified_with(classified, lookup),
            None => Self::internal_fallback(lookup),
        }
    }

    fn internal_fallback<L>(lookup: &L) -> Self
    where
        L: StatusLookup + ?Sized,
    {
        Self {
            status_code: lookup.status_for(&definitions::INTERNAL_ERROR),
            message: definitions::INTERNAL_ERROR_MESSAGE.to_owned(),
            code: definitions::INTERNAL_ERROR.as_str().to_owned(),
            context: Context::new(),
            details: Vec::new(),
        }
    }

    /// The serialized body as a JSON value (no `status_code`).
    pub fn to_json(&self) -> serde_json::Value {
        // Serializing plain strings and JSON values into a Value cannot fail.
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({ "message": definitions::INTERNAL_ERROR_MESSAGE })
        })
    }
}

impl From<&ClassifiedError> for ErrorResponse {
    fn from(err: &ClassifiedError) -> Self {
        Self::from_classified(err)
    }
}

impl ClassifiedError {
    /// Shorthand for [`ErrorResponse::from_classified`].
    #[inline]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::from_classified(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
