//! Preset constructors and the `classified!` macro.
//!
//! Two call sites dominate real code: rejecting bad input and reporting an
//! unexpected internal failure. These constructors fix the code (and for
//! internal errors, the message) so every call site produces the same shape.
//! They add no behavior beyond presetting builder steps.
//!
//! # Usage
//!
//! ```rust
//! use classified_errors::{ClassifiedError, classified, definitions, is_internal, is_invalid};
//!
//! let bad_email = ClassifiedError::validation(None, "invalid email", [("field", "email")]);
//! assert!(is_invalid(Some(&bad_email)));
//!
//! let timeout = ClassifiedError::internal(Some("timeout".into()), [("service", "payment")]);
//! assert!(is_internal(Some(&timeout)));
//! assert_eq!(timeout.to_string(), "An unexpected internal error occurred.: timeout");
//!
//! let order_id = 42;
//! let missing = classified!(definitions::NOT_FOUND, "order {order_id} not found");
//! assert_eq!(missing.message(), "order 42 not found");
//! ```

use crate::{ClassifiedError, ErrorBuilder, definitions};
use serde_json::Value;
use std::borrow::Cow;
use std::error::Error;

impl ClassifiedError {
    /// `invalid_input` error with an optional cause and copied context.
    pub fn validation<K, V>(
        cause: Option<Box<dyn Error + Send + Sync + 'static>>,
        message: impl Into<Cow<'static, str>>,
        context: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        preset(ErrorBuilder::new(message).code(definitions::INVALID_INPUT), cause)
            .extend_context(context)
            .build()
    }

    /// `internal_error` error with the fixed generic message, an optional
    /// cause and copied context.
    pub fn internal<K, V>(
        cause: Option<Box<dyn Error + Send + Sync + 'static>>,
        context: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        let builder = ErrorBuilder::new(definitions::INTERNAL_ERROR_MESSAGE)
            .code(definitions::INTERNAL_ERROR);
        preset(builder, cause).extend_context(context).build()
    }
}

#[inline]
fn preset(builder: ErrorBuilder, cause: Option<Box<dyn Error + Send + Sync + 'static>>) -> ErrorBuilder {
    match cause {
        Some(cause) => builder.cause(cause),
        None => builder,
    }
}

/// Build a `ClassifiedError` from a code and a format string.
///
/// ```rust
/// # use classified_errors::{classified, definitions};
/// let user = "ada";
/// let err = classified!(definitions::FORBIDDEN, "{} may not delete this project", user);
/// assert_eq!(err.code(), &definitions::FORBIDDEN);
/// assert_eq!(err.to_string(), "ada may not delete this project");
/// ```
#[macro_export]
macro_rules! classified {
    ($code:expr, $($fmt:tt)+) => {
        $crate::ClassifiedError::builder(::std::format!($($fmt)+))
            .code($code)
            .build()
    };
}
