//! Translation of field-level validation failures into one classified error.
//!
//! The rule engine itself lives elsewhere. Anything that can name a field, the
//! rule it broke, and the rule's parameter implements [`FieldViolation`] and
//! can be translated:
//!
//! - each violation becomes a child error
//!   `"validation failed on field '<field>'"` with code `invalid_input` and
//!   context `{field, tag, param}`
//! - the children hang, in input order, under one parent
//!   `"Request validation failed"` with code `invalid_input`
//! - the parent's cause is the [`ValidationFailed`] sentinel, so
//!   [`is_validation_failure`] recognizes the origin without looking at codes
//!
//! # Example
//!
//! ```rust
//! use classified_errors::{ClassifiedError, FieldError, is_invalid, is_validation_failure};
//!
//! let err = ClassifiedError::from_violations([
//!     FieldError::new("Name", "required", ""),
//!     FieldError::new("Age", "gte", "18"),
//! ]);
//!
//! assert!(is_invalid(Some(&err)));
//! assert!(is_validation_failure(Some(&err)));
//! assert_eq!(err.details().len(), 2);
//! assert_eq!(err.to_string(), "Request validation failed: validation error");
//! ```

use crate::{ClassifiedError, chain, definitions};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Message of the parent error produced by [`ClassifiedError::from_violations`].
pub const VALIDATION_FAILED_MESSAGE: &str = "Request validation failed";

/// One field that failed one rule.
pub trait FieldViolation {
    /// Name of the offending field.
    fn field(&self) -> &str;
    /// Name of the violated rule (`required`, `email`, `gte`, ...).
    fn rule(&self) -> &str;
    /// The rule's parameter; empty when the rule takes none.
    fn param(&self) -> &str;
}

impl<T: FieldViolation + ?Sized> FieldViolation for &T {
    fn field(&self) -> &str {
        (**self).field()
    }

    fn rule(&self) -> &str {
        (**self).rule()
    }

    fn param(&self) -> &str {
        (**self).param()
    }
}

/// Owned `FieldViolation` for callers without their own type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: Cow<'static, str>,
    rule: Cow<'static, str>,
    param: Cow<'static, str>,
}

impl FieldError {
    /// Violation of `rule` (with `param`) on `field`.
    pub fn new(
        field: impl Into<Cow<'static, str>>,
        rule: impl Into<Cow<'static, str>>,
        param: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            param: param.into(),
        }
    }
}

impl FieldViolation for FieldError {
    fn field(&self) -> &str {
        &self.field
    }

    fn rule(&self) -> &str {
        &self.rule
    }

    fn param(&self) -> &str {
        &self.param
    }
}

/// Sentinel cause marking an error as coming from request validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationFailed;

impl fmt::Display for ValidationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation error")
    }
}

impl Error for ValidationFailed {}

impl ClassifiedError {
    /// Translate field violations into one `invalid_input` error with one
    /// detail per violation, in input order.
    pub fn from_violations<I>(violations: I) -> Self
    where
        I: IntoIterator,
        I::Item: FieldViolation,
    {
        let details = violations.into_iter().map(|violation| {
            ClassifiedError::builder(format!("validation failed on field '{}'", violation.field()))
                .code(definitions::INVALID_INPUT)
                .context("field", violation.field())
                .context("tag", violation.rule())
                .context("param", violation.param())
                .build()
        });

        ClassifiedError::builder(VALIDATION_FAILED_MESSAGE)
            .cause(ValidationFailed)
            .code(definitions::INVALID_INPUT)
            .details(details)
            .build()
    }
}

/// True if the [`ValidationFailed`] sentinel appears in the chain of `err`.
pub fn is_validation_failure(err: Option<&(dyn Error + 'static)>) -> bool {
    chain(err).any(|e| e.is::<ValidationFailed>())
}
