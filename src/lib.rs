//! # Classified Errors
//!
//! One error type for application code: a human message, a machine-readable
//! classification code, an optional wrapped cause, key/value context, and an
//! ordered tree of child errors ("details").
//!
//! ## Design Philosophy
//!
//! 1. **Classify, don't string-match**: callers branch on codes, never on text
//! 2. **Classification survives wrapping**: a code anywhere in the cause chain is found
//! 3. **Codes are an open set**: unknown codes are legal and degrade to defaults
//! 4. **Immutable once built**: all fields are set on a builder, then frozen
//! 5. **The boundary never fails**: any failure projects to a well-formed response
//!
//! ## Quick Start
//!
//! ```rust
//! use classified_errors::{ClassifiedError, ErrorResponse, definitions, is_not_found};
//!
//! fn find_user(id: u64) -> classified_errors::Result<()> {
//!     Err(ClassifiedError::builder("user not found")
//!         .code(definitions::NOT_FOUND)
//!         .context("user_id", id)
//!         .build())
//! }
//!
//! let err = find_user(7).unwrap_err();
//! let outer = ClassifiedError::wrap(err, "could not load profile");
//!
//! assert_eq!(outer.to_string(), "could not load profile: user not found");
//! assert!(is_not_found(Some(&outer)));
//!
//! let response = ErrorResponse::from_error(&outer);
//! assert_eq!(response.status_code, 500); // outer itself is unclassified
//! ```
//!
//! ## Projecting to a Boundary
//!
//! ```rust
//! use classified_errors::{ClassifiedError, ErrorResponse, StrictHttpStatus, definitions};
//!
//! let err = ClassifiedError::builder("rule broken")
//!     .code(definitions::DOMAIN_VIOLATION)
//!     .build();
//!
//! assert_eq!(ErrorResponse::from_classified(&err).status_code, 422);
//! assert_eq!(ErrorResponse::from_classified_with(&err, &StrictHttpStatus).status_code, 500);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit errors as `tracing` events via `ErrorLog::emit`
//! - `axum`: `IntoResponse` for [`ClassifiedError`] and [`ErrorResponse`]

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::result;

pub mod chain;
pub mod codes;
pub mod context;
pub mod convenience;
pub mod definitions;
#[cfg(feature = "axum")]
pub mod http;
pub mod logging;
pub mod response;
pub mod status;
pub mod validation;

pub use chain::*;
pub use codes::*;
pub use context::*;
pub use logging::*;
pub use response::*;
pub use status::*;
pub use validation::*;

/// Type alias for Results using our error type.
pub type Result<T> = result::Result<T, ClassifiedError>;

/// A classified failure.
///
/// # Key Properties
///
/// - `Display` renders `message`, or `message: <cause>` when a cause is set
/// - `source()` exposes the cause to any `std::error::Error` chain walker
/// - Context and details are fixed at construction; accessors are read-only
/// - `Send + Sync`: safe to share across threads without locking
///
/// # Construction
///
/// ```rust
/// use classified_errors::{ClassifiedError, definitions};
///
/// let plain = ClassifiedError::new("something broke");
/// let coded = ClassifiedError::builder("no such order")
///     .code(definitions::NOT_FOUND)
///     .build();
/// let wrapped = ClassifiedError::wrapping(coded, "checkout failed")
///     .code(definitions::INTERNAL_ERROR)
///     .build();
///
/// assert_eq!(plain.to_string(), "something broke");
/// assert_eq!(wrapped.to_string(), "checkout failed: no such order");
/// ```
#[must_use = "errors should be handled or propagated"]
#[derive(Debug)]
pub struct ClassifiedError {
    message: Cow<'static, str>,
    code: ClassificationCode,
    cause: Option<Box<dyn Error + Send + Sync + 'static>>,
    context: Context,
    details: Vec<ClassifiedError>,
}

impl ClassifiedError {
    #[inline]
    pub(crate) fn from_parts(
        message: Cow<'static, str>,
        code: ClassificationCode,
        cause: Option<Box<dyn Error + Send + Sync + 'static>>,
        context: Context,
        details: Vec<ClassifiedError>,
    ) -> Self {
        Self {
            message,
            code,
            cause,
            context,
            details,
        }
    }

    /// Unclassified error with a message and nothing else.
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        ErrorBuilder::new(message).build()
    }

    /// Start building an error. See [`ErrorBuilder`] for the step rules.
    #[inline]
    pub fn builder(message: impl Into<Cow<'static, str>>) -> ErrorBuilder {
        ErrorBuilder::new(message)
    }

    /// Unclassified error wrapping `cause`.
    #[inline]
    pub fn wrap(
        cause: impl Into<Box<dyn Error + Send + Sync + 'static>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        ErrorBuilder::wrapping(cause, message).build()
    }

    /// Start building an error that wraps `cause`.
    ///
    /// An explicit `.cause(..)` step on the returned builder replaces `cause`.
    #[inline]
    pub fn wrapping(
        cause: impl Into<Box<dyn Error + Send + Sync + 'static>>,
        message: impl Into<Cow<'static, str>>,
    ) -> ErrorBuilder {
        ErrorBuilder::wrapping(cause, message)
    }

    /// The human-readable message, without the cause.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// This error's own code. Unclassified if none was set.
    ///
    /// Only looks at this value; use [`is_code`] to search the cause chain.
    #[inline]
    pub const fn code(&self) -> &ClassificationCode {
        &self.code
    }

    /// The immediate cause, if any.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Key/value context attached at construction.
    #[inline]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Child errors, in the order they were appended.
    #[inline]
    pub fn details(&self) -> &[ClassifiedError] {
        &self.details
    }

    /// True if this error's own code is set.
    #[inline]
    pub fn is_classified(&self) -> bool {
        !self.code.is_unclassified()
    }

    /// True if `code` appears on this error or anywhere in its cause chain.
    #[inline]
    pub fn has_code(&self, code: &ClassificationCode) -> bool {
        is_code(Some(self), code)
    }

    /// Iterate over this error and its causes, outermost first.
    #[inline]
    pub fn chain(&self) -> Chain<'_> {
        chain(Some(self))
    }

    /// Depth-first, in-order walk of the detail tree, starting with `self` at depth 0.
    #[inline]
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// Transport status for this error's own code under the canonical table.
    #[inline]
    pub fn status(&self) -> u16 {
        StatusTable.status_for(&self.code)
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}", self.message, cause),
            None => f.write_str(&self.message),
        }
    }
}

impl Error for ClassifiedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}
