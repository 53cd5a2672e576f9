//! Classification code to transport status lookup.
//!
//! # Policies
//!
//! Two tables ship with the crate, and exactly one is used per projection:
//!
//! - [`StatusTable`]: the canonical table from [`definitions`]. Used by
//!   default everywhere (projection, `ClassifiedError::status`, logging).
//! - [`StrictHttpStatus`]: a narrower table for HTTP adapters that only
//!   distinguish client-facing categories. `domain_violation` and
//!   `infra_error` fall back to 500 under this policy.
//!
//! Both resolve every unknown, custom, or unclassified code to
//! [`FALLBACK_STATUS`](definitions::FALLBACK_STATUS). A lookup never fails.
//!
//! Callers with their own policy implement [`StatusLookup`], or pass a
//! closure:
//!
//! ```rust
//! use classified_errors::{ClassificationCode, ClassifiedError, ErrorResponse};
//!
//! let teapot = |code: &ClassificationCode| if code == "teapot" { 418u16 } else { 500 };
//! let err = ClassifiedError::builder("short and stout").code("teapot").build();
//!
//! assert_eq!(ErrorResponse::from_classified_with(&err, &teapot).status_code, 418);
//! ```

use crate::{ClassificationCode, definitions};

/// Resolves a classification code to a transport status.
///
/// Implementations must be total: unknown codes map to some status, usually
/// [`definitions::FALLBACK_STATUS`].
pub trait StatusLookup {
    /// Status for `code`.
    fn status_for(&self, code: &ClassificationCode) -> u16;
}

impl<F> StatusLookup for F
where
    F: Fn(&ClassificationCode) -> u16,
{
    #[inline]
    fn status_for(&self, code: &ClassificationCode) -> u16 {
        self(code)
    }
}

/// The canonical table: every built-in code with its status from [`definitions::BUILTIN`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTable;

impl StatusLookup for StatusTable {
    #[inline]
    fn status_for(&self, code: &ClassificationCode) -> u16 {
        code.builtin()
            .map_or(definitions::FALLBACK_STATUS, |builtin| builtin.status())
    }
}

/// Narrow HTTP policy: only client-facing categories get their own status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictHttpStatus;

impl StatusLookup for StrictHttpStatus {
    fn status_for(&self, code: &ClassificationCode) -> u16 {
        const NARROW: [ClassificationCode; 6] = [
            definitions::CONFLICT,
            definitions::INVALID_INPUT,
            definitions::NOT_FOUND,
            definitions::UNAUTHORIZED,
            definitions::FORBIDDEN,
            definitions::INTERNAL_ERROR,
        ];

        match code.builtin() {
            Some(builtin) if NARROW.contains(builtin.code()) => builtin.status(),
            _ => definitions::FALLBACK_STATUS,
        }
    }
}

/// Status for `code` under the canonical table.
#[inline]
pub fn status_for(code: &ClassificationCode) -> u16 {
    StatusTable.status_for(code)
}
