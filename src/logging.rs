//! Structured log view over a classified error.
//!
//! # Lifetime
//!
//! - `ErrorLog` borrows from the `ClassifiedError` that created it
//! - It cannot outlive that error
//! - Accessors hand out borrowed data and never allocate
//!
//! Loggers consume the view on the spot: call `write_to` for a line-oriented
//! sink, read the fields for a structured one, or (feature `tracing`) call
//! `emit`.
//!
//! # Line Format
//!
//! One line per node of the detail tree, children indented two spaces per
//! level:
//!
//! ```text
//! [invalid_input] status=400 message='Request validation failed' cause='validation error'
//!   [invalid_input] status=400 message='validation failed on field 'Age'' field='Age' tag='gte' param='18'
//! ```
//!
//! Unclassified nodes print `[unclassified]`. Control characters in any
//! field are replaced with `?`, so a field can never start a new line. Every
//! field is truncated to 1024 bytes on a UTF-8 boundary so one oversized
//! message cannot flood a log pipeline.

use crate::{ClassificationCode, ClassifiedError, Context, StatusLookup, StatusTable};
use serde_json::Value;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Maximum length for any individual field in formatted output
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Borrowed, structured view of one `ClassifiedError` and its detail tree.
///
/// ```rust
/// # use classified_errors::{ClassifiedError, definitions};
/// let err = ClassifiedError::builder("no such user")
///     .code(definitions::NOT_FOUND)
///     .context("user_id", 7)
///     .build();
///
/// let line = err.with_log(|log| log.to_string());
/// assert_eq!(line, "[not_found] status=404 message='no such user' user_id='7'");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ErrorLog<'a> {
    /// Classification code (may be unclassified).
    pub code: &'a ClassificationCode,
    /// Status from the canonical table.
    pub status: u16,
    /// Own message, without the cause.
    pub message: &'a str,
    /// Own context.
    pub context: &'a Context,
    /// Direct cause, if any.
    pub cause: Option<&'a (dyn Error + Send + Sync + 'static)>,
    /// Direct children.
    pub details: &'a [ClassifiedError],
}

impl<'a> ErrorLog<'a> {
    fn of(err: &'a ClassifiedError) -> Self {
        Self {
            code: err.code(),
            status: StatusTable.status_for(err.code()),
            message: err.message(),
            context: err.context(),
            cause: err.cause(),
            details: err.details(),
        }
    }

    /// Write the whole detail tree, one line per node, without a trailing newline.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        self.write_node(f, 0)?;
        for detail in self.details {
            for (depth, node) in detail.walk() {
                f.write_char('\n')?;
                ErrorLog::of(node).write_node(f, depth + 1)?;
            }
        }
        Ok(())
    }

    fn write_node(&self, f: &mut impl fmt::Write, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str("  ")?;
        }

        let code = if self.code.is_unclassified() {
            "unclassified"
        } else {
            self.code.as_str()
        };
        write!(
            f,
            "[{}] status={} message='{}'",
            truncate_with_indicator(code),
            self.status,
            truncate_with_indicator(self.message)
        )?;

        for (key, value) in self.context.iter() {
            let rendered: Cow<'_, str> = match value {
                Value::String(s) => Cow::Borrowed(s.as_str()),
                other => Cow::Owned(other.to_string()),
            };
            write!(
                f,
                " {}='{}'",
                truncate_with_indicator(key),
                truncate_with_indicator(&rendered)
            )?;
        }

        if let Some(cause) = self.cause {
            write!(f, " cause='{}'", truncate_with_indicator(&cause.to_string()))?;
        }

        Ok(())
    }

    /// Number of nodes in the detail tree below this error.
    #[inline]
    pub fn detail_count(&self) -> usize {
        self.details.iter().map(|d| d.walk().count()).sum()
    }

    /// Emit this error as one `tracing` event.
    ///
    /// Statuses of 500 and above log at `ERROR`, everything else at `WARN`.
    #[cfg(feature = "tracing")]
    pub fn emit(&self) {
        if self.status >= 500 {
            tracing::error!(
                code = %self.code,
                status = self.status,
                details = self.detail_count(),
                "{}",
                self
            );
        } else {
            tracing::warn!(
                code = %self.code,
                status = self.status,
                details = self.detail_count(),
                "{}",
                self
            );
        }
    }
}

impl fmt::Display for ErrorLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

impl ClassifiedError {
    /// Structured log view borrowing from this error.
    #[inline]
    pub fn log(&self) -> ErrorLog<'_> {
        ErrorLog::of(self)
    }

    /// Callback-style access to the log view; the view dies with the closure.
    #[inline]
    pub fn with_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ErrorLog<'_>) -> R,
    {
        let log = self.log();
        f(&log)
    }
}

/// Bound a field for display: control characters become `?`, then the
/// result is truncated to `MAX_FIELD_OUTPUT_LEN` bytes on a char boundary.
///
/// Returns a Cow<str> to avoid allocation when the field is already clean
/// and short.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    let s: Cow<'_, str> = if s.chars().any(char::is_control) {
        Cow::Owned(
            s.chars()
                .map(|c| if c.is_control() { '?' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    };

    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return s;
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
