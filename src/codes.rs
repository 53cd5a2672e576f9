//! Classification codes - machine-readable failure categories.
//!
//! A classification code is an opaque string naming what kind of failure
//! occurred (`not_found`, `conflict`, ...). Callers branch on codes instead of
//! matching on message text.
//!
//! # Open Set
//!
//! The built-in codes live in [`definitions`](crate::definitions), but the set
//! is deliberately open: any string is a legal code. Every lookup that
//! consumes a code (status mapping, rendering) must have a fallback path for
//! codes it does not recognize. Nothing in this crate rejects a code.
//!
//! The empty string is the zero value and means "unclassified".
//!
//! # Allocation
//!
//! Codes are backed by `Cow<'static, str>`, so the built-in constants and any
//! code made from a string literal never allocate. Runtime codes (read from
//! configuration, a remote peer, etc.) own their text.
//!
//! # Example
//!
//! ```rust
//! use classified_errors::{ClassificationCode, definitions};
//!
//! let custom = ClassificationCode::new("rate_limited");
//! assert!(!custom.is_builtin());
//! assert!(definitions::NOT_FOUND.is_builtin());
//! assert!(ClassificationCode::UNCLASSIFIED.is_unclassified());
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// Classification Code (Open Identity)
// ============================================================================

/// A string-backed failure category.
///
/// Equality, ordering and hashing all compare the code text, so a code built
/// at runtime from `"not_found"` is equal to [`definitions::NOT_FOUND`](crate::definitions::NOT_FOUND).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationCode(Cow<'static, str>);

impl ClassificationCode {
    /// The zero value: no classification.
    pub const UNCLASSIFIED: Self = Self(Cow::Borrowed(""));

    /// Create a code from a string literal. Usable in const contexts.
    #[inline]
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Create a code from any string. Never fails; unknown codes are legal.
    #[inline]
    pub fn new(code: impl Into<Cow<'static, str>>) -> Self {
        Self(code.into())
    }

    /// The code text. Empty when unclassified.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    /// True for the zero value.
    #[inline]
    pub fn is_unclassified(&self) -> bool {
        self.0.is_empty()
    }

    /// The built-in definition for this code, if it is one of the built-ins.
    #[inline]
    pub fn builtin(&self) -> Option<&'static BuiltinCode> {
        crate::definitions::BUILTIN
            .iter()
            .find(|entry| entry.code() == self)
    }

    /// True if this code is part of the built-in set.
    #[inline]
    pub fn is_builtin(&self) -> bool {
        self.builtin().is_some()
    }
}

impl fmt::Display for ClassificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ClassificationCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&'static str> for ClassificationCode {
    fn from(code: &'static str) -> Self {
        Self::from_static(code)
    }
}

impl From<String> for ClassificationCode {
    fn from(code: String) -> Self {
        Self(Cow::Owned(code))
    }
}

impl From<Cow<'static, str>> for ClassificationCode {
    fn from(code: Cow<'static, str>) -> Self {
        Self(code)
    }
}

impl PartialEq<str> for ClassificationCode {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ClassificationCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

// ============================================================================
// Built-in Definitions
// ============================================================================

/// A built-in code paired with its canonical transport status.
///
/// Instances only exist inside [`definitions::BUILTIN`](crate::definitions::BUILTIN).
#[derive(Debug, PartialEq, Eq)]
pub struct BuiltinCode {
    code: ClassificationCode,
    status: u16,
}

impl BuiltinCode {
    #[doc(hidden)]
    pub const fn __internal_new(code: ClassificationCode, status: u16) -> Self {
        Self { code, status }
    }

    /// The classification code.
    #[inline]
    pub const fn code(&self) -> &ClassificationCode {
        &self.code
    }

    /// Canonical transport status for this code.
    #[inline]
    pub const fn status(&self) -> u16 {
        self.status
    }
}

/// Define built-in classification codes together with their canonical status.
///
/// Expands to one `pub const` per code plus a `BUILTIN` table listing them
/// in declaration order.
///
/// ```rust,ignore
/// define_classification_codes! {
///     NOT_FOUND = ("not_found", 404),
///     CONFLICT  = ("conflict", 409),
/// }
/// ```
#[macro_export]
macro_rules! define_classification_codes {
    ($($name:ident = ($code:literal, $status:literal)),+ $(,)?) => {
        $(
            #[doc = concat!("Built-in classification `", $code, "` (status ", stringify!($status), ").")]
            pub const $name: $crate::ClassificationCode =
                $crate::ClassificationCode::from_static($code);
        )+

        /// Every built-in code with its canonical status, in declaration order.
        pub const BUILTIN: &[$crate::BuiltinCode] = &[
            $( $crate::BuiltinCode::__internal_new($name, $status), )+
        ];
    };
}

// ============================================================================
// Tests
// ============================================================================
