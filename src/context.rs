//! Context data and the construction builder for `ClassifiedError`.
//!
//! - `Context`: key/value data attached to an error. Keys are unique; a second
//!   insert under the same key replaces the first.
//! - `ErrorBuilder`: the draft a `ClassifiedError` is assembled in. Steps are
//!   applied in call order and the result is frozen by `build()`.
//!
//! # Step Semantics
//!
//! | Step                 | Field     | Repeated calls         |
//! |----------------------|-----------|------------------------|
//! | `code`               | code      | last one wins          |
//! | `cause`              | cause     | last one wins          |
//! | `context`            | context   | same key: last wins    |
//! | `extend_context`     | context   | same key: last wins    |
//! | `detail` / `details` | details   | accumulate, in order   |
//!
//! # Example
//!
//! ```rust
//! use classified_errors::{ClassifiedError, definitions};
//!
//! let err = ClassifiedError::builder("payment declined")
//!     .code(definitions::DOMAIN_VIOLATION)
//!     .context("order_id", 42)
//!     .context("reason", "insufficient funds")
//!     .build();
//!
//! assert_eq!(err.context().get("order_id"), Some(&serde_json::json!(42)));
//! ```

use crate::{ClassificationCode, ClassifiedError};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::error::Error;

// ============================================================================
// Context (Unique-Key Map)
// ============================================================================

/// Key/value context attached to an error.
///
/// # Capacity Choice
///
/// SmallVec<[T; 4]>: most errors carry one to three entries, so they stay
/// inline and creating an error with context does not allocate a map.
/// Lookups are linear, which beats hashing at these sizes.
///
/// Iteration order is insertion order, but nothing may rely on it: equality
/// ignores order and serialization makes no ordering promise.
#[derive(Debug, Clone, Default)]
pub struct Context {
    entries: SmallVec<[(Cow<'static, str>, Value); 4]>,
}

impl Context {
    /// Empty context.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Insert a value, replacing any existing value under the same key.
    ///
    /// Returns the replaced value.
    pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Value stored under `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// True if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over all entries.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries are present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<Cow<'static, str>>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        context.extend(iter);
        context
    }
}

impl<K, V> Extend<(K, V)> for Context
where
    K: Into<Cow<'static, str>>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Context {
    type Item = (Cow<'static, str>, Value);
    type IntoIter = smallvec::IntoIter<[(Cow<'static, str>, Value); 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Error Builder (Mutable Draft)
// ============================================================================

/// Draft of a `ClassifiedError`.
///
/// The only place an error's fields can change. Once `build()` returns, the
/// error is immutable for every consumer.
#[must_use = "builders do nothing until build() is called"]
#[derive(Debug)]
pub struct ErrorBuilder {
    message: Cow<'static, str>,
    code: ClassificationCode,
    cause: Option<Box<dyn Error + Send + Sync + 'static>>,
    context: Context,
    details: Vec<ClassifiedError>,
}

impl ErrorBuilder {
    /// Start a draft with the given message and nothing else.
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            code: ClassificationCode::UNCLASSIFIED,
            cause: None,
            context: Context::new(),
            details: Vec::new(),
        }
    }

    /// Start a draft that wraps `cause`.
    ///
    /// The cause is applied first, so a later `.cause(..)` step replaces it.
    #[inline]
    pub fn wrapping(
        cause: impl Into<Box<dyn Error + Send + Sync + 'static>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(message).cause(cause)
    }

    /// Set the classification code.
    #[inline]
    pub fn code(mut self, code: impl Into<ClassificationCode>) -> Self {
        self.code = code.into();
        self
    }

    /// Set the underlying failure.
    ///
    /// Callers must not wrap an error into its own chain. Foreign error types
    /// whose `source()` loops will make chain walks loop too.
    #[inline]
    pub fn cause(mut self, cause: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Add one context entry.
    #[inline]
    pub fn context(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.context.insert(key, value);
        self
    }

    /// Copy every entry of `entries` into the context, one by one.
    #[inline]
    pub fn extend_context<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        self.context.extend(entries);
        self
    }

    /// Append one child error.
    #[inline]
    pub fn detail(mut self, detail: ClassifiedError) -> Self {
        self.details.push(detail);
        self
    }

    /// Append child errors, keeping their order.
    #[inline]
    pub fn details(mut self, details: impl IntoIterator<Item = ClassifiedError>) -> Self {
        self.details.extend(details);
        self
    }

    /// Freeze the draft.
    #[inline]
    pub fn build(self) -> ClassifiedError {
        ClassifiedError::from_parts(self.message, self.code, self.cause, self.context, self.details)
    }
}

impl From<ErrorBuilder> for ClassifiedError {
    fn from(builder: ErrorBuilder) -> Self {
        builder.build()
    }
}

// ============================================================================
// Tests
// ============================================================================
