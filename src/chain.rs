//! Cause-chain and detail-tree traversal, and classification inspection.
//!
//! # Chain Walking
//!
//! A cause chain mixes classified and foreign error values. Walking it only
//! relies on what every `std::error::Error` offers:
//!
//! - it renders itself (`Display`)
//! - it may expose a cause (`source()`)
//!
//! At each step, inspection asks one dynamic question: is this particular
//! value a [`ClassifiedError`]? (`downcast_ref`). Foreign values are stepped
//! over, never treated as a dead end, so a code buried under any number of
//! wrappers is still found.
//!
//! # Absent Input
//!
//! Every inspector takes `Option<&(dyn Error + 'static)>`. `None` is a normal
//! input: `is_code` answers `false` and `as_classified` answers `None`.
//!
//! # Termination
//!
//! `ClassifiedError` owns its cause, so a classified value can never appear in
//! its own chain. Foreign error types whose `source()` forms a loop are the
//! caller's responsibility; walking such a chain does not terminate.
//!
//! # Example
//!
//! ```rust
//! use classified_errors::{ClassifiedError, as_classified, definitions, is_conflict};
//!
//! let root = ClassifiedError::builder("version mismatch")
//!     .code(definitions::CONFLICT)
//!     .build();
//! let middle = ClassifiedError::wrap(root, "write row");
//! let outer = ClassifiedError::wrap(middle, "save failed");
//!
//! assert!(is_conflict(Some(&outer)));
//! assert_eq!(as_classified(Some(&outer)).map(|e| e.message()), Some("save failed"));
//! ```

use crate::{ClassificationCode, ClassifiedError, definitions};
use std::error::Error;
use std::io;
use std::sync::Arc;

// ============================================================================
// Cause Chain
// ============================================================================

/// Iterator over a cause chain, starting with the head.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// Walk `err` and every cause below it.
#[inline]
pub fn chain<'a>(err: Option<&'a (dyn Error + 'static)>) -> Chain<'a> {
    Chain { next: err }
}

/// The `ClassifiedError` held by one chain value, if any.
///
/// Besides a plain `ClassifiedError`, this sees through `Box<ClassifiedError>`,
/// `Arc<ClassifiedError>` and an `io::Error` built around a `ClassifiedError`.
/// Their `source()` skips the inner value and reports its cause instead.
fn classified<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a ClassifiedError> {
    err.downcast_ref::<ClassifiedError>()
        .or_else(|| err.downcast_ref::<Box<ClassifiedError>>().map(|boxed| &**boxed))
        .or_else(|| err.downcast_ref::<Arc<ClassifiedError>>().map(|shared| &**shared))
        .or_else(|| {
            err.downcast_ref::<io::Error>()
                .and_then(io::Error::get_ref)
                .and_then(|inner| inner.downcast_ref::<ClassifiedError>())
        })
}

/// True if any `ClassifiedError` in the chain of `err` carries `code`.
///
/// Returns on the first match. Foreign errors are skipped.
pub fn is_code(err: Option<&(dyn Error + 'static)>, code: &ClassificationCode) -> bool {
    chain(err)
        .filter_map(classified)
        .any(|found| found.code() == code)
}

/// The first `ClassifiedError` in the chain of `err`, which may be `err` itself.
pub fn as_classified<'a>(err: Option<&'a (dyn Error + 'static)>) -> Option<&'a ClassifiedError> {
    chain(err).find_map(classified)
}

/// The first non-empty code in the chain of `err`.
///
/// Unclassified wrappers are looked through, so
/// `wrap(new(.., NOT_FOUND), "outer")` reports `not_found`.
pub fn find_code<'a>(err: Option<&'a (dyn Error + 'static)>) -> Option<&'a ClassificationCode> {
    chain(err)
        .filter_map(classified)
        .map(ClassifiedError::code)
        .find(|code| !code.is_unclassified())
}

// ============================================================================
// Built-in Predicates
// ============================================================================

/// [`is_code`] for [`definitions::DOMAIN_VIOLATION`].
#[inline]
pub fn is_domain_violation(err: Option<&(dyn Error + 'static)>) -> bool {
    is_code(err, &definitions::DOMAIN_VIOLATION)
}

/// [`is_code`] for [`definitions::INFRA_ERROR`].
#[inline]
pub fn is_infra_error(err: Option<&(dyn Error + 'static)>) -> bool {
    is_code(err, &definitions::INFRA_ERROR)
}

/// [`is_code`] for [`definitions::NOT_FOUND`].
#[inline]
pub fn is_not_found(err: Option<&(dyn Error + 'static)>) -> bool {
    is_code(err, &definitions::NOT_FOUND)
}

/// [`is_code`] for [`definitions::UNAUTHORIZED`].
#[inline]
pub fn is_unauthorized(err: Option<&(dyn Error + 'static)>) -> bool {
    is_code(err, &definitions::UNAUTHORIZED)
}

/// [`is_code`] for [`definitions::FORBIDDEN`].
#[inline]
pub fn is_forbidden(err: Option<&(dyn Error + 'static)>) -> bool {
    is_code(err, &definitions::FORBIDDEN)
}

/// [`is_code`] for [`definitions::CONFLICT`].
#[inline]
pub fn is_conflict(err: Option<&(dyn Error + 'static)>) -> bool {
    is_code(err, &definitions::CONFLICT)
}

/// [`is_code`] for [`definitions::INVALID_INPUT`].
#[inline]
pub fn is_invalid(err: Option<&(dyn Error + 'static)>) -> bool {
    is_code(err, &definitions::INVALID_INPUT)
}

/// [`is_code`] for [`definitions::INTERNAL_ERROR`].
#[inline]
pub fn is_internal(err: Option<&(dyn Error + 'static)>) -> bool {
    is_code(err, &definitions::INTERNAL_ERROR)
}

// ============================================================================
// Detail Tree
// ============================================================================

/// Depth-first walk over a detail tree, yielding `(depth, node)`.
///
/// Children are visited in their stored order, each subtree completed before
/// the next sibling starts.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a ClassifiedError)>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(root: &'a ClassifiedError) -> Self {
        Self {
            stack: vec![(0, root)],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a ClassifiedError);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.details().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

// ============================================================================
// Tests
// ============================================================================
