//! Built-in classification codes.
//!
//! # Taxonomy
//!
//! | Code               | Meaning                                              | Status |
//! |--------------------|------------------------------------------------------|--------|
//! | `invalid_input`    | The caller sent something malformed or out of range  | 400    |
//! | `unauthorized`     | The caller is not authenticated                      | 401    |
//! | `forbidden`        | The caller is authenticated but not allowed          | 403    |
//! | `not_found`        | The addressed resource does not exist                | 404    |
//! | `conflict`         | The request collides with current state              | 409    |
//! | `domain_violation` | A business rule refused the operation                | 422    |
//! | `internal_error`   | A bug or unexpected condition on our side            | 500    |
//! | `infra_error`      | A dependency (database, queue, upstream) failed      | 502    |
//!
//! The status column is the canonical table used by
//! [`StatusTable`](crate::StatusTable). Adapters that want a different policy
//! inject their own [`StatusLookup`](crate::StatusLookup); they never edit
//! this table.
//!
//! # Governance
//!
//! Codes are unique and every status is a valid HTTP status. Both properties
//! are checked in the `tests` module at the bottom of this file.

use crate::define_classification_codes;

/// Message used by every synthesized or preset internal error.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected internal error occurred.";

/// Status used for any code without a mapping.
pub const FALLBACK_STATUS: u16 = 500;

define_classification_codes! {
    DOMAIN_VIOLATION = ("domain_violation", 422),
    INFRA_ERROR      = ("infra_error", 502),
    NOT_FOUND        = ("not_found", 404),
    INTERNAL_ERROR   = ("internal_error", 500),
    UNAUTHORIZED     = ("unauthorized", 401),
    FORBIDDEN        = ("forbidden", 403),
    CONFLICT         = ("conflict", 409),
    INVALID_INPUT    = ("invalid_input", 400),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_set_is_complete() {
        assert_eq!(BUILTIN.len(), 8);
        for code in [
            &DOMAIN_VIOLATION,
            &INFRA_ERROR,
            &NOT_FOUND,
            &INTERNAL_ERROR,
            &UNAUTHORIZED,
            &FORBIDDEN,
            &CONFLICT,
            &INVALID_INPUT,
        ] {
            assert!(code.is_builtin(), "{code} missing from BUILTIN");
        }
    }

    #[test]
    fn codes_are_unique() {
        let seen: HashSet<&str> = BUILTIN.iter().map(|b| b.code().as_str()).collect();
        assert_eq!(seen.len(), BUILTIN.len());
    }

    #[test]
    fn statuses_are_valid_http() {
        for entry in BUILTIN {
            assert!((400..=599).contains(&entry.status()), "{}", entry.code());
        }
    }

    #[test]
    fn canonical_status_mappings() {
        assert_eq!(INVALID_INPUT.builtin().map(|b| b.status()), Some(400));
        assert_eq!(DOMAIN_VIOLATION.builtin().map(|b| b.status()), Some(422));
        assert_eq!(INFRA_ERROR.builtin().map(|b| b.status()), Some(502));
        assert_eq!(INTERNAL_ERROR.builtin().map(|b| b.status()), Some(FALLBACK_STATUS));
    }
}
