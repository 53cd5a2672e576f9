//! End-to-end behavior of construction, inspection and projection.
//!
//! Each test exercises the public API only, the way an application would.

use classified_errors::{
    ClassificationCode, ClassifiedError, ErrorResponse, FieldError, StrictHttpStatus,
    as_classified, definitions, is_code, is_conflict, is_domain_violation, is_forbidden,
    is_infra_error, is_internal, is_invalid, is_not_found, is_unauthorized, is_validation_failure,
};
use serde_json::json;
use std::error::Error;
use std::io;
use std::sync::Arc;
use std::thread;

type Predicate = fn(Option<&(dyn Error + 'static)>) -> bool;

const PREDICATES: [(ClassificationCode, Predicate); 8] = [
    (definitions::DOMAIN_VIOLATION, is_domain_violation),
    (definitions::INFRA_ERROR, is_infra_error),
    (definitions::NOT_FOUND, is_not_found),
    (definitions::UNAUTHORIZED, is_unauthorized),
    (definitions::FORBIDDEN, is_forbidden),
    (definitions::CONFLICT, is_conflict),
    (definitions::INVALID_INPUT, is_invalid),
    (definitions::INTERNAL_ERROR, is_internal),
];

// ============================================================================
// CLASSIFICATION
// ============================================================================

#[test]
fn each_code_matches_only_itself() {
    for builtin in definitions::BUILTIN {
        let err = ClassifiedError::builder("m").code(builtin.code().clone()).build();
        for other in definitions::BUILTIN {
            assert_eq!(
                is_code(Some(&err), other.code()),
                builtin.code() == other.code(),
                "{} vs {}",
                builtin.code(),
                other.code()
            );
        }
    }
}

#[test]
fn each_predicate_is_bound_to_its_code() {
    for (code, predicate) in &PREDICATES {
        let err = ClassifiedError::builder("m").code(code.clone()).build();
        let wrapped = ClassifiedError::wrap(err, "outer");
        for (other, other_predicate) in &PREDICATES {
            assert_eq!(other_predicate(Some(&wrapped)), code == other, "{code} vs {other}");
        }
        assert!(predicate(Some(&wrapped)));
        assert!(!predicate(None));
    }
}

#[test]
fn classification_survives_triple_wrap() {
    let root = ClassifiedError::builder("row locked")
        .code(definitions::CONFLICT)
        .build();
    let err = ClassifiedError::wrap(
        ClassifiedError::wrap(ClassifiedError::wrap(root, "m2"), "m3"),
        "m4",
    );
    assert!(is_conflict(Some(&err)));
    assert_eq!(err.to_string(), "m4: m3: m2: row locked");
}

#[test]
fn classification_survives_dyn_boxed_cause() {
    let root = ClassifiedError::builder("expired").code(definitions::UNAUTHORIZED).build();
    let boxed: Box<dyn Error + Send + Sync> = Box::new(root);
    let outer = ClassifiedError::wrap(boxed, "authenticate");
    assert!(is_unauthorized(Some(&outer)));
}

#[test]
fn classification_survives_concretely_boxed_cause() {
    let inner: Box<ClassifiedError> = Box::new(
        ClassifiedError::builder("no such user").code(definitions::NOT_FOUND).build(),
    );
    let outer = ClassifiedError::wrap(inner, "load profile");
    assert!(is_not_found(Some(&outer)));
    assert_eq!(outer.to_string(), "load profile: no such user");
}

#[test]
fn boxed_head_projects_with_its_status() {
    let head: Box<ClassifiedError> = Box::new(
        ClassifiedError::builder("no such user").code(definitions::NOT_FOUND).build(),
    );
    let response = ErrorResponse::from_error(&head);
    assert_eq!(response.status_code, 404);
    assert_eq!(response.code, "not_found");
}

#[test]
fn classification_survives_shared_cause() {
    let shared = Arc::new(ClassifiedError::builder("locked").code(definitions::CONFLICT).build());
    let first = ClassifiedError::wrap(Arc::clone(&shared), "save draft");
    let second = ClassifiedError::wrap(Arc::clone(&shared), "publish");
    assert!(is_conflict(Some(&first)));
    assert!(is_conflict(Some(&second)));
    assert_eq!(ErrorResponse::from_error(&first).message, "save draft");
}

#[test]
fn classification_survives_io_error_wrapper() {
    let classified = ClassifiedError::builder("quota").code(definitions::FORBIDDEN).build();
    let io_err = io::Error::new(io::ErrorKind::PermissionDenied, classified);
    let outer = ClassifiedError::wrap(io_err, "upload");
    assert!(is_forbidden(Some(&outer)));
    assert!(is_code(Some(&outer), &definitions::FORBIDDEN));
}

#[test]
fn absent_error_is_never_classified() {
    assert!(!is_code(None, &definitions::INTERNAL_ERROR));
    assert!(as_classified(None).is_none());
    assert!(!is_validation_failure(None));
}

#[test]
fn plain_errors_are_not_classified() {
    let plain = io::Error::new(io::ErrorKind::NotFound, "no such file");
    assert!(!is_not_found(Some(&plain)));
    assert!(as_classified(Some(&plain)).is_none());
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn rendering_rules() {
    assert_eq!(ClassifiedError::new("m").to_string(), "m");

    let inner = ClassifiedError::builder("inner").code("x").build();
    assert_eq!(ClassifiedError::wrap(inner, "outer").to_string(), "outer: inner");
}

// ============================================================================
// PROJECTION
// ============================================================================

#[test]
fn not_found_projects_to_404() {
    let err = ClassifiedError::builder("gone").code(definitions::NOT_FOUND).build();
    let response = ErrorResponse::from_classified(&err);
    assert_eq!(response.status_code, 404);
    assert_eq!(response.code, "not_found");
}

#[test]
fn custom_code_projects_to_500_and_is_kept() {
    let err = ClassifiedError::builder("slow down").code("rate_limited").build();
    let response = ErrorResponse::from_error(&err);
    assert_eq!(response.status_code, 500);
    assert_eq!(response.code, "rate_limited");
}

#[test]
fn details_keep_append_order_regardless_of_other_steps() {
    let err = ClassifiedError::builder("parent")
        .detail(ClassifiedError::new("first"))
        .context("k", "v")
        .code(definitions::DOMAIN_VIOLATION)
        .detail(ClassifiedError::new("second"))
        .build();
    let response = err.to_response();
    assert_eq!(response.details[0].message, "first");
    assert_eq!(response.details[1].message, "second");
}

#[test]
fn plain_failure_projects_to_internal_error() {
    let plain = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
    let response = ErrorResponse::from_error(&plain);
    assert_eq!(response.message, "An unexpected internal error occurred.");
    assert_eq!(response.code, "internal_error");
    assert_eq!(response.status_code, 500);
}

#[test]
fn wrapped_classification_is_projected_from_outermost_classified_value() {
    let inner = ClassifiedError::builder("no such user")
        .code(definitions::NOT_FOUND)
        .build();
    let outer = ClassifiedError::builder("load profile")
        .cause(inner)
        .code(definitions::FORBIDDEN)
        .build();
    let response = ErrorResponse::from_error(&outer);
    assert_eq!(response.status_code, 403);
    assert_eq!(response.message, "load profile");
}

#[test]
fn strict_policy_collapses_domain_and_infra() {
    for code in [definitions::DOMAIN_VIOLATION, definitions::INFRA_ERROR] {
        let err = ClassifiedError::builder("x").code(code).build();
        assert_eq!(ErrorResponse::from_classified_with(&err, &StrictHttpStatus).status_code, 500);
    }
    let err = ClassifiedError::builder("x").code(definitions::CONFLICT).build();
    assert_eq!(ErrorResponse::from_classified_with(&err, &StrictHttpStatus).status_code, 409);
}

// ============================================================================
// VALIDATION
// ============================================================================

#[test]
fn validation_translation_end_to_end() {
    let err = ClassifiedError::from_violations([
        FieldError::new("Name", "required", ""),
        FieldError::new("Age", "gte", "18"),
    ]);

    assert_eq!(err.code(), &definitions::INVALID_INPUT);
    assert_eq!(err.details().len(), 2);
    assert!(is_validation_failure(Some(&err)));

    let body = ErrorResponse::from_error(&err).to_json();
    assert_eq!(body["details"][0]["context"], json!({"field": "Name", "tag": "required", "param": ""}));
    assert_eq!(body["details"][1]["context"], json!({"field": "Age", "tag": "gte", "param": "18"}));
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn context_overwrite_keeps_single_entry() {
    let err = ClassifiedError::builder("m")
        .context("k", "v")
        .context("k", "v2")
        .build();
    assert_eq!(err.context().len(), 1);
    assert_eq!(err.context().get("k"), Some(&json!("v2")));
}

#[test]
fn presets_standardize_common_call_sites() {
    let invalid = ClassifiedError::validation(None, "bad email", [("field", "email")]);
    assert!(is_invalid(Some(&invalid)));

    let internal = ClassifiedError::internal(
        Some(Box::new(io::Error::new(io::ErrorKind::Other, "timeout"))),
        [("service", "payment")],
    );
    assert!(is_internal(Some(&internal)));
    assert_eq!(internal.message(), definitions::INTERNAL_ERROR_MESSAGE);
}

// ============================================================================
// CONCURRENCY
// ============================================================================

#[test]
fn errors_are_readable_from_many_threads() {
    let err = Arc::new(
        ClassifiedError::builder("shared")
            .code(definitions::INFRA_ERROR)
            .context("shard", 3)
            .detail(ClassifiedError::new("child"))
            .build(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let err = Arc::clone(&err);
            thread::spawn(move || {
                let response = err.to_response();
                (response.status_code, response.details.len(), is_infra_error(Some(&*err)))
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), (502, 1, true));
    }
}
