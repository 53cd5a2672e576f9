#![no_main]

use classified_errors::{ClassifiedError, ErrorResponse, FieldError, is_code};
use libfuzzer_sys::fuzz_target;

// Build an arbitrary detail tree and wrap chain from raw bytes, then project and log it.
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data).into_owned();
    let mut parts = text.split('\u{0}');

    let code = parts.next().unwrap_or_default().to_owned();
    let message = parts.next().unwrap_or_default().to_owned();

    let details = parts
        .by_ref()
        .take(16)
        .map(|field| FieldError::new(field.to_owned(), "required", ""));
    let mut err = ClassifiedError::builder(message)
        .code(code.clone())
        .detail(ClassifiedError::from_violations(details))
        .build();

    for (depth, _) in data.iter().take(32).enumerate() {
        err = ClassifiedError::wrap(err, format!("layer {depth}"));
    }

    let response = ErrorResponse::from_error(&err);
    let _ = response.to_json();
    let _ = err.log().to_string();
    assert!(is_code(Some(&err), &code.into()));
});
