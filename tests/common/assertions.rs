//! Custom assertions for generated documents.

use super::pdf_helpers::text_runs;
use quickdial::{DocumentPlan, QuickDialError};

/// Asserts that some text run of a rendered PDF contains `needle`.
///
/// # Panics
/// Panics if the PDF cannot be parsed or no run contains the text.
pub fn assert_pdf_contains(bytes: &[u8], needle: &str) {
    let runs = text_runs(bytes).unwrap_or_else(|e| panic!("Failed to read PDF text: {}", e));
    assert!(
        runs.iter().any(|run| run.contains(needle)),
        "Text '{}' should be in the PDF but was not.\nRuns: {:?}",
        needle,
        runs
    );
}

/// Asserts that no text run of a rendered PDF contains `needle`.
pub fn assert_pdf_lacks(bytes: &[u8], needle: &str) {
    let runs = text_runs(bytes).unwrap_or_else(|e| panic!("Failed to read PDF text: {}", e));
    assert!(
        !runs.iter().any(|run| run.contains(needle)),
        "Text '{}' should not be in the PDF.\nRuns: {:?}",
        needle,
        runs
    );
}

/// Asserts that a plan has a text run containing `needle`.
pub fn assert_plan_contains(plan: &DocumentPlan, needle: &str) {
    assert!(
        plan.find_text(needle).is_some(),
        "Plan should contain '{}', has: {:?}",
        needle,
        plan.texts().map(|run| run.text.as_str()).collect::<Vec<_>>()
    );
}

/// Asserts that a result failed with `InvalidFormat`.
pub fn assert_invalid_format<T: std::fmt::Debug>(result: Result<T, QuickDialError>, input: &str) {
    assert!(
        matches!(result, Err(QuickDialError::InvalidFormat { .. })),
        "'{}' should fail with InvalidFormat, got {:?}",
        input,
        result
    );
}
