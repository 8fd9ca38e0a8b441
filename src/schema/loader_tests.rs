//! Unit tests for loading contracts from JSON text.

use rstest::*;

use super::*;
use crate::contracts::snapshot::{Alert, SnapshotQuery};
use crate::schema::{SourceDiagnosticCode, ViolationCode};

/// Minimal valid alert document.
const ALERT_JSON: &str = r#"{
  "type": "budget_warning",
  "threshold": 80,
  "currentValue": 84.5,
  "message": "Budget at 84%"
}"#;

#[rstest]
fn valid_text_parses() {
    let alert: Alert = parse_json_str(ALERT_JSON).expect("should parse alert");
    assert!(!alert.is_critical());
}

#[rstest]
fn defaults_apply_through_text() {
    let query: SnapshotQuery =
        parse_json_str(r#"{"campaignId": "c-42", "offset": 20}"#).expect("should parse query");
    assert_eq!(query.limit, 100);
    assert_eq!(query.offset, 20);
}

#[rstest]
fn malformed_text_reports_location() {
    let text = "{\n  \"type\": \"budget_warning\",\n  \"threshold\": ,\n}";
    let error = parse_json_str_with_source::<Alert>("alerts/q1.json", text)
        .expect_err("should fail to parse");
    let diagnostic = error.diagnostic().expect("should carry a diagnostic");
    assert_eq!(diagnostic.code, SourceDiagnosticCode::ParseFailure);
    assert_eq!(diagnostic.location.source, "alerts/q1.json");
    assert_eq!(diagnostic.location.line, 3);
    assert!(diagnostic.location.column >= 1);
    assert!(error.violations().is_none());
}

#[rstest]
fn inline_source_is_used_by_default() {
    let error = parse_json_str::<Alert>("{").expect_err("should fail to parse");
    let diagnostic = error.diagnostic().expect("should carry a diagnostic");
    assert_eq!(diagnostic.location.source, INLINE_SOURCE);
    assert!(diagnostic.render().starts_with("shape.parse_failure | <inline>:1:"));
}

#[rstest]
fn shape_failures_carry_every_violation() {
    let error = parse_json_str::<Alert>(r#"{"type": "flood", "threshold": "high"}"#)
        .expect_err("should be rejected");
    assert!(error.diagnostic().is_none());
    let violations = error.violations().expect("should carry violations");
    let codes: Vec<ViolationCode> = violations.iter().map(|v| v.code()).collect();
    assert_eq!(
        codes,
        [
            ViolationCode::InvalidEnum,
            ViolationCode::InvalidType,
            ViolationCode::Required,
            ViolationCode::Required,
        ]
    );
    assert!(error.to_string().starts_with("Alert rejected input: 4 shape violation(s)"));
}

#[rstest]
fn non_object_document_is_a_type_violation() {
    let error = parse_json_str::<Alert>("[1, 2]").expect_err("should be rejected");
    let violations = error.violations().expect("should carry violations");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.at("$").len(), 1);
}

#[rstest]
#[case::single_line("oops", "oops")]
#[case::multi_line("first\nsecond", "first")]
#[case::empty("", "")]
fn first_line_of_message(#[case] message: &str, #[case] expected: &str) {
    assert_eq!(first_line(message), expected);
}
