//! Unit tests for report contracts.

use rstest::*;
use serde_json::{Value, json};

use super::*;
use crate::schema::{ViolationCode, parse_input, parse_lenient, parse_strict};

const COMPANY: &str = "5f2d7c1e-8a4b-4e0f-9d3c-6b1a2e4f7c90";

#[fixture]
fn report() -> Value {
    json!({
        "reportId": "9a0e4f3b-1c2d-4e5f-8a9b-0c1d2e3f4a5b",
        "sections": [
            { "id": "s1", "heading": "Summary", "content": "Strong quarter.", "order": 0,
              "citationIds": ["c1", "c9"] },
            { "id": "s2", "heading": "Outlook", "content": "More mentors.", "order": 1,
              "citationIds": ["c9", "c2", "c1"] }
        ],
        "citations": [
            { "id": "c1", "evidenceId": "ev-1", "snippet": "[REDACTED] said it helped", "confidence": 0.9 },
            { "id": "c2", "evidenceId": "ev-2", "snippet": "Attendance rose", "confidence": 0.75 }
        ],
        "lineage": {
            "model": "narrator-large",
            "promptVersion": "v3",
            "tokenUsage": { "input": 1200, "output": 800, "total": 2000 },
            "latencyMs": 4200,
            "generatedAt": "2024-04-02T09:00:00Z"
        }
    })
}

#[rstest]
fn report_defaults_warnings(report: Value) {
    let parsed: GeneratedReport = parse_strict(&report).expect("report should validate");
    assert!(parsed.warnings.is_empty());
    assert!(parsed.lineage.token_usage.is_consistent());
    assert!(parsed.citation("c2").is_some());
}

#[rstest]
fn dangling_citations_are_listed_once_in_first_seen_order(report: Value) {
    let parsed: GeneratedReport = parse_strict(&report).expect("report should validate");
    assert_eq!(parsed.dangling_citation_ids(), ["c9"]);
}

#[rstest]
fn report_needs_a_section(mut report: Value) {
    report["sections"] = json!([]);
    let violations = parse_strict::<GeneratedReport>(&report).expect_err("no sections");
    let violation = violations
        .at("sections")
        .into_iter()
        .next()
        .expect("violation at sections");
    assert_eq!(violation.code(), ViolationCode::TooShort);
}

#[rstest]
#[case::zero(0.0, true)]
#[case::one(1.0, true)]
#[case::negative(-0.01, false)]
#[case::above_one(1.01, false)]
fn citation_confidence_is_a_probability(#[case] confidence: f64, #[case] accepted: bool) {
    let citation = json!({
        "id": "c1", "evidenceId": "ev-1", "snippet": "text", "confidence": confidence
    });
    assert_eq!(parse_lenient::<Citation>(&citation).is_some(), accepted);
}

#[rstest]
fn citation_snippet_length_is_bounded() {
    let long = "x".repeat(MAX_SNIPPET_CHARS + 1);
    let citation = json!({ "id": "c1", "evidenceId": "ev-1", "snippet": long, "confidence": 0.5 });
    let violations = parse_strict::<Citation>(&citation).expect_err("snippet too long");
    assert_eq!(violations.len(), 1);
    assert!(
        violations
            .iter()
            .all(|v| v.code() == ViolationCode::TooLong)
    );
}

#[rstest]
fn lineage_temperature_range(mut report: Value) {
    report["lineage"]["temperature"] = json!(2.5);
    let violations = parse_strict::<GeneratedReport>(&report).expect_err("too hot");
    assert_eq!(violations.at("lineage.temperature").len(), 1);
}

#[rstest]
fn token_usage_consistency() {
    let usage = TokenUsage {
        input: 10,
        output: 5,
        total: 16,
    };
    assert!(!usage.is_consistent());
    let overflow = TokenUsage {
        input: u64::MAX,
        output: 1,
        total: 0,
    };
    assert!(!overflow.is_consistent());
}

#[rstest]
fn generate_request_takes_declared_defaults() {
    let request: GenerateReportRequest = parse_strict(&json!({
        "companyId": COMPANY,
        "reportType": "quarterly",
        "period": { "start": "2024-01-01", "end": "2024-03-31" }
    }))
    .expect("request should validate");
    assert_eq!(request.locale, Locale::En);
    assert_eq!(request.tone, Tone::Formal);
    assert_eq!(request.length, ReportLength::Medium);
    assert!(request.include_citations);
    assert!(request.program_types.is_none());
}

#[rstest]
fn generate_request_typed_input_overrides_defaults() {
    let input = GenerateReportRequestInput {
        company_id: COMPANY.parse().expect("valid uuid"),
        report_type: ReportType::InvestorUpdate,
        period: Period {
            start: "2024-01-01".parse().expect("valid date"),
            end: "2024-12-31".parse().expect("valid date"),
        },
        program_types: Some(vec![ProgramType::Weei]),
        locale: Some(Locale::No),
        tone: None,
        length: Some(ReportLength::Brief),
        include_citations: Some(false),
    };
    let request: GenerateReportRequest = parse_input(&input).expect("input should validate");
    assert_eq!(request.locale, Locale::No);
    assert_eq!(request.tone, Tone::Formal);
    assert!(!request.include_citations);
}

#[rstest]
#[case("weekly")]
#[case("Quarterly")]
#[case("")]
fn report_type_is_closed(#[case] report_type: &str) {
    let value = json!({
        "companyId": COMPANY,
        "reportType": report_type,
        "period": { "start": "2024-01-01", "end": "2024-03-31" }
    });
    let violations = parse_strict::<GenerateReportRequest>(&value).expect_err("not a report type");
    assert_eq!(violations.len(), 1);
    let violation = violations
        .at("reportType")
        .into_iter()
        .next()
        .expect("violation at reportType");
    assert_eq!(violation.code(), ViolationCode::InvalidEnum);
}
