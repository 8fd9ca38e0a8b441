//! Behavioural tests for shape contracts using `rstest-bdd`.

mod common;

use common::{load_fixture, load_json_fixture, parse_fixture, violation_paths};
use impact_contracts::contracts::deck::Deck;
use impact_contracts::contracts::snapshot::{CampaignMetricsSnapshot, CreateSnapshotRequest};
use impact_contracts::schema::{
    SourceDiagnosticCode, normalize, parse_json_str_with_source, parse_lenient, parse_strict,
};
use rstest_bdd_macros::{given, scenario, then};

#[given("a snapshot request without totals")]
fn given_a_snapshot_request_without_totals() {}

#[then("validation fills the totals with zero")]
fn then_validation_fills_the_totals_with_zero() {
    let request: CreateSnapshotRequest = parse_fixture("create_snapshot.json");
    assert_eq!(request.total_sessions_completed, 0);
    assert!(request.total_hours_logged.abs() < f64::EPSILON);
    assert!(request.full_snapshot.alerts.is_empty());
}

#[given("a stored snapshot with an unknown nested key")]
fn given_a_stored_snapshot_with_an_unknown_nested_key() {}

#[then("the normalized snapshot omits the unknown key")]
fn then_the_normalized_snapshot_omits_the_unknown_key() {
    let value = load_json_fixture("campaign_snapshot.json");
    assert!(value["fullSnapshot"].get("debugTrace").is_some());
    let Some(snapshot) = parse_lenient::<CampaignMetricsSnapshot>(&value) else {
        panic!("stored snapshot should validate");
    };
    let Ok(out) = normalize(&snapshot) else {
        panic!("stored snapshot should encode");
    };
    assert!(out["fullSnapshot"].get("debugTrace").is_none());
}

#[given("a deck with legacy slides")]
fn given_a_deck_with_legacy_slides() {}

#[then("the deck validates as legacy")]
fn then_the_deck_validates_as_legacy() {
    let deck: Deck = parse_fixture("deck_legacy.json");
    assert!(deck.is_legacy());
}

#[given("a snapshot request with a syntax error")]
fn given_a_snapshot_request_with_a_syntax_error() {}

#[then("loading fails with a source-located diagnostic")]
fn then_loading_fails_with_a_source_located_diagnostic() {
    let source = "tests/fixtures/create_snapshot_malformed.json";
    let text = load_fixture("create_snapshot_malformed.json");
    let result = parse_json_str_with_source::<CreateSnapshotRequest>(source, &text);
    let Err(error) = result else {
        panic!("fixture should fail parsing");
    };
    let Some(diagnostic) = error.diagnostic() else {
        panic!("diagnostic should be present");
    };
    assert_eq!(diagnostic.code, SourceDiagnosticCode::ParseFailure);
    assert_eq!(diagnostic.location.source, source);
    assert_eq!(diagnostic.location.line, 4);
    assert!(diagnostic.location.column > 0);
}

#[given("a snapshot request with several independent problems")]
fn given_a_snapshot_request_with_several_independent_problems() {}

#[then("validation reports every problem in document order")]
fn then_validation_reports_every_problem_in_document_order() {
    let value = load_json_fixture("create_snapshot_broken.json");
    let Err(violations) = parse_strict::<CreateSnapshotRequest>(&value) else {
        panic!("fixture should be rejected");
    };
    assert_eq!(violations.len(), 7);
    assert_eq!(
        violation_paths(&violations).first().map(String::as_str),
        Some("campaignId")
    );
    assert!(parse_lenient::<CreateSnapshotRequest>(&value).is_none());
}

#[scenario(path = "tests/features/contracts.feature", name = "Defaults fill absent fields")]
fn defaults_fill_absent_fields() {}

#[scenario(path = "tests/features/contracts.feature", name = "Unknown fields are stripped")]
fn unknown_fields_are_stripped() {}

#[scenario(path = "tests/features/contracts.feature", name = "Legacy decks are recognised")]
fn legacy_decks_are_recognised() {}

#[scenario(path = "tests/features/contracts.feature", name = "Malformed JSON is located")]
fn malformed_json_is_located() {}

#[scenario(
    path = "tests/features/contracts.feature",
    name = "Every violation in a broken request is reported"
)]
fn every_violation_in_a_broken_request_is_reported() {}
