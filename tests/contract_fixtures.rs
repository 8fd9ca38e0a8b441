//! Fixture corpus tests: every valid document validates, normalizes to a
//! fixed point and keeps the values it was given.

mod common;

use common::{assert_normalize_idempotent, load_json_fixture, parse_fixture, violation_paths};
use impact_contracts::contracts::common::{DataFreshness, Locale, ProgramType};
use impact_contracts::contracts::deck::{Deck, DeckMetadata, ExportJob, ExportResponse, Theme};
use impact_contracts::contracts::report::GeneratedReport;
use impact_contracts::contracts::scenario::Scenario;
use impact_contracts::contracts::snapshot::{
    CampaignMetricsSnapshot, CreateSnapshotRequest, SnapshotMetrics, SnapshotSource,
    is_near_capacity, is_over_capacity,
};
use impact_contracts::contracts::tile::Tile;
use impact_contracts::schema::{ViolationCode, normalize, parse_strict};
use rstest::rstest;

// ── Given valid fixtures, validation and normalize agree ─────────────

#[rstest]
#[case::create_snapshot("create_snapshot.json")]
fn create_snapshot_fixture_is_a_fixed_point(#[case] fixture: &str) {
    assert_normalize_idempotent::<CreateSnapshotRequest>(&load_json_fixture(fixture));
}

#[rstest]
#[case::language("tile_language.json")]
#[case::mentorship("tile_mentorship.json")]
#[case::upskilling("tile_upskilling.json")]
#[case::weei("tile_weei.json")]
fn tile_fixtures_are_fixed_points(#[case] fixture: &str) {
    assert_normalize_idempotent::<Tile>(&load_json_fixture(fixture));
}

#[rstest]
#[case::current("deck_current.json")]
#[case::legacy("deck_legacy.json")]
fn deck_fixtures_are_fixed_points(#[case] fixture: &str) {
    assert_normalize_idempotent::<Deck>(&load_json_fixture(fixture));
}

#[rstest]
fn remaining_fixtures_are_fixed_points() {
    assert_normalize_idempotent::<CampaignMetricsSnapshot>(&load_json_fixture(
        "campaign_snapshot.json",
    ));
    assert_normalize_idempotent::<GeneratedReport>(&load_json_fixture("generated_report.json"));
    assert_normalize_idempotent::<Scenario>(&load_json_fixture("scenario.json"));
    assert_normalize_idempotent::<ExportJob>(&load_json_fixture("export_job.json"));
}

// ── Given the section example, predicates read the validated output ──

#[rstest]
fn create_snapshot_example_is_over_capacity() {
    let request: CreateSnapshotRequest = parse_fixture("create_snapshot.json");
    assert!(is_near_capacity(&request));
    assert!(is_over_capacity(&request));
    assert_eq!(request.total_sessions_completed, 0);
    assert_eq!(request.full_snapshot.source, SnapshotSource::Scheduled);
}

#[rstest]
fn stored_snapshot_strips_unknown_nested_keys() {
    let snapshot: CampaignMetricsSnapshot = parse_fixture("campaign_snapshot.json");
    let out = normalize(&snapshot).expect("snapshot should encode");
    assert!(out["fullSnapshot"].get("debugTrace").is_none());
    assert_eq!(out["fullSnapshot"]["source"], "manual");
    assert_eq!(out["sessionsTarget"], serde_json::Value::Null);
    assert_eq!(snapshot.full_snapshot().alerts.len(), 1);
    assert!(is_near_capacity(&snapshot));
    assert!(!is_over_capacity(&snapshot));
}

#[rstest]
fn language_tile_dispatches_on_program_type() {
    let tile: Tile = parse_fixture("tile_language.json");
    assert_eq!(tile.program_type(), ProgramType::Language);
    assert_eq!(tile.metadata().data_freshness, DataFreshness::Cached24h);
}

#[rstest]
#[case::language("tile_language.json", ProgramType::Language)]
#[case::mentorship("tile_mentorship.json", ProgramType::Mentorship)]
#[case::upskilling("tile_upskilling.json", ProgramType::Upskilling)]
#[case::weei("tile_weei.json", ProgramType::Weei)]
fn tile_fixture_dispatches_to_its_variant(#[case] fixture: &str, #[case] expected: ProgramType) {
    let tile: Tile = parse_fixture(fixture);
    assert_eq!(tile.program_type(), expected);
}

#[rstest]
fn mentorship_fixture_drops_undeclared_data_keys() {
    let tile: Tile = parse_fixture("tile_mentorship.json");
    let out = normalize(&tile).expect("tile should encode");
    assert!(out["data"].get("vis").is_none());
    assert_eq!(out["data"]["matchFunnel"]["matched"], 52);
}

#[rstest]
fn current_deck_resolves_every_union() {
    let deck: Deck = parse_fixture("deck_current.json");
    assert!(!deck.is_legacy());
    assert!(matches!(deck.theme, Theme::Custom(_)));
    let DeckMetadata::Current(metadata) = &deck.metadata else {
        panic!("expected current metadata");
    };
    assert_eq!(metadata.locale, Locale::No);
    assert!(deck.dangling_citation_ids().is_empty());
}

#[rstest]
fn legacy_deck_resolves_every_union() {
    let deck: Deck = parse_fixture("deck_legacy.json");
    assert!(deck.is_legacy());
    assert!(matches!(deck.metadata, DeckMetadata::Legacy(_)));
    assert!(matches!(deck.theme, Theme::Preset(_)));
    assert_eq!(deck.slides.len(), 2);
}

#[rstest]
fn export_job_fixture_is_not_a_sync_export() {
    let response: ExportResponse = parse_fixture("export_job.json");
    assert!(matches!(response, ExportResponse::Job(_)));
}

// ── Given a broken fixture, every independent failure is reported ────

#[rstest]
fn broken_snapshot_reports_every_violation_in_order() {
    let value = load_json_fixture("create_snapshot_broken.json");
    let violations =
        parse_strict::<CreateSnapshotRequest>(&value).expect_err("broken fixture should fail");
    assert_eq!(
        violation_paths(&violations),
        [
            "campaignId",
            "snapshotDate",
            "volunteersTarget",
            "budgetUtilization",
            "averageVisScore",
            "fullSnapshot.budget.currency",
            "fullSnapshot.alerts[0].type",
        ]
    );
    let codes: Vec<ViolationCode> = violations.iter().map(|v| v.code()).collect();
    assert_eq!(
        codes,
        [
            ViolationCode::TooShort,
            ViolationCode::InvalidFormat,
            ViolationCode::TooSmall,
            ViolationCode::Required,
            ViolationCode::TooBig,
            ViolationCode::InvalidFormat,
            ViolationCode::InvalidEnum,
        ]
    );
}
