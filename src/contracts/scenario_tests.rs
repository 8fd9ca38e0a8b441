//! Unit tests for scenario contracts.

use rstest::*;
use serde_json::{Value, json};

use super::*;
use crate::schema::{ViolationCode, normalize, parse_input, parse_strict};

const COMPANY: &str = "5f2d7c1e-8a4b-4e0f-9d3c-6b1a2e4f7c90";

fn metrics(volunteers: u64) -> Value {
    json!({ "volunteers": volunteers, "beneficiaries": 40, "budget": 5000, "sroi": 2.5 })
}

#[fixture]
fn scenario() -> Value {
    json!({
        "id": "2b7c9d1e-3f4a-4b5c-8d6e-7f8091a2b3c4",
        "companyId": COMPANY,
        "name": "Double mentors",
        "parameters": { "participantMultiplier": 2 },
        "result": null,
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    })
}

#[rstest]
fn create_request_without_parameters_gets_every_default() {
    let request: CreateScenarioRequest =
        parse_strict(&json!({ "companyId": COMPANY, "name": "Baseline" }))
            .expect("request should validate");
    let parameters = &request.parameters;
    assert!(parameters.is_identity());
    assert!(parameters.program_weights.is_none());
}

#[rstest]
fn create_request_with_empty_parameters_matches_absent() {
    let absent: CreateScenarioRequest =
        parse_strict(&json!({ "companyId": COMPANY, "name": "A" })).expect("absent validates");
    let empty: CreateScenarioRequest =
        parse_strict(&json!({ "companyId": COMPANY, "name": "A", "parameters": {} }))
            .expect("empty validates");
    assert_eq!(absent, empty);
}

#[rstest]
fn create_request_null_parameters_is_a_violation() {
    let value = json!({ "companyId": COMPANY, "name": "A", "parameters": null });
    let violations = parse_strict::<CreateScenarioRequest>(&value).expect_err("null parameters");
    assert_eq!(violations.len(), 1);
    let violation = violations
        .at("parameters")
        .into_iter()
        .next()
        .expect("violation at parameters");
    assert_eq!(violation.code(), ViolationCode::InvalidType);
}

#[rstest]
fn typed_input_without_parameters_fills_inner_defaults() {
    let input = CreateScenarioRequestInput {
        company_id: COMPANY.parse().expect("valid uuid"),
        name: "Typed".to_owned(),
        description: None,
        parameters: None,
    };
    let request: CreateScenarioRequest = parse_input(&input).expect("input should validate");
    assert!(request.parameters.is_identity());
}

#[rstest]
#[case::lower(0.0, true)]
#[case::upper(10.0, true)]
#[case::below(-0.5, false)]
#[case::above(10.5, false)]
fn multipliers_are_bounded(#[case] multiplier: f64, #[case] accepted: bool) {
    let value = json!({ "sessionMultiplier": multiplier });
    assert_eq!(
        parse_strict::<ScenarioParameters>(&value).is_ok(),
        accepted
    );
}

#[rstest]
fn program_weights_are_keyed_by_program_type() {
    let value = json!({ "programWeights": { "mentorship": 0.7, "language": 0.3, "sports": 0.1 } });
    let violations = parse_strict::<ScenarioParameters>(&value).expect_err("unknown program");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.at("programWeights.sports").len(), 1);
}

#[rstest]
fn program_weights_keep_caller_order() {
    let value = json!({ "programWeights": { "weei": 0.5, "language": 0.5 } });
    let parameters: ScenarioParameters = parse_strict(&value).expect("weights validate");
    let keys: Vec<ProgramType> = parameters
        .program_weights
        .map(|weights| weights.keys().copied().collect())
        .unwrap_or_default();
    assert_eq!(keys, [ProgramType::Weei, ProgramType::Language]);
}

#[rstest]
fn never_run_scenario_has_null_result(scenario: Value) {
    let parsed: Scenario = parse_strict(&scenario).expect("scenario should validate");
    assert!(!parsed.has_run());
    let out = normalize(&parsed).expect("scenario should encode");
    assert_eq!(out["result"], Value::Null);
}

#[rstest]
fn result_key_must_be_present(mut scenario: Value) {
    if let Some(map) = scenario.as_object_mut() {
        map.remove("result");
    }
    let violations = parse_strict::<Scenario>(&scenario).expect_err("result key missing");
    assert_eq!(violations.len(), 1);
    let violation = violations
        .at("result")
        .into_iter()
        .next()
        .expect("violation at result");
    assert_eq!(violation.code(), ViolationCode::Required);
}

#[rstest]
fn run_scenario_carries_result(mut scenario: Value) {
    scenario["result"] = json!({
        "baseline": metrics(10),
        "projected": metrics(20),
        "confidence": 0.6,
        "computedAt": "2024-05-02T00:00:00Z"
    });
    let parsed: Scenario = parse_strict(&scenario).expect("scenario should validate");
    assert!(parsed.has_run());
    let result = parsed.result.expect("result present");
    assert_eq!(result.projected.volunteers, 20);
    assert!(result.warnings.is_empty());
}

#[rstest]
fn name_length_is_bounded(mut scenario: Value) {
    scenario["name"] = json!("n".repeat(MAX_NAME_CHARS + 1));
    let violations = parse_strict::<Scenario>(&scenario).expect_err("name too long");
    let violation = violations
        .at("name")
        .into_iter()
        .next()
        .expect("violation at name");
    assert_eq!(violation.code(), ViolationCode::TooLong);
}
