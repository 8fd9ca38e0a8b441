//! Shared test helpers for integration tests.

use impact_contracts::schema::{Contract, ViolationList, normalize, parse_strict};
use serde_json::Value;

pub use test_helpers::{load_fixture, load_json_fixture, with, without};

/// Rendered paths of every violation, in discovery order.
pub fn violation_paths(violations: &ViolationList) -> Vec<String> {
    violations.iter().map(|v| v.path.to_string()).collect()
}

/// Validates a fixture that is expected to pass.
///
/// # Panics
///
/// Panics with the rendered violations if the fixture is rejected.
pub fn parse_fixture<C: Contract>(name: &str) -> C {
    let value = load_json_fixture(name);
    parse_strict(&value).unwrap_or_else(|violations| {
        panic!("{name} should satisfy {}:\n{}", C::NAME, violations.render())
    })
}

/// Validates `value`, then re-validates its normalized form.
///
/// # Panics
///
/// Panics if either pass is rejected or the two outputs differ.
pub fn assert_normalize_idempotent<C: Contract + PartialEq + std::fmt::Debug>(value: &Value) {
    let first: C = parse_strict(value)
        .unwrap_or_else(|violations| panic!("first pass rejected:\n{}", violations.render()));
    let normalized = normalize(&first).unwrap_or_else(|e| panic!("normalize failed: {e}"));
    let second: C = parse_strict(&normalized)
        .unwrap_or_else(|violations| panic!("second pass rejected:\n{}", violations.render()));
    assert_eq!(first, second, "normalize should be a fixed point for {}", C::NAME);
    let renormalized = normalize(&second).unwrap_or_else(|e| panic!("normalize failed: {e}"));
    assert_eq!(normalized, renormalized);
}
