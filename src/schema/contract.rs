//! The [`Contract`] trait and the strict and lenient parse entry points.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::cursor::Cursor;
use super::diagnostic::{Constraint, ViolationList};
use super::error::ContractError;

/// A named shape that untyped JSON can be validated against.
///
/// The implementing type is the *output* of validation: defaulted fields
/// are concrete and unknown keys are gone. [`Contract::Input`] is the
/// matching construction-side type in which defaulted fields are optional;
/// shapes without defaults use `Self` for both.
pub trait Contract: Sized + Serialize {
    /// Shape name used in logs and union violations.
    const NAME: &'static str;

    /// Caller-side type of this shape, defaults still unapplied.
    type Input: Serialize;

    /// Checks `value` and builds the output, recording every violation on
    /// `cx`.
    ///
    /// Returns `None` when at least one violation was recorded.
    fn check(cx: &mut Cursor, value: &Value) -> Option<Self>;
}

/// Validates `input` against `C`, collecting every violation.
///
/// On success the returned value has defaults applied and unknown fields
/// stripped.
///
/// # Errors
///
/// Returns the full [`ViolationList`] when any field fails.
///
/// # Examples
///
///     use impact_contracts::contracts::snapshot::Alert;
///     use impact_contracts::schema::parse_strict;
///     use serde_json::json;
///
///     let alert: Alert = parse_strict(&json!({
///         "type": "capacity_critical",
///         "threshold": 100,
///         "currentValue": 120,
///         "message": "Volunteer capacity exceeded",
///         "legacyFlag": true
///     }))
///     .unwrap();
///     assert!(alert.is_critical());
pub fn parse_strict<C: Contract>(input: &Value) -> Result<C, ViolationList> {
    let mut cx = Cursor::new();
    let output = C::check(&mut cx, input);
    match output {
        Some(value) if cx.is_clean() => Ok(value),
        _ => {
            if cx.is_clean() {
                cx.violate(Constraint::Type { expected: C::NAME }, Some(input));
            }
            let violations = ViolationList::new(cx.into_violations());
            debug!(
                contract = C::NAME,
                violations = violations.len(),
                "shape contract rejected input"
            );
            Err(violations)
        }
    }
}

/// Validates `input` against `C`, discarding the violation details.
#[must_use]
pub fn parse_lenient<C: Contract>(input: &Value) -> Option<C> {
    parse_strict(input).ok()
}

/// Serializes validated output back into JSON.
///
/// Feeding the result to [`parse_strict`] yields an identical value:
/// defaults are fixed points and nothing unknown survives.
///
/// # Errors
///
/// Returns [`ContractError::Encode`] if serialization fails.
pub fn normalize<C: Contract>(output: &C) -> Result<Value, ContractError> {
    serde_json::to_value(output).map_err(|error| ContractError::Encode {
        contract: C::NAME,
        message: error.to_string(),
    })
}

/// Validates a typed caller-side input.
///
/// The input is encoded to JSON first, so exactly the same rules apply as
/// for untyped input.
///
/// # Errors
///
/// Returns [`ContractError::Encode`] if the input cannot be encoded and
/// [`ContractError::Rejected`] if it breaks the contract.
pub fn parse_input<C: Contract>(input: &C::Input) -> Result<C, ContractError> {
    let value = serde_json::to_value(input).map_err(|error| ContractError::Encode {
        contract: C::NAME,
        message: error.to_string(),
    })?;
    parse_strict(&value).map_err(|violations| ContractError::Rejected {
        contract: C::NAME,
        violations,
    })
}
