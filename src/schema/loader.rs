//! Loading contracts from JSON text.
//!
//! Provides [`parse_json_str`] which parses a JSON document and validates
//! it against a contract in one step, reporting malformed text with a
//! source-located diagnostic and broken shapes with the full violation
//! list.

use serde_json::Value;

use super::contract::{Contract, parse_strict};
use super::diagnostic::{SourceDiagnostic, SourceDiagnosticCode, SourceLocation};
use super::error::ContractError;

/// Synthetic source identifier used by [`parse_json_str`].
const INLINE_SOURCE: &str = "<inline>";

/// Parses JSON text and validates it against `C`.
///
/// # Errors
///
/// Returns [`ContractError::Deserialize`] if the text is not valid JSON
/// and [`ContractError::Rejected`] if the document breaks the contract.
///
/// # Examples
///
///     use impact_contracts::contracts::snapshot::SnapshotQuery;
///     use impact_contracts::schema::parse_json_str;
///
///     let query: SnapshotQuery = parse_json_str(r#"{"campaignId": "c1"}"#).unwrap();
///     assert_eq!(query.limit, 100);
///     assert_eq!(query.offset, 0);
pub fn parse_json_str<C: Contract>(input: &str) -> Result<C, ContractError> {
    parse_json_str_with_source(INLINE_SOURCE, input)
}

/// Parses JSON text and records diagnostics against an explicit source
/// identifier (a file path or request id).
///
/// # Errors
///
/// Returns [`ContractError::Deserialize`] when JSON parsing fails and
/// [`ContractError::Rejected`] when shape validation fails.
pub fn parse_json_str_with_source<C: Contract>(
    source: &str,
    input: &str,
) -> Result<C, ContractError> {
    let value: Value = serde_json::from_str(input).map_err(|error| {
        let message = error.to_string();
        let diagnostic = (error.line() > 0).then(|| parse_diagnostic(source, &error));
        ContractError::Deserialize {
            message,
            diagnostic,
        }
    })?;

    parse_strict(&value).map_err(|violations| ContractError::Rejected {
        contract: C::NAME,
        violations,
    })
}

fn parse_diagnostic(source: &str, error: &serde_json::Error) -> SourceDiagnostic {
    SourceDiagnostic {
        code: SourceDiagnosticCode::ParseFailure,
        location: SourceLocation {
            source: source.to_owned(),
            line: error.line(),
            column: error.column().max(1),
        },
        message: first_line(&error.to_string()),
    }
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or(message).to_owned()
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
