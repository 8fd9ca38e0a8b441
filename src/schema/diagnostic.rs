//! Structured diagnostics for rejected contract input.
//!
//! A [`Violation`] is the single error kind of the contract layer: the path
//! of the offending value, the constraint it failed, and a description of
//! what was received. [`SourceDiagnostic`] covers the one failure that
//! happens before shape matching starts, malformed JSON text.

use std::fmt;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use super::format::Format;
use super::path::FieldPath;

/// Stable classification codes for shape violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationCode {
    /// A required field was absent.
    Required,
    /// The value had the wrong primitive type.
    InvalidType,
    /// A number or integer was below its lower bound.
    TooSmall,
    /// A number or integer was above its upper bound.
    TooBig,
    /// A string or array had too few characters or items.
    TooShort,
    /// A string or array had too many characters or items.
    TooLong,
    /// A string was outside a closed literal set.
    InvalidEnum,
    /// A string did not match its declared format.
    InvalidFormat,
    /// No variant of an untagged union accepted the value.
    NoVariant,
}

impl ViolationCode {
    /// Returns the stable, machine-readable code string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "shape.required",
            Self::InvalidType => "shape.invalid_type",
            Self::TooSmall => "shape.too_small",
            Self::TooBig => "shape.too_big",
            Self::TooShort => "shape.too_short",
            Self::TooLong => "shape.too_long",
            Self::InvalidEnum => "shape.invalid_enum",
            Self::InvalidFormat => "shape.invalid_format",
            Self::NoVariant => "shape.no_variant",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The constraint a value failed to meet.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// The field must be present.
    Required,
    /// The value must have the named JSON type.
    Type {
        /// Expected type name (`string`, `integer`, `object`, ...).
        expected: &'static str,
    },
    /// Lower numeric bound.
    TooSmall {
        /// The bound itself.
        minimum: f64,
        /// Whether the bound value is accepted.
        inclusive: bool,
    },
    /// Upper numeric bound.
    TooBig {
        /// The bound itself.
        maximum: f64,
        /// Whether the bound value is accepted.
        inclusive: bool,
    },
    /// Minimum length of a string or array.
    TooShort {
        /// Smallest accepted length.
        minimum: usize,
        /// What is being counted (`characters` or `items`).
        unit: &'static str,
    },
    /// Maximum length of a string or array.
    TooLong {
        /// Largest accepted length.
        maximum: usize,
        /// What is being counted (`characters` or `items`).
        unit: &'static str,
    },
    /// Membership in a closed literal set.
    Enum {
        /// Every accepted literal, in declaration order.
        allowed: Vec<&'static str>,
    },
    /// A string format such as `uuid` or `date-time`.
    Format {
        /// The format that was not matched.
        format: Format,
    },
    /// An untagged union where every variant rejected the value.
    NoVariant {
        /// Variant names in trial order.
        variants: Vec<&'static str>,
    },
}

impl Constraint {
    /// Returns the stable code for this constraint.
    #[must_use]
    pub const fn code(&self) -> ViolationCode {
        match self {
            Self::Required => ViolationCode::Required,
            Self::Type { .. } => ViolationCode::InvalidType,
            Self::TooSmall { .. } => ViolationCode::TooSmall,
            Self::TooBig { .. } => ViolationCode::TooBig,
            Self::TooShort { .. } => ViolationCode::TooShort,
            Self::TooLong { .. } => ViolationCode::TooLong,
            Self::Enum { .. } => ViolationCode::InvalidEnum,
            Self::Format { .. } => ViolationCode::InvalidFormat,
            Self::NoVariant { .. } => ViolationCode::NoVariant,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required field is absent"),
            Self::Type { expected } => write!(f, "expected {expected}"),
            Self::TooSmall { minimum, inclusive } => {
                let op = if *inclusive { ">=" } else { ">" };
                write!(f, "must be {op} {minimum}")
            }
            Self::TooBig { maximum, inclusive } => {
                let op = if *inclusive { "<=" } else { "<" };
                write!(f, "must be {op} {maximum}")
            }
            Self::TooShort { minimum, unit } => write!(f, "must contain at least {minimum} {unit}"),
            Self::TooLong { maximum, unit } => write!(f, "must contain at most {maximum} {unit}"),
            Self::Enum { allowed } => write!(f, "expected one of: {}", allowed.join(", ")),
            Self::Format { format } => write!(f, "expected {format} format"),
            Self::NoVariant { variants } => {
                write!(f, "did not match any variant (tried {})", variants.join(", "))
            }
        }
    }
}

/// A single shape violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Location of the offending value.
    pub path: FieldPath,
    /// The constraint that was not met.
    pub constraint: Constraint,
    /// Human-readable description of the received value.
    pub received: String,
}

impl Violation {
    /// Returns the stable code for this violation.
    #[must_use]
    pub const fn code(&self) -> ViolationCode {
        self.constraint.code()
    }

    /// Renders the violation into a deterministic single-line format
    /// suitable for snapshot tests and logs.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} | {} | {} | received {}",
            self.code(),
            self.path,
            self.constraint,
            self.received
        )
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Violation", 4)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("code", self.code().as_str())?;
        state.serialize_field("message", &self.constraint.to_string())?;
        state.serialize_field("received", &self.received)?;
        state.end()
    }
}

/// Every violation found in one validation pass, in discovery order.
///
/// Serializes as a plain array of `{path, code, message, received}`
/// objects so API layers can return it unchanged as field errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{} shape violation(s): {}", .0.len(), summary(.0))]
pub struct ViolationList(Vec<Violation>);

impl ViolationList {
    pub(crate) const fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    /// Number of collected violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over violations in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Returns the violations recorded at exactly `path`
    /// (rendered form, e.g. `slides[0].blocks[1].type`).
    #[must_use]
    pub fn at(&self, path: &str) -> Vec<&Violation> {
        self.0.iter().filter(|v| v.path == path).collect()
    }

    /// Renders every violation on its own line.
    #[must_use]
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(Violation::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Consumes the list and returns the underlying violations.
    #[must_use]
    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }
}

impl IntoIterator for ViolationList {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ViolationList {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.path, v.constraint))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Stable codes for failures that happen before shape matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDiagnosticCode {
    /// The JSON text could not be parsed.
    ParseFailure,
}

impl SourceDiagnosticCode {
    /// Returns the stable, machine-readable code string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParseFailure => "shape.parse_failure",
        }
    }
}

/// Source location attached to a [`SourceDiagnostic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file or source identifier.
    pub source: String,
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub column: usize,
}

/// Diagnostic for JSON text that never reached shape matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDiagnostic {
    /// Stable diagnostic code.
    pub code: SourceDiagnosticCode,
    /// Where the parser stopped.
    pub location: SourceLocation,
    /// Deterministic human-readable fallback message.
    pub message: String,
}

impl SourceDiagnostic {
    /// Renders the diagnostic into a deterministic single-line format.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} | {}:{}:{} | {}",
            self.code.as_str(),
            self.location.source,
            self.location.line,
            self.location.column,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Constraint, FieldPath, Violation, ViolationCode, ViolationList};

    fn violation(path: FieldPath, constraint: Constraint) -> Violation {
        Violation {
            path,
            constraint,
            received: "absent".to_owned(),
        }
    }

    #[rstest]
    #[case::required(Constraint::Required, "shape.required")]
    #[case::too_small(
        Constraint::TooSmall { minimum: 0.0, inclusive: true },
        "shape.too_small"
    )]
    #[case::no_variant(Constraint::NoVariant { variants: vec!["A"] }, "shape.no_variant")]
    fn constraint_maps_to_stable_code(#[case] constraint: Constraint, #[case] code: &str) {
        assert_eq!(constraint.code().as_str(), code);
    }

    #[rstest]
    fn render_is_single_line() {
        let v = violation(FieldPath::root().key("campaignId"), Constraint::Required);
        assert_eq!(
            v.render(),
            "shape.required | campaignId | required field is absent | received absent"
        );
    }

    #[rstest]
    fn bounds_render_with_operator() {
        let inclusive = Constraint::TooBig {
            maximum: 100.0,
            inclusive: true,
        };
        let exclusive = Constraint::TooSmall {
            minimum: 0.0,
            inclusive: false,
        };
        assert_eq!(inclusive.to_string(), "must be <= 100");
        assert_eq!(exclusive.to_string(), "must be > 0");
    }

    #[rstest]
    fn list_serializes_as_field_errors() {
        let list = ViolationList::new(vec![violation(
            FieldPath::root().key("slides").index(0),
            Constraint::Type { expected: "object" },
        )]);
        let json = serde_json::to_value(&list).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!([{
                "path": "slides[0]",
                "code": "shape.invalid_type",
                "message": "expected object",
                "received": "absent",
            }])
        );
        assert_eq!(list.at("slides[0]").len(), 1);
        assert_eq!(
            list.iter().next().map(Violation::code),
            Some(ViolationCode::InvalidType)
        );
    }
}
