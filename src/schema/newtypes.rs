//! Validated newtypes for string-carried values.
//!
//! `DecimalString` wraps a `String` that has passed decimal-format
//! validation at construction time. The persisted side of the metrics
//! contracts carries money, ratios and scores this way so that no float
//! rounding happens between the database and the API boundary.

use std::fmt;

use serde::{Deserialize, Serialize, de};

use super::format::Format;

/// A decimal number kept as its exact string form, e.g. `"1250.50"`.
///
/// Construction (via deserialization or [`DecimalString::new`]) ensures
/// the string matches `^-?\d+(\.\d+)?$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DecimalString(String);

/// Error returned when a string is not a decimal literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a decimal number")]
pub struct InvalidDecimal(pub String);

impl DecimalString {
    /// Creates a `DecimalString` after validating the input.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDecimal`] if `s` is not a plain decimal literal.
    pub fn new(s: String) -> Result<Self, InvalidDecimal> {
        if Format::Decimal.matches(&s) {
            Ok(Self(s))
        } else {
            Err(InvalidDecimal(s))
        }
    }

    /// Returns the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts to a float at the caller's explicit request.
    ///
    /// Precision beyond what `f64` can represent is lost.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        self.0.parse().ok()
    }
}

impl PartialEq<&str> for DecimalString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl AsRef<str> for DecimalString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecimalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DecimalString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::DecimalString;

    #[rstest]
    #[case::integer("950", Some(950.0))]
    #[case::negative("-12.5", Some(-12.5))]
    fn valid_decimals_convert(#[case] raw: &str, #[case] expected: Option<f64>) {
        let decimal = DecimalString::new(raw.to_owned());
        assert_eq!(decimal.as_ref().ok().and_then(DecimalString::to_f64), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::exponent("1e3")]
    #[case::comma("1,000")]
    fn malformed_decimals_are_rejected(#[case] raw: &str) {
        assert!(DecimalString::new(raw.to_owned()).is_err());
    }

    #[rstest]
    fn deserialization_validates() {
        let ok: Result<DecimalString, _> = serde_json::from_str("\"0.95\"");
        let bad: Result<DecimalString, _> = serde_json::from_str("\"ninety\"");
        assert!(ok.is_ok_and(|d| d == "0.95"));
        assert!(bad.is_err());
    }
}
