//! String formats recognised by text fields.
//!
//! Typed formats (`uuid`, `date-time`, `date`) are parsed by their own
//! field specs into `uuid` and `chrono` values; the formats here stay
//! strings in the output and are only checked lexically.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// A lexical string format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// RFC 4122 UUID.
    Uuid,
    /// RFC 3339 timestamp.
    DateTime,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// Absolute `http` or `https` URL.
    Url,
    /// `#RRGGBB` colour.
    HexColor,
    /// Lowercase hexadecimal SHA-256 digest.
    Sha256,
    /// Decimal number carried as a string (`-12.50`).
    Decimal,
    /// ISO 4217 style currency code (`USD`).
    Currency,
}

impl Format {
    /// Returns the format name used in violation messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::DateTime => "date-time",
            Self::Date => "date",
            Self::Url => "url",
            Self::HexColor => "hex-color",
            Self::Sha256 => "sha256",
            Self::Decimal => "decimal",
            Self::Currency => "currency",
        }
    }

    /// Returns `true` if `s` is lexically valid for this format.
    #[must_use]
    pub fn matches(self, s: &str) -> bool {
        match self {
            Self::Uuid => uuid::Uuid::try_parse(s).is_ok(),
            Self::DateTime => chrono::DateTime::parse_from_rfc3339(s).is_ok(),
            Self::Date => chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
            Self::Url => is_match(&URL, s),
            Self::HexColor => is_match(&HEX_COLOR, s),
            Self::Sha256 => is_match(&SHA256, s),
            Self::Decimal => is_match(&DECIMAL, s),
            Self::Currency => is_match(&CURRENCY, s),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static URL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+\S*$").ok());
static HEX_COLOR: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").ok());
static SHA256: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[0-9a-f]{64}$").ok());
static DECIMAL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").ok());
static CURRENCY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").ok());

/// Matches against a pattern that failed to build as "no match".
fn is_match(pattern: &LazyLock<Option<Regex>>, s: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(s))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Format;

    #[rstest]
    #[case::uuid(Format::Uuid, "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    #[case::datetime(Format::DateTime, "2024-03-01T12:30:00Z")]
    #[case::datetime_offset(Format::DateTime, "2024-03-01T12:30:00.125+02:00")]
    #[case::date(Format::Date, "2024-02-29")]
    #[case::url(Format::Url, "https://cdn.example.com/decks/q1.pptx?sig=abc")]
    #[case::hex(Format::HexColor, "#1A2b3C")]
    #[case::sha(Format::Sha256, "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")]
    #[case::decimal(Format::Decimal, "-1250.75")]
    #[case::decimal_int(Format::Decimal, "42")]
    #[case::currency(Format::Currency, "EUR")]
    fn accepts_well_formed_values(#[case] format: Format, #[case] input: &str) {
        assert!(format.matches(input), "{format} should accept {input}");
    }

    #[rstest]
    #[case::uuid(Format::Uuid, "c1")]
    #[case::datetime_date_only(Format::DateTime, "2024-03-01")]
    #[case::date_invalid_day(Format::Date, "2023-02-29")]
    #[case::url_scheme(Format::Url, "ftp://example.com/file")]
    #[case::url_spaces(Format::Url, "https://exa mple.com")]
    #[case::hex_short(Format::HexColor, "#fff")]
    #[case::sha_upper(Format::Sha256, "9F86D081884C7D659A2FEAA0C55AD015A3BF4F1B2B0B822CD15D6C15B0F00A08")]
    #[case::decimal_exponent(Format::Decimal, "1e5")]
    #[case::decimal_trailing_dot(Format::Decimal, "12.")]
    #[case::currency_lower(Format::Currency, "usd")]
    fn rejects_malformed_values(#[case] format: Format, #[case] input: &str) {
        assert!(!format.matches(input), "{format} should reject {input}");
    }
}
