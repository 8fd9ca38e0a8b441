//! Closed sets and small shapes shared by several contract families.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::field::date;
use crate::schema::{Contract, Cursor, literal_set};

literal_set! {
    /// Program family a tile, deck or report is about.
    pub enum ProgramType {
        /// Language classes.
        Language => "language",
        /// One-to-one mentorship.
        Mentorship => "mentorship",
        /// Digital upskilling courses.
        Upskilling => "upskilling",
        /// Women's economic empowerment incubator.
        Weei => "weei",
    }
}

literal_set! {
    /// Output language for generated content.
    pub enum Locale {
        /// English.
        En => "en",
        /// Spanish.
        Es => "es",
        /// French.
        Fr => "fr",
        /// Ukrainian.
        Uk => "uk",
        /// Norwegian.
        No => "no",
    }
}

literal_set! {
    /// How fresh a calculated aggregate is.
    pub enum DataFreshness {
        /// Computed on request.
        Live => "live",
        /// Served from a cache refreshed every five minutes.
        Cached5m => "cached_5m",
        /// Served from a cache refreshed hourly.
        Cached1h => "cached_1h",
        /// Served from a cache refreshed daily.
        Cached24h => "cached_24h",
    }
}

impl DataFreshness {
    /// Longest age a value with this freshness tier may have, in seconds.
    #[must_use]
    pub const fn max_age_secs(self) -> i64 {
        match self {
            Self::Live => 0,
            Self::Cached5m => 300,
            Self::Cached1h => 3_600,
            Self::Cached24h => 86_400,
        }
    }
}

literal_set! {
    /// Writing register for generated narrative.
    pub enum Tone {
        /// Board-report register.
        Formal => "formal",
        /// Plain, friendly register.
        Conversational => "conversational",
        /// Story-led register for campaigns.
        Inspirational => "inspirational",
    }
}

/// Inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
}

impl Contract for Period {
    const NAME: &'static str = "Period";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let start = obj.required("start", date());
            let end = obj.required("end", date());
            Some(Self {
                start: start?,
                end: end?,
            })
        })
    }
}
