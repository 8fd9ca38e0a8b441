//! Program impact tiles.
//!
//! A tile is one program family's aggregated metrics for a company and
//! period. Every variant shares the [`TileMetadata`] envelope; the `data`
//! payload depends on the `programType` tag, which selects exactly one
//! variant before `data` is read.

use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::common::{DataFreshness, Period, ProgramType};
use crate::schema::field::{
    boolean, count, list, literal, number, record_of, shape, text, timestamp, uuid,
};
use crate::schema::{Contract, Cursor, Literal, literal_set};

/// Highest accepted Volunteer Impact Score on a tile.
pub const MAX_TILE_VIS: f64 = 100.0;

// ── Shared envelope ─────────────────────────────────────────────────

/// Metadata carried by every tile regardless of program type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMetadata {
    /// Company the tile aggregates.
    pub company_id: Uuid,
    /// Aggregation window.
    pub period: Period,
    /// When the aggregate was computed.
    pub calculated_at: DateTime<Utc>,
    /// Cache tier the aggregate was served from.
    pub data_freshness: DataFreshness,
}

impl Contract for TileMetadata {
    const NAME: &'static str = "TileMetadata";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let company_id = obj.required("companyId", uuid());
            let period = obj.required("period", shape::<Period>());
            let calculated_at = obj.required("calculatedAt", timestamp());
            let data_freshness = obj.required("dataFreshness", literal::<DataFreshness>());
            Some(Self {
                company_id: company_id?,
                period: period?,
                calculated_at: calculated_at?,
                data_freshness: data_freshness?,
            })
        })
    }
}

// ── Shared metric parts ─────────────────────────────────────────────

/// Retention of enrolled participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionMetric {
    /// Participants ever enrolled in the period.
    pub enrolled: u64,
    /// Participants still active at period end.
    pub active: u64,
    /// Active over enrolled, 0 to 1.
    pub retention_rate: f64,
}

impl Contract for RetentionMetric {
    const NAME: &'static str = "RetentionMetric";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let enrolled = obj.required("enrolled", count());
            let active = obj.required("active", count());
            let retention_rate = obj.required("retentionRate", number().range(0.0, 1.0));
            Some(Self {
                enrolled: enrolled?,
                active: active?,
                retention_rate: retention_rate?,
            })
        })
    }
}

// ── Language ────────────────────────────────────────────────────────

literal_set! {
    /// CEFR proficiency level.
    pub enum CefrLevel {
        /// Beginner.
        A1 => "A1",
        /// Elementary.
        A2 => "A2",
        /// Intermediate.
        B1 => "B1",
        /// Upper intermediate.
        B2 => "B2",
        /// Advanced.
        C1 => "C1",
        /// Proficient.
        C2 => "C2",
    }
}

/// Class attendance figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMetric {
    /// Class sessions scheduled.
    pub scheduled_sessions: u64,
    /// Class sessions attended.
    pub attended_sessions: u64,
    /// Attended over scheduled, 0 to 1.
    pub attendance_rate: f64,
}

impl Contract for AttendanceMetric {
    const NAME: &'static str = "AttendanceMetric";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let scheduled_sessions = obj.required("scheduledSessions", count());
            let attended_sessions = obj.required("attendedSessions", count());
            let attendance_rate = obj.required("attendanceRate", number().range(0.0, 1.0));
            Some(Self {
                scheduled_sessions: scheduled_sessions?,
                attended_sessions: attended_sessions?,
                attendance_rate: attendance_rate?,
            })
        })
    }
}

/// Data of a language-program tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageTileData {
    /// Class attendance.
    pub class_attendance: AttendanceMetric,
    /// Learner retention.
    pub retention: RetentionMetric,
    /// Learners per CEFR level, in caller order.
    pub level_distribution: IndexMap<CefrLevel, u64>,
    /// Volunteer teaching hours.
    pub volunteer_hours: f64,
    /// SROI ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sroi: Option<f64>,
    /// Volunteer Impact Score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vis: Option<f64>,
}

impl Contract for LanguageTileData {
    const NAME: &'static str = "LanguageTileData";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let class_attendance = obj.required("classAttendance", shape::<AttendanceMetric>());
            let retention = obj.required("retention", shape::<RetentionMetric>());
            let level_distribution =
                obj.required("levelDistribution", record_of::<CefrLevel, _>(count()));
            let volunteer_hours = obj.required("volunteerHours", number().non_negative());
            let sroi = obj.optional("sroi", number().non_negative());
            let vis = obj.optional("vis", number().range(0.0, MAX_TILE_VIS));
            Some(Self {
                class_attendance: class_attendance?,
                retention: retention?,
                level_distribution: level_distribution?,
                volunteer_hours: volunteer_hours?,
                sroi: sroi?,
                vis: vis?,
            })
        })
    }
}

// ── Mentorship ──────────────────────────────────────────────────────

/// Mentor/mentee matching funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFunnel {
    /// Mentees asking for a match.
    pub requested: u64,
    /// Pairs matched.
    pub matched: u64,
    /// Pairs meeting regularly.
    pub active: u64,
    /// Pairs that finished the programme.
    pub completed: u64,
}

impl Contract for MatchFunnel {
    const NAME: &'static str = "MatchFunnel";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let requested = obj.required("requested", count());
            let matched = obj.required("matched", count());
            let active = obj.required("active", count());
            let completed = obj.required("completed", count());
            Some(Self {
                requested: requested?,
                matched: matched?,
                active: active?,
                completed: completed?,
            })
        })
    }
}

/// How often matched pairs meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFrequency {
    /// Mean sessions per pair per month.
    pub sessions_per_month: f64,
    /// Median gap between sessions, in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_days_between: Option<f64>,
}

impl Contract for SessionFrequency {
    const NAME: &'static str = "SessionFrequency";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let sessions_per_month = obj.required("sessionsPerMonth", number().non_negative());
            let median_days_between =
                obj.optional("medianDaysBetween", number().non_negative());
            Some(Self {
                sessions_per_month: sessions_per_month?,
                median_days_between: median_days_between?,
            })
        })
    }
}

/// Mentee goal tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Goals agreed.
    pub goals_set: u64,
    /// Goals reached.
    pub goals_achieved: u64,
    /// Reached over agreed, 0 to 1.
    pub achievement_rate: f64,
}

impl Contract for GoalProgress {
    const NAME: &'static str = "GoalProgress";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let goals_set = obj.required("goalsSet", count());
            let goals_achieved = obj.required("goalsAchieved", count());
            let achievement_rate = obj.required("achievementRate", number().range(0.0, 1.0));
            Some(Self {
                goals_set: goals_set?,
                goals_achieved: goals_achieved?,
                achievement_rate: achievement_rate?,
            })
        })
    }
}

/// Data of a mentorship-program tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipTileData {
    /// Matching funnel.
    pub match_funnel: MatchFunnel,
    /// Meeting cadence.
    pub session_frequency: SessionFrequency,
    /// Mentee retention.
    pub retention: RetentionMetric,
    /// Goal tracking.
    pub goal_progress: GoalProgress,
}

impl Contract for MentorshipTileData {
    const NAME: &'static str = "MentorshipTileData";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let match_funnel = obj.required("matchFunnel", shape::<MatchFunnel>());
            let session_frequency = obj.required("sessionFrequency", shape::<SessionFrequency>());
            let retention = obj.required("retention", shape::<RetentionMetric>());
            let goal_progress = obj.required("goalProgress", shape::<GoalProgress>());
            Some(Self {
                match_funnel: match_funnel?,
                session_frequency: session_frequency?,
                retention: retention?,
                goal_progress: goal_progress?,
            })
        })
    }
}

// ── Upskilling ──────────────────────────────────────────────────────

/// Course enrolment funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolmentFunnel {
    /// Learners enrolled.
    pub enrolled: u64,
    /// Learners who started a course.
    pub started: u64,
    /// Learners who completed a course.
    pub completed: u64,
    /// Completed over enrolled, 0 to 1.
    pub completion_rate: f64,
}

impl Contract for EnrolmentFunnel {
    const NAME: &'static str = "EnrolmentFunnel";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let enrolled = obj.required("enrolled", count());
            let started = obj.required("started", count());
            let completed = obj.required("completed", count());
            let completion_rate = obj.required("completionRate", number().range(0.0, 1.0));
            Some(Self {
                enrolled: enrolled?,
                started: started?,
                completed: completed?,
                completion_rate: completion_rate?,
            })
        })
    }
}

/// Certificates issued by one course provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCount {
    /// Provider name.
    pub provider: String,
    /// Certificates issued.
    pub count: u64,
}

impl Contract for ProviderCount {
    const NAME: &'static str = "ProviderCount";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let provider = obj.required("provider", text().non_empty());
            let issued = obj.required("count", count());
            Some(Self {
                provider: provider?,
                count: issued?,
            })
        })
    }
}

/// Certification totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationMetric {
    /// Certificates issued in total.
    pub issued: u64,
    /// Per-provider breakdown.
    pub by_provider: Vec<ProviderCount>,
}

impl Contract for CertificationMetric {
    const NAME: &'static str = "CertificationMetric";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let issued = obj.required("issued", count());
            let by_provider = obj.required("byProvider", list(shape::<ProviderCount>()));
            Some(Self {
                issued: issued?,
                by_provider: by_provider?,
            })
        })
    }
}

/// Data of an upskilling-program tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpskillingTileData {
    /// Enrolment funnel.
    pub enrolment_funnel: EnrolmentFunnel,
    /// Certifications.
    pub certifications: CertificationMetric,
    /// Share of completers placed in work, 0 to 1.
    pub placement_rate: f64,
}

impl Contract for UpskillingTileData {
    const NAME: &'static str = "UpskillingTileData";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let enrolment_funnel = obj.required("enrolmentFunnel", shape::<EnrolmentFunnel>());
            let certifications = obj.required("certifications", shape::<CertificationMetric>());
            let placement_rate = obj.required("placementRate", number().range(0.0, 1.0));
            Some(Self {
                enrolment_funnel: enrolment_funnel?,
                certifications: certifications?,
                placement_rate: placement_rate?,
            })
        })
    }
}

// ── WEEI ────────────────────────────────────────────────────────────

literal_set! {
    /// Incubator stage.
    pub enum WeeiStage {
        /// Idea discovery.
        Discover => "discover",
        /// Building the business.
        Build => "build",
        /// Going to market.
        Launch => "launch",
        /// Growing.
        Scale => "scale",
    }
}

/// Participants moving through one incubator stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageThroughput {
    /// Stage.
    pub stage: WeeiStage,
    /// Participants who entered.
    pub entered: u64,
    /// Participants who finished.
    pub completed: u64,
    /// Mean days spent in the stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_days: Option<f64>,
}

impl Contract for StageThroughput {
    const NAME: &'static str = "StageThroughput";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let stage = obj.required("stage", literal::<WeeiStage>());
            let entered = obj.required("entered", count());
            let completed = obj.required("completed", count());
            let average_days = obj.optional("averageDays", number().non_negative());
            Some(Self {
                stage: stage?,
                entered: entered?,
                completed: completed?,
                average_days: average_days?,
            })
        })
    }
}

/// Demo-day results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoDayOutcome {
    /// Businesses that pitched.
    pub pitches: u64,
    /// Businesses that secured funding.
    pub funded: u64,
    /// Funding raised across all pitches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_funding: Option<f64>,
}

impl Contract for DemoDayOutcome {
    const NAME: &'static str = "DemoDayOutcome";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let pitches = obj.required("pitches", count());
            let funded = obj.required("funded", count());
            let total_funding = obj.optional("totalFunding", number().non_negative());
            Some(Self {
                pitches: pitches?,
                funded: funded?,
                total_funding: total_funding?,
            })
        })
    }
}

/// Data of a WEEI incubator tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeiTileData {
    /// Throughput per stage, at least one.
    pub stages: Vec<StageThroughput>,
    /// Demo-day results, once one has been held.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_day: Option<DemoDayOutcome>,
}

impl Contract for WeeiTileData {
    const NAME: &'static str = "WeeiTileData";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let stages = obj.required("stages", list(shape::<StageThroughput>()).non_empty());
            let demo_day = obj.optional("demoDay", shape::<DemoDayOutcome>());
            Some(Self {
                stages: stages?,
                demo_day: demo_day?,
            })
        })
    }
}

// ── Tile union ──────────────────────────────────────────────────────

/// A program tile, discriminated by `programType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "programType", rename_all = "snake_case")]
pub enum Tile {
    /// Language classes.
    Language {
        /// Shared envelope.
        metadata: TileMetadata,
        /// Variant data.
        data: LanguageTileData,
    },
    /// Mentorship.
    Mentorship {
        /// Shared envelope.
        metadata: TileMetadata,
        /// Variant data.
        data: MentorshipTileData,
    },
    /// Upskilling.
    Upskilling {
        /// Shared envelope.
        metadata: TileMetadata,
        /// Variant data.
        data: UpskillingTileData,
    },
    /// WEEI incubator.
    Weei {
        /// Shared envelope.
        metadata: TileMetadata,
        /// Variant data.
        data: WeeiTileData,
    },
}

impl Tile {
    /// Returns the discriminating program type.
    #[must_use]
    pub const fn program_type(&self) -> ProgramType {
        match self {
            Self::Language { .. } => ProgramType::Language,
            Self::Mentorship { .. } => ProgramType::Mentorship,
            Self::Upskilling { .. } => ProgramType::Upskilling,
            Self::Weei { .. } => ProgramType::Weei,
        }
    }

    /// Returns the shared envelope.
    #[must_use]
    pub const fn metadata(&self) -> &TileMetadata {
        match self {
            Self::Language { metadata, .. }
            | Self::Mentorship { metadata, .. }
            | Self::Upskilling { metadata, .. }
            | Self::Weei { metadata, .. } => metadata,
        }
    }

    /// Returns `true` if the tile was calculated more than `max_age` before
    /// `now`.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: TimeDelta) -> bool {
        now.signed_duration_since(self.metadata().calculated_at) > max_age
    }

    /// Staleness measured against the tile's own freshness tier.
    #[must_use]
    pub fn is_stale_for_tier(&self, now: DateTime<Utc>) -> bool {
        let secs = self.metadata().data_freshness.max_age_secs();
        TimeDelta::try_seconds(secs).is_some_and(|max_age| self.is_stale(now, max_age))
    }
}

impl Contract for Tile {
    const NAME: &'static str = "Tile";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let program_type = obj.discriminator::<ProgramType>("programType");
            let metadata = obj.required("metadata", shape::<TileMetadata>());
            // `data` is only read once the tag has picked its shape.
            let tile = match program_type? {
                ProgramType::Language => {
                    let data = obj.required("data", shape::<LanguageTileData>());
                    Self::Language {
                        metadata: metadata?,
                        data: data?,
                    }
                }
                ProgramType::Mentorship => {
                    let data = obj.required("data", shape::<MentorshipTileData>());
                    Self::Mentorship {
                        metadata: metadata?,
                        data: data?,
                    }
                }
                ProgramType::Upskilling => {
                    let data = obj.required("data", shape::<UpskillingTileData>());
                    Self::Upskilling {
                        metadata: metadata?,
                        data: data?,
                    }
                }
                ProgramType::Weei => {
                    let data = obj.required("data", shape::<WeeiTileData>());
                    Self::Weei {
                        metadata: metadata?,
                        data: data?,
                    }
                }
            };
            Some(tile)
        })
    }
}

// ── Requests and responses ──────────────────────────────────────────

/// Request for a single tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRequest {
    /// Company to aggregate.
    pub company_id: Uuid,
    /// Program family.
    pub program_type: ProgramType,
    /// Window; the service picks the current quarter when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    /// Bypass the cache.
    pub refresh: bool,
}

/// Caller-side [`TileRequest`]; `refresh` defaults to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRequestInput {
    /// Company to aggregate.
    pub company_id: Uuid,
    /// Program family.
    pub program_type: ProgramType,
    /// Window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    /// Bypass the cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<bool>,
}

impl Contract for TileRequest {
    const NAME: &'static str = "TileRequest";
    type Input = TileRequestInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let company_id = obj.required("companyId", uuid());
            let program_type = obj.required("programType", literal::<ProgramType>());
            let period = obj.optional("period", shape::<Period>());
            let refresh = obj.defaulted("refresh", boolean(), false);
            Some(Self {
                company_id: company_id?,
                program_type: program_type?,
                period: period?,
                refresh: refresh?,
            })
        })
    }
}

/// Request for several tiles at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileListRequest {
    /// Company to aggregate.
    pub company_id: Uuid,
    /// Program families, at least one.
    pub program_types: Vec<ProgramType>,
    /// Window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// Caller-side [`TileListRequest`]; `programTypes` defaults to all four.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileListRequestInput {
    /// Company to aggregate.
    pub company_id: Uuid,
    /// Program families.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_types: Option<Vec<ProgramType>>,
    /// Window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

impl Contract for TileListRequest {
    const NAME: &'static str = "TileListRequest";
    type Input = TileListRequestInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let company_id = obj.required("companyId", uuid());
            let program_types = obj.defaulted(
                "programTypes",
                list(literal::<ProgramType>()).non_empty(),
                ProgramType::ALL.to_vec(),
            );
            let period = obj.optional("period", shape::<Period>());
            Some(Self {
                company_id: company_id?,
                program_types: program_types?,
                period: period?,
            })
        })
    }
}

/// Single-tile response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileResponse {
    /// The tile.
    pub tile: Tile,
}

impl Contract for TileResponse {
    const NAME: &'static str = "TileResponse";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let tile = obj.required("tile", shape::<Tile>());
            Some(Self { tile: tile? })
        })
    }
}

/// Multi-tile response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileListResponse {
    /// Tiles in request order.
    pub tiles: Vec<Tile>,
    /// When the response was assembled.
    pub generated_at: DateTime<Utc>,
}

impl TileListResponse {
    /// Returns the first tile for `program_type`, if present.
    #[must_use]
    pub fn tile_for(&self, program_type: ProgramType) -> Option<&Tile> {
        self.tiles
            .iter()
            .find(|tile| tile.program_type() == program_type)
    }
}

impl Contract for TileListResponse {
    const NAME: &'static str = "TileListResponse";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let tiles = obj.required("tiles", list(shape::<Tile>()));
            let generated_at = obj.required("generatedAt", timestamp());
            Some(Self {
                tiles: tiles?,
                generated_at: generated_at?,
            })
        })
    }
}

#[cfg(test)]
#[path = "tile_tests.rs"]
mod tests;
