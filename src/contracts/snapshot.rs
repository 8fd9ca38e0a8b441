//! Campaign metrics snapshots and their alerts.
//!
//! A snapshot exists in two parallel shapes. [`CreateSnapshotRequest`] is
//! the numeric input side; [`CampaignMetricsSnapshot`] is the persisted read
//! side, where money, ratios and scores are decimal strings. Converting one
//! into the other belongs to the storage layer, not to these contracts.
//!
//! Utilization fields are percentages (`120` means 120 %). They are derived
//! as current / target by the producer; the contracts only check range and
//! presence, never the arithmetic.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::schema::field::{
    boolean, count, date, decimal, integer, list, literal, nullable, number, shape, text,
    timestamp, uuid,
};
use crate::schema::{Contract, Cursor, DecimalString, Format, literal_set};

/// Utilization (percent) from which a campaign counts as near capacity.
pub const NEAR_CAPACITY_PERCENT: f64 = 80.0;

/// Utilization (percent) at which a campaign is at full capacity.
pub const FULL_CAPACITY_PERCENT: f64 = 100.0;

/// Utilization (percent) below which capacity is considered underused.
pub const LOW_CAPACITY_PERCENT: f64 = 50.0;

/// Highest accepted Volunteer Impact Score.
pub const MAX_VIS_SCORE: f64 = 100.0;

/// Default page size for snapshot queries.
pub const DEFAULT_QUERY_LIMIT: u32 = 100;

/// Largest page size for snapshot queries.
pub const MAX_QUERY_LIMIT: i64 = 1_000;

// ── Alerts ──────────────────────────────────────────────────────────

literal_set! {
    /// Closed set of alert kinds raised on a snapshot.
    pub enum AlertKind {
        /// Utilization crossed the warning threshold.
        CapacityWarning => "capacity_warning",
        /// Utilization crossed the critical threshold.
        CapacityCritical => "capacity_critical",
        /// Spend is running ahead of plan.
        BudgetWarning => "budget_warning",
        /// An impact score dropped below target.
        PerformanceLow => "performance_low",
    }
}

literal_set! {
    /// Severity derived from an [`AlertKind`].
    pub enum AlertSeverity {
        /// Needs attention.
        Warning => "warning",
        /// Needs action now.
        Critical => "critical",
    }
}

impl AlertKind {
    /// Returns the severity this kind always carries.
    #[must_use]
    pub const fn severity(self) -> AlertSeverity {
        match self {
            Self::CapacityCritical => AlertSeverity::Critical,
            Self::CapacityWarning | Self::BudgetWarning | Self::PerformanceLow => {
                AlertSeverity::Warning
            }
        }
    }
}

/// An alert attached to a snapshot. Never appears on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Alert kind.
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Threshold that was crossed.
    pub threshold: f64,
    /// Observed value that crossed it.
    pub current_value: f64,
    /// Human-readable message.
    pub message: String,
    /// When the alert fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Returns the severity derived from the alert kind.
    #[must_use]
    pub const fn severity(&self) -> AlertSeverity {
        self.kind.severity()
    }

    /// Returns `true` for critical-severity alerts.
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self.severity(), AlertSeverity::Critical)
    }
}

impl Contract for Alert {
    const NAME: &'static str = "Alert";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let kind = obj.required("type", literal::<AlertKind>());
            let threshold = obj.required("threshold", number());
            let current_value = obj.required("currentValue", number());
            let message = obj.required("message", text().non_empty());
            let triggered_at = obj.optional("triggeredAt", timestamp());
            Some(Self {
                kind: kind?,
                threshold: threshold?,
                current_value: current_value?,
                message: message?,
                triggered_at: triggered_at?,
            })
        })
    }
}

// ── Full snapshot breakdown ─────────────────────────────────────────

literal_set! {
    /// Capacity band of a utilization figure.
    pub enum CapacityStatus {
        /// Under [`LOW_CAPACITY_PERCENT`].
        Low => "low",
        /// Between low and near-capacity.
        Healthy => "healthy",
        /// At or above [`NEAR_CAPACITY_PERCENT`].
        Warning => "warning",
        /// At or above [`FULL_CAPACITY_PERCENT`].
        Critical => "critical",
    }
}

/// Classifies a utilization percentage into a [`CapacityStatus`].
#[must_use]
pub fn capacity_status_for(utilization: f64) -> CapacityStatus {
    if utilization >= FULL_CAPACITY_PERCENT {
        CapacityStatus::Critical
    } else if utilization >= NEAR_CAPACITY_PERCENT {
        CapacityStatus::Warning
    } else if utilization >= LOW_CAPACITY_PERCENT {
        CapacityStatus::Healthy
    } else {
        CapacityStatus::Low
    }
}

literal_set! {
    /// What produced a snapshot.
    pub enum SnapshotSource {
        /// The nightly job.
        Scheduled => "scheduled",
        /// A user-triggered refresh.
        Manual => "manual",
        /// A domain event (enrolment, session logged, ...).
        Event => "event",
    }
}

/// Current / target / utilization triple for one capacity dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityMetric {
    /// Current count.
    pub current: u64,
    /// Target count, if the campaign set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u64>,
    /// Utilization percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilization: Option<f64>,
    /// Band computed by the producer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CapacityStatus>,
}

impl Contract for CapacityMetric {
    const NAME: &'static str = "CapacityMetric";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let current = obj.required("current", count());
            let target = obj.optional("target", count());
            let utilization = obj.optional("utilization", number().non_negative());
            let status = obj.optional("status", literal::<CapacityStatus>());
            Some(Self {
                current: current?,
                target: target?,
                utilization: utilization?,
                status: status?,
            })
        })
    }
}

/// Budget figures inside a full snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetMetric {
    /// Allocated amount.
    pub allocated: f64,
    /// Spent amount.
    pub spent: f64,
    /// Remaining amount; negative when overspent.
    pub remaining: f64,
    /// Spend as a percentage of allocation.
    pub utilization: f64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Caller-side [`BudgetMetric`]; `currency` defaults to `"USD"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetMetricInput {
    /// Allocated amount.
    pub allocated: f64,
    /// Spent amount.
    pub spent: f64,
    /// Remaining amount.
    pub remaining: f64,
    /// Spend as a percentage of allocation.
    pub utilization: f64,
    /// ISO 4217 currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Contract for BudgetMetric {
    const NAME: &'static str = "BudgetMetric";
    type Input = BudgetMetricInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let allocated = obj.required("allocated", number().non_negative());
            let spent = obj.required("spent", number().non_negative());
            let remaining = obj.required("remaining", number());
            let utilization = obj.required("utilization", number().non_negative());
            let currency = obj.defaulted(
                "currency",
                text().format(Format::Currency),
                "USD".to_owned(),
            );
            Some(Self {
                allocated: allocated?,
                spent: spent?,
                remaining: remaining?,
                utilization: utilization?,
                currency: currency?,
            })
        })
    }
}

/// Impact figures inside a full snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetric {
    /// Social return on investment ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sroi: Option<f64>,
    /// Volunteer Impact Score, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vis: Option<f64>,
    /// Volunteer hours logged.
    pub hours_logged: f64,
    /// Sessions completed.
    pub sessions_completed: u64,
}

/// Caller-side [`ImpactMetric`]; counters default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetricInput {
    /// Social return on investment ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sroi: Option<f64>,
    /// Volunteer Impact Score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vis: Option<f64>,
    /// Volunteer hours logged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_logged: Option<f64>,
    /// Sessions completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_completed: Option<u64>,
}

impl Contract for ImpactMetric {
    const NAME: &'static str = "ImpactMetric";
    type Input = ImpactMetricInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let sroi = obj.optional("sroi", number().non_negative());
            let vis = obj.optional("vis", number().range(0.0, MAX_VIS_SCORE));
            let hours_logged = obj.defaulted("hoursLogged", number().non_negative(), 0.0);
            let sessions_completed = obj.defaulted("sessionsCompleted", count(), 0);
            Some(Self {
                sroi: sroi?,
                vis: vis?,
                hours_logged: hours_logged?,
                sessions_completed: sessions_completed?,
            })
        })
    }
}

/// Detailed breakdown stored alongside the flat snapshot columns.
///
/// Every field is optional or defaulted, so `{}` is a valid full snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSnapshot {
    /// Volunteer capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volunteers: Option<CapacityMetric>,
    /// Beneficiary capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiaries: Option<CapacityMetric>,
    /// Session capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<CapacityMetric>,
    /// Budget figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetMetric>,
    /// Impact figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactMetric>,
    /// Alerts raised when the snapshot was taken.
    pub alerts: Vec<Alert>,
    /// What produced the snapshot.
    pub source: SnapshotSource,
    /// Capture time, if different from the snapshot date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

/// Caller-side [`FullSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSnapshotInput {
    /// Volunteer capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volunteers: Option<CapacityMetric>,
    /// Beneficiary capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiaries: Option<CapacityMetric>,
    /// Session capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<CapacityMetric>,
    /// Budget figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetMetricInput>,
    /// Impact figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactMetricInput>,
    /// Alerts; defaults to none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<Alert>>,
    /// Producer; defaults to `scheduled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SnapshotSource>,
    /// Capture time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

impl FullSnapshot {
    /// Returns the critical-severity alerts, in their original order.
    #[must_use]
    pub fn critical_alerts(&self) -> Vec<&Alert> {
        self.alerts.iter().filter(|alert| alert.is_critical()).collect()
    }

    /// Returns `true` if any alert is critical.
    #[must_use]
    pub fn has_critical_alerts(&self) -> bool {
        self.alerts.iter().any(Alert::is_critical)
    }
}

impl Contract for FullSnapshot {
    const NAME: &'static str = "FullSnapshot";
    type Input = FullSnapshotInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let volunteers = obj.optional("volunteers", shape::<CapacityMetric>());
            let beneficiaries = obj.optional("beneficiaries", shape::<CapacityMetric>());
            let sessions = obj.optional("sessions", shape::<CapacityMetric>());
            let budget = obj.optional("budget", shape::<BudgetMetric>());
            let impact = obj.optional("impact", shape::<ImpactMetric>());
            let alerts = obj.defaulted("alerts", list(shape::<Alert>()), Vec::new());
            let source = obj.defaulted(
                "source",
                literal::<SnapshotSource>(),
                SnapshotSource::Scheduled,
            );
            let captured_at = obj.optional("capturedAt", timestamp());
            Some(Self {
                volunteers: volunteers?,
                beneficiaries: beneficiaries?,
                sessions: sessions?,
                budget: budget?,
                impact: impact?,
                alerts: alerts?,
                source: source?,
                captured_at: captured_at?,
            })
        })
    }
}

// ── Predicate helpers ───────────────────────────────────────────────

/// Read access shared by the numeric and decimal snapshot shapes, so the
/// predicate helpers work on either side of the persistence boundary.
pub trait SnapshotMetrics {
    /// Volunteer utilization percentage, if representable.
    fn volunteers_utilization_pct(&self) -> Option<f64>;

    /// Beneficiary utilization percentage, if representable.
    fn beneficiaries_utilization_pct(&self) -> Option<f64>;

    /// Budget utilization percentage, if representable.
    fn budget_utilization_pct(&self) -> Option<f64>;

    /// The detailed breakdown.
    fn full_snapshot(&self) -> &FullSnapshot;
}

/// Returns `true` when volunteer or beneficiary utilization has reached
/// [`NEAR_CAPACITY_PERCENT`].
#[must_use]
pub fn is_near_capacity(snapshot: &impl SnapshotMetrics) -> bool {
    [
        snapshot.volunteers_utilization_pct(),
        snapshot.beneficiaries_utilization_pct(),
    ]
    .into_iter()
    .flatten()
    .any(|pct| pct >= NEAR_CAPACITY_PERCENT)
}

/// Returns `true` when volunteer or beneficiary utilization exceeds
/// [`FULL_CAPACITY_PERCENT`].
#[must_use]
pub fn is_over_capacity(snapshot: &impl SnapshotMetrics) -> bool {
    [
        snapshot.volunteers_utilization_pct(),
        snapshot.beneficiaries_utilization_pct(),
    ]
    .into_iter()
    .flatten()
    .any(|pct| pct > FULL_CAPACITY_PERCENT)
}

/// Returns `true` when spend has reached [`FULL_CAPACITY_PERCENT`] of the
/// allocation.
#[must_use]
pub fn is_budget_exhausted(snapshot: &impl SnapshotMetrics) -> bool {
    snapshot
        .budget_utilization_pct()
        .is_some_and(|pct| pct >= FULL_CAPACITY_PERCENT)
}

/// Returns `true` if the snapshot carries any critical alert.
#[must_use]
pub fn has_critical_alerts(snapshot: &impl SnapshotMetrics) -> bool {
    snapshot.full_snapshot().has_critical_alerts()
}

/// Returns only the critical-severity alerts of a snapshot.
#[must_use]
pub fn critical_alerts(snapshot: &impl SnapshotMetrics) -> Vec<&Alert> {
    snapshot.full_snapshot().critical_alerts()
}

// ── Create (numeric side) ───────────────────────────────────────────

/// Snapshot creation payload with native numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnapshotRequest {
    /// Campaign the snapshot belongs to.
    pub campaign_id: String,
    /// Day the snapshot describes.
    pub snapshot_date: NaiveDate,
    /// Volunteer target.
    pub volunteers_target: u64,
    /// Volunteers enrolled.
    pub volunteers_current: u64,
    /// Volunteer utilization percentage.
    pub volunteers_utilization: f64,
    /// Beneficiary target.
    pub beneficiaries_target: u64,
    /// Beneficiaries reached.
    pub beneficiaries_current: u64,
    /// Beneficiary utilization percentage.
    pub beneficiaries_utilization: f64,
    /// Session target, when the program plans sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_target: Option<u64>,
    /// Sessions held.
    pub sessions_current: u64,
    /// Session utilization percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_utilization: Option<f64>,
    /// Budget allocated.
    pub budget_allocated: f64,
    /// Budget spent.
    pub budget_spent: f64,
    /// Budget remaining; negative when overspent.
    pub budget_remaining: f64,
    /// Budget utilization percentage.
    pub budget_utilization: f64,
    /// SROI ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sroi_score: Option<f64>,
    /// Average Volunteer Impact Score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_vis_score: Option<f64>,
    /// Volunteer hours logged.
    pub total_hours_logged: f64,
    /// Sessions completed.
    pub total_sessions_completed: u64,
    /// Detailed breakdown.
    pub full_snapshot: FullSnapshot,
}

/// Caller-side [`CreateSnapshotRequest`]; the two totals default to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnapshotRequestInput {
    /// Campaign the snapshot belongs to.
    pub campaign_id: String,
    /// Day the snapshot describes.
    pub snapshot_date: NaiveDate,
    /// Volunteer target.
    pub volunteers_target: u64,
    /// Volunteers enrolled.
    pub volunteers_current: u64,
    /// Volunteer utilization percentage.
    pub volunteers_utilization: f64,
    /// Beneficiary target.
    pub beneficiaries_target: u64,
    /// Beneficiaries reached.
    pub beneficiaries_current: u64,
    /// Beneficiary utilization percentage.
    pub beneficiaries_utilization: f64,
    /// Session target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_target: Option<u64>,
    /// Sessions held.
    pub sessions_current: u64,
    /// Session utilization percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_utilization: Option<f64>,
    /// Budget allocated.
    pub budget_allocated: f64,
    /// Budget spent.
    pub budget_spent: f64,
    /// Budget remaining.
    pub budget_remaining: f64,
    /// Budget utilization percentage.
    pub budget_utilization: f64,
    /// SROI ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sroi_score: Option<f64>,
    /// Average Volunteer Impact Score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_vis_score: Option<f64>,
    /// Volunteer hours logged; defaults to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours_logged: Option<f64>,
    /// Sessions completed; defaults to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sessions_completed: Option<u64>,
    /// Detailed breakdown.
    pub full_snapshot: FullSnapshotInput,
}

impl Contract for CreateSnapshotRequest {
    const NAME: &'static str = "CreateSnapshotRequest";
    type Input = CreateSnapshotRequestInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let campaign_id = obj.required("campaignId", text().non_empty());
            let snapshot_date = obj.required("snapshotDate", date());
            let volunteers_target = obj.required("volunteersTarget", count());
            let volunteers_current = obj.required("volunteersCurrent", count());
            let volunteers_utilization =
                obj.required("volunteersUtilization", number().non_negative());
            let beneficiaries_target = obj.required("beneficiariesTarget", count());
            let beneficiaries_current = obj.required("beneficiariesCurrent", count());
            let beneficiaries_utilization =
                obj.required("beneficiariesUtilization", number().non_negative());
            let sessions_target = obj.optional("sessionsTarget", count());
            let sessions_current = obj.required("sessionsCurrent", count());
            let sessions_utilization =
                obj.optional("sessionsUtilization", number().non_negative());
            let budget_allocated = obj.required("budgetAllocated", number().non_negative());
            let budget_spent = obj.required("budgetSpent", number().non_negative());
            let budget_remaining = obj.required("budgetRemaining", number());
            let budget_utilization = obj.required("budgetUtilization", number().non_negative());
            let sroi_score = obj.optional("sroiScore", number().non_negative());
            let average_vis_score =
                obj.optional("averageVisScore", number().range(0.0, MAX_VIS_SCORE));
            let total_hours_logged =
                obj.defaulted("totalHoursLogged", number().non_negative(), 0.0);
            let total_sessions_completed = obj.defaulted("totalSessionsCompleted", count(), 0);
            let full_snapshot = obj.required("fullSnapshot", shape::<FullSnapshot>());
            Some(Self {
                campaign_id: campaign_id?,
                snapshot_date: snapshot_date?,
                volunteers_target: volunteers_target?,
                volunteers_current: volunteers_current?,
                volunteers_utilization: volunteers_utilization?,
                beneficiaries_target: beneficiaries_target?,
                beneficiaries_current: beneficiaries_current?,
                beneficiaries_utilization: beneficiaries_utilization?,
                sessions_target: sessions_target?,
                sessions_current: sessions_current?,
                sessions_utilization: sessions_utilization?,
                budget_allocated: budget_allocated?,
                budget_spent: budget_spent?,
                budget_remaining: budget_remaining?,
                budget_utilization: budget_utilization?,
                sroi_score: sroi_score?,
                average_vis_score: average_vis_score?,
                total_hours_logged: total_hours_logged?,
                total_sessions_completed: total_sessions_completed?,
                full_snapshot: full_snapshot?,
            })
        })
    }
}

impl SnapshotMetrics for CreateSnapshotRequest {
    fn volunteers_utilization_pct(&self) -> Option<f64> {
        Some(self.volunteers_utilization)
    }

    fn beneficiaries_utilization_pct(&self) -> Option<f64> {
        Some(self.beneficiaries_utilization)
    }

    fn budget_utilization_pct(&self) -> Option<f64> {
        Some(self.budget_utilization)
    }

    fn full_snapshot(&self) -> &FullSnapshot {
        &self.full_snapshot
    }
}

// ── Persisted (decimal side) ────────────────────────────────────────

/// A stored snapshot row as returned by the API.
///
/// Money, ratio and score columns are decimal strings; nullable columns
/// are always present and may be `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignMetricsSnapshot {
    /// Row id.
    pub id: Uuid,
    /// Campaign the snapshot belongs to.
    pub campaign_id: String,
    /// Day the snapshot describes.
    pub snapshot_date: NaiveDate,
    /// Volunteer target.
    pub volunteers_target: u64,
    /// Volunteers enrolled.
    pub volunteers_current: u64,
    /// Volunteer utilization percentage.
    pub volunteers_utilization: DecimalString,
    /// Beneficiary target.
    pub beneficiaries_target: u64,
    /// Beneficiaries reached.
    pub beneficiaries_current: u64,
    /// Beneficiary utilization percentage.
    pub beneficiaries_utilization: DecimalString,
    /// Session target.
    pub sessions_target: Option<u64>,
    /// Sessions held.
    pub sessions_current: u64,
    /// Session utilization percentage.
    pub sessions_utilization: Option<DecimalString>,
    /// Budget allocated.
    pub budget_allocated: DecimalString,
    /// Budget spent.
    pub budget_spent: DecimalString,
    /// Budget remaining.
    pub budget_remaining: DecimalString,
    /// Budget utilization percentage.
    pub budget_utilization: DecimalString,
    /// SROI ratio.
    pub sroi_score: Option<DecimalString>,
    /// Average Volunteer Impact Score.
    pub average_vis_score: Option<DecimalString>,
    /// Volunteer hours logged.
    pub total_hours_logged: DecimalString,
    /// Sessions completed.
    pub total_sessions_completed: u64,
    /// Detailed breakdown.
    pub full_snapshot: FullSnapshot,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
}

/// Caller-side [`CampaignMetricsSnapshot`]; only the nested breakdown
/// carries defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignMetricsSnapshotInput {
    /// Row id.
    pub id: Uuid,
    /// Campaign the snapshot belongs to.
    pub campaign_id: String,
    /// Day the snapshot describes.
    pub snapshot_date: NaiveDate,
    /// Volunteer target.
    pub volunteers_target: u64,
    /// Volunteers enrolled.
    pub volunteers_current: u64,
    /// Volunteer utilization percentage.
    pub volunteers_utilization: DecimalString,
    /// Beneficiary target.
    pub beneficiaries_target: u64,
    /// Beneficiaries reached.
    pub beneficiaries_current: u64,
    /// Beneficiary utilization percentage.
    pub beneficiaries_utilization: DecimalString,
    /// Session target.
    pub sessions_target: Option<u64>,
    /// Sessions held.
    pub sessions_current: u64,
    /// Session utilization percentage.
    pub sessions_utilization: Option<DecimalString>,
    /// Budget allocated.
    pub budget_allocated: DecimalString,
    /// Budget spent.
    pub budget_spent: DecimalString,
    /// Budget remaining.
    pub budget_remaining: DecimalString,
    /// Budget utilization percentage.
    pub budget_utilization: DecimalString,
    /// SROI ratio.
    pub sroi_score: Option<DecimalString>,
    /// Average Volunteer Impact Score.
    pub average_vis_score: Option<DecimalString>,
    /// Volunteer hours logged.
    pub total_hours_logged: DecimalString,
    /// Sessions completed.
    pub total_sessions_completed: u64,
    /// Detailed breakdown.
    pub full_snapshot: FullSnapshotInput,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
}

impl Contract for CampaignMetricsSnapshot {
    const NAME: &'static str = "CampaignMetricsSnapshot";
    type Input = CampaignMetricsSnapshotInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let id = obj.required("id", uuid());
            let campaign_id = obj.required("campaignId", text().non_empty());
            let snapshot_date = obj.required("snapshotDate", date());
            let volunteers_target = obj.required("volunteersTarget", count());
            let volunteers_current = obj.required("volunteersCurrent", count());
            let volunteers_utilization = obj.required("volunteersUtilization", decimal());
            let beneficiaries_target = obj.required("beneficiariesTarget", count());
            let beneficiaries_current = obj.required("beneficiariesCurrent", count());
            let beneficiaries_utilization = obj.required("beneficiariesUtilization", decimal());
            let sessions_target = obj.required("sessionsTarget", nullable(count()));
            let sessions_current = obj.required("sessionsCurrent", count());
            let sessions_utilization = obj.required("sessionsUtilization", nullable(decimal()));
            let budget_allocated = obj.required("budgetAllocated", decimal());
            let budget_spent = obj.required("budgetSpent", decimal());
            let budget_remaining = obj.required("budgetRemaining", decimal());
            let budget_utilization = obj.required("budgetUtilization", decimal());
            let sroi_score = obj.required("sroiScore", nullable(decimal()));
            let average_vis_score = obj.required("averageVisScore", nullable(decimal()));
            let total_hours_logged = obj.required("totalHoursLogged", decimal());
            let total_sessions_completed = obj.required("totalSessionsCompleted", count());
            let full_snapshot = obj.required("fullSnapshot", shape::<FullSnapshot>());
            let created_at = obj.required("createdAt", timestamp());
            Some(Self {
                id: id?,
                campaign_id: campaign_id?,
                snapshot_date: snapshot_date?,
                volunteers_target: volunteers_target?,
                volunteers_current: volunteers_current?,
                volunteers_utilization: volunteers_utilization?,
                beneficiaries_target: beneficiaries_target?,
                beneficiaries_current: beneficiaries_current?,
                beneficiaries_utilization: beneficiaries_utilization?,
                sessions_target: sessions_target?,
                sessions_current: sessions_current?,
                sessions_utilization: sessions_utilization?,
                budget_allocated: budget_allocated?,
                budget_spent: budget_spent?,
                budget_remaining: budget_remaining?,
                budget_utilization: budget_utilization?,
                sroi_score: sroi_score?,
                average_vis_score: average_vis_score?,
                total_hours_logged: total_hours_logged?,
                total_sessions_completed: total_sessions_completed?,
                full_snapshot: full_snapshot?,
                created_at: created_at?,
            })
        })
    }
}

impl SnapshotMetrics for CampaignMetricsSnapshot {
    fn volunteers_utilization_pct(&self) -> Option<f64> {
        self.volunteers_utilization.to_f64()
    }

    fn beneficiaries_utilization_pct(&self) -> Option<f64> {
        self.beneficiaries_utilization.to_f64()
    }

    fn budget_utilization_pct(&self) -> Option<f64> {
        self.budget_utilization.to_f64()
    }

    fn full_snapshot(&self) -> &FullSnapshot {
        &self.full_snapshot
    }
}

// ── Query and responses ─────────────────────────────────────────────

/// Snapshot history query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotQuery {
    /// Campaign to query.
    pub campaign_id: String,
    /// Earliest snapshot date, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Latest snapshot date, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Page size, 1 to [`MAX_QUERY_LIMIT`].
    pub limit: u32,
    /// Rows to skip.
    pub offset: u64,
    /// Include the detailed breakdown in each row.
    pub include_full_snapshot: bool,
}

/// Caller-side [`SnapshotQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotQueryInput {
    /// Campaign to query.
    pub campaign_id: String,
    /// Earliest snapshot date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Latest snapshot date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Page size; defaults to [`DEFAULT_QUERY_LIMIT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Rows to skip; defaults to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Include the breakdown; defaults to `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_full_snapshot: Option<bool>,
}

impl Contract for SnapshotQuery {
    const NAME: &'static str = "SnapshotQuery";
    type Input = SnapshotQueryInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let campaign_id = obj.required("campaignId", text().non_empty());
            let start_date = obj.optional("startDate", date());
            let end_date = obj.optional("endDate", date());
            let limit = obj.defaulted(
                "limit",
                integer::<u32>().range(1, MAX_QUERY_LIMIT),
                DEFAULT_QUERY_LIMIT,
            );
            let offset = obj.defaulted("offset", count(), 0);
            let include_full_snapshot = obj.defaulted("includeFullSnapshot", boolean(), true);
            Some(Self {
                campaign_id: campaign_id?,
                start_date: start_date?,
                end_date: end_date?,
                limit: limit?,
                offset: offset?,
                include_full_snapshot: include_full_snapshot?,
            })
        })
    }
}

/// One page of stored snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotListResponse {
    /// Snapshots on this page, newest first.
    pub snapshots: Vec<CampaignMetricsSnapshot>,
    /// Total rows matching the query.
    pub total: u64,
    /// Whether another page exists.
    pub has_more: bool,
}

/// Caller-side [`SnapshotListResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotListResponseInput {
    /// Snapshots on this page.
    pub snapshots: Vec<CampaignMetricsSnapshotInput>,
    /// Total rows matching the query.
    pub total: u64,
    /// Whether another page exists.
    pub has_more: bool,
}

impl Contract for SnapshotListResponse {
    const NAME: &'static str = "SnapshotListResponse";
    type Input = SnapshotListResponseInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let snapshots = obj.required("snapshots", list(shape::<CampaignMetricsSnapshot>()));
            let total = obj.required("total", count());
            let has_more = obj.required("hasMore", boolean());
            Some(Self {
                snapshots: snapshots?,
                total: total?,
                has_more: has_more?,
            })
        })
    }
}

/// Latest snapshot of a campaign; `null` until the first one is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestSnapshotResponse {
    /// The most recent snapshot.
    pub snapshot: Option<CampaignMetricsSnapshot>,
}

/// Caller-side [`LatestSnapshotResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestSnapshotResponseInput {
    /// The most recent snapshot.
    pub snapshot: Option<CampaignMetricsSnapshotInput>,
}

impl Contract for LatestSnapshotResponse {
    const NAME: &'static str = "LatestSnapshotResponse";
    type Input = LatestSnapshotResponseInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let snapshot = obj.required("snapshot", nullable(shape::<CampaignMetricsSnapshot>()));
            Some(Self {
                snapshot: snapshot?,
            })
        })
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
