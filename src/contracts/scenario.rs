//! What-if scenarios.
//!
//! A scenario stores parameter deltas and, once it has been run, the last
//! computed result. "Never run" is an explicit `null` result, never a
//! missing key.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use super::common::ProgramType;
use crate::schema::field::{
    count, list, nullable, number, record_of, shape, text, timestamp, uuid,
};
use crate::schema::{Contract, Cursor};

/// Largest participant or session multiplier.
pub const MAX_MULTIPLIER: f64 = 10.0;

/// Longest scenario name.
pub const MAX_NAME_CHARS: usize = 120;

/// Longest scenario description.
pub const MAX_DESCRIPTION_CHARS: usize = 1_000;

/// Parameter deltas applied to a company's baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParameters {
    /// Extra volunteer hours; negative to cut.
    pub volunteer_hours_delta: f64,
    /// Extra budget; negative to cut.
    pub budget_delta: f64,
    /// Participant scaling, 0 to [`MAX_MULTIPLIER`].
    pub participant_multiplier: f64,
    /// Session scaling, 0 to [`MAX_MULTIPLIER`].
    pub session_multiplier: f64,
    /// Relative program weighting, each 0 to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_weights: Option<IndexMap<ProgramType, f64>>,
}

/// Caller-side [`ScenarioParameters`]; deltas default to 0 and multipliers
/// to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParametersInput {
    /// Volunteer hours delta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volunteer_hours_delta: Option<f64>,
    /// Budget delta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_delta: Option<f64>,
    /// Participant scaling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_multiplier: Option<f64>,
    /// Session scaling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_multiplier: Option<f64>,
    /// Program weighting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_weights: Option<IndexMap<ProgramType, f64>>,
}

impl ScenarioParameters {
    /// Returns `true` when the parameters leave the baseline unchanged.
    #[must_use]
    #[expect(clippy::float_cmp, reason = "comparing against exact declared defaults")]
    pub fn is_identity(&self) -> bool {
        self.volunteer_hours_delta == 0.0
            && self.budget_delta == 0.0
            && self.participant_multiplier == 1.0
            && self.session_multiplier == 1.0
    }
}

impl Contract for ScenarioParameters {
    const NAME: &'static str = "ScenarioParameters";
    type Input = ScenarioParametersInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let volunteer_hours_delta = obj.defaulted("volunteerHoursDelta", number(), 0.0);
            let budget_delta = obj.defaulted("budgetDelta", number(), 0.0);
            let participant_multiplier = obj.defaulted(
                "participantMultiplier",
                number().range(0.0, MAX_MULTIPLIER),
                1.0,
            );
            let session_multiplier = obj.defaulted(
                "sessionMultiplier",
                number().range(0.0, MAX_MULTIPLIER),
                1.0,
            );
            let program_weights = obj.optional(
                "programWeights",
                record_of::<ProgramType, _>(number().range(0.0, 1.0)),
            );
            Some(Self {
                volunteer_hours_delta: volunteer_hours_delta?,
                budget_delta: budget_delta?,
                participant_multiplier: participant_multiplier?,
                session_multiplier: session_multiplier?,
                program_weights: program_weights?,
            })
        })
    }
}

/// Headline metrics on one side of a scenario comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioMetrics {
    /// SROI ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sroi: Option<f64>,
    /// Volunteer Impact Score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vis: Option<f64>,
    /// Volunteers.
    pub volunteers: u64,
    /// Beneficiaries.
    pub beneficiaries: u64,
    /// Budget.
    pub budget: f64,
}

impl Contract for ScenarioMetrics {
    const NAME: &'static str = "ScenarioMetrics";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let sroi = obj.optional("sroi", number().non_negative());
            let vis = obj.optional("vis", number().range(0.0, 100.0));
            let volunteers = obj.required("volunteers", count());
            let beneficiaries = obj.required("beneficiaries", count());
            let budget = obj.required("budget", number().non_negative());
            Some(Self {
                sroi: sroi?,
                vis: vis?,
                volunteers: volunteers?,
                beneficiaries: beneficiaries?,
                budget: budget?,
            })
        })
    }
}

/// Outcome of the last scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    /// Metrics without the deltas.
    pub baseline: ScenarioMetrics,
    /// Metrics with the deltas applied.
    pub projected: ScenarioMetrics,
    /// Model confidence, 0 to 1.
    pub confidence: f64,
    /// Model warnings.
    pub warnings: Vec<String>,
    /// When the run finished.
    pub computed_at: DateTime<Utc>,
}

/// Caller-side [`ScenarioResult`]; `warnings` defaults to none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResultInput {
    /// Baseline metrics.
    pub baseline: ScenarioMetrics,
    /// Projected metrics.
    pub projected: ScenarioMetrics,
    /// Model confidence.
    pub confidence: f64,
    /// Model warnings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    /// Completion time.
    pub computed_at: DateTime<Utc>,
}

impl Contract for ScenarioResult {
    const NAME: &'static str = "ScenarioResult";
    type Input = ScenarioResultInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let baseline = obj.required("baseline", shape::<ScenarioMetrics>());
            let projected = obj.required("projected", shape::<ScenarioMetrics>());
            let confidence = obj.required("confidence", number().range(0.0, 1.0));
            let warnings = obj.defaulted("warnings", list(text()), Vec::new());
            let computed_at = obj.required("computedAt", timestamp());
            Some(Self {
                baseline: baseline?,
                projected: projected?,
                confidence: confidence?,
                warnings: warnings?,
                computed_at: computed_at?,
            })
        })
    }
}

/// A stored scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Scenario id.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter deltas.
    pub parameters: ScenarioParameters,
    /// Last run, `null` until the first run.
    pub result: Option<ScenarioResult>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Caller-side [`Scenario`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInput {
    /// Scenario id.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter deltas.
    pub parameters: ScenarioParametersInput,
    /// Last run; serialized as `null` when `None`.
    pub result: Option<ScenarioResultInput>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Scenario {
    /// Returns `true` once the scenario has a computed result.
    #[must_use]
    pub const fn has_run(&self) -> bool {
        self.result.is_some()
    }
}

impl Contract for Scenario {
    const NAME: &'static str = "Scenario";
    type Input = ScenarioInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let id = obj.required("id", uuid());
            let company_id = obj.required("companyId", uuid());
            let name = obj.required("name", text().non_empty().max(MAX_NAME_CHARS));
            let description = obj.optional("description", text().max(MAX_DESCRIPTION_CHARS));
            let parameters = obj.required("parameters", shape::<ScenarioParameters>());
            let result = obj.required("result", nullable(shape::<ScenarioResult>()));
            let created_at = obj.required("createdAt", timestamp());
            let updated_at = obj.required("updatedAt", timestamp());
            Some(Self {
                id: id?,
                company_id: company_id?,
                name: name?,
                description: description?,
                parameters: parameters?,
                result: result?,
                created_at: created_at?,
                updated_at: updated_at?,
            })
        })
    }
}

/// Request to create a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScenarioRequest {
    /// Owning company.
    pub company_id: Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter deltas.
    pub parameters: ScenarioParameters,
}

/// Caller-side [`CreateScenarioRequest`]; absent `parameters` means `{}`,
/// which then takes every parameter default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScenarioRequestInput {
    /// Owning company.
    pub company_id: Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter deltas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ScenarioParametersInput>,
}

impl Contract for CreateScenarioRequest {
    const NAME: &'static str = "CreateScenarioRequest";
    type Input = CreateScenarioRequestInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let company_id = obj.required("companyId", uuid());
            let name = obj.required("name", text().non_empty().max(MAX_NAME_CHARS));
            let description = obj.optional("description", text().max(MAX_DESCRIPTION_CHARS));
            let parameters =
                obj.defaulted_from("parameters", shape::<ScenarioParameters>(), || json!({}));
            Some(Self {
                company_id: company_id?,
                name: name?,
                description: description?,
                parameters: parameters?,
            })
        })
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
