//! AI-generated report requests and payloads.
//!
//! Sections refer to citations by id. Those references are not resolved
//! during validation; [`GeneratedReport::dangling_citation_ids`] reports
//! them for callers that want to check.

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::common::{Locale, Period, ProgramType, Tone};
use crate::schema::field::{
    boolean, count, integer, list, literal, number, shape, text, timestamp, uuid,
};
use crate::schema::{Contract, Cursor, literal_set};

/// Longest redacted evidence snippet.
pub const MAX_SNIPPET_CHARS: usize = 500;

/// Highest sampling temperature recorded in lineage.
pub const MAX_TEMPERATURE: f64 = 2.0;

/// A citation into the evidence corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    /// Citation id, referenced from sections and blocks.
    pub id: String,
    /// Evidence item cited.
    pub evidence_id: String,
    /// Redacted excerpt, 1 to [`MAX_SNIPPET_CHARS`] characters.
    pub snippet: String,
    /// Retrieval confidence, 0 to 1.
    pub confidence: f64,
    /// Where the evidence came from (survey, session log, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Contract for Citation {
    const NAME: &'static str = "Citation";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let id = obj.required("id", text().non_empty());
            let evidence_id = obj.required("evidenceId", text().non_empty());
            let snippet = obj.required("snippet", text().non_empty().max(MAX_SNIPPET_CHARS));
            let confidence = obj.required("confidence", number().range(0.0, 1.0));
            let source = obj.optional("source", text());
            Some(Self {
                id: id?,
                evidence_id: evidence_id?,
                snippet: snippet?,
                confidence: confidence?,
                source: source?,
            })
        })
    }
}

literal_set! {
    /// Kind of report to generate.
    pub enum ReportType {
        /// Quarterly impact summary.
        Quarterly => "quarterly",
        /// Annual impact report.
        Annual => "annual",
        /// Update for investors.
        InvestorUpdate => "investor_update",
        /// Single-program deep dive.
        ImpactDeepDive => "impact_deep_dive",
    }
}

literal_set! {
    /// Target length of generated narrative.
    pub enum ReportLength {
        /// A page or less.
        Brief => "brief",
        /// A few pages.
        Medium => "medium",
        /// Full detail.
        Detailed => "detailed",
    }
}

/// Request to generate a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    /// Company reported on.
    pub company_id: Uuid,
    /// Report kind.
    pub report_type: ReportType,
    /// Reporting window.
    pub period: Period,
    /// Restrict to these programs; all programs when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_types: Option<Vec<ProgramType>>,
    /// Output language.
    pub locale: Locale,
    /// Writing register.
    pub tone: Tone,
    /// Target length.
    pub length: ReportLength,
    /// Attach citations to sections.
    pub include_citations: bool,
}

/// Caller-side [`GenerateReportRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequestInput {
    /// Company reported on.
    pub company_id: Uuid,
    /// Report kind.
    pub report_type: ReportType,
    /// Reporting window.
    pub period: Period,
    /// Program filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_types: Option<Vec<ProgramType>>,
    /// Defaults to `en`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
    /// Defaults to `formal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    /// Defaults to `medium`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<ReportLength>,
    /// Defaults to `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_citations: Option<bool>,
}

impl Contract for GenerateReportRequest {
    const NAME: &'static str = "GenerateReportRequest";
    type Input = GenerateReportRequestInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let company_id = obj.required("companyId", uuid());
            let report_type = obj.required("reportType", literal::<ReportType>());
            let period = obj.required("period", shape::<Period>());
            let program_types =
                obj.optional("programTypes", list(literal::<ProgramType>()).non_empty());
            let locale = obj.defaulted("locale", literal::<Locale>(), Locale::En);
            let tone = obj.defaulted("tone", literal::<Tone>(), Tone::Formal);
            let length = obj.defaulted("length", literal::<ReportLength>(), ReportLength::Medium);
            let include_citations = obj.defaulted("includeCitations", boolean(), true);
            Some(Self {
                company_id: company_id?,
                report_type: report_type?,
                period: period?,
                program_types: program_types?,
                locale: locale?,
                tone: tone?,
                length: length?,
                include_citations: include_citations?,
            })
        })
    }
}

/// One section of a generated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    /// Section id.
    pub id: String,
    /// Section heading.
    pub heading: String,
    /// Markdown body.
    pub content: String,
    /// Position hint.
    pub order: u32,
    /// Citations backing the section.
    pub citation_ids: Vec<String>,
}

/// Caller-side [`ReportSection`]; `citationIds` defaults to none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSectionInput {
    /// Section id.
    pub id: String,
    /// Section heading.
    pub heading: String,
    /// Markdown body.
    pub content: String,
    /// Position hint.
    pub order: u32,
    /// Citations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_ids: Option<Vec<String>>,
}

impl Contract for ReportSection {
    const NAME: &'static str = "ReportSection";
    type Input = ReportSectionInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let id = obj.required("id", text().non_empty());
            let heading = obj.required("heading", text().non_empty());
            let content = obj.required("content", text().non_empty());
            let order = obj.required("order", integer::<u32>().min(0));
            let citation_ids = obj.defaulted("citationIds", list(text().non_empty()), Vec::new());
            Some(Self {
                id: id?,
                heading: heading?,
                content: content?,
                order: order?,
                citation_ids: citation_ids?,
            })
        })
    }
}

/// Model token accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    /// Prompt tokens.
    pub input: u64,
    /// Completion tokens.
    pub output: u64,
    /// Billed total.
    pub total: u64,
}

impl TokenUsage {
    /// Returns `true` when `total` equals `input + output`.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        match self.input.checked_add(self.output) {
            Some(sum) => sum == self.total,
            None => false,
        }
    }
}

impl Contract for TokenUsage {
    const NAME: &'static str = "TokenUsage";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let input = obj.required("input", count());
            let output = obj.required("output", count());
            let total = obj.required("total", count());
            Some(Self {
                input: input?,
                output: output?,
                total: total?,
            })
        })
    }
}

/// How a report was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineage {
    /// Model identifier.
    pub model: String,
    /// Prompt template version.
    pub prompt_version: String,
    /// Token accounting.
    pub token_usage: TokenUsage,
    /// Wall-clock generation time.
    pub latency_ms: u64,
    /// Completion time.
    pub generated_at: DateTime<Utc>,
    /// Sampling temperature, 0 to [`MAX_TEMPERATURE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl Contract for Lineage {
    const NAME: &'static str = "Lineage";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let model = obj.required("model", text().non_empty());
            let prompt_version = obj.required("promptVersion", text().non_empty());
            let token_usage = obj.required("tokenUsage", shape::<TokenUsage>());
            let latency_ms = obj.required("latencyMs", count());
            let generated_at = obj.required("generatedAt", timestamp());
            let temperature = obj.optional("temperature", number().range(0.0, MAX_TEMPERATURE));
            Some(Self {
                model: model?,
                prompt_version: prompt_version?,
                token_usage: token_usage?,
                latency_ms: latency_ms?,
                generated_at: generated_at?,
                temperature: temperature?,
            })
        })
    }
}

/// A generated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    /// Report id.
    pub report_id: Uuid,
    /// Sections, at least one.
    pub sections: Vec<ReportSection>,
    /// Citations referenced by sections.
    pub citations: Vec<Citation>,
    /// Generation lineage.
    pub lineage: Lineage,
    /// Generator warnings (missing data, low confidence, ...).
    pub warnings: Vec<String>,
}

/// Caller-side [`GeneratedReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReportInput {
    /// Report id.
    pub report_id: Uuid,
    /// Sections.
    pub sections: Vec<ReportSectionInput>,
    /// Defaults to none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
    /// Generation lineage.
    pub lineage: Lineage,
    /// Defaults to none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

impl GeneratedReport {
    /// Looks up a citation by id.
    #[must_use]
    pub fn citation(&self, id: &str) -> Option<&Citation> {
        self.citations.iter().find(|citation| citation.id == id)
    }

    /// Section citation ids with no matching citation, deduplicated in
    /// first-seen order.
    #[must_use]
    pub fn dangling_citation_ids(&self) -> Vec<&str> {
        let known: IndexSet<&str> = self.citations.iter().map(|c| c.id.as_str()).collect();
        let dangling: IndexSet<&str> = self
            .sections
            .iter()
            .flat_map(|section| section.citation_ids.iter().map(String::as_str))
            .filter(|id| !known.contains(id))
            .collect();
        dangling.into_iter().collect()
    }
}

impl Contract for GeneratedReport {
    const NAME: &'static str = "GeneratedReport";
    type Input = GeneratedReportInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let report_id = obj.required("reportId", uuid());
            let sections = obj.required("sections", list(shape::<ReportSection>()).non_empty());
            let citations = obj.defaulted("citations", list(shape::<Citation>()), Vec::new());
            let lineage = obj.required("lineage", shape::<Lineage>());
            let warnings = obj.defaulted("warnings", list(text()), Vec::new());
            Some(Self {
                report_id: report_id?,
                sections: sections?,
                citations: citations?,
                lineage: lineage?,
                warnings: warnings?,
            })
        })
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
