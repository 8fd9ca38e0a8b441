//! Deck export requests and the two export flows.
//!
//! Small decks export synchronously and come back as a signed download;
//! large ones are queued and come back as a job to poll. The job `status`
//! is only checked for membership in [`ExportStatus`]; which transitions
//! are allowed is the export service's business.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::schema::field::{
    boolean, count, literal, nullable, number, record_of, text, timestamp, url, uuid,
};
use crate::schema::{Contract, Cursor, Format, Trial, literal_set};

/// Longest watermark text.
pub const MAX_WATERMARK_CHARS: usize = 64;

/// Completion percentage of a finished job.
pub const COMPLETE_PERCENT: f64 = 100.0;

literal_set! {
    /// Export file format.
    pub enum ExportFormat {
        /// PowerPoint.
        Pptx => "pptx",
        /// PDF.
        Pdf => "pdf",
    }
}

literal_set! {
    /// Asynchronous export job status.
    pub enum ExportStatus {
        /// Waiting for a worker.
        Queued => "queued",
        /// Being rendered.
        Generating => "generating",
        /// Files are ready.
        Completed => "completed",
        /// Rendering failed.
        Failed => "failed",
    }
}

impl ExportStatus {
    /// Returns `true` for statuses a job never leaves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Request to export a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDeckRequest {
    /// Deck to export.
    pub deck_id: Uuid,
    /// Target format.
    pub format: ExportFormat,
    /// Include speaker notes.
    pub include_notes: bool,
    /// Include slides marked hidden.
    pub include_hidden_slides: bool,
    /// Text stamped on every page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<String>,
}

/// Caller-side [`ExportDeckRequest`]; both flags default to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDeckRequestInput {
    /// Deck to export.
    pub deck_id: Uuid,
    /// Target format.
    pub format: ExportFormat,
    /// Include speaker notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_notes: Option<bool>,
    /// Include hidden slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_hidden_slides: Option<bool>,
    /// Watermark text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<String>,
}

impl Contract for ExportDeckRequest {
    const NAME: &'static str = "ExportDeckRequest";
    type Input = ExportDeckRequestInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let deck_id = obj.required("deckId", uuid());
            let format = obj.required("format", literal::<ExportFormat>());
            let include_notes = obj.defaulted("includeNotes", boolean(), false);
            let include_hidden_slides = obj.defaulted("includeHiddenSlides", boolean(), false);
            let watermark =
                obj.optional("watermark", text().non_empty().max(MAX_WATERMARK_CHARS));
            Some(Self {
                deck_id: deck_id?,
                format: format?,
                include_notes: include_notes?,
                include_hidden_slides: include_hidden_slides?,
                watermark: watermark?,
            })
        })
    }
}

/// A finished synchronous export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncExport {
    /// Signed download URL.
    pub download_url: String,
    /// SHA-256 of the file, lowercase hex.
    pub checksum: String,
    /// When the signed URL stops working.
    pub expires_at: DateTime<Utc>,
    /// File size.
    pub file_size_bytes: u64,
    /// File format.
    pub format: ExportFormat,
}

impl SyncExport {
    /// Returns `true` once the download URL has expired at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl Contract for SyncExport {
    const NAME: &'static str = "SyncExport";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let download_url = obj.required("downloadUrl", url());
            let checksum = obj.required("checksum", text().format(Format::Sha256));
            let expires_at = obj.required("expiresAt", timestamp());
            let file_size_bytes = obj.required("fileSizeBytes", count());
            let format = obj.required("format", literal::<ExportFormat>());
            Some(Self {
                download_url: download_url?,
                checksum: checksum?,
                expires_at: expires_at?,
                file_size_bytes: file_size_bytes?,
                format: format?,
            })
        })
    }
}

/// A queued asynchronous export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    /// Job id to poll.
    pub job_id: Uuid,
    /// Current status.
    pub status: ExportStatus,
    /// Completion percentage, 0 to 100.
    pub progress: f64,
    /// When the job was queued.
    pub created_at: DateTime<Utc>,
    /// Last status change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Failure message; `null` unless the job failed.
    pub error: Option<String>,
    /// Download URL per format, once completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<IndexMap<ExportFormat, String>>,
}

/// Caller-side [`ExportJob`]; `progress` defaults to 0 and `error` to
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJobInput {
    /// Job id.
    pub job_id: Uuid,
    /// Current status.
    pub status: ExportStatus,
    /// Completion percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Queue time.
    pub created_at: DateTime<Utc>,
    /// Last status change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Download URL per format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<IndexMap<ExportFormat, String>>,
}

impl ExportJob {
    /// Returns `true` once the job is completed or failed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the download URL for `format`, if the job produced one.
    #[must_use]
    pub fn url_for(&self, format: ExportFormat) -> Option<&str> {
        self.urls
            .as_ref()
            .and_then(|urls| urls.get(&format))
            .map(String::as_str)
    }
}

impl Contract for ExportJob {
    const NAME: &'static str = "ExportJob";
    type Input = ExportJobInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let job_id = obj.required("jobId", uuid());
            let status = obj.required("status", literal::<ExportStatus>());
            let progress = obj.defaulted("progress", number().range(0.0, COMPLETE_PERCENT), 0.0);
            let created_at = obj.required("createdAt", timestamp());
            let updated_at = obj.optional("updatedAt", timestamp());
            let error = obj.defaulted("error", nullable(text()), None);
            let urls = obj.optional("urls", record_of::<ExportFormat, _>(url()));
            Some(Self {
                job_id: job_id?,
                status: status?,
                progress: progress?,
                created_at: created_at?,
                updated_at: updated_at?,
                error: error?,
                urls: urls?,
            })
        })
    }
}

/// Response to an export request.
///
/// Trial order: [`SyncExport`], then [`ExportJob`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportResponse {
    /// Immediate download.
    Sync(SyncExport),
    /// Queued job.
    Job(ExportJob),
}

/// Caller-side [`ExportResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportResponseInput {
    /// Immediate download.
    Sync(SyncExport),
    /// Queued job.
    Job(ExportJobInput),
}

impl Contract for ExportResponse {
    const NAME: &'static str = "ExportResponse";
    type Input = ExportResponseInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        Trial::new(cx, value)
            .attempt::<SyncExport>(Self::Sync)
            .attempt::<ExportJob>(Self::Job)
            .finish()
    }
}

/// Poll request for an export job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStatusRequest {
    /// Job to poll.
    pub job_id: Uuid,
}

impl Contract for ExportStatusRequest {
    const NAME: &'static str = "ExportStatusRequest";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let job_id = obj.required("jobId", uuid());
            Some(Self { job_id: job_id? })
        })
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
