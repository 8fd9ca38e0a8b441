//! Slide decks.
//!
//! Several deck fields accept more than one shape for backward
//! compatibility and carry no tag saying which one arrived. Each is
//! resolved by ordered [`Trial`]; the order is noted on each type and must
//! not be changed, since the variants overlap on some inputs.

pub mod block;
pub mod export;
pub mod slide;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub use block::{Block, BlockContent, BlockKind, MetricValue};
pub use export::{ExportDeckRequest, ExportFormat, ExportJob, ExportResponse, ExportStatus};
pub use slide::{DeckSlides, DeckSlidesInput, LegacySlide, Slide, SlideLayout};

use super::common::{Locale, Period, ProgramType, Tone};
use super::report::Citation;
use crate::schema::field::{boolean, integer, list, literal, shape, text, timestamp, url, uuid};
use crate::schema::{Contract, Cursor, Format, Trial, literal_set};

/// Longest deck title.
pub const MAX_DECK_TITLE_CHARS: usize = 200;

/// Largest slide count a generation request may ask for.
pub const MAX_GENERATED_SLIDES: i64 = 50;

/// Slide count requested when none is given.
pub const DEFAULT_GENERATED_SLIDES: u32 = 12;

literal_set! {
    /// Deck template.
    pub enum DeckTemplate {
        /// Quarterly business review.
        QuarterlyReview => "quarterly_review",
        /// Annual impact deck.
        AnnualImpact => "annual_impact",
        /// One-program spotlight.
        ProgramSpotlight => "program_spotlight",
        /// Board update.
        BoardUpdate => "board_update",
    }
}

// ── Metadata ────────────────────────────────────────────────────────

/// Metadata of decks produced by the current generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentDeckMetadata {
    /// Company the deck is about.
    pub company_id: Uuid,
    /// Reporting window.
    pub period: Period,
    /// Template used.
    pub template: DeckTemplate,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
    /// Content language.
    pub locale: Locale,
    /// Revision, starting at 1.
    pub version: u32,
}

/// Caller-side [`CurrentDeckMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentDeckMetadataInput {
    /// Company the deck is about.
    pub company_id: Uuid,
    /// Reporting window.
    pub period: Period,
    /// Template used.
    pub template: DeckTemplate,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
    /// Defaults to `en`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
    /// Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl Contract for CurrentDeckMetadata {
    const NAME: &'static str = "CurrentDeckMetadata";
    type Input = CurrentDeckMetadataInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let company_id = obj.required("companyId", uuid());
            let period = obj.required("period", shape::<Period>());
            let template = obj.required("template", literal::<DeckTemplate>());
            let generated_at = obj.required("generatedAt", timestamp());
            let locale = obj.defaulted("locale", literal::<Locale>(), Locale::En);
            let version = obj.defaulted("version", integer::<u32>().min(1), 1);
            Some(Self {
                company_id: company_id?,
                period: period?,
                template: template?,
                generated_at: generated_at?,
                locale: locale?,
                version: version?,
            })
        })
    }
}

/// Metadata of decks saved by the first-generation editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDeckMetadata {
    /// Deck title as typed by the author.
    pub title: String,
    /// Author display name.
    pub author: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Free-form tags.
    pub tags: Vec<String>,
}

/// Caller-side [`LegacyDeckMetadata`]; `tags` defaults to none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDeckMetadataInput {
    /// Deck title.
    pub title: String,
    /// Author display name.
    pub author: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Contract for LegacyDeckMetadata {
    const NAME: &'static str = "LegacyDeckMetadata";
    type Input = LegacyDeckMetadataInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let title = obj.required("title", text().non_empty());
            let author = obj.required("author", text().non_empty());
            let created_at = obj.required("createdAt", timestamp());
            let tags = obj.defaulted("tags", list(text().non_empty()), Vec::new());
            Some(Self {
                title: title?,
                author: author?,
                created_at: created_at?,
                tags: tags?,
            })
        })
    }
}

/// Deck metadata in either shape.
///
/// Trial order: [`CurrentDeckMetadata`], then [`LegacyDeckMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeckMetadata {
    /// Current generator metadata.
    Current(CurrentDeckMetadata),
    /// Legacy editor metadata.
    Legacy(LegacyDeckMetadata),
}

/// Caller-side [`DeckMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeckMetadataInput {
    /// Current generator metadata.
    Current(CurrentDeckMetadataInput),
    /// Legacy editor metadata.
    Legacy(LegacyDeckMetadataInput),
}

impl Contract for DeckMetadata {
    const NAME: &'static str = "DeckMetadata";
    type Input = DeckMetadataInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        Trial::new(cx, value)
            .attempt::<CurrentDeckMetadata>(Self::Current)
            .attempt::<LegacyDeckMetadata>(Self::Legacy)
            .finish()
    }
}

// ── Theme ───────────────────────────────────────────────────────────

literal_set! {
    /// Built-in theme.
    pub enum ThemePreset {
        /// House style.
        Corporate => "corporate",
        /// Sparse, light.
        Minimal => "minimal",
        /// Saturated colours.
        Vibrant => "vibrant",
        /// Accessibility-first palette.
        HighContrast => "high_contrast",
    }
}

/// A company-branded theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTheme {
    /// Main colour, `#RRGGBB`.
    pub primary_color: String,
    /// Secondary colour, `#RRGGBB`.
    pub secondary_color: String,
    /// Highlight colour, `#RRGGBB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    /// Font family name.
    pub font_family: String,
    /// Logo image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl Contract for CustomTheme {
    const NAME: &'static str = "CustomTheme";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let hex = text().format(Format::HexColor);
            let primary_color = obj.required("primaryColor", hex);
            let secondary_color = obj.required("secondaryColor", hex);
            let accent_color = obj.optional("accentColor", hex);
            let font_family = obj.required("fontFamily", text().non_empty());
            let logo_url = obj.optional("logoUrl", url());
            Some(Self {
                primary_color: primary_color?,
                secondary_color: secondary_color?,
                accent_color: accent_color?,
                font_family: font_family?,
                logo_url: logo_url?,
            })
        })
    }
}

/// A deck theme: a preset name or a custom palette.
///
/// Trial order: preset name, then [`CustomTheme`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Theme {
    /// Built-in theme by name.
    Preset(ThemePreset),
    /// Custom palette.
    Custom(CustomTheme),
}

impl Default for Theme {
    fn default() -> Self {
        Self::Preset(ThemePreset::Corporate)
    }
}

impl Contract for Theme {
    const NAME: &'static str = "Theme";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        Trial::new(cx, value)
            .attempt_field("ThemePreset", literal::<ThemePreset>(), Self::Preset)
            .attempt::<CustomTheme>(Self::Custom)
            .finish()
    }
}

// ── Deck ────────────────────────────────────────────────────────────

/// A complete slide deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Deck id.
    pub id: Uuid,
    /// Deck title.
    pub title: String,
    /// Metadata in either shape.
    pub metadata: DeckMetadata,
    /// Visual theme.
    pub theme: Theme,
    /// Slides in either shape.
    pub slides: DeckSlides,
    /// Citations referenced from blocks.
    pub citations: Vec<Citation>,
}

/// Caller-side [`Deck`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckInput {
    /// Deck id.
    pub id: Uuid,
    /// Deck title.
    pub title: String,
    /// Metadata.
    pub metadata: DeckMetadataInput,
    /// Defaults to the `corporate` preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// Slides.
    pub slides: DeckSlidesInput,
    /// Defaults to none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
}

impl Deck {
    /// Returns `true` when the deck arrived in the legacy slide shape.
    #[must_use]
    pub const fn is_legacy(&self) -> bool {
        matches!(self.slides, DeckSlides::Legacy(_))
    }

    /// Block citation ids with no matching deck citation, deduplicated in
    /// first-seen order.
    #[must_use]
    pub fn dangling_citation_ids(&self) -> Vec<&str> {
        let known: IndexSet<&str> = self.citations.iter().map(|c| c.id.as_str()).collect();
        let dangling: IndexSet<&str> = self
            .slides
            .blocks()
            .flat_map(|block| block.citation_ids.iter().map(String::as_str))
            .filter(|id| !known.contains(id))
            .collect();
        dangling.into_iter().collect()
    }
}

impl Contract for Deck {
    const NAME: &'static str = "Deck";
    type Input = DeckInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let id = obj.required("id", uuid());
            let title = obj.required("title", text().non_empty().max(MAX_DECK_TITLE_CHARS));
            let metadata = obj.required("metadata", shape::<DeckMetadata>());
            let theme = obj.defaulted("theme", shape::<Theme>(), Theme::default());
            let slides = obj.required("slides", shape::<DeckSlides>());
            let citations = obj.defaulted("citations", list(shape::<Citation>()), Vec::new());
            Some(Self {
                id: id?,
                title: title?,
                metadata: metadata?,
                theme: theme?,
                slides: slides?,
                citations: citations?,
            })
        })
    }
}

// ── Generation ──────────────────────────────────────────────────────

/// Request to generate a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDeckRequest {
    /// Company the deck is about.
    pub company_id: Uuid,
    /// Template.
    pub template: DeckTemplate,
    /// Reporting window.
    pub period: Period,
    /// Restrict to these programs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_types: Option<Vec<ProgramType>>,
    /// Content language.
    pub locale: Locale,
    /// Narrative register.
    pub tone: Tone,
    /// Visual theme.
    pub theme: Theme,
    /// Write speaker notes.
    pub include_speaker_notes: bool,
    /// Slide budget, 1 to [`MAX_GENERATED_SLIDES`].
    pub max_slides: u32,
}

/// Caller-side [`GenerateDeckRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDeckRequestInput {
    /// Company the deck is about.
    pub company_id: Uuid,
    /// Template.
    pub template: DeckTemplate,
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
    /// Defaults to the `corporate` preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// Defaults to `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_speaker_notes: Option<bool>,
    /// Defaults to [`DEFAULT_GENERATED_SLIDES`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_slides: Option<u32>,
}

impl Contract for GenerateDeckRequest {
    const NAME: &'static str = "GenerateDeckRequest";
    type Input = GenerateDeckRequestInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let company_id = obj.required("companyId", uuid());
            let template = obj.required("template", literal::<DeckTemplate>());
            let period = obj.required("period", shape::<Period>());
            let program_types =
                obj.optional("programTypes", list(literal::<ProgramType>()).non_empty());
            let locale = obj.defaulted("locale", literal::<Locale>(), Locale::En);
            let tone = obj.defaulted("tone", literal::<Tone>(), Tone::Formal);
            let theme = obj.defaulted("theme", shape::<Theme>(), Theme::default());
            let include_speaker_notes = obj.defaulted("includeSpeakerNotes", boolean(), false);
            let max_slides = obj.defaulted(
                "maxSlides",
                integer::<u32>().range(1, MAX_GENERATED_SLIDES),
                DEFAULT_GENERATED_SLIDES,
            );
            Some(Self {
                company_id: company_id?,
                template: template?,
                period: period?,
                program_types: program_types?,
                locale: locale?,
                tone: tone?,
                theme: theme?,
                include_speaker_notes: include_speaker_notes?,
                max_slides: max_slides?,
            })
        })
    }
}

/// A freshly generated deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDeckResponse {
    /// The deck.
    pub deck: Deck,
    /// Generator warnings.
    pub warnings: Vec<String>,
}

/// Caller-side [`GenerateDeckResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDeckResponseInput {
    /// The deck.
    pub deck: DeckInput,
    /// Defaults to none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

impl Contract for GenerateDeckResponse {
    const NAME: &'static str = "GenerateDeckResponse";
    type Input = GenerateDeckResponseInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let deck = obj.required("deck", shape::<Deck>());
            let warnings = obj.defaulted("warnings", list(text()), Vec::new());
            Some(Self {
                deck: deck?,
                warnings: warnings?,
            })
        })
    }
}

#[cfg(test)]
#[path = "deck_tests.rs"]
mod tests;
