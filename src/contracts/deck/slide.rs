//! Slides, in the current block-based shape and the legacy typed shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::block::{Block, BlockInput};
use crate::schema::field::{boolean, integer, list, literal, shape, text};
use crate::schema::{Contract, Cursor, Trial, literal_set};

/// Longest speaker-notes text.
pub const MAX_NOTES_CHARS: usize = 5_000;

literal_set! {
    /// Slide layout template.
    pub enum SlideLayout {
        /// Title only.
        TitleOnly => "title_only",
        /// Title over a content area.
        TitleContent => "title_content",
        /// Two side-by-side columns.
        TwoColumn => "two_column",
        /// Edge-to-edge content.
        FullBleed => "full_bleed",
        /// Section divider.
        SectionHeader => "section_header",
    }
}

/// A slide in the current deck shape.
///
/// `slideNumber` is a sequencing hint; uniqueness and contiguity are up to
/// the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Slide id.
    pub id: String,
    /// 1-based position hint.
    pub slide_number: u32,
    /// Slide title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Layout template.
    pub layout: SlideLayout,
    /// Content blocks in caller order.
    pub blocks: Vec<Block>,
    /// Speaker notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Excluded from presentation and export.
    pub hidden: bool,
}

/// Caller-side [`Slide`]; `layout` defaults to `title_content` and
/// `hidden` to `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideInput {
    /// Slide id.
    pub id: String,
    /// 1-based position hint.
    pub slide_number: u32,
    /// Slide title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Layout template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<SlideLayout>,
    /// Content blocks.
    pub blocks: Vec<BlockInput>,
    /// Speaker notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Hidden flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl Contract for Slide {
    const NAME: &'static str = "Slide";
    type Input = SlideInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let id = obj.required("id", text().non_empty());
            let slide_number = obj.required("slideNumber", integer::<u32>().min(1));
            let title = obj.optional("title", text());
            let layout = obj.defaulted(
                "layout",
                literal::<SlideLayout>(),
                SlideLayout::TitleContent,
            );
            let blocks = obj.required("blocks", list(shape::<Block>()));
            let notes = obj.optional("notes", text().max(MAX_NOTES_CHARS));
            let hidden = obj.defaulted("hidden", boolean(), false);
            Some(Self {
                id: id?,
                slide_number: slide_number?,
                title: title?,
                layout: layout?,
                blocks: blocks?,
                notes: notes?,
                hidden: hidden?,
            })
        })
    }
}

literal_set! {
    /// Slide type of the legacy deck shape.
    pub enum LegacySlideType {
        /// Cover page.
        Cover => "cover",
        /// Executive summary.
        Summary => "summary",
        /// Metrics overview.
        Metrics => "metrics",
        /// Prose.
        Narrative => "narrative",
        /// Single chart.
        Chart => "chart",
        /// Closing page.
        Closing => "closing",
    }
}

/// A slide in the legacy deck shape, typed by purpose rather than layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySlide {
    /// Slide purpose.
    #[serde(rename = "type")]
    pub kind: LegacySlideType,
    /// Slide title.
    pub title: String,
    /// Free-text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Content blocks.
    pub blocks: Vec<Block>,
}

/// Caller-side [`LegacySlide`]; `blocks` defaults to none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySlideInput {
    /// Slide purpose.
    #[serde(rename = "type")]
    pub kind: LegacySlideType,
    /// Slide title.
    pub title: String,
    /// Free-text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Content blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<BlockInput>>,
}

impl Contract for LegacySlide {
    const NAME: &'static str = "LegacySlide";
    type Input = LegacySlideInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let kind = obj.required("type", literal::<LegacySlideType>());
            let title = obj.required("title", text().non_empty());
            let body = obj.optional("body", text());
            let blocks = obj.defaulted("blocks", list(shape::<Block>()), Vec::new());
            Some(Self {
                kind: kind?,
                title: title?,
                body: body?,
                blocks: blocks?,
            })
        })
    }
}

/// The `slides` array of a deck, in whichever shape it arrived.
///
/// Payloads carry no tag saying which shape they use, so the whole array is
/// tried as current slides first and as legacy slides second. An array
/// valid under both (including the empty array) is read as current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeckSlides {
    /// Current block-based slides.
    Current(Vec<Slide>),
    /// Legacy typed slides.
    Legacy(Vec<LegacySlide>),
}

/// Caller-side [`DeckSlides`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeckSlidesInput {
    /// Current block-based slides.
    Current(Vec<SlideInput>),
    /// Legacy typed slides.
    Legacy(Vec<LegacySlideInput>),
}

impl DeckSlides {
    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Current(slides) => slides.len(),
            Self::Legacy(slides) => slides.len(),
        }
    }

    /// Returns `true` if there are no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every block on every slide, in order.
    pub fn blocks(&self) -> Box<dyn Iterator<Item = &Block> + '_> {
        match self {
            Self::Current(slides) => Box::new(slides.iter().flat_map(|s| s.blocks.iter())),
            Self::Legacy(slides) => Box::new(slides.iter().flat_map(|s| s.blocks.iter())),
        }
    }
}

impl Contract for DeckSlides {
    const NAME: &'static str = "DeckSlides";
    type Input = DeckSlidesInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        Trial::new(cx, value)
            .attempt_field("Slide[]", list(shape::<Slide>()), Self::Current)
            .attempt_field("LegacySlide[]", list(shape::<LegacySlide>()), Self::Legacy)
            .finish()
    }
}

#[cfg(test)]
#[path = "slide_tests.rs"]
mod tests;
