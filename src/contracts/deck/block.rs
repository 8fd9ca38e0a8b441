//! Slide content blocks.
//!
//! A block's wire form is flat: the shared keys (`id`, `order`,
//! `citationIds`) sit next to the `type` tag and the kind-specific keys.
//! The tag is read first and only the matching kind is checked, so keys of
//! other kinds are dropped like any other unknown key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contracts::common::Tone;
use crate::schema::field::{boolean, integer, list, literal, number, shape, text, url};
use crate::schema::{Contract, Cursor, Trial, literal_set};

/// Longest title or subtitle text.
pub const MAX_HEADING_CHARS: usize = 200;

/// Most metrics a grid block may hold.
pub const MAX_GRID_METRICS: usize = 12;

/// Widest metrics grid.
pub const MAX_GRID_COLUMNS: i64 = 4;

/// Grid width used when none is given.
pub const DEFAULT_GRID_COLUMNS: u8 = 3;

literal_set! {
    /// The ten block kinds.
    pub enum BlockKind {
        /// Slide heading.
        Title => "title",
        /// Secondary heading.
        Subtitle => "subtitle",
        /// Markdown prose.
        Narrative => "narrative",
        /// Bullet list.
        Bullets => "bullets",
        /// Data chart.
        Chart => "chart",
        /// Data table.
        Table => "table",
        /// Image.
        Image => "image",
        /// Grid of headline metrics.
        MetricsGrid => "metrics_grid",
        /// Pull quote.
        Quote => "quote",
        /// Evidence excerpt.
        Evidence => "evidence",
    }
}

/// A metric cell: a plain number, or preformatted text such as `"12%"`.
///
/// Resolved by trial: number first, then text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Numeric value.
    Number(f64),
    /// Preformatted value.
    Text(String),
}

impl Contract for MetricValue {
    const NAME: &'static str = "MetricValue";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        Trial::new(cx, value)
            .attempt_field("number", number(), Self::Number)
            .attempt_field("text", text(), Self::Text)
            .finish()
    }
}

// ── Kind payloads ───────────────────────────────────────────────────

/// `title` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleBlock {
    /// Heading text.
    pub text: String,
    /// Line under the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl Contract for TitleBlock {
    const NAME: &'static str = "TitleBlock";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let text_value = obj.required("text", text().non_empty().max(MAX_HEADING_CHARS));
            let subtitle = obj.optional("subtitle", text().max(MAX_HEADING_CHARS));
            Some(Self {
                text: text_value?,
                subtitle: subtitle?,
            })
        })
    }
}

/// `subtitle` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleBlock {
    /// Subtitle text.
    pub text: String,
}

impl Contract for SubtitleBlock {
    const NAME: &'static str = "SubtitleBlock";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let text_value = obj.required("text", text().non_empty().max(MAX_HEADING_CHARS));
            Some(Self { text: text_value? })
        })
    }
}

/// `narrative` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeBlock {
    /// Markdown body.
    pub markdown: String,
    /// Register the text was written in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

impl Contract for NarrativeBlock {
    const NAME: &'static str = "NarrativeBlock";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let markdown = obj.required("markdown", text().non_empty());
            let tone = obj.optional("tone", literal::<Tone>());
            Some(Self {
                markdown: markdown?,
                tone: tone?,
            })
        })
    }
}

/// `bullets` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletsBlock {
    /// Bullet texts, at least one.
    pub items: Vec<String>,
    /// Render as a numbered list.
    pub ordered: bool,
}

/// Caller-side [`BulletsBlock`]; `ordered` defaults to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletsBlockInput {
    /// Bullet texts.
    pub items: Vec<String>,
    /// Render as a numbered list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
}

impl Contract for BulletsBlock {
    const NAME: &'static str = "BulletsBlock";
    type Input = BulletsBlockInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let items = obj.required("items", list(text().non_empty()).non_empty());
            let ordered = obj.defaulted("ordered", boolean(), false);
            Some(Self {
                items: items?,
                ordered: ordered?,
            })
        })
    }
}

literal_set! {
    /// Chart family.
    pub enum ChartType {
        /// Vertical bars.
        Bar => "bar",
        /// Line over categories.
        Line => "line",
        /// Pie.
        Pie => "pie",
        /// Pie with a hole.
        Donut => "donut",
        /// Filled line.
        Area => "area",
    }
}

/// One data series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Legend label.
    pub label: String,
    /// Values, one per category.
    pub values: Vec<f64>,
}

impl Contract for ChartSeries {
    const NAME: &'static str = "ChartSeries";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let label = obj.required("label", text().non_empty());
            let values = obj.required("values", list(number()));
            Some(Self {
                label: label?,
                values: values?,
            })
        })
    }
}

/// `chart` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBlock {
    /// Chart family.
    pub chart_type: ChartType,
    /// Chart caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Category axis labels.
    pub categories: Vec<String>,
    /// Data series, at least one.
    pub series: Vec<ChartSeries>,
    /// Unit shown on the value axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Caller-side [`ChartBlock`]; `categories` defaults to none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBlockInput {
    /// Chart family.
    pub chart_type: ChartType,
    /// Chart caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Category axis labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Data series.
    pub series: Vec<ChartSeries>,
    /// Value axis unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Contract for ChartBlock {
    const NAME: &'static str = "ChartBlock";
    type Input = ChartBlockInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let chart_type = obj.required("chartType", literal::<ChartType>());
            let title = obj.optional("title", text().max(MAX_HEADING_CHARS));
            let categories = obj.defaulted("categories", list(text()), Vec::new());
            let series = obj.required("series", list(shape::<ChartSeries>()).non_empty());
            let unit = obj.optional("unit", text());
            Some(Self {
                chart_type: chart_type?,
                title: title?,
                categories: categories?,
                series: series?,
                unit: unit?,
            })
        })
    }
}

/// `table` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    /// Column headers, at least one.
    pub columns: Vec<String>,
    /// Rows of cells. Row width is not checked against `columns`.
    pub rows: Vec<Vec<MetricValue>>,
    /// Caption under the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Contract for TableBlock {
    const NAME: &'static str = "TableBlock";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let columns = obj.required("columns", list(text()).non_empty());
            let rows = obj.required("rows", list(list(shape::<MetricValue>())));
            let caption = obj.optional("caption", text());
            Some(Self {
                columns: columns?,
                rows: rows?,
                caption: caption?,
            })
        })
    }
}

/// `image` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    /// Absolute image URL.
    pub url: String,
    /// Alternative text.
    pub alt: String,
    /// Caption under the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Contract for ImageBlock {
    const NAME: &'static str = "ImageBlock";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let image_url = obj.required("url", url());
            let alt = obj.required("alt", text().non_empty());
            let caption = obj.optional("caption", text());
            Some(Self {
                url: image_url?,
                alt: alt?,
                caption: caption?,
            })
        })
    }
}

/// One cell of a metrics grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridMetric {
    /// Metric label.
    pub label: String,
    /// Headline value.
    pub value: MetricValue,
    /// Unit suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Change against the previous period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

impl Contract for GridMetric {
    const NAME: &'static str = "GridMetric";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let label = obj.required("label", text().non_empty());
            let metric = obj.required("value", shape::<MetricValue>());
            let unit = obj.optional("unit", text());
            let delta = obj.optional("delta", number());
            Some(Self {
                label: label?,
                value: metric?,
                unit: unit?,
                delta: delta?,
            })
        })
    }
}

/// `metrics_grid` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsGridBlock {
    /// Cells, 1 to [`MAX_GRID_METRICS`].
    pub metrics: Vec<GridMetric>,
    /// Grid width, 1 to [`MAX_GRID_COLUMNS`].
    pub columns: u8,
}

/// Caller-side [`MetricsGridBlock`]; `columns` defaults to
/// [`DEFAULT_GRID_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsGridBlockInput {
    /// Cells.
    pub metrics: Vec<GridMetric>,
    /// Grid width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u8>,
}

impl Contract for MetricsGridBlock {
    const NAME: &'static str = "MetricsGridBlock";
    type Input = MetricsGridBlockInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let metrics = obj.required(
                "metrics",
                list(shape::<GridMetric>()).non_empty().max(MAX_GRID_METRICS),
            );
            let columns = obj.defaulted(
                "columns",
                integer::<u8>().range(1, MAX_GRID_COLUMNS),
                DEFAULT_GRID_COLUMNS,
            );
            Some(Self {
                metrics: metrics?,
                columns: columns?,
            })
        })
    }
}

/// `quote` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBlock {
    /// Quoted words.
    pub text: String,
    /// Who said them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    /// Evidence item the quote comes from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_id: Option<String>,
}

impl Contract for QuoteBlock {
    const NAME: &'static str = "QuoteBlock";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let quote = obj.required("text", text().non_empty());
            let attribution = obj.optional("attribution", text());
            let evidence_id = obj.optional("evidenceId", text().non_empty());
            Some(Self {
                text: quote?,
                attribution: attribution?,
                evidence_id: evidence_id?,
            })
        })
    }
}

/// `evidence` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceBlock {
    /// Evidence item shown.
    pub evidence_id: String,
    /// Redacted excerpt.
    pub snippet: String,
    /// Retrieval confidence, 0 to 1.
    pub confidence: f64,
}

impl Contract for EvidenceBlock {
    const NAME: &'static str = "EvidenceBlock";
    type Input = Self;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let evidence_id = obj.required("evidenceId", text().non_empty());
            let snippet = obj.required("snippet", text().non_empty());
            let confidence = obj.required("confidence", number().range(0.0, 1.0));
            Some(Self {
                evidence_id: evidence_id?,
                snippet: snippet?,
                confidence: confidence?,
            })
        })
    }
}

// ── Union ───────────────────────────────────────────────────────────

/// Kind-specific block content, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockContent {
    /// `title`.
    Title(TitleBlock),
    /// `subtitle`.
    Subtitle(SubtitleBlock),
    /// `narrative`.
    Narrative(NarrativeBlock),
    /// `bullets`.
    Bullets(BulletsBlock),
    /// `chart`.
    Chart(ChartBlock),
    /// `table`.
    Table(TableBlock),
    /// `image`.
    Image(ImageBlock),
    /// `metrics_grid`.
    MetricsGrid(MetricsGridBlock),
    /// `quote`.
    Quote(QuoteBlock),
    /// `evidence`.
    Evidence(EvidenceBlock),
}

/// Caller-side [`BlockContent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockContentInput {
    /// `title`.
    Title(TitleBlock),
    /// `subtitle`.
    Subtitle(SubtitleBlock),
    /// `narrative`.
    Narrative(NarrativeBlock),
    /// `bullets`.
    Bullets(BulletsBlockInput),
    /// `chart`.
    Chart(ChartBlockInput),
    /// `table`.
    Table(TableBlock),
    /// `image`.
    Image(ImageBlock),
    /// `metrics_grid`.
    MetricsGrid(MetricsGridBlockInput),
    /// `quote`.
    Quote(QuoteBlock),
    /// `evidence`.
    Evidence(EvidenceBlock),
}

impl BlockContent {
    /// Returns the kind tag.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        match self {
            Self::Title(_) => BlockKind::Title,
            Self::Subtitle(_) => BlockKind::Subtitle,
            Self::Narrative(_) => BlockKind::Narrative,
            Self::Bullets(_) => BlockKind::Bullets,
            Self::Chart(_) => BlockKind::Chart,
            Self::Table(_) => BlockKind::Table,
            Self::Image(_) => BlockKind::Image,
            Self::MetricsGrid(_) => BlockKind::MetricsGrid,
            Self::Quote(_) => BlockKind::Quote,
            Self::Evidence(_) => BlockKind::Evidence,
        }
    }

    /// Checks `value` (the whole block object) as a `kind` payload.
    fn check_kind(cx: &mut Cursor, kind: BlockKind, value: &Value) -> Option<Self> {
        match kind {
            BlockKind::Title => TitleBlock::check(cx, value).map(Self::Title),
            BlockKind::Subtitle => SubtitleBlock::check(cx, value).map(Self::Subtitle),
            BlockKind::Narrative => NarrativeBlock::check(cx, value).map(Self::Narrative),
            BlockKind::Bullets => BulletsBlock::check(cx, value).map(Self::Bullets),
            BlockKind::Chart => ChartBlock::check(cx, value).map(Self::Chart),
            BlockKind::Table => TableBlock::check(cx, value).map(Self::Table),
            BlockKind::Image => ImageBlock::check(cx, value).map(Self::Image),
            BlockKind::MetricsGrid => MetricsGridBlock::check(cx, value).map(Self::MetricsGrid),
            BlockKind::Quote => QuoteBlock::check(cx, value).map(Self::Quote),
            BlockKind::Evidence => EvidenceBlock::check(cx, value).map(Self::Evidence),
        }
    }
}

/// A positioned block on a slide.
///
/// `order` is a sequencing hint; uniqueness and contiguity are up to the
/// caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Block id, unique within the deck by convention.
    pub id: String,
    /// Position hint within the slide.
    pub order: u32,
    /// Citations backing the block's content.
    pub citation_ids: Vec<String>,
    /// Kind and kind-specific payload.
    #[serde(flatten)]
    pub content: BlockContent,
}

/// Caller-side [`Block`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInput {
    /// Block id.
    pub id: String,
    /// Position hint.
    pub order: u32,
    /// Citations; defaults to none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_ids: Option<Vec<String>>,
    /// Kind and payload.
    #[serde(flatten)]
    pub content: BlockContentInput,
}

impl Block {
    /// Returns the kind tag.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        self.content.kind()
    }
}

impl Contract for Block {
    const NAME: &'static str = "Block";
    type Input = BlockInput;

    fn check(cx: &mut Cursor, value: &Value) -> Option<Self> {
        cx.object(value, |obj| {
            let id = obj.required("id", text().non_empty());
            let order = obj.required("order", integer::<u32>().min(0));
            let citation_ids = obj.defaulted("citationIds", list(text().non_empty()), Vec::new());
            let kind = obj.discriminator::<BlockKind>("type");
            let content = kind.and_then(|tag| BlockContent::check_kind(obj.cursor(), tag, value));
            Some(Self {
                id: id?,
                order: order?,
                citation_ids: citation_ids?,
                content: content?,
            })
        })
    }
}

#[cfg(test)]
#[path = "block_tests.rs"]
mod tests;
