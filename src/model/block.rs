//! Content block types.
//!
//! Every block carries the section context resolved for it: `section` and
//! `sub_section` are `None` until a heading is found (paragraphs) or
//! propagated (tables and charts), and serialize as JSON `null` rather than
//! being omitted.

use serde::{Deserialize, Serialize};

/// A content block on a page, tagged by kind in the JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A paragraph of cleaned text
    Paragraph(ParagraphBlock),

    /// A ruled-line table
    Table(TableBlock),

    /// A chart or large image region
    Chart(ChartBlock),
}

impl ContentBlock {
    /// The block's section, if one has been assigned.
    pub fn section(&self) -> Option<&str> {
        match self {
            ContentBlock::Paragraph(p) => p.section.as_deref(),
            ContentBlock::Table(t) => t.section.as_deref(),
            ContentBlock::Chart(c) => c.section.as_deref(),
        }
    }

    /// The block's sub-section, if one has been assigned.
    pub fn sub_section(&self) -> Option<&str> {
        match self {
            ContentBlock::Paragraph(p) => p.sub_section.as_deref(),
            ContentBlock::Table(t) => t.sub_section.as_deref(),
            ContentBlock::Chart(c) => c.sub_section.as_deref(),
        }
    }

    /// Overwrite the block's section context.
    pub fn set_heading_context(&mut self, section: Option<String>, sub_section: Option<String>) {
        match self {
            ContentBlock::Paragraph(p) => {
                p.section = section;
                p.sub_section = sub_section;
            }
            ContentBlock::Table(t) => {
                t.section = section;
                t.sub_section = sub_section;
            }
            ContentBlock::Chart(c) => {
                c.section = section;
                c.sub_section = sub_section;
            }
        }
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, ContentBlock::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, ContentBlock::Table(_))
    }

    /// Check if this block is a chart.
    pub fn is_chart(&self) -> bool {
        matches!(self, ContentBlock::Chart(_))
    }
}

/// A paragraph of body text with its heading context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParagraphBlock {
    /// Section heading this paragraph opened or belongs to
    pub section: Option<String>,

    /// Sub-section heading, only ever set alongside a section
    pub sub_section: Option<String>,

    /// Cleaned paragraph text (single spaces, no newlines)
    pub text: String,
}

impl ParagraphBlock {
    /// Create a paragraph with explicit heading context.
    pub fn new(
        text: impl Into<String>,
        section: Option<String>,
        sub_section: Option<String>,
    ) -> Self {
        Self {
            section,
            sub_section,
            text: text.into(),
        }
    }

    /// Create a paragraph with no heading context.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, None, None)
    }
}

/// A table extracted from ruled lines, with trimmed cell text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableBlock {
    /// Section context propagated from the page's paragraphs
    pub section: Option<String>,

    /// Sub-section context propagated from the page's paragraphs
    pub sub_section: Option<String>,

    /// Human-readable label, e.g. "Table 1 from page 2"
    pub description: String,

    /// Row-major cell text with fully-blank rows removed
    pub table_data: Vec<Vec<String>>,
}

impl TableBlock {
    /// Create a table block with no heading context.
    pub fn new(description: impl Into<String>, table_data: Vec<Vec<String>>) -> Self {
        Self {
            section: None,
            sub_section: None,
            description: description.into(),
            table_data,
        }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.table_data.len()
    }
}

/// A chart or large image region with optional caption text in its label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartBlock {
    /// Section context propagated from the page's paragraphs
    pub section: Option<String>,

    /// Sub-section context propagated from the page's paragraphs
    pub sub_section: Option<String>,

    /// Label with optional caption preview, e.g. "Chart/Image 1 - Revenue..."
    pub description: String,

    /// Always empty; present for schema uniformity with tables
    pub table_data: Vec<Vec<String>>,

    /// Placed display size of the image on the page
    pub dimensions: Dimensions,
}

impl ChartBlock {
    /// Create a chart block with no heading context.
    pub fn new(description: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            section: None,
            sub_section: None,
            description: description.into(),
            table_data: Vec::new(),
            dimensions,
        }
    }
}

/// Placed width and height of an image, in page units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
