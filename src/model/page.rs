//! Page-level types.

use super::{ChartBlock, ContentBlock, ParagraphBlock, TableBlock};
use serde::{Deserialize, Serialize};

/// A single page of extracted content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number in the source document (1-indexed)
    pub page_number: u32,

    /// Content blocks in extraction order: paragraphs, then tables, then charts
    pub content: Vec<ContentBlock>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            content: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: ContentBlock) {
        self.content.push(block);
    }

    /// Add a paragraph block to the page.
    pub fn add_paragraph(&mut self, paragraph: ParagraphBlock) {
        self.add_block(ContentBlock::Paragraph(paragraph));
    }

    /// Add a table block to the page.
    pub fn add_table(&mut self, table: TableBlock) {
        self.add_block(ContentBlock::Table(table));
    }

    /// Add a chart block to the page.
    pub fn add_chart(&mut self, chart: ChartBlock) {
        self.add_block(ContentBlock::Chart(chart));
    }

    /// Check if the page has no content blocks.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.content.len()
    }

    /// Iterate over the page's paragraph blocks.
    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphBlock> {
        self.content.iter().filter_map(|block| match block {
            ContentBlock::Paragraph(p) => Some(p),
            _ => None,
        })
    }
}
