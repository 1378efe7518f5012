//! Document-level types.

use super::Page;
use serde::{Deserialize, Serialize};

/// The structured content extracted from a PDF document.
///
/// Serializes as `{"pages": [...]}`, the root of the output schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContent {
    /// Pages in document order, one entry per processed page.
    pub pages: Vec<Page>,
}

impl DocumentContent {
    /// Create a document with no pages yet.
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Number of pages in the extracted output.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by its position in the output (1-indexed).
    pub fn get_page(&self, index: u32) -> Option<&Page> {
        if index == 0 {
            return None;
        }
        self.pages.get((index - 1) as usize)
    }

    /// Append a processed page.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Whether any page was processed.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of content blocks across all pages.
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.content.len()).sum()
    }
}

impl Default for DocumentContent {
    fn default() -> Self {
        Self::new()
    }
}
