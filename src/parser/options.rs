//! Parsing options and configuration.

use super::charts::ChartConfig;
use super::layout::SegmenterConfig;
use super::tables::LatticeConfig;

/// Options for parsing PDF documents.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Explicit page selection (1-based document page numbers); `None`
    /// parses every page
    pub pages: Option<Vec<u32>>,

    /// Paragraph segmentation settings
    pub segmenter: SegmenterConfig,

    /// Chart detection settings
    pub charts: ChartConfig,

    /// Table detection settings
    pub tables: LatticeConfig,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse only the given pages.
    pub fn with_pages(mut self, pages: Vec<u32>) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Set paragraph segmentation settings.
    pub fn with_segmenter(mut self, config: SegmenterConfig) -> Self {
        self.segmenter = config;
        self
    }

    /// Set chart detection settings.
    pub fn with_charts(mut self, config: ChartConfig) -> Self {
        self.charts = config;
        self
    }

    /// Set table detection settings.
    pub fn with_tables(mut self, config: LatticeConfig) -> Self {
        self.tables = config;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert!(options.pages.is_none());
        assert_eq!(options.segmenter.paragraph_gap, 20.0);
        assert_eq!(options.segmenter.min_text_length, 10);
        assert_eq!(options.charts.min_width, 100.0);
        assert_eq!(options.tables.snap_tolerance, 2.0);
    }

    #[test]
    fn test_options_builder() {
        let options = ParseOptions::new()
            .with_pages(vec![1, 3])
            .with_segmenter(SegmenterConfig {
                paragraph_gap: 30.0,
                min_text_length: 5,
            });

        assert_eq!(options.pages, Some(vec![1, 3]));
        assert_eq!(options.segmenter.paragraph_gap, 30.0);
        assert_eq!(options.segmenter.min_text_length, 5);
    }
}
