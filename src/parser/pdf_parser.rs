//! PDF document parser and per-page extraction pipeline.
//!
//! Pages are processed strictly in order. For each page the pipeline
//! segments paragraphs, asks the table and chart services for their blocks,
//! and assembles the page as paragraphs, then tables, then charts. Table
//! and chart failures are logged and degrade to empty lists; everything
//! else propagates.

use std::path::Path;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::{DocumentContent, Page, ParagraphBlock, TableBlock};

use super::backend::{LopdfSource, PageSource};
use super::charts::{ChartSource, ImageChartDetector};
use super::layout::ParagraphSegmenter;
use super::options::ParseOptions;
use super::tables::{RuledTableFinder, TableGrid, TableSource};

/// PDF document parser.
pub struct PdfParser<S: PageSource = LopdfSource> {
    source: S,
    options: ParseOptions,
}

impl PdfParser<LopdfSource> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        // Verify it's a PDF before handing it to the document parser.
        detect_format_from_path(path)?;

        let source = LopdfSource::load_file(path)?;
        Ok(Self { source, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;

        let source = LopdfSource::load_bytes(data)?;
        Ok(Self { source, options })
    }
}

impl<S: PageSource> PdfParser<S> {
    /// Build a parser over an existing page source.
    pub fn with_source(source: S, options: ParseOptions) -> Self {
        Self { source, options }
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.source.page_count()
    }

    /// Parse the document with the standard table and chart services.
    pub fn parse(&self) -> Result<DocumentContent> {
        let tables = RuledTableFinder::with_config(&self.source, self.options.tables.clone());
        let charts = ImageChartDetector::with_config(&self.source, self.options.charts.clone());
        self.parse_with_services(&tables, &charts)
    }

    /// Parse the document with explicit table and chart services.
    pub fn parse_with_services<T, C>(&self, tables: &T, charts: &C) -> Result<DocumentContent>
    where
        T: TableSource,
        C: ChartSource,
    {
        let segmenter = ParagraphSegmenter::with_config(self.options.segmenter.clone());
        let mut document = DocumentContent::new();

        for page_number in 1..=self.source.page_count() {
            if let Some(selected) = &self.options.pages {
                if !selected.contains(&page_number) {
                    continue;
                }
            }

            log::debug!("Processing page {}", page_number);
            let page = self.parse_page(page_number, &segmenter, tables, charts)?;
            document.add_page(page);
        }

        Ok(document)
    }

    /// Run the pipeline for one page.
    fn parse_page<T, C>(
        &self,
        page_number: u32,
        segmenter: &ParagraphSegmenter,
        tables: &T,
        charts: &C,
    ) -> Result<Page>
    where
        T: TableSource,
        C: ChartSource,
    {
        let chars = self.source.chars(page_number)?;
        let paragraphs = segmenter.segment(&chars);

        let grids = match tables.tables(page_number) {
            Ok(grids) => grids,
            Err(e) => {
                log::warn!("Could not extract tables from page {}: {}", page_number, e);
                Vec::new()
            }
        };

        let chart_blocks = match charts.charts(page_number) {
            Ok(blocks) => blocks,
            Err(e) => {
                log::warn!("Could not detect charts: {}", e);
                Vec::new()
            }
        };

        // Tables and charts inherit the page's most recent heading context.
        let (section, sub_section) = trailing_heading_context(&paragraphs);

        let mut page = Page::new(page_number);
        for paragraph in paragraphs {
            page.add_paragraph(paragraph);
        }

        for (index, grid) in grids.into_iter().enumerate() {
            let table_data = filter_grid(grid);
            if table_data.is_empty() {
                continue;
            }

            // Indices follow the service's list, counting skipped grids.
            let description = format!("Table {} from page {}", index + 1, page_number);
            let mut block = TableBlock::new(description, table_data);
            block.section = section.clone();
            block.sub_section = sub_section.clone();
            page.add_table(block);
        }

        for mut chart in chart_blocks {
            chart.section = section.clone();
            chart.sub_section = sub_section.clone();
            page.add_chart(chart);
        }

        Ok(page)
    }
}

/// Last heading context set on the page: scan paragraphs in reverse for the
/// first with a section, and take its sub-section along even when unset.
fn trailing_heading_context(paragraphs: &[ParagraphBlock]) -> (Option<String>, Option<String>) {
    for paragraph in paragraphs.iter().rev() {
        if paragraph.section.is_some() {
            return (paragraph.section.clone(), paragraph.sub_section.clone());
        }
    }
    (None, None)
}

/// Trim every cell and drop rows whose cells are all blank.
fn filter_grid(grid: TableGrid) -> Vec<Vec<String>> {
    grid.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.trim().to_string())
                .collect::<Vec<String>>()
        })
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect()
}
