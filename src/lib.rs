//! # pdfsift
//!
//! Structured content extraction from report PDFs.
//!
//! This library parses a PDF and returns its content as structured data:
//! paragraphs with their section and sub-section headings, ruled-line
//! tables as cell grids, and chart-sized images with nearby caption text.
//! The result serializes to a stable JSON schema.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsift::{parse_file, render};
//!
//! fn main() -> pdfsift::Result<()> {
//!     // Extract the document structure
//!     let document = parse_file("report.pdf")?;
//!
//!     // Serialize to JSON
//!     let json = render::to_json(&document, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Paragraph segmentation**: Lines grouped by vertical gaps, with
//!   header/footer artifacts filtered out
//! - **Heading detection**: Numbered, all-caps, and title-case section
//!   headings with sub-section tracking
//! - **Table extraction**: Ruled-line lattice detection with cell text
//!   placement
//! - **Chart detection**: Large placed images with caption previews

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-exports for the common entry points
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, is_pdf, is_pdf_bytes, PdfFormat,
};
pub use error::{Error, Result};
pub use model::{
    ChartBlock, ContentBlock, Dimensions, DocumentContent, Page, ParagraphBlock, TableBlock,
};
pub use parser::{ParseOptions, PdfParser};
pub use render::{to_json, write_json_file, JsonFormat};

use std::path::Path;

/// Parse a PDF file and return its structured content.
///
/// Convenience wrapper over [`PdfParser::open`] with default options.
///
/// # Example
///
/// ```no_run
/// use pdfsift::parse_file;
///
/// let document = parse_file("report.pdf").unwrap();
/// println!("Pages: {}", document.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DocumentContent> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF file, overriding the default options.
///
/// # Example
///
/// ```no_run
/// use pdfsift::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_pages(vec![1, 2]);
/// let document = parse_file_with_options("report.pdf", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<DocumentContent> {
    let parser = PdfParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse PDF data already loaded into memory.
///
/// # Example
///
/// ```no_run
/// use pdfsift::parse_bytes;
///
/// let data = std::fs::read("report.pdf").unwrap();
/// let document = parse_bytes(&data).unwrap();
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<DocumentContent> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Parse in-memory PDF data, overriding the default options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<DocumentContent> {
    let parser = PdfParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Builder for extracting structured content from PDF documents.
///
/// # Example
///
/// ```no_run
/// use pdfsift::Pdfsift;
///
/// let document = Pdfsift::new()
///     .with_pages(vec![1, 2, 3])
///     .parse_file("report.pdf")?;
/// # Ok::<(), pdfsift::Error>(())
/// ```
pub struct Pdfsift {
    options: ParseOptions,
}

impl Pdfsift {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    /// Replace the full option set.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Restrict extraction to the given page numbers (1-indexed).
    pub fn with_pages(mut self, pages: Vec<u32>) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Parse a PDF file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<DocumentContent> {
        let parser = PdfParser::open_with_options(path, self.options)?;
        parser.parse()
    }

    /// Parse a PDF from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<DocumentContent> {
        let parser = PdfParser::from_bytes_with_options(data, self.options)?;
        parser.parse()
    }
}

impl Default for Pdfsift {
    fn default() -> Self {
        Self::new()
    }
}
