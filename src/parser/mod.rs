//! PDF parsing module.

mod backend;
mod charts;
mod cleanup;
mod content;
mod headings;
mod layout;
mod options;
mod pdf_parser;
mod tables;

pub use backend::{LopdfSource, PageSource};
pub use charts::{ChartConfig, ChartSource, ImageChartDetector};
pub use cleanup::TextCleaner;
pub use content::{Char, PlacedImage, Ruling, RulingKind};
pub use headings::{HeadingClassifier, HeadingContext};
pub use layout::{ParagraphSegmenter, SegmenterConfig};
pub use options::ParseOptions;
pub use pdf_parser::PdfParser;
pub use tables::{LatticeConfig, RuledTableFinder, TableGrid, TableSource};
