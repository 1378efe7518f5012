//! Document model for extracted PDF content.

mod block;
mod document;
mod page;

pub use block::{ChartBlock, ContentBlock, Dimensions, ParagraphBlock, TableBlock};
pub use document::DocumentContent;
pub use page::Page;
