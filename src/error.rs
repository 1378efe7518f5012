//! Error types for the pdfsift library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during PDF content extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// Failure reading the input or writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not point at an existing file.
    #[error("PDF file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input does not carry a PDF header.
    #[error("Input is not a PDF file")]
    UnknownFormat,

    /// The document parser rejected the file structure.
    #[error("PDF structure error: {0}")]
    PdfParse(String),

    /// The document requires a password.
    #[error("Document is encrypted and cannot be read")]
    Encrypted,

    /// A page index past the end of the document.
    #[error("Page {0} does not exist (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error while extracting ruled-line tables from a page.
    #[error("Table extraction error: {0}")]
    TableExtract(String),

    /// Error while detecting chart/image regions on a page.
    #[error("Chart detection error: {0}")]
    ChartDetect(String),

    /// Error serializing the extracted document.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            other => Error::PdfParse(other.to_string()),
        }
    }
}
