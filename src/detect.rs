//! PDF format detection and validation.
//!
//! Extraction never starts on a file that does not look like a PDF. The
//! header check is cheap and catches misnamed inputs with a clear error
//! before the document parser sees them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Header information read from the `%PDF-` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version as written in the header (e.g. "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";

/// How much of the file the path-based check reads.
const HEADER_LEN: usize = 16;

/// Detect PDF format from a file path.
///
/// Reads the first bytes of the file and validates the `%PDF-x.y` header.
///
/// # Example
/// ```no_run
/// use pdfsift::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report.pdf").unwrap();
/// println!("PDF version: {}", format.version);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    // Files shorter than the header are not an I/O error, just not PDFs.
    let mut header = Vec::with_capacity(HEADER_LEN);
    File::open(path)?
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect PDF format from bytes.
///
/// `data` must hold at least the first 8 bytes of the file. Returns
/// [`Error::UnknownFormat`] when the magic bytes or the version digits are
/// missing.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;

    // The header version is one digit, a dot, one digit ("1.7", "2.0").
    match rest {
        [major, b'.', minor, ..] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(PdfFormat {
                version: format!("{}.{}", *major as char, *minor as char),
            })
        }
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if a file is a valid PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes represent a valid PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_version_1_7() {
        let format = detect_format_from_bytes(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap();
        assert_eq!(format.version, "1.7");
        assert_eq!(format.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_detect_version_2_0() {
        let format = detect_format_from_bytes(b"%PDF-2.0\n% report").unwrap();
        assert_eq!(format.version, "2.0");
    }

    #[test]
    fn test_rejects_other_formats() {
        assert!(matches!(
            detect_format_from_bytes(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(b"PK\x03\x04 zip archive"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_rejects_truncated_header() {
        assert!(matches!(
            detect_format_from_bytes(b"%PDF"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(b""),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_rejects_malformed_version() {
        // Two-digit major versions and non-digit versions do not exist.
        assert!(detect_format_from_bytes(b"%PDF-10.0 junk").is_err());
        assert!(detect_format_from_bytes(b"%PDF-x.y junk").is_err());
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
    }

    #[test]
    fn test_short_file_is_not_a_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stub.pdf");
        std::fs::write(&path, b"hi").unwrap();

        assert!(matches!(
            detect_format_from_path(&path),
            Err(Error::UnknownFormat)
        ));

        std::fs::write(&path, b"").unwrap();
        assert!(matches!(
            detect_format_from_path(&path),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_is_pdf_path() {
        let dir = tempfile::tempdir().unwrap();

        let pdf_path = dir.path().join("report.pdf");
        std::fs::write(&pdf_path, b"%PDF-1.6\n% binary marker bytes").unwrap();
        assert!(is_pdf(&pdf_path));

        let text_path = dir.path().join("notes.txt");
        std::fs::write(&text_path, b"plain text file, long enough to read").unwrap();
        assert!(!is_pdf(&text_path));

        assert!(!is_pdf(dir.path().join("missing.pdf")));
    }
}
