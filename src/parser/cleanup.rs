//! Paragraph text cleanup.
//!
//! Strips page-number artifacts and normalizes whitespace so paragraph text
//! comes out as a single trimmed line. `clean` is idempotent: running it on
//! its own output changes nothing.

use regex::Regex;

/// Text cleaner with precompiled patterns.
pub struct TextCleaner {
    whitespace: Regex,
    page_number: Regex,
    page_footer: Regex,
}

impl TextCleaner {
    /// Create a new cleaner.
    pub fn new() -> Self {
        Self {
            whitespace: Regex::new(r"\s+").unwrap(),
            page_number: Regex::new(r"^\d+$").unwrap(),
            // Whitespace-run tolerant so a collapsed footer still matches
            page_footer: Regex::new(r"(?i)^page\s+\d+\s+of\s+\d+$").unwrap(),
        }
    }

    /// Clean a paragraph's raw text.
    ///
    /// Drops lines that are standalone page numbers or "Page N of M"
    /// footers, joins the rest with single spaces, collapses whitespace
    /// runs, and trims the ends.
    pub fn clean(&self, text: &str) -> String {
        let kept: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| {
                !line.is_empty()
                    && !self.page_number.is_match(line)
                    && !self.page_footer.is_match(line)
            })
            .collect();

        let joined = kept.join(" ");
        self.whitespace.replace_all(&joined, " ").trim().to_string()
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}
