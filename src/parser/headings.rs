//! Section and sub-section heading detection.
//!
//! Headings are recognized from the leading lines of a paragraph by an
//! ordered rule cascade. Section rules and sub-section rules are tried in
//! order on each line, first match wins; sub-section rules only apply once
//! a section has been found, which may happen on the very same line.

use regex::Regex;

/// Heading context resolved for one paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingContext {
    /// Top-level section heading, if detected
    pub section: Option<String>,
    /// Second-level heading, only ever set alongside a section
    pub sub_section: Option<String>,
}

impl HeadingContext {
    /// Context with neither level set.
    pub fn none() -> Self {
        Self::default()
    }
}

/// How many leading non-empty lines of a paragraph are inspected.
const SCAN_LINE_LIMIT: usize = 5;

/// Heading detector with precompiled rule cascades.
pub struct HeadingClassifier {
    section_rules: Vec<Regex>,
    sub_section_rules: Vec<Regex>,
}

impl HeadingClassifier {
    /// Create a classifier with the standard report-heading rules.
    pub fn new() -> Self {
        Self {
            section_rules: vec![
                // Numbered headings: "1. Executive Summary" (prefix kept in the capture)
                Regex::new(r"^(\d+\.?\s*[A-Z][A-Za-z\s]+)").unwrap(),
                // Whole-line ALL CAPS headings
                Regex::new(r"^([A-Z][A-Z\s]+)$").unwrap(),
                // Whole-line Title-case headings
                Regex::new(r"^([A-Z][a-z][A-Za-z\s]+)$").unwrap(),
            ],
            sub_section_rules: vec![
                // Two-level numbering: "1.1 Key Findings"
                Regex::new(r"^(\d+\.\d+\.?\s*[A-Za-z][A-Za-z\s]+)").unwrap(),
                // Letter markers: "a. Sampling Frame"
                Regex::new(r"^([a-z]\.\s*[A-Za-z][A-Za-z\s]+)").unwrap(),
                // Whole-line Title-case headings
                Regex::new(r"^([A-Z][a-z][A-Za-z\s]+)$").unwrap(),
            ],
        }
    }

    /// Scan a paragraph's raw (pre-clean) text for heading lines.
    ///
    /// At most the first [`SCAN_LINE_LIMIT`] non-empty trimmed lines are
    /// inspected. The whole-line anchoring of the casing rules keeps them
    /// from firing inside ordinary punctuated prose.
    pub fn classify(&self, raw_text: &str) -> HeadingContext {
        let mut ctx = HeadingContext::default();

        let lines = raw_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(SCAN_LINE_LIMIT);

        for line in lines {
            if ctx.section.is_none() {
                ctx.section = first_capture(&self.section_rules, line);
            }

            // A section found on this same line already opens the gate.
            if ctx.sub_section.is_none() && ctx.section.is_some() {
                ctx.sub_section = first_capture(&self.sub_section_rules, line);
            }

            if ctx.section.is_some() && ctx.sub_section.is_some() {
                break;
            }
        }

        ctx
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Try rules in order, returning the trimmed first capture group of the
/// first rule that matches.
fn first_capture(rules: &[Regex], line: &str) -> Option<String> {
    rules.iter().find_map(|rule| {
        rule.captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}
