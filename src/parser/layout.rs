//! Paragraph segmentation from positioned characters.
//!
//! Characters are bucketed into visual lines by their baseline position
//! (rounded to tenths of a point), lines are walked top to bottom, and a
//! paragraph break is emitted whenever the vertical gap between adjacent
//! lines exceeds the configured threshold. Each paragraph is then cleaned,
//! length-filtered, and classified for heading context.

use std::collections::BTreeMap;

use crate::model::ParagraphBlock;

use super::cleanup::TextCleaner;
use super::content::Char;
use super::headings::HeadingClassifier;

/// Paragraph segmentation configuration.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Vertical gap in points that starts a new paragraph
    pub paragraph_gap: f32,
    /// Paragraphs whose cleaned text is this many characters or fewer are dropped
    pub min_text_length: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            paragraph_gap: 20.0,
            min_text_length: 10,
        }
    }
}

/// Groups a page's characters into paragraph blocks.
pub struct ParagraphSegmenter {
    config: SegmenterConfig,
    cleaner: TextCleaner,
    classifier: HeadingClassifier,
}

impl ParagraphSegmenter {
    /// Create a segmenter with default configuration.
    pub fn new() -> Self {
        Self::with_config(SegmenterConfig::default())
    }

    /// Create a segmenter with custom configuration.
    pub fn with_config(config: SegmenterConfig) -> Self {
        Self {
            config,
            cleaner: TextCleaner::new(),
            classifier: HeadingClassifier::new(),
        }
    }

    /// Segment one page's characters into paragraph blocks.
    ///
    /// Characters may arrive in any order; lines are reassembled from their
    /// baselines, with characters on a shared baseline kept in emission
    /// order.
    pub fn segment(&self, chars: &[Char]) -> Vec<ParagraphBlock> {
        let lines = group_into_lines(chars);
        log::debug!(
            "ParagraphSegmenter: {} chars grouped into {} lines",
            chars.len(),
            lines.len()
        );

        // Baselines are keyed in tenths, so the gap threshold is too.
        let gap_tenths = (self.config.paragraph_gap * 10.0).round() as i32;

        let mut paragraphs = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut prev_key: Option<i32> = None;

        for (key, text) in lines {
            if let Some(prev) = prev_key {
                if (prev - key).abs() > gap_tenths {
                    self.flush(&mut current, &mut paragraphs);
                }
            }
            current.push(text);
            prev_key = Some(key);
        }
        self.flush(&mut current, &mut paragraphs);

        paragraphs
    }

    /// Finish the paragraph accumulated in `lines`, keeping it only if its
    /// cleaned text is long enough to be real content.
    fn flush(&self, lines: &mut Vec<String>, out: &mut Vec<ParagraphBlock>) {
        if lines.is_empty() {
            return;
        }

        let raw = lines.join("\n");
        lines.clear();

        let cleaned = self.cleaner.clean(&raw);
        if cleaned.chars().count() <= self.config.min_text_length {
            return;
        }

        // Heading rules look at line starts, so classify the raw text.
        let context = self.classifier.classify(&raw);
        out.push(ParagraphBlock::new(
            cleaned,
            context.section,
            context.sub_section,
        ));
    }
}

impl Default for ParagraphSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket characters into visual lines keyed by baseline tenths, returned
/// top of page first (descending y). Line text is trimmed; lines left empty
/// are dropped so they cannot bridge a paragraph gap.
fn group_into_lines(chars: &[Char]) -> Vec<(i32, String)> {
    let mut buckets: BTreeMap<i32, String> = BTreeMap::new();

    for c in chars {
        let key = (c.y0 * 10.0).round() as i32;
        buckets.entry(key).or_default().push_str(&c.text);
    }

    buckets
        .into_iter()
        .rev()
        .filter_map(|(key, text)| {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some((key, trimmed.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_char(text: &str, x: f32, y: f32) -> Char {
        let width = text.len() as f32 * 5.0;
        Char::new(text, x, y, x + width, y + 10.0)
    }

    #[test]
    fn test_close_lines_form_one_paragraph() {
        let segmenter = ParagraphSegmenter::new();
        let chars = vec![
            line_char("Revenue grew across", 72.0, 700.0),
            line_char("every region this year.", 72.0, 688.0),
        ];

        let paragraphs = segmenter.segment(&chars);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(
            paragraphs[0].text,
            "Revenue grew across every region this year."
        );
    }

    #[test]
    fn test_large_gap_splits_paragraphs() {
        let segmenter = ParagraphSegmenter::new();
        let chars = vec![
            line_char("The first paragraph sits high on the page.", 72.0, 700.0),
            line_char("The second paragraph sits much lower down.", 72.0, 640.0),
        ];

        let paragraphs = segmenter.segment(&chars);
        assert_eq!(paragraphs.len(), 2);
        assert!(paragraphs[0].text.starts_with("The first"));
        assert!(paragraphs[1].text.starts_with("The second"));
    }

    #[test]
    fn test_gap_equal_to_threshold_merges() {
        let segmenter = ParagraphSegmenter::new();
        let chars = vec![
            line_char("Exactly twenty points separate", 72.0, 700.0),
            line_char("these two baselines here.", 72.0, 680.0),
        ];

        let paragraphs = segmenter.segment(&chars);
        assert_eq!(paragraphs.len(), 1);
    }

    #[test]
    fn test_nearby_baselines_round_to_one_line() {
        let segmenter = ParagraphSegmenter::new();
        let chars = vec![
            line_char("Half a line of text ", 72.0, 700.02),
            line_char("and then the rest of it.", 180.0, 699.98),
        ];

        let paragraphs = segmenter.segment(&chars);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(
            paragraphs[0].text,
            "Half a line of text and then the rest of it."
        );
    }

    #[test]
    fn test_lines_ordered_top_to_bottom() {
        // Characters arrive out of page order.
        let segmenter = ParagraphSegmenter::new();
        let chars = vec![
            line_char("second line of the paragraph.", 72.0, 690.0),
            line_char("The opening line comes first,", 72.0, 700.0),
        ];

        let paragraphs = segmenter.segment(&chars);
        assert_eq!(paragraphs.len(), 1);
        assert!(paragraphs[0].text.starts_with("The opening line"));
        assert!(paragraphs[0].text.ends_with("paragraph."));
    }

    #[test]
    fn test_short_paragraph_dropped() {
        let segmenter = ParagraphSegmenter::new();
        // Exactly ten characters after cleaning.
        let chars = vec![line_char("ante porta", 72.0, 700.0)];
        assert!(segmenter.segment(&chars).is_empty());

        // Eleven characters survive.
        let chars = vec![line_char("antey porta", 72.0, 700.0)];
        assert_eq!(segmenter.segment(&chars).len(), 1);
    }

    #[test]
    fn test_heading_context_attached() {
        let segmenter = ParagraphSegmenter::new();
        let chars = vec![
            line_char("1. Overview", 72.0, 700.0),
            line_char("Revenue grew strongly over the year.", 72.0, 688.0),
        ];

        let paragraphs = segmenter.segment(&chars);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].section.as_deref(), Some("1. Overview"));
        assert_eq!(
            paragraphs[0].text,
            "1. Overview Revenue grew strongly over the year."
        );
    }

    #[test]
    fn test_artifact_only_paragraph_dropped() {
        let segmenter = ParagraphSegmenter::new();
        let chars = vec![line_char("Page 3 of 10", 72.0, 40.0)];
        assert!(segmenter.segment(&chars).is_empty());
    }

    #[test]
    fn test_whitespace_line_does_not_bridge_gap() {
        // A stray space halfway down the gap must not stitch the
        // surrounding paragraphs together.
        let segmenter = ParagraphSegmenter::new();
        let chars = vec![
            line_char("The upper paragraph ends here.", 72.0, 700.0),
            line_char("   ", 72.0, 682.0),
            line_char("The lower paragraph starts here.", 72.0, 664.0),
        ];

        let paragraphs = segmenter.segment(&chars);
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn test_no_chars() {
        let segmenter = ParagraphSegmenter::new();
        assert!(segmenter.segment(&[]).is_empty());
    }

    #[test]
    fn test_custom_gap_config() {
        let segmenter = ParagraphSegmenter::with_config(SegmenterConfig {
            paragraph_gap: 5.0,
            min_text_length: 10,
        });
        let chars = vec![
            line_char("A tighter gap threshold splits", 72.0, 700.0),
            line_char("lines twelve points apart now.", 72.0, 688.0),
        ];

        let paragraphs = segmenter.segment(&chars);
        assert_eq!(paragraphs.len(), 2);
    }
}
