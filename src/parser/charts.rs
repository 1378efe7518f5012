//! Image-based chart detection.
//!
//! Large placed images are treated as charts or figures. A short caption is
//! pulled from the text sitting near the image's bottom edge and folded
//! into the block description.

use crate::error::Result;
use crate::model::{ChartBlock, Dimensions};

use super::backend::PageSource;
use super::content::Char;

/// Chart detection service consumed by the page pipeline.
pub trait ChartSource {
    /// Detect chart blocks on a page, in placement order.
    fn charts(&self, page_number: u32) -> Result<Vec<ChartBlock>>;
}

/// Chart detection configuration.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Placed width an image must exceed to count as a chart
    pub min_width: f32,
    /// Placed height an image must exceed to count as a chart
    pub min_height: f32,
    /// Vertical distance from the image's bottom edge searched for captions
    pub caption_range: f32,
    /// Caption characters kept in the description
    pub caption_preview_len: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            min_width: 100.0,
            min_height: 100.0,
            caption_range: 50.0,
            caption_preview_len: 100,
        }
    }
}

/// Chart detector over a [`PageSource`].
pub struct ImageChartDetector<'a, S: PageSource> {
    source: &'a S,
    config: ChartConfig,
}

impl<'a, S: PageSource> ImageChartDetector<'a, S> {
    /// Create a detector with default configuration.
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, ChartConfig::default())
    }

    /// Create a detector with custom configuration.
    pub fn with_config(source: &'a S, config: ChartConfig) -> Self {
        Self { source, config }
    }
}

impl<S: PageSource> ChartSource for ImageChartDetector<'_, S> {
    fn charts(&self, page_number: u32) -> Result<Vec<ChartBlock>> {
        let images = self.source.images(page_number)?;
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let chars = self.source.chars(page_number)?;

        // Indices follow the page's image list, so skipped icons still
        // consume their position.
        let mut charts = Vec::new();
        for (index, image) in images.iter().enumerate() {
            if image.width() <= self.config.min_width || image.height() <= self.config.min_height {
                continue;
            }

            let caption = nearby_caption(&chars, image.y0, self.config.caption_range);
            let description = describe(index + 1, &caption, self.config.caption_preview_len);
            let dimensions = Dimensions::new(image.width(), image.height());
            charts.push(ChartBlock::new(description, dimensions));
        }

        log::debug!(
            "ImageChartDetector: page {} has {} chart-sized image(s)",
            page_number,
            charts.len()
        );
        Ok(charts)
    }
}

/// Caption text: every character within `range` of the image's bottom edge,
/// concatenated in character order. No horizontal filtering.
fn nearby_caption(chars: &[Char], image_bottom: f32, range: f32) -> String {
    chars
        .iter()
        .filter(|c| (c.y0 - image_bottom).abs() < range)
        .map(|c| c.text.as_str())
        .collect()
}

/// Block description, with the caption previewed when one was found.
fn describe(index: usize, caption: &str, preview_len: usize) -> String {
    if caption.is_empty() {
        format!("Chart/Image {}", index)
    } else {
        let preview: String = caption.chars().take(preview_len).collect();
        format!("Chart/Image {} - {}...", index, preview)
    }
}
