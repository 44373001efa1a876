//! Intrinsic-size providers.
//!
//! Layout never shapes text or decodes pixels itself. It asks a
//! [`ContentMeasurer`] for content sizes, and only for `auto` dimensions.
//! [`MonospaceMeasurer`] is the built-in provider: fixed-advance cells
//! scaled by font size, and image dimensions read from encoded bytes.

use std::io::Cursor;

use image::{ImageError, ImageReader};
use unicode_width::UnicodeWidthChar;

use super::node::ImageContent;
use crate::config::EngineConfig;
use crate::error::LayoutError;
use crate::primitives::Size;

/// External provider of content sizes.
///
/// Returning `None` means the size is not available this frame (font not
/// loaded, image not decoded); the node is laid out as 0 and asked again
/// next frame.
pub trait ContentMeasurer {
    /// Size of `text` at `font_size` (`None` = base size). With
    /// `wrap_width`, lines break at whitespace to fit that width.
    fn measure_text(&self, text: &str, font_size: Option<i32>, wrap_width: Option<i32>)
    -> Option<Size>;

    /// Natural size of an image.
    fn image_size(&self, image: &ImageContent) -> Option<Size>;
}

/// Display width of text in monospace cells.
pub(crate) fn unicode_display_width(text: &str) -> usize {
    text.chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
        .sum()
}

/// Fixed-advance text metrics and header-probed image sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub char_width: i32,
    pub line_height: i32,
    pub base_font_size: i32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl MonospaceMeasurer {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            char_width: config.char_width,
            line_height: config.line_height,
            base_font_size: config.base_font_size,
        }
    }

    /// Cell advance and line height at `font_size`, as floats.
    fn metrics(&self, font_size: Option<i32>) -> (f32, f32) {
        match font_size {
            Some(fs) if fs > 0 && fs != self.base_font_size => {
                let scale = fs as f32 / self.base_font_size as f32;
                (
                    self.char_width as f32 * scale,
                    self.line_height as f32 * scale,
                )
            }
            _ => (self.char_width as f32, self.line_height as f32),
        }
    }

    /// Break `text` into lines of at most `max_cells` cells, returning the
    /// cell width of each line. Words wider than the limit overflow on a
    /// line of their own.
    fn wrap_lines(text: &str, max_cells: Option<usize>) -> Vec<usize> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let Some(max) = max_cells else {
                lines.push(unicode_display_width(paragraph));
                continue;
            };

            let mut line = 0usize;
            for word in paragraph.split_whitespace() {
                let w = unicode_display_width(word);
                if line > 0 && line + 1 + w > max {
                    lines.push(line);
                    line = w;
                } else if line > 0 {
                    line += 1 + w;
                } else {
                    line = w;
                }
            }
            lines.push(line);
        }
        lines
    }

    /// Read width and height from the image header without decoding pixels.
    fn decode_dimensions(data: &[u8]) -> Result<Size, LayoutError> {
        let (width, height) = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(ImageError::IoError)?
            .into_dimensions()?;
        Ok(Size::new(width as i32, height as i32))
    }
}

impl ContentMeasurer for MonospaceMeasurer {
    fn measure_text(
        &self,
        text: &str,
        font_size: Option<i32>,
        wrap_width: Option<i32>,
    ) -> Option<Size> {
        let (cw, lh) = self.metrics(font_size);
        let max_cells = wrap_width.map(|w| (w.max(0) as f32 / cw).floor() as usize);
        let lines = Self::wrap_lines(text, max_cells);
        let widest = lines.iter().copied().max().unwrap_or(0);
        Some(Size::new(
            (widest as f32 * cw).ceil() as i32,
            (lines.len() as f32 * lh).ceil() as i32,
        ))
    }

    fn image_size(&self, image: &ImageContent) -> Option<Size> {
        let data = image.data.as_deref()?;
        match Self::decode_dimensions(data) {
            Ok(size) => Some(size),
            Err(e) => {
                tracing::debug!("Failed to read size of image {:?}: {}", image.source, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn measurer() -> MonospaceMeasurer {
        MonospaceMeasurer {
            char_width: 10,
            line_height: 20,
            base_font_size: 14,
        }
    }

    #[test]
    fn single_line_width_counts_cells() {
        let m = measurer();
        assert_eq!(m.measure_text("hello", None, None), Some(Size::new(50, 20)));
        // Wide CJK characters take two cells.
        assert_eq!(m.measure_text("日本", None, None), Some(Size::new(40, 20)));
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let m = measurer();
        // 9 cells per line: "aaaa bbbb" fits, "cc" moves down.
        let size = m.measure_text("aaaa bbbb cc", None, Some(95)).unwrap();
        assert_eq!(size, Size::new(90, 40));
    }

    #[test]
    fn long_word_overflows_its_own_line() {
        let m = measurer();
        let size = m.measure_text("a abcdefghij b", None, Some(50)).unwrap();
        assert_eq!(size, Size::new(100, 60));
    }

    #[test]
    fn font_size_scales_metrics() {
        let m = measurer();
        assert_eq!(m.measure_text("ab", Some(28), None), Some(Size::new(40, 40)));
    }

    #[test]
    fn explicit_newlines_always_break() {
        let m = measurer();
        assert_eq!(m.measure_text("ab\nabcd", None, None), Some(Size::new(40, 40)));
    }

    #[test]
    fn image_size_from_encoded_bytes() {
        let mut png = Cursor::new(Vec::new());
        image::RgbaImage::new(7, 3)
            .write_to(&mut png, image::ImageFormat::Png)
            .unwrap();
        let image = ImageContent {
            source: "swatch.png".into(),
            data: Some(Arc::from(png.into_inner())),
            ..ImageContent::default()
        };
        assert_eq!(measurer().image_size(&image), Some(Size::new(7, 3)));
    }

    #[test]
    fn image_size_reads_header_only() {
        let mut png = Cursor::new(Vec::new());
        image::RgbaImage::new(640, 480)
            .write_to(&mut png, image::ImageFormat::Png)
            .unwrap();
        let mut bytes = png.into_inner();
        // Drop the IEND trailer; the size comes from the header alone.
        bytes.truncate(bytes.len() - 12);
        let image = ImageContent {
            source: "truncated.png".into(),
            data: Some(Arc::from(bytes)),
            ..ImageContent::default()
        };
        assert_eq!(measurer().image_size(&image), Some(Size::new(640, 480)));
    }

    #[test]
    fn undecodable_image_has_no_size() {
        let image = ImageContent {
            source: "broken".into(),
            data: Some(Arc::from(vec![0u8, 1, 2, 3])),
            ..ImageContent::default()
        };
        assert_eq!(measurer().image_size(&image), None);
        assert_eq!(measurer().image_size(&ImageContent::default()), None);
    }
}
