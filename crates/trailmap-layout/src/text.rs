use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

mod wrap;

pub use wrap::{split_line_to_words, wrap_label, wrap_label_chars};

/// Width of one display column relative to the font size, for the heuristic measurer.
pub const HEURISTIC_CHAR_WIDTH_FACTOR: f64 = 0.6;
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Side-effect-free text measurement capability, injected by the host (a browser canvas, a
/// font rasterizer, ...).
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Fixed character-count heuristic: every display column is `font_size * char_width_factor`
/// wide. Zero factors fall back to the module defaults.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<String> {
        let t = text
            .replace("<br/>", "\n")
            .replace("<br />", "\n")
            .replace("<br>", "\n");
        t.split('\n').map(|s| s.to_string()).collect()
    }

    fn char_width_factor(&self) -> f64 {
        if self.char_width_factor == 0.0 {
            HEURISTIC_CHAR_WIDTH_FACTOR
        } else {
            self.char_width_factor
        }
    }

    /// Width (px) of a single line, without any line-break handling.
    pub fn line_width_px(&self, line: &str, font_size: f64) -> f64 {
        line.width() as f64 * font_size.max(1.0) * self.char_width_factor()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let line_height_factor = if self.line_height_factor == 0.0 {
            LINE_HEIGHT_FACTOR
        } else {
            self.line_height_factor
        };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let width = lines
            .iter()
            .map(|l| self.line_width_px(l, font_size))
            .fold(0.0, f64::max);
        let height = lines.len() as f64 * font_size * line_height_factor;
        TextMetrics {
            width,
            height,
            line_count: lines.len(),
        }
    }
}

#[cfg(test)]
mod tests;
