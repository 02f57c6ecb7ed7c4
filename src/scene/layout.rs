//! Responsive layout planning
//!
//! Picks font sizes and line heights from the container width and greedily
//! word-wraps the description into lines that fit. Pure: the same width and
//! text always produce the same layout.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Width-based size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Mobile,
    Tablet,
    Desktop,
}

impl SizeClass {
    pub fn for_width(width: f32) -> Self {
        if width < MOBILE_MAX_WIDTH {
            SizeClass::Mobile
        } else if width < TABLET_MAX_WIDTH {
            SizeClass::Tablet
        } else {
            SizeClass::Desktop
        }
    }

    /// (title font, description font, title line height, description line height)
    fn metrics(&self) -> (f32, f32, f32, f32) {
        match self {
            SizeClass::Mobile => (36.0, 14.0, 44.0, 22.0),
            SizeClass::Tablet => (52.0, 16.0, 62.0, 26.0),
            SizeClass::Desktop => (72.0, 18.0, 84.0, 28.0),
        }
    }
}

/// Font sizes, line heights and wrapped description for one container width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub size_class: SizeClass,
    pub title_font_size: f32,
    pub desc_font_size: f32,
    pub title_line_height: f32,
    pub desc_line_height: f32,
    /// Line capacity in characters used for wrapping
    pub max_chars: usize,
    /// Wrapped description lines, top to bottom
    pub lines: Vec<String>,
}

impl Layout {
    /// Plan the layout of `description` for a container `width` pixels wide
    pub fn plan(width: f32, description: &str) -> Self {
        let size_class = SizeClass::for_width(width);
        let (title_font_size, desc_font_size, title_line_height, desc_line_height) =
            size_class.metrics();

        let max_chars = max_line_chars(width, desc_font_size);
        let lines = wrap_words(description, max_chars);

        Self {
            size_class,
            title_font_size,
            desc_font_size,
            title_line_height,
            desc_line_height,
            max_chars,
            lines,
        }
    }
}

/// Approximate glyph advance for a font size
#[inline]
pub fn char_width(font_size: f32) -> f32 {
    font_size * CHAR_WIDTH_FACTOR
}

/// `floor(width / char_width) - 2`, never below zero
pub fn max_line_chars(width: f32, font_size: f32) -> usize {
    let fit = (width.max(0.0) / char_width(font_size)).floor() as i64;
    (fit - LINE_SLACK_CHARS).max(0) as usize
}

/// Greedy word wrap that never splits a word.
///
/// A word longer than `max_chars` ends up alone on its own line.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
