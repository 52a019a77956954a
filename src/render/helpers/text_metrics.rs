//! Text measurement for the PDF builtin Helvetica faces
//!
//! Widths come from Adobe's AFM files so that wrapping and centring can be
//! computed before anything is drawn.

use printpdf::BuiltinFont;

use super::geometry::MM_PER_PT;
use super::styles::FontWeight;

/// Width used for characters outside the ASCII tables
const FALLBACK_WIDTH: u16 = 500;

/// Trait for text measurement operations
pub trait TextMeasure {
    /// Measure text width in mm at a given font size
    fn measure_text(&self, text: &str, font_size: f32) -> f32;

    /// Get cap height in mm for a given font size
    fn cap_height_mm(&self, font_size: f32) -> f32;
}

/// Text measurer for the builtin Helvetica family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFontMeasurer {
    weight: FontWeight,
}

impl BuiltinFontMeasurer {
    pub const fn new(weight: FontWeight) -> Self {
        Self { weight }
    }

    pub fn font(&self) -> BuiltinFont {
        self.weight.builtin_font()
    }

    /// Get character width in 1000 units per em
    fn char_width(&self, c: char) -> u16 {
        // builtin fonts are Win-1252; only the ASCII range is tabulated
        if !c.is_ascii() {
            return FALLBACK_WIDTH;
        }
        let table = match self.weight {
            FontWeight::Regular => &HELVETICA_WIDTHS,
            FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        table.get(c as usize).copied().unwrap_or(FALLBACK_WIDTH)
    }

    /// Measure text width in points
    pub fn measure_width_pt(&self, text: &str, font_size: f32) -> f32 {
        let total_width: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        (total_width as f32 / 1000.0) * font_size
    }

    /// Measure text width in mm
    pub fn measure_width_mm(&self, text: &str, font_size: f32) -> f32 {
        self.measure_width_pt(text, font_size) * MM_PER_PT
    }

    /// Cap height in mm (718/1000 em for both weights)
    pub fn cap_height_mm(&self, font_size: f32) -> f32 {
        0.718 * font_size * MM_PER_PT
    }
}

impl TextMeasure for BuiltinFontMeasurer {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        self.measure_width_mm(text, font_size)
    }

    fn cap_height_mm(&self, font_size: f32) -> f32 {
        BuiltinFontMeasurer::cap_height_mm(self, font_size)
    }
}

/// Greedy word wrap.
///
/// Breaks at the last whitespace that keeps each line within `max_width`
/// mm. A word wider than the limit sits alone on its own line and is never
/// truncated. Explicit newlines start a new line; runs of whitespace
/// collapse to a single space.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measurer: &M,
    text: &str,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if measurer.measure_text(&candidate, font_size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

// =============================================================================
// Adobe AFM Character Width Tables (ASCII subset, in 1000 units per em)
// =============================================================================

/// Helvetica character widths
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
];

/// Helvetica-Bold character widths
#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
];

#[cfg(test)]
mod tests {
    use super::*;

    const REGULAR: BuiltinFontMeasurer = BuiltinFontMeasurer::new(FontWeight::Regular);
    const BOLD: BuiltinFontMeasurer = BuiltinFontMeasurer::new(FontWeight::Bold);

    #[test]
    fn test_builtin_text_measurement() {
        let width = REGULAR.measure_width_mm("Hello", 11.0);
        assert!(width > 0.0);

        let longer_width = REGULAR.measure_width_mm("Hello World", 11.0);
        assert!(longer_width > width);

        let bigger_width = REGULAR.measure_width_mm("Hello", 22.0);
        assert!((bigger_width - width * 2.0).abs() < 0.1);
    }

    #[test]
    fn test_known_width() {
        // "A" is 667 units in Helvetica: 0.667 * 10pt = 6.67pt
        assert!((REGULAR.measure_width_pt("A", 10.0) - 6.67).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider() {
        assert!(BOLD.measure_width_mm("Round 1", 12.0) > REGULAR.measure_width_mm("Round 1", 12.0));
    }

    #[test]
    fn test_non_ascii_fallback() {
        assert!((REGULAR.measure_width_pt("é", 10.0) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_fits_width() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let lines = wrap_text(&REGULAR, text, 12.0, 40.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(REGULAR.measure_width_mm(line, 12.0) <= 40.0);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_long_word_alone() {
        let lines = wrap_text(&REGULAR, "a Supercalifragilisticexpialidocious b", 12.0, 20.0);
        assert_eq!(lines, vec!["a", "Supercalifragilisticexpialidocious", "b"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_text(&REGULAR, "   ", 12.0, 20.0).is_empty());
    }

    #[test]
    fn test_wrap_keeps_newlines() {
        let lines = wrap_text(&REGULAR, "first\nsecond", 12.0, 200.0);
        assert_eq!(lines, vec!["first", "second"]);
    }
}
