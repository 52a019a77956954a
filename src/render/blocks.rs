//! Renderable content blocks
//!
//! A block knows its own size before it is placed. Blocks are built once by
//! the assembler and never changed afterwards; the flow engine only reads
//! them to decide page breaks and emit draw commands.

use super::helpers::colors::RgbColor;
use super::helpers::geometry::{line_height_mm, px_to_mm, scale_to_fit};
use super::helpers::styles::{CellRole, CellStyle, TextAlign, TextStyle};
use super::helpers::text_metrics::{wrap_text, BuiltinFontMeasurer};

/// One or more lines of text in a single style
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub style: TextStyle,
    /// Width the text is laid out in; `None` spans the content width
    pub width: Option<f32>,
    pub line_height: f32,
}

impl TextBlock {
    /// Build a text block, word-wrapping to `max_width` mm when given
    pub fn new(text: &str, style: TextStyle, max_width: Option<f32>) -> Self {
        let lines = match max_width {
            Some(max_width) => {
                let measurer = BuiltinFontMeasurer::new(style.weight);
                wrap_text(&measurer, text, style.font_size, max_width)
            }
            None => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        };
        Self {
            lines,
            style,
            width: max_width,
            line_height: line_height_mm(style.font_size),
        }
    }

    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }
}

/// A raster image scaled into a bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    /// Key into the run's image table
    pub key: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub width: f32,
    pub height: f32,
    pub align: TextAlign,
}

impl ImageBlock {
    pub fn new(
        key: impl Into<String>,
        pixel_width: u32,
        pixel_height: u32,
        max_width: f32,
        max_height: f32,
        allow_upscale: bool,
    ) -> Self {
        let (width, height) = scale_to_fit(
            px_to_mm(pixel_width),
            px_to_mm(pixel_height),
            max_width,
            max_height,
            allow_upscale,
        );
        Self {
            key: key.into(),
            pixel_width,
            pixel_height,
            width,
            height,
            align: TextAlign::Center,
        }
    }
}

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub width: f32,
    pub role: CellRole,
    pub style: CellStyle,
}

/// A table row, placed as one unit and emitted one command per cell
#[derive(Debug, Clone, PartialEq)]
pub struct TableRowBlock {
    pub cells: Vec<TableCell>,
    pub height: f32,
    pub is_header: bool,
}

impl TableRowBlock {
    pub fn width(&self) -> f32 {
        self.cells.iter().map(|c| c.width).sum()
    }
}

/// Horizontal rule drawn through the middle of its reserved height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleBlock {
    pub thickness: f32,
    pub color: RgbColor,
    pub height: f32,
}

/// Filled title bar with an optional second line
#[derive(Debug, Clone, PartialEq)]
pub struct SectionHeaderBlock {
    pub title: String,
    pub subtitle: Option<String>,
    pub title_style: TextStyle,
    pub subtitle_style: TextStyle,
    pub fill: RgbColor,
    pub height: f32,
}

/// Fixed-height frame standing in for missing content
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderBlock {
    pub label: String,
    pub style: TextStyle,
    pub fill: RgbColor,
    pub border: RgbColor,
    pub width: Option<f32>,
    pub height: f32,
}

/// A titled card listing short items, optionally in several columns
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub items: Vec<String>,
    /// `items` word-wrapped to the column width, filled by `wrapped()`
    pub lines: Vec<Vec<String>>,
    pub columns: usize,
    pub width: f32,
    pub title_height: f32,
    pub padding: f32,
    pub title_style: TextStyle,
    pub text_style: TextStyle,
    pub title_fill: RgbColor,
    pub body_fill: RgbColor,
    pub border: RgbColor,
}

impl Card {
    /// Width of one item column inside the padding
    pub fn column_width(&self) -> f32 {
        ((self.width - 2.0 * self.padding) / self.columns.max(1) as f32).max(0.0)
    }

    /// Width item text may use; columns after the first keep a padding gap
    pub fn text_width(&self) -> f32 {
        if self.columns > 1 {
            (self.column_width() - self.padding).max(0.0)
        } else {
            self.column_width()
        }
    }

    /// Wrap every item to `text_width()`. An over-long word keeps its own line.
    pub fn wrapped(mut self) -> Self {
        let measurer = BuiltinFontMeasurer::new(self.text_style.weight);
        let width = self.text_width();
        let font_size = self.text_style.font_size;
        self.lines = self
            .items
            .iter()
            .map(|item| {
                let lines = wrap_text(&measurer, item, font_size, width);
                if lines.is_empty() {
                    vec![String::new()]
                } else {
                    lines
                }
            })
            .collect();
        self
    }

    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.items.len().div_ceil(self.columns.max(1))
    }

    /// Text lines taken by each grid row: its most wrapped item
    pub fn row_lines(&self) -> Vec<usize> {
        self.lines
            .chunks(self.columns.max(1))
            .map(|row| row.iter().map(Vec::len).max().unwrap_or(1).max(1))
            .collect()
    }

    pub fn item_line_height(&self) -> f32 {
        line_height_mm(self.text_style.font_size) * 1.25
    }

    pub fn height(&self) -> f32 {
        let lines: usize = self.row_lines().iter().sum();
        self.title_height + 2.0 * self.padding + lines as f32 * self.item_line_height()
    }
}

/// Cards laid side by side; the group is as tall as its tallest card
#[derive(Debug, Clone, PartialEq)]
pub struct CardGroup {
    pub cards: Vec<Card>,
    pub gap: f32,
    pub height: f32,
}

impl CardGroup {
    pub fn new(cards: Vec<Card>, gap: f32) -> Self {
        let height = cards.iter().map(Card::height).fold(0.0, f32::max);
        Self { cards, gap, height }
    }

    pub fn width(&self) -> f32 {
        let cards: f32 = self.cards.iter().map(|c| c.width).sum();
        cards + self.gap * self.cards.len().saturating_sub(1) as f32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    TextLine(TextBlock),
    Image(ImageBlock),
    TableRow(TableRowBlock),
    Rule(RuleBlock),
    SectionHeader(SectionHeaderBlock),
    Placeholder(PlaceholderBlock),
    Cards(CardGroup),
    /// Vertical space that draws nothing
    Spacer(f32),
}

/// Block discriminant, used in logs and the debug dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    TextLine,
    Image,
    TableRow,
    Rule,
    SectionHeader,
    Placeholder,
    Cards,
    Spacer,
}

impl ContentBlock {
    /// Required height in mm
    pub fn height(&self) -> f32 {
        match self {
            ContentBlock::TextLine(text) => text.height(),
            ContentBlock::Image(image) => image.height,
            ContentBlock::TableRow(row) => row.height,
            ContentBlock::Rule(rule) => rule.height,
            ContentBlock::SectionHeader(header) => header.height,
            ContentBlock::Placeholder(placeholder) => placeholder.height,
            ContentBlock::Cards(group) => group.height,
            ContentBlock::Spacer(height) => *height,
        }
    }

    /// Required width in mm, `None` when the block spans the content width
    pub fn width(&self) -> Option<f32> {
        match self {
            ContentBlock::TextLine(text) => text.width,
            ContentBlock::Image(image) => Some(image.width),
            ContentBlock::TableRow(row) => Some(row.width()),
            ContentBlock::Placeholder(placeholder) => placeholder.width,
            ContentBlock::Cards(group) => Some(group.width()),
            ContentBlock::Rule(_) | ContentBlock::SectionHeader(_) | ContentBlock::Spacer(_) => {
                None
            }
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::TextLine(_) => BlockKind::TextLine,
            ContentBlock::Image(_) => BlockKind::Image,
            ContentBlock::TableRow(_) => BlockKind::TableRow,
            ContentBlock::Rule(_) => BlockKind::Rule,
            ContentBlock::SectionHeader(_) => BlockKind::SectionHeader,
            ContentBlock::Placeholder(_) => BlockKind::Placeholder,
            ContentBlock::Cards(_) => BlockKind::Cards,
            ContentBlock::Spacer(_) => BlockKind::Spacer,
        }
    }

    pub fn text(text: &str, style: TextStyle, max_width: Option<f32>) -> Self {
        ContentBlock::TextLine(TextBlock::new(text, style, max_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::helpers::colors::BLACK;
    use crate::render::helpers::styles::FontWeight;

    fn body(font_size: f32) -> TextStyle {
        TextStyle {
            font_size,
            weight: FontWeight::Regular,
            color: BLACK,
            align: TextAlign::Left,
        }
    }

    #[test]
    fn test_text_height_counts_lines() {
        let block = TextBlock::new("one two three four five six seven", body(12.0), Some(25.0));
        assert!(block.lines.len() > 1);
        let expected = block.lines.len() as f32 * 12.0 * 1.2 * 0.352_778;
        assert!((block.height() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_unwrapped_text_keeps_lines() {
        let block = TextBlock::new("a very long line that is never wrapped", body(12.0), None);
        assert_eq!(block.lines.len(), 1);
        assert!(block.width.is_none());
    }

    #[test]
    fn test_image_scaled_into_box() {
        // 960x480 px is 254x127 mm at 96 DPI
        let block = ImageBlock::new("img0", 960, 480, 170.0, 110.0, false);
        assert!((block.width - 170.0).abs() < 1e-3);
        assert!((block.height - 85.0).abs() < 1e-3);
        assert!((ContentBlock::Image(block).height() - 85.0).abs() < 1e-3);
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let block = ImageBlock::new("img0", 96, 96, 170.0, 110.0, false);
        assert!((block.width - 25.4).abs() < 1e-3);
        assert!((block.height - 25.4).abs() < 1e-3);
    }

    #[test]
    fn test_card_group_height_is_tallest() {
        let card = |items: usize, columns: usize| {
            Card {
                title: "PILOT".to_string(),
                items: (0..items).map(|i| format!("item {}", i)).collect(),
                lines: Vec::new(),
                columns,
                width: 80.0,
                title_height: 8.0,
                padding: 3.0,
                title_style: body(12.0),
                text_style: body(10.0),
                title_fill: BLACK,
                body_fill: BLACK,
                border: BLACK,
            }
            .wrapped()
        };
        assert_eq!(card(6, 2).rows(), 3);
        assert_eq!(card(5, 2).rows(), 3);
        let group = CardGroup::new(vec![card(1, 1), card(6, 2)], 10.0);
        assert!((group.height - card(6, 2).height()).abs() < 1e-6);
        assert!((group.width() - 170.0).abs() < 1e-6);
    }

    fn long_card(items: Vec<&str>, columns: usize, width: f32) -> Card {
        Card {
            title: "TRAINING DETAILS".to_string(),
            items: items.into_iter().map(String::from).collect(),
            lines: Vec::new(),
            columns,
            width,
            title_height: 8.0,
            padding: 3.0,
            title_style: body(12.0),
            text_style: body(10.0),
            title_fill: BLACK,
            body_fill: BLACK,
            border: BLACK,
        }
        .wrapped()
    }

    #[test]
    fn test_card_items_wrap_to_column() {
        let card = long_card(
            vec![
                "Name: Jean-Baptiste Alexandre Maximilien de la Tour d'Auvergne",
                "Aircraft: Alpha Jet",
            ],
            2,
            170.0,
        );
        let measurer = BuiltinFontMeasurer::new(card.text_style.weight);
        assert!(card.lines[0].len() > 1);
        assert_eq!(card.lines[1], vec!["Aircraft: Alpha Jet"]);
        for line in card.lines.iter().flatten() {
            assert!(measurer.measure_width_mm(line, 10.0) <= card.text_width() + 1e-3);
        }
        assert!(card.text_width() < card.column_width());
    }

    #[test]
    fn test_card_height_counts_wrapped_lines() {
        let short = long_card(vec!["Name: Jane Doe"], 1, 60.0);
        let long = long_card(
            vec!["Name: Jean-Baptiste Alexandre Maximilien de la Tour d'Auvergne"],
            1,
            60.0,
        );
        let extra = long.lines[0].len() - 1;
        assert!(extra > 0);
        let expected = short.height() + extra as f32 * short.item_line_height();
        assert!((long.height() - expected).abs() < 1e-4);
        assert_eq!(long.row_lines(), vec![long.lines[0].len()]);
    }

    #[test]
    fn test_card_row_takes_tallest_item() {
        let card = long_card(
            vec![
                "Mission Name: Operation Long Range Interdiction Exercise Northern Sector",
                "Map: N/A",
                "Aircraft: Alpha Jet",
            ],
            2,
            170.0,
        );
        let rows = card.row_lines();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], card.lines[0].len());
        assert_eq!(rows[1], 1);
    }
}
