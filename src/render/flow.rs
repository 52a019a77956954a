//! Page cursor and flow engine
//!
//! Blocks are placed top to bottom. A block that does not fit below the
//! current offset moves to a fresh page; a block that cannot fit even on an
//! empty page is a configuration error. Offsets only grow within a page and
//! reset only together with a page increment.

use super::blocks::{
    Card, ContentBlock, ImageBlock, PlaceholderBlock, RuleBlock, SectionHeaderBlock, TableCell,
    TextBlock,
};
use super::helpers::geometry::LAYOUT_EPSILON;
use super::helpers::styles::TextAlign;
use super::layout::PageGeometry;
use crate::error::ConfigError;

/// What a draw command paints
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPayload {
    Text(TextBlock),
    Image(ImageBlock),
    Cell(TableCell),
    Rule(RuleBlock),
    SectionHeader(SectionHeaderBlock),
    Placeholder(PlaceholderBlock),
    Card(Card),
}

/// An absolutely positioned drawing instruction.
///
/// Coordinates are in mm from the page's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub payload: DrawPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Empty,
    InProgress,
    PageFull,
}

/// A finalized page and everything drawn on it
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub index: usize,
    pub state: PageState,
    pub commands: Vec<DrawCommand>,
}

impl Page {
    fn new(index: usize) -> Self {
        Self {
            index,
            state: PageState::Empty,
            commands: Vec::new(),
        }
    }
}

/// Vertical position within the current page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    page: usize,
    offset: f32,
    budget: f32,
}

impl PageCursor {
    pub fn new(budget: f32) -> Self {
        Self {
            page: 0,
            offset: 0.0,
            budget,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Offset below the top margin
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn budget(&self) -> f32 {
        self.budget
    }

    pub fn remaining(&self) -> f32 {
        (self.budget - self.offset).max(0.0)
    }

    pub fn at_top(&self) -> bool {
        self.offset <= 0.0
    }

    /// Whether `height` fits below the current offset. Exact fits count.
    pub fn fits(&self, height: f32) -> bool {
        self.offset + height <= self.budget + LAYOUT_EPSILON
    }

    fn advance(&mut self, height: f32) {
        self.offset += height;
    }

    fn next_page(&mut self) {
        self.page += 1;
        self.offset = 0.0;
    }
}

/// Places content blocks onto pages
pub struct FlowEngine {
    geometry: PageGeometry,
    cursor: PageCursor,
    pages: Vec<Page>,
    breaks: usize,
}

impl FlowEngine {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            cursor: PageCursor::new(geometry.content_height()),
            pages: vec![Page::new(0)],
            breaks: 0,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Number of page breaks taken so far
    pub fn breaks(&self) -> usize {
        self.breaks
    }

    pub fn page_state(&self, index: usize) -> Option<PageState> {
        self.pages.get(index).map(|p| p.state)
    }

    fn current_page(&mut self) -> &mut Page {
        let index = self.cursor.page();
        let last = self.pages.len() - 1;
        &mut self.pages[index.min(last)]
    }

    fn break_page(&mut self) {
        log::debug!(
            "Closing page {} with {:.1} mm unused",
            self.cursor.page() + 1,
            self.cursor.remaining()
        );
        self.current_page().state = PageState::PageFull;
        self.cursor.next_page();
        self.pages.push(Page::new(self.cursor.page()));
        self.breaks += 1;
        log::debug!("Page break: now on page {}", self.cursor.page() + 1);
    }

    /// Force the next block onto a fresh page, unless the current one is empty
    pub fn start_new_page(&mut self) {
        if !self.cursor.at_top() {
            self.break_page();
        }
    }

    /// Break now if `height` will not fit on the rest of this page.
    ///
    /// Used to keep a heading together with the first block that follows it.
    pub fn keep_together(&mut self, height: f32) {
        if !self.cursor.at_top() && !self.cursor.fits(height) {
            self.break_page();
        }
    }

    /// Place one block, breaking first if it does not fit
    pub fn place(&mut self, block: &ContentBlock) -> Result<(), ConfigError> {
        let height = block.height();
        if height > self.cursor.budget() + LAYOUT_EPSILON {
            return Err(ConfigError::BlockTooTall {
                height,
                budget: self.cursor.budget(),
            });
        }

        if let ContentBlock::Spacer(_) = block {
            // spacers never start a page and never carry over a break
            if self.cursor.at_top() {
                return Ok(());
            }
            if !self.cursor.fits(height) {
                self.break_page();
                return Ok(());
            }
            self.cursor.advance(height);
            return Ok(());
        }

        if !self.cursor.fits(height) {
            self.break_page();
        }

        let commands = self.commands_for(block);
        let page = self.current_page();
        page.commands.extend(commands);
        page.state = PageState::InProgress;
        self.cursor.advance(height);
        Ok(())
    }

    /// Place table rows one at a time, never splitting a row.
    ///
    /// When a break happens before a row, `repeat_header` (if any) is
    /// placed at the top of the new page first.
    pub fn place_rows(
        &mut self,
        rows: &[ContentBlock],
        repeat_header: Option<&ContentBlock>,
    ) -> Result<(), ConfigError> {
        for row in rows {
            let needed = row.height();
            if !self.cursor.at_top() && !self.cursor.fits(needed) {
                self.break_page();
                if let Some(header) = repeat_header {
                    let with_header = header.height() + needed;
                    if with_header > self.cursor.budget() + LAYOUT_EPSILON {
                        return Err(ConfigError::BlockTooTall {
                            height: with_header,
                            budget: self.cursor.budget(),
                        });
                    }
                    self.place(header)?;
                }
            }
            self.place(row)?;
        }
        Ok(())
    }

    /// Absolute commands for a block at the current cursor position
    fn commands_for(&self, block: &ContentBlock) -> Vec<DrawCommand> {
        let page = self.cursor.page();
        let x = self.geometry.margin_left;
        let y = self.geometry.margin_top + self.cursor.offset();
        let height = block.height();
        let content_width = self.geometry.content_width();
        let width = block.width().unwrap_or(content_width);

        let command = |x: f32, width: f32, payload: DrawPayload| DrawCommand {
            page,
            x,
            y,
            width,
            height,
            payload,
        };

        match block {
            ContentBlock::TextLine(text) => vec![command(x, width, DrawPayload::Text(text.clone()))],
            ContentBlock::Image(image) => {
                let indent = match image.align {
                    TextAlign::Left => 0.0,
                    TextAlign::Center => (content_width - image.width) / 2.0,
                    TextAlign::Right => content_width - image.width,
                };
                vec![command(
                    x + indent.max(0.0),
                    image.width,
                    DrawPayload::Image(image.clone()),
                )]
            }
            ContentBlock::TableRow(row) => {
                let mut cell_x = x;
                row.cells
                    .iter()
                    .map(|cell| {
                        let cmd = command(cell_x, cell.width, DrawPayload::Cell(cell.clone()));
                        cell_x += cell.width;
                        cmd
                    })
                    .collect()
            }
            ContentBlock::Rule(rule) => vec![command(x, width, DrawPayload::Rule(*rule))],
            ContentBlock::SectionHeader(header) => {
                vec![command(x, width, DrawPayload::SectionHeader(header.clone()))]
            }
            ContentBlock::Placeholder(placeholder) => {
                let indent = ((content_width - width) / 2.0).max(0.0);
                vec![command(
                    x + indent,
                    width,
                    DrawPayload::Placeholder(placeholder.clone()),
                )]
            }
            ContentBlock::Cards(group) => {
                let mut card_x = x;
                group
                    .cards
                    .iter()
                    .map(|card| {
                        let cmd = command(card_x, card.width, DrawPayload::Card(card.clone()));
                        card_x += card.width + group.gap;
                        cmd
                    })
                    .collect()
            }
            ContentBlock::Spacer(_) => Vec::new(),
        }
    }

    /// Finalize and return all pages (always at least one)
    pub fn finish(mut self) -> Vec<Page> {
        // a trailing page opened by a break but never written to is dropped
        if self.pages.len() > 1 {
            if let Some(last) = self.pages.last() {
                if last.state == PageState::Empty {
                    self.pages.pop();
                }
            }
        }
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::blocks::TableRowBlock;
    use crate::render::helpers::colors::{BLACK, WHITE};
    use crate::render::helpers::styles::{CellRole, CellStyle, FontWeight, TextStyle};
    use proptest::prelude::*;

    /// Page with a 100mm budget: 10mm margins, 120mm tall, no footer
    fn geometry() -> PageGeometry {
        PageGeometry::new(100.0, 120.0, [10.0; 4], 0.0).unwrap()
    }

    fn placeholder(height: f32) -> ContentBlock {
        ContentBlock::Placeholder(PlaceholderBlock {
            label: "x".to_string(),
            style: TextStyle {
                font_size: 10.0,
                weight: FontWeight::Regular,
                color: BLACK,
                align: TextAlign::Center,
            },
            fill: WHITE,
            border: BLACK,
            width: None,
            height,
        })
    }

    fn row(label: &str, height: f32) -> ContentBlock {
        let style = CellStyle {
            fill: None,
            border: BLACK,
            border_width: 0.5,
            text: TextStyle {
                font_size: 10.0,
                weight: FontWeight::Regular,
                color: BLACK,
                align: TextAlign::Center,
            },
        };
        let cell = |text: &str| TableCell {
            text: text.to_string(),
            width: 20.0,
            role: CellRole::Body,
            style,
        };
        ContentBlock::TableRow(TableRowBlock {
            cells: vec![cell(label), cell(label)],
            height,
            is_header: false,
        })
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        let mut engine = FlowEngine::new(geometry());
        engine.place(&placeholder(60.0)).unwrap();
        engine.place(&placeholder(40.0)).unwrap();
        assert_eq!(engine.breaks(), 0);
        assert_eq!(engine.cursor().page(), 0);

        engine.place(&placeholder(0.5)).unwrap();
        assert_eq!(engine.breaks(), 1);
        assert_eq!(engine.cursor().page(), 1);
    }

    #[test]
    fn test_exact_fit_with_float_accumulation() {
        let mut engine = FlowEngine::new(geometry());
        for _ in 0..10 {
            engine.place(&placeholder(10.0 + 1e-6)).unwrap();
        }
        assert_eq!(engine.breaks(), 0);
    }

    #[test]
    fn test_overflow_moves_block_to_next_page() {
        let mut engine = FlowEngine::new(geometry());
        engine.place(&placeholder(70.0)).unwrap();
        engine.place(&placeholder(40.0)).unwrap();
        let pages = engine.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].state, PageState::PageFull);
        assert_eq!(pages[1].commands[0].page, 1);
        assert!((pages[1].commands[0].y - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_block_too_tall() {
        let mut engine = FlowEngine::new(geometry());
        let err = engine.place(&placeholder(100.5)).unwrap_err();
        assert!(matches!(err, ConfigError::BlockTooTall { .. }));
        assert_eq!(engine.breaks(), 0);
    }

    #[test]
    fn test_start_new_page_skips_empty_page() {
        let mut engine = FlowEngine::new(geometry());
        engine.start_new_page();
        assert_eq!(engine.breaks(), 0);
        engine.place(&placeholder(10.0)).unwrap();
        engine.start_new_page();
        engine.start_new_page();
        assert_eq!(engine.breaks(), 1);
        assert_eq!(engine.page_state(1), Some(PageState::Empty));
        assert_eq!(engine.finish().len(), 1);
    }

    #[test]
    fn test_spacer_dropped_at_page_top() {
        let mut engine = FlowEngine::new(geometry());
        engine.place(&ContentBlock::Spacer(5.0)).unwrap();
        assert_eq!(engine.cursor().offset(), 0.0);
        engine.place(&placeholder(10.0)).unwrap();
        engine.place(&ContentBlock::Spacer(5.0)).unwrap();
        assert!((engine.cursor().offset() - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_row_cells_at_cumulative_x() {
        let mut engine = FlowEngine::new(geometry());
        engine.place(&row("a", 8.0)).unwrap();
        let pages = engine.finish();
        let xs: Vec<f32> = pages[0].commands.iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![10.0, 30.0]);
    }

    #[test]
    fn test_rows_split_between_rows_only() {
        // Leading break plus two inside the table: 50 rows, 20 per page
        let mut engine = FlowEngine::new(geometry());
        engine.place(&placeholder(30.0)).unwrap();
        engine.start_new_page();
        let rows: Vec<ContentBlock> = (0..50).map(|i| row(&i.to_string(), 5.0)).collect();
        engine.place_rows(&rows, None).unwrap();

        assert_eq!(engine.breaks(), 3);
        let pages = engine.finish();
        assert_eq!(pages.len(), 4);
        let rows_per_page: Vec<usize> = pages[1..].iter().map(|p| p.commands.len() / 2).collect();
        assert_eq!(rows_per_page, vec![20, 20, 10]);
        for page in &pages[1..] {
            for pair in page.commands.chunks(2) {
                assert_eq!(pair[0].y, pair[1].y);
            }
        }
    }

    #[test]
    fn test_header_repeated_on_continuation_pages() {
        let mut engine = FlowEngine::new(geometry());
        let header = row("H", 10.0);
        engine.place(&header).unwrap();
        let rows: Vec<ContentBlock> = (0..25).map(|i| row(&i.to_string(), 10.0)).collect();
        engine.place_rows(&rows, Some(&header)).unwrap();

        let pages = engine.finish();
        assert_eq!(pages.len(), 3);
        for page in &pages {
            match &page.commands[0].payload {
                DrawPayload::Cell(cell) => assert_eq!(cell.text, "H"),
                other => panic!("expected header cell, got {:?}", other),
            }
        }
        let body_rows: usize = pages.iter().map(|p| p.commands.len() / 2 - 1).sum();
        assert_eq!(body_rows, 25);
    }

    #[test]
    fn test_remaining_tracks_offset() {
        let mut engine = FlowEngine::new(geometry());
        assert!((engine.cursor().remaining() - 100.0).abs() < 1e-4);
        engine.place(&placeholder(70.0)).unwrap();
        assert!((engine.cursor().remaining() - 30.0).abs() < 1e-4);
        engine.place(&placeholder(40.0)).unwrap();
        assert!((engine.cursor().remaining() - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_keep_together_breaks_early() {
        let mut engine = FlowEngine::new(geometry());
        engine.place(&placeholder(80.0)).unwrap();
        engine.keep_together(25.0);
        assert_eq!(engine.cursor().page(), 1);
        engine.keep_together(25.0);
        assert_eq!(engine.breaks(), 1);
    }

    proptest! {
        #[test]
        fn pagination_is_monotonic(heights in prop::collection::vec(0.5f32..100.0, 1..80)) {
            let mut engine = FlowEngine::new(geometry());
            for &h in &heights {
                engine.place(&placeholder(h)).unwrap();
            }
            let pages = engine.finish();
            let budget = geometry().content_height();

            let mut placed = Vec::new();
            for page in &pages {
                let mut expected_y = geometry().margin_top;
                for cmd in &page.commands {
                    prop_assert_eq!(cmd.page, page.index);
                    prop_assert!((cmd.y - expected_y).abs() < 1e-3);
                    prop_assert!(cmd.y + cmd.height <= geometry().margin_top + budget + 1e-3);
                    expected_y += cmd.height;
                    placed.push(cmd.height);
                }
            }
            prop_assert_eq!(placed.len(), heights.len());
            for (a, b) in placed.iter().zip(heights.iter()) {
                prop_assert!((a - b).abs() < 1e-6);
            }
            for pair in pages.windows(2) {
                prop_assert_eq!(pair[1].index, pair[0].index + 1);
            }
        }
    }
}
