use serde::Deserialize;

use crate::cli::{Args, Orientation};
use crate::error::ConfigError;
use crate::render::components::TableLayout;
use crate::render::helpers::colors::{ColorPalette, RgbColor};
use crate::render::layout::PageGeometry;

use super::defaults::*;
use super::style::Style;

/// Font sizes in points, one per typographic level
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: f32,
    pub subtitle: f32,
    pub heading: f32,
    pub subheading: f32,
    pub body: f32,
    pub small: f32,
    pub tiny: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE_FONT_SIZE,
            subtitle: DEFAULT_SUBTITLE_FONT_SIZE,
            heading: DEFAULT_HEADING_FONT_SIZE,
            subheading: DEFAULT_SUBHEADING_FONT_SIZE,
            body: DEFAULT_BODY_FONT_SIZE,
            small: DEFAULT_SMALL_FONT_SIZE,
            tiny: DEFAULT_TINY_FONT_SIZE,
        }
    }
}

/// Palette as hex strings, resolved into a `ColorPalette` on validation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub navy: String,
    pub blue: String,
    pub gold: String,
    pub white: String,
    pub light_gray: String,
    pub dark_gray: String,
    pub black: String,
    pub hit: String,
    pub miss: String,
    pub placeholder_fill: String,
    pub placeholder_border: String,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            navy: NAVY.to_string(),
            blue: BLUE.to_string(),
            gold: GOLD.to_string(),
            white: WHITE.to_string(),
            light_gray: LIGHT_GRAY.to_string(),
            dark_gray: DARK_GRAY.to_string(),
            black: BLACK.to_string(),
            hit: HIT_COLOR.to_string(),
            miss: MISS_COLOR.to_string(),
            placeholder_fill: PLACEHOLDER_FILL.to_string(),
            placeholder_border: PLACEHOLDER_BORDER.to_string(),
        }
    }
}

impl PaletteSettings {
    pub fn resolve(&self) -> Result<ColorPalette, ConfigError> {
        Ok(ColorPalette {
            navy: RgbColor::from_hex(&self.navy)?,
            blue: RgbColor::from_hex(&self.blue)?,
            gold: RgbColor::from_hex(&self.gold)?,
            white: RgbColor::from_hex(&self.white)?,
            light_gray: RgbColor::from_hex(&self.light_gray)?,
            dark_gray: RgbColor::from_hex(&self.dark_gray)?,
            black: RgbColor::from_hex(&self.black)?,
            hit: RgbColor::from_hex(&self.hit)?,
            miss: RgbColor::from_hex(&self.miss)?,
            placeholder_fill: RgbColor::from_hex(&self.placeholder_fill)?,
            placeholder_border: RgbColor::from_hex(&self.placeholder_border)?,
        })
    }
}

/// Shot table columns
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub labels: Vec<String>,
    /// Column widths in mm
    pub widths: Vec<f32>,
    /// Row height in mm, shared by header and body rows
    pub row_height: f32,
    /// Column rendered as a hit/miss status cell
    pub status_column: Option<usize>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            labels: SHOT_TABLE_LABELS.iter().map(|s| s.to_string()).collect(),
            widths: SHOT_TABLE_WIDTHS.to_vec(),
            row_height: DEFAULT_TABLE_ROW_HEIGHT,
            status_column: Some(SHOT_TABLE_STATUS_COLUMN),
        }
    }
}

/// Fixed block dimensions in mm
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlockSizes {
    pub banner_height: f32,
    pub section_header_height: f32,
    pub rule_height: f32,
    pub card_title_height: f32,
    pub card_padding: f32,
    pub card_gap: f32,
    pub chart_max_height: f32,
    pub photo_max_width: f32,
    pub photo_max_height: f32,
    pub chart_placeholder_height: f32,
    pub photo_placeholder_height: f32,
    pub section_gap: f32,
}

impl Default for BlockSizes {
    fn default() -> Self {
        Self {
            banner_height: DEFAULT_BANNER_HEIGHT,
            section_header_height: DEFAULT_SECTION_HEADER_HEIGHT,
            rule_height: DEFAULT_RULE_HEIGHT,
            card_title_height: DEFAULT_CARD_TITLE_HEIGHT,
            card_padding: DEFAULT_CARD_PADDING,
            card_gap: DEFAULT_CARD_GAP,
            chart_max_height: DEFAULT_CHART_MAX_HEIGHT,
            photo_max_width: DEFAULT_PHOTO_MAX_WIDTH,
            photo_max_height: DEFAULT_PHOTO_MAX_HEIGHT,
            chart_placeholder_height: DEFAULT_CHART_PLACEHOLDER_HEIGHT,
            photo_placeholder_height: DEFAULT_PHOTO_PLACEHOLDER_HEIGHT,
            section_gap: DEFAULT_SECTION_GAP,
        }
    }
}

/// A titled bullet list on an informational page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InfoSection {
    pub title: String,
    pub items: Vec<String>,
}

impl InfoSection {
    fn new(title: &str, items: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Fixed text printed in the report
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportContent {
    pub brand_name: String,
    pub file_name_prefix: String,
    pub banner_title: String,
    pub banner_subtitle: String,
    pub report_title: String,
    pub round_page_title: String,
    pub round_intro: String,
    pub shots_heading: String,
    pub no_chart: String,
    pub no_shots: String,
    pub no_chart_no_shots: String,
    pub no_photo: String,
    pub product_title: String,
    pub product_subtitle: String,
    pub product_sections: Vec<InfoSection>,
    pub contact_title: String,
    pub contact_lines: Vec<String>,
}

impl Default for ReportContent {
    fn default() -> Self {
        Self {
            brand_name: BRAND_NAME.to_string(),
            file_name_prefix: FILE_NAME_PREFIX.to_string(),
            banner_title: BANNER_TITLE.to_string(),
            banner_subtitle: BANNER_SUBTITLE.to_string(),
            report_title: REPORT_TITLE.to_string(),
            round_page_title: ROUND_PAGE_TITLE.to_string(),
            round_intro: ROUND_INTRO.to_string(),
            shots_heading: SHOTS_HEADING.to_string(),
            no_chart: NO_CHART_TEXT.to_string(),
            no_shots: NO_SHOTS_TEXT.to_string(),
            no_chart_no_shots: NO_CHART_NO_SHOTS_TEXT.to_string(),
            no_photo: NO_PHOTO_TEXT.to_string(),
            product_title: BANNER_TITLE.to_string(),
            product_subtitle: "Simulator for Air-to-Air & Air-to-Ground Live Fire Training"
                .to_string(),
            product_sections: vec![
                InfoSection::new(
                    "SIMULATOR STATION",
                    &[
                        "Virtual Reality Helmet",
                        "Joystick - Throttle - Rudder",
                        "Immersive environment",
                        "Real targets with 3D models",
                    ],
                ),
                InfoSection::new(
                    "INSTRUCTOR STATION",
                    &[
                        "Remote mission control",
                        "Mission Replay and Analysis",
                        "Record Mission / Pilot data",
                        "Virtual Instructor",
                    ],
                ),
                InfoSection::new(
                    "PRODUCT",
                    &[
                        "Possibility to customize missions and aircraft",
                        "Real Time Data Fusion (Trajectory, Eye Tracking, Hand Tracking, Stress Sensors ...)",
                        "Multi pilots Training",
                        "Real time Evaluation",
                        "Radio Communication Training",
                        "Voice Recognition / Synthesis",
                    ],
                ),
            ],
            contact_title: "Virtual Air Combat Engagement".to_string(),
            contact_lines: vec![
                "For demonstrations, training programmes and technical support,".to_string(),
                "please contact your ARESIA representative.".to_string(),
            ],
        }
    }
}

/// Runtime settings for PDF generation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Page dimensions
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub footer_reserve: f32,

    pub fonts: FontSizes,
    pub palette: PaletteSettings,
    pub table: TableSettings,
    pub blocks: BlockSizes,
    pub content: ReportContent,

    /// Compress PDF streams after generation
    pub compress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            margin_top: DEFAULT_PAGE_MARGIN,
            margin_bottom: DEFAULT_PAGE_MARGIN,
            margin_left: DEFAULT_PAGE_MARGIN,
            margin_right: DEFAULT_PAGE_MARGIN,
            footer_reserve: DEFAULT_FOOTER_RESERVE,
            fonts: FontSizes::default(),
            palette: PaletteSettings::default(),
            table: TableSettings::default(),
            blocks: BlockSizes::default(),
            content: ReportContent::default(),
            compress: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON style file. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create settings from CLI arguments
    pub fn from_args(args: &Args) -> Self {
        Self::default().with_args(args)
    }

    /// Apply CLI overrides on top of these settings
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(page_size) = args.page_size {
            let (w, h) = page_size.dimensions_mm();
            self.page_width = w;
            self.page_height = h;
        }
        if let Some(orientation) = args.orientation {
            let (short, long) = if self.page_width <= self.page_height {
                (self.page_width, self.page_height)
            } else {
                (self.page_height, self.page_width)
            };
            (self.page_width, self.page_height) = match orientation {
                Orientation::Portrait => (short, long),
                Orientation::Landscape => (long, short),
            };
        }
        if args.no_compress {
            self.compress = false;
        }
        self
    }

    /// Check everything once and resolve into the style used for layout
    pub fn validate(&self) -> Result<Style, ConfigError> {
        let geometry = PageGeometry::new(
            self.page_width,
            self.page_height,
            [
                self.margin_top,
                self.margin_right,
                self.margin_bottom,
                self.margin_left,
            ],
            self.footer_reserve,
        )?;
        let colors = self.palette.resolve()?;
        let table = TableLayout::new(
            &self.table.labels,
            &self.table.widths,
            self.table.row_height,
            self.table.status_column,
            geometry.content_width(),
        )?;

        Ok(Style {
            geometry,
            fonts: self.fonts,
            colors,
            table,
            blocks: self.blocks,
            content: self.content.clone(),
            compress: self.compress,
        })
    }
}
