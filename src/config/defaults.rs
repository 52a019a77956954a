/// A4 page width in mm
pub const DEFAULT_PAGE_WIDTH: f32 = 210.0;

/// A4 page height in mm
pub const DEFAULT_PAGE_HEIGHT: f32 = 297.0;

/// Default page margin in mm (all sides)
pub const DEFAULT_PAGE_MARGIN: f32 = 20.0;

/// Space kept free above the bottom margin for the footer, in mm
pub const DEFAULT_FOOTER_RESERVE: f32 = 12.0;

/// Typography (in points)
pub const DEFAULT_TITLE_FONT_SIZE: f32 = 24.0;
pub const DEFAULT_SUBTITLE_FONT_SIZE: f32 = 18.0;
pub const DEFAULT_HEADING_FONT_SIZE: f32 = 16.0;
pub const DEFAULT_SUBHEADING_FONT_SIZE: f32 = 14.0;
pub const DEFAULT_BODY_FONT_SIZE: f32 = 12.0;
pub const DEFAULT_SMALL_FONT_SIZE: f32 = 10.0;
pub const DEFAULT_TINY_FONT_SIZE: f32 = 8.0;

/// Brand palette
pub const NAVY: &str = "#1C3062";
pub const BLUE: &str = "#4A90E2";
pub const GOLD: &str = "#FFD700";
pub const WHITE: &str = "#FFFFFF";
pub const LIGHT_GRAY: &str = "#F8F9FA";
pub const DARK_GRAY: &str = "#343A40";
pub const BLACK: &str = "#000000";

/// Status cell fill for a hit
pub const HIT_COLOR: &str = "#00CC00";

/// Status cell fill for a miss
pub const MISS_COLOR: &str = "#FF0000";

/// Placeholder frame colors
pub const PLACEHOLDER_FILL: &str = "#F5F5F5";
pub const PLACEHOLDER_BORDER: &str = "#C8C8C8";

/// Shot table column labels
pub const SHOT_TABLE_LABELS: [&str; 5] = ["SHOT NUMBER", "SPEED", "ALTITUDE", "DISTANCE", "TARGET HIT"];

/// Shot table column widths in mm (sums to the A4 content width)
pub const SHOT_TABLE_WIDTHS: [f32; 5] = [34.0, 34.0, 34.0, 34.0, 34.0];

/// Index of the hit/miss column
pub const SHOT_TABLE_STATUS_COLUMN: usize = 4;

/// Shot table row height in mm
pub const DEFAULT_TABLE_ROW_HEIGHT: f32 = 8.0;

/// Banner header height on the cover page in mm
pub const DEFAULT_BANNER_HEIGHT: f32 = 30.0;

/// Round section header bar height in mm
pub const DEFAULT_SECTION_HEADER_HEIGHT: f32 = 10.0;

/// Height reserved by a horizontal rule (line plus spacing) in mm
pub const DEFAULT_RULE_HEIGHT: f32 = 4.0;

/// Title bar height of a cover card in mm
pub const DEFAULT_CARD_TITLE_HEIGHT: f32 = 8.0;

/// Inner padding of cover cards in mm
pub const DEFAULT_CARD_PADDING: f32 = 3.0;

/// Horizontal gap between side-by-side cards in mm
pub const DEFAULT_CARD_GAP: f32 = 10.0;

/// Bounding box for round charts in mm
pub const DEFAULT_CHART_MAX_HEIGHT: f32 = 110.0;

/// Bounding box for the pilot photo in mm
pub const DEFAULT_PHOTO_MAX_WIDTH: f32 = 60.0;
pub const DEFAULT_PHOTO_MAX_HEIGHT: f32 = 70.0;

/// Placeholder frame heights in mm
pub const DEFAULT_CHART_PLACEHOLDER_HEIGHT: f32 = 40.0;
pub const DEFAULT_PHOTO_PLACEHOLDER_HEIGHT: f32 = 40.0;

/// Vertical gap between stacked sections in mm
pub const DEFAULT_SECTION_GAP: f32 = 6.0;

/// Brand name printed in the footer
pub const BRAND_NAME: &str = "ARESIA";

/// Prefix for generated report file names
pub const FILE_NAME_PREFIX: &str = "Rapport_Mission";

pub const BANNER_TITLE: &str = "Virtual Air Combat Engagement";
pub const BANNER_SUBTITLE: &str = "Simulator for live fire training";
pub const REPORT_TITLE: &str = "Training Simulation Report";
pub const ROUND_PAGE_TITLE: &str = "Training Simulation Report - Shots Details";

/// Explanatory paragraph on the first round page
pub const ROUND_INTRO: &str = "This report presents the curves of the different shooting rounds. \
In the charts, the yellow area represents your firing window, the small black dots mark the \
moments you fired, and the green triangles indicate the shots that hit the target.";

pub const NO_CHART_TEXT: &str = "No chart provided for this round";
pub const NO_SHOTS_TEXT: &str = "No shots recorded for this round";
pub const NO_CHART_NO_SHOTS_TEXT: &str = "No chart or shot data provided for this round";
pub const NO_PHOTO_TEXT: &str = "No pilot photo provided";
pub const SHOTS_HEADING: &str = "Shots Details";
