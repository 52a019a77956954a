use crate::render::components::TableLayout;
use crate::render::helpers::colors::ColorPalette;
use crate::render::layout::PageGeometry;

use super::settings::{BlockSizes, FontSizes, ReportContent};

/// Validated, resolved styling for one generation run.
///
/// Produced only by `Settings::validate`, so every value here has already
/// been checked: colors are parsed, the page leaves usable space and the
/// shot table fits the content width.
#[derive(Debug, Clone)]
pub struct Style {
    pub geometry: PageGeometry,
    pub fonts: FontSizes,
    pub colors: ColorPalette,
    pub table: TableLayout,
    pub blocks: BlockSizes,
    pub content: ReportContent,
    pub compress: bool,
}
