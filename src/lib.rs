pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod render;

pub use config::{Settings, Style};
pub use error::{AssetError, ConfigError, RenderError};
pub use model::{ImageRef, MissionReportData, RoundRecord, ShotRecord};
pub use output::{output_file_name, write_report};
pub use render::{
    layout_report, render_pdf, FsImageResolver, GenerationContext, ImageResolver, LaidOutReport,
};

/// High-level API for rendering a mission report to PDF.
///
/// Validates the settings, lays the report out page by page and paints it.
/// Images referenced by the report are loaded through `resolver`; an image
/// that cannot be loaded is replaced by a placeholder.
///
/// # Arguments
///
/// * `data` - Pilot, mission and per-round shot data
/// * `settings` - Page geometry, fonts, palette, table and text settings
/// * `resolver` - Loads chart and photo images
/// * `ctx` - Per-run inputs such as the generation date
///
/// # Returns
///
/// PDF file contents as bytes, or a RenderError on failure.
///
/// # Example
///
/// ```no_run
/// use mission_report::{
///     render_report, FsImageResolver, GenerationContext, MissionReportData, Settings,
/// };
///
/// let json = std::fs::read_to_string("mission.json").unwrap();
/// let data = MissionReportData::from_json(&json).unwrap();
///
/// let pdf_bytes = render_report(
///     &data,
///     &Settings::default(),
///     &FsImageResolver,
///     &GenerationContext::today(),
/// )
/// .unwrap();
///
/// std::fs::write("report.pdf", pdf_bytes).unwrap();
/// ```
pub fn render_report(
    data: &MissionReportData,
    settings: &Settings,
    resolver: &dyn ImageResolver,
    ctx: &GenerationContext,
) -> Result<Vec<u8>, RenderError> {
    let style = settings.validate()?;
    let report = layout_report(data, &style, resolver, ctx)?;
    render_pdf(&report, style.compress)
}
