//! PDF backend
//!
//! Paints a `LaidOutReport` with printpdf. Layout coordinates (mm from the
//! top-left, y down) are flipped here into PDF coordinates (mm from the
//! bottom-left, y up).

use std::collections::HashMap;

use printpdf::{
    Mm, PaintMode, PdfDocument, PdfPage, PdfSaveOptions, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectId, XObjectTransform,
};

use crate::error::RenderError;
use crate::render::blocks::{Card, PlaceholderBlock, SectionHeaderBlock, TableCell, TextBlock};
use crate::render::flow::{DrawCommand, DrawPayload};
use crate::render::helpers::colors::RgbColor;
use crate::render::helpers::compress::compress_pdf;
use crate::render::helpers::geometry::mm_to_pt;
use crate::render::helpers::images::LoadedImage;
use crate::render::helpers::layer::LayerBuilder;
use crate::render::helpers::styles::{TextAlign, TextStyle};
use crate::render::helpers::text_metrics::BuiltinFontMeasurer;
use crate::render::layouts::LaidOutReport;

/// Horizontal inset for left/right aligned text inside filled boxes
const TEXT_INSET: f32 = 3.0;

/// An image registered with the document
struct EmbeddedImage {
    id: XObjectId,
    width_px: u32,
    height_px: u32,
}

/// Wrap a decoded raster for printpdf
fn raw_image(image: &LoadedImage) -> RawImage {
    RawImage {
        pixels: RawImageData::U8(image.pixels.to_vec()),
        width: image.width as usize,
        height: image.height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}

/// Render a laid-out report to PDF bytes
pub fn render_pdf(report: &LaidOutReport, compress: bool) -> Result<Vec<u8>, RenderError> {
    let mut doc = PdfDocument::new(&report.title);

    let mut images = HashMap::new();
    for (key, image) in &report.images {
        let id = doc.add_image(&raw_image(image));
        images.insert(
            key.clone(),
            EmbeddedImage {
                id,
                width_px: image.width,
                height_px: image.height,
            },
        );
    }

    let painter = Painter {
        page_height: report.geometry.page_height,
        images: &images,
    };

    let mut pages = Vec::with_capacity(report.pages.len());
    for page in &report.pages {
        let mut layer = LayerBuilder::new();
        for command in &page.commands {
            painter.paint(&mut layer, command);
        }
        pages.push(PdfPage::new(
            Mm(report.geometry.page_width),
            Mm(report.geometry.page_height),
            layer.into_ops(),
        ));
    }

    doc.with_pages(pages);

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if bytes.is_empty() {
        return Err(RenderError::PdfGeneration(
            "printpdf produced an empty document".to_string(),
        ));
    }
    log::info!(
        "Rendered {} pages ({} bytes uncompressed)",
        report.pages.len(),
        bytes.len()
    );

    if !compress {
        return Ok(bytes);
    }
    // Compress PDF streams to reduce file size
    match compress_pdf(bytes.clone()) {
        Ok(compressed) => Ok(compressed),
        Err(e) => {
            log::warn!("{}; writing uncompressed output", e);
            Ok(bytes)
        }
    }
}

struct Painter<'a> {
    page_height: f32,
    images: &'a HashMap<String, EmbeddedImage>,
}

impl Painter<'_> {
    /// Flip a top-down y coordinate into PDF space
    fn pdf_y(&self, y: f32) -> f32 {
        self.page_height - y
    }

    fn paint(&self, layer: &mut LayerBuilder, cmd: &DrawCommand) {
        match &cmd.payload {
            DrawPayload::Text(text) => self.text_block(layer, cmd, text),
            DrawPayload::Image(image) => self.image(layer, cmd, &image.key),
            DrawPayload::Cell(cell) => self.cell(layer, cmd, cell),
            DrawPayload::Rule(rule) => {
                let y = self.pdf_y(cmd.y + cmd.height / 2.0);
                layer.set_outline_color(rule.color.to_pdf());
                layer.set_outline_thickness(mm_to_pt(rule.thickness));
                layer.add_line(Mm(cmd.x), Mm(y), Mm(cmd.x + cmd.width), Mm(y));
            }
            DrawPayload::SectionHeader(header) => self.section_header(layer, cmd, header),
            DrawPayload::Placeholder(placeholder) => self.placeholder(layer, cmd, placeholder),
            DrawPayload::Card(card) => self.card(layer, cmd, card),
        }
    }

    /// Fill and/or stroke a box given in layout coordinates
    fn rect(
        &self,
        layer: &mut LayerBuilder,
        (x, y, w, h): (f32, f32, f32, f32),
        fill: Option<RgbColor>,
        border: Option<(RgbColor, f32)>,
    ) {
        let (x1, y1, x2, y2) = (Mm(x), Mm(self.pdf_y(y + h)), Mm(x + w), Mm(self.pdf_y(y)));
        if let Some(fill) = fill {
            layer.set_fill_color(fill.to_pdf());
            layer.add_rect(x1, y1, x2, y2, PaintMode::Fill);
        }
        if let Some((color, thickness)) = border {
            layer.set_outline_color(color.to_pdf());
            layer.set_outline_thickness(thickness);
            layer.add_rect(x1, y1, x2, y2, PaintMode::Stroke);
        }
    }

    /// One line of text, vertically centred in the band starting at `top`
    #[allow(clippy::too_many_arguments)]
    fn line(
        &self,
        layer: &mut LayerBuilder,
        text: &str,
        style: &TextStyle,
        (x, width): (f32, f32),
        top: f32,
        band: f32,
        inset: f32,
    ) {
        let measurer = BuiltinFontMeasurer::new(style.weight);
        let text_width = measurer.measure_width_mm(text, style.font_size);
        let tx = match style.align {
            TextAlign::Left => x + inset,
            TextAlign::Center => x + (width - text_width) / 2.0,
            TextAlign::Right => x + width - text_width - inset,
        };
        let baseline = top + (band + measurer.cap_height_mm(style.font_size)) / 2.0;
        layer.set_fill_color(style.color.to_pdf());
        layer.use_text_builtin(
            text,
            style.font_size,
            Mm(tx),
            Mm(self.pdf_y(baseline)),
            measurer.font(),
        );
    }

    fn text_block(&self, layer: &mut LayerBuilder, cmd: &DrawCommand, text: &TextBlock) {
        for (i, line) in text.lines.iter().enumerate() {
            let top = cmd.y + i as f32 * text.line_height;
            self.line(
                layer,
                line,
                &text.style,
                (cmd.x, cmd.width),
                top,
                text.line_height,
                0.0,
            );
        }
    }

    fn image(&self, layer: &mut LayerBuilder, cmd: &DrawCommand, key: &str) {
        let Some(image) = self.images.get(key) else {
            log::warn!("No embedded image for key {}", key);
            return;
        };
        // at 72 dpi one pixel is one point
        let transform = XObjectTransform {
            translate_x: Some(Pt(mm_to_pt(cmd.x))),
            translate_y: Some(Pt(mm_to_pt(self.pdf_y(cmd.y + cmd.height)))),
            scale_x: Some(mm_to_pt(cmd.width) / image.width_px as f32),
            scale_y: Some(mm_to_pt(cmd.height) / image.height_px as f32),
            dpi: Some(72.0),
            ..Default::default()
        };
        layer.save_graphics_state();
        layer.use_xobject(image.id.clone(), transform);
        layer.restore_graphics_state();
    }

    fn cell(&self, layer: &mut LayerBuilder, cmd: &DrawCommand, cell: &TableCell) {
        let style = &cell.style;
        self.rect(
            layer,
            (cmd.x, cmd.y, cmd.width, cmd.height),
            style.fill,
            Some((style.border, style.border_width)),
        );
        self.line(
            layer,
            &cell.text,
            &style.text,
            (cmd.x, cmd.width),
            cmd.y,
            cmd.height,
            1.0,
        );
    }

    fn section_header(
        &self,
        layer: &mut LayerBuilder,
        cmd: &DrawCommand,
        header: &SectionHeaderBlock,
    ) {
        self.rect(
            layer,
            (cmd.x, cmd.y, cmd.width, cmd.height),
            Some(header.fill),
            None,
        );
        let span = (cmd.x, cmd.width);
        match &header.subtitle {
            Some(subtitle) => {
                let title_band = cmd.height * 0.6;
                self.line(layer, &header.title, &header.title_style, span, cmd.y, title_band, TEXT_INSET);
                self.line(
                    layer,
                    subtitle,
                    &header.subtitle_style,
                    span,
                    cmd.y + title_band * 0.85,
                    cmd.height - title_band,
                    TEXT_INSET,
                );
            }
            None => {
                self.line(layer, &header.title, &header.title_style, span, cmd.y, cmd.height, TEXT_INSET)
            }
        }
    }

    fn placeholder(
        &self,
        layer: &mut LayerBuilder,
        cmd: &DrawCommand,
        placeholder: &PlaceholderBlock,
    ) {
        self.rect(
            layer,
            (cmd.x, cmd.y, cmd.width, cmd.height),
            Some(placeholder.fill),
            Some((placeholder.border, 0.5)),
        );
        self.line(
            layer,
            &placeholder.label,
            &placeholder.style,
            (cmd.x, cmd.width),
            cmd.y,
            cmd.height,
            TEXT_INSET,
        );
    }

    fn card(&self, layer: &mut LayerBuilder, cmd: &DrawCommand, card: &Card) {
        self.rect(
            layer,
            (cmd.x, cmd.y, cmd.width, cmd.height),
            Some(card.body_fill),
            Some((card.border, 0.5)),
        );
        self.rect(
            layer,
            (cmd.x, cmd.y, cmd.width, card.title_height),
            Some(card.title_fill),
            None,
        );
        self.line(
            layer,
            &card.title,
            &card.title_style,
            (cmd.x, cmd.width),
            cmd.y,
            card.title_height,
            card.padding,
        );

        let column_width = card.column_width();
        let line_height = card.item_line_height();
        let mut row_top = cmd.y + card.title_height + card.padding;
        for (row, lines) in card.lines.chunks(card.columns.max(1)).zip(card.row_lines()) {
            for (col, item) in row.iter().enumerate() {
                let x = cmd.x + card.padding + col as f32 * column_width;
                for (i, line) in item.iter().enumerate() {
                    self.line(
                        layer,
                        line,
                        &card.text_style,
                        (x, card.text_width()),
                        row_top + i as f32 * line_height,
                        line_height,
                        0.0,
                    );
                }
            }
            row_top += lines as f32 * line_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::model::{ImageRef, MissionReportData, RoundRecord, ShotRecord};
    use crate::render::helpers::images::tests::png_bytes;
    use crate::render::helpers::images::FsImageResolver;
    use crate::render::layouts::{layout_report, GenerationContext};
    use chrono::NaiveDate;

    fn laid_out() -> LaidOutReport {
        let style = Settings::default().validate().unwrap();
        let data = MissionReportData {
            pilot_name: "Jane Doe".to_string(),
            instructor_name: "John Smith".to_string(),
            date: "2024-03-15".to_string(),
            mission_type: "Air-to-Ground".to_string(),
            aircraft: "Rafale".to_string(),
            pilot_photo: Some(ImageRef::inline("jane.png", png_bytes(30, 40))),
            rounds: vec![RoundRecord::new(1)
                .with_chart(ImageRef::inline("chart.png", png_bytes(80, 40)))
                .with_shots(vec![
                    ShotRecord::new(1, 350.0, 1200.0, 800.0, true),
                    ShotRecord::new(2, 340.0, 1100.0, 750.0, false),
                ])],
            ..Default::default()
        };
        let ctx = GenerationContext::new(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        layout_report(&data, &style, &FsImageResolver, &ctx).unwrap()
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = render_pdf(&laid_out(), false).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_compressed_output_is_pdf() {
        let bytes = render_pdf(&laid_out(), true).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_page_count_preserved() {
        let report = laid_out();
        let bytes = render_pdf(&report, false).unwrap();
        let parsed = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), report.page_count());
    }
}
