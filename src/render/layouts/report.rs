//! Mission report assembler
//!
//! Builds the whole document in a fixed order: cover page, one section per
//! round (each starting on a new page), then the product and contact pages.
//! A second pass stamps the footer on every finalized page once the total
//! page count is known.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::Style;
use crate::error::RenderError;
use crate::model::{ImageRef, MissionReportData, RoundRecord, ShotRecord};
use crate::parser::{display_date, display_mission_date};
use crate::render::blocks::{
    Card, CardGroup, ContentBlock, ImageBlock, PlaceholderBlock, RuleBlock, SectionHeaderBlock,
    TextBlock,
};
use crate::render::components::{format_measure, TableRowData};
use crate::render::flow::{DrawCommand, DrawPayload, FlowEngine, Page};
use crate::render::helpers::colors::RgbColor;
use crate::render::helpers::geometry::line_height_mm;
use crate::render::helpers::images::{ImageCache, ImageResolver, LoadedImage};
use crate::render::helpers::styles::{TextAlign, TextRole};
use crate::render::layout::PageGeometry;

/// Per-run inputs that are not part of the report data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationContext {
    /// Date printed in the footer
    pub generated_on: NaiveDate,
}

impl GenerationContext {
    pub fn new(generated_on: NaiveDate) -> Self {
        Self { generated_on }
    }

    /// Context dated with the local calendar date
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

/// Fully positioned document, ready for a backend
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutReport {
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
    /// Images referenced by `DrawPayload::Image` keys
    pub images: BTreeMap<String, LoadedImage>,
}

impl LaidOutReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.pages.iter().flat_map(|p| p.commands.iter())
    }
}

/// Lay out a report without rendering it
pub fn layout_report(
    data: &MissionReportData,
    style: &Style,
    resolver: &dyn ImageResolver,
    ctx: &GenerationContext,
) -> Result<LaidOutReport, RenderError> {
    if data.rounds.is_empty() {
        return Err(RenderError::EmptyReport);
    }

    let mut assembler = ReportAssembler {
        style,
        images: ImageCache::new(resolver),
        engine: FlowEngine::new(style.geometry),
    };

    assembler.cover(data)?;
    for (index, round) in data.rounds.iter().enumerate() {
        assembler.round(round, index == 0)?;
    }
    assembler.product_page()?;
    assembler.contact_page()?;

    let ReportAssembler { images, engine, .. } = assembler;
    let breaks = engine.breaks();
    let mut pages = engine.finish();
    stamp_footers(&mut pages, style, ctx);

    log::info!(
        "Laid out {} rounds ({} shots) on {} pages ({} breaks)",
        data.rounds.len(),
        data.total_shots(),
        pages.len(),
        breaks
    );

    Ok(LaidOutReport {
        title: format!("{} - {}", style.content.report_title, data.pilot_name),
        geometry: style.geometry,
        pages,
        images: images.into_images(),
    })
}

struct ReportAssembler<'a, 'r> {
    style: &'a Style,
    images: ImageCache<'r>,
    engine: FlowEngine,
}

impl ReportAssembler<'_, '_> {
    fn content_width(&self) -> f32 {
        self.style.geometry.content_width()
    }

    fn place(&mut self, block: ContentBlock) -> Result<(), RenderError> {
        log::debug!(
            "Placing {:?} ({:.1}mm) on page {} at {:.1}mm",
            block.kind(),
            block.height(),
            self.engine.cursor().page() + 1,
            self.engine.cursor().offset()
        );
        self.engine.place(&block)?;
        Ok(())
    }

    fn gap(&mut self) -> Result<(), RenderError> {
        self.place(ContentBlock::Spacer(self.style.blocks.section_gap))
    }

    fn text(&self, text: &str, role: TextRole) -> ContentBlock {
        ContentBlock::TextLine(TextBlock::new(
            text,
            self.style.text(role),
            Some(self.content_width()),
        ))
    }

    fn rule(&self, color: RgbColor) -> ContentBlock {
        ContentBlock::Rule(RuleBlock {
            thickness: 0.8,
            color,
            height: self.style.blocks.rule_height,
        })
    }

    fn placeholder(&self, label: &str, width: Option<f32>, height: f32) -> ContentBlock {
        ContentBlock::Placeholder(PlaceholderBlock {
            label: label.to_string(),
            style: self.style.text(TextRole::Placeholder),
            fill: self.style.colors.placeholder_fill,
            border: self.style.colors.placeholder_border,
            width,
            height,
        })
    }

    fn card(&self, title: &str, items: Vec<String>, columns: usize, width: f32) -> Card {
        let colors = &self.style.colors;
        Card {
            title: title.to_string(),
            items,
            lines: Vec::new(),
            columns,
            width,
            title_height: self.style.blocks.card_title_height,
            padding: self.style.blocks.card_padding,
            title_style: self.style.text(TextRole::CardTitle),
            text_style: self.style.text(TextRole::CardText),
            title_fill: colors.navy,
            body_fill: colors.light_gray,
            border: colors.blue,
        }
        .wrapped()
    }

    /// Image block for a reference, or `None` if it cannot be resolved
    fn image(
        &mut self,
        image: Option<&ImageRef>,
        max_width: f32,
        max_height: f32,
        allow_upscale: bool,
    ) -> Option<ContentBlock> {
        let cached = self.images.get(image?)?;
        let block = ImageBlock::new(
            cached.key,
            cached.image.width,
            cached.image.height,
            max_width,
            max_height,
            allow_upscale,
        );
        Some(ContentBlock::Image(block))
    }

    fn cover(&mut self, data: &MissionReportData) -> Result<(), RenderError> {
        let style = self.style;
        let content = &style.content;
        let blocks = &style.blocks;

        self.place(ContentBlock::SectionHeader(SectionHeaderBlock {
            title: content.banner_title.clone(),
            subtitle: Some(content.banner_subtitle.clone()),
            title_style: style.text(TextRole::BannerTitle),
            subtitle_style: style.text(TextRole::BannerSubtitle),
            fill: style.colors.navy,
            height: blocks.banner_height,
        }))?;
        self.gap()?;
        self.place(self.text(&content.report_title, TextRole::ReportTitle))?;
        self.gap()?;

        let half = (self.content_width() - blocks.card_gap) / 2.0;
        let people = CardGroup::new(
            vec![
                self.card("PILOT", vec![format!("Name: {}", data.pilot_name)], 1, half),
                self.card(
                    "INSTRUCTOR",
                    vec![format!("Name: {}", data.instructor_name)],
                    1,
                    half,
                ),
            ],
            blocks.card_gap,
        );
        self.place(ContentBlock::Cards(people))?;
        self.gap()?;

        let or_na = |value: &Option<String>| match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => "N/A".to_string(),
        };
        let details = vec![
            format!("Date: {}", display_mission_date(&data.date)),
            format!("Mission Type: {}", data.mission_type),
            format!("Mission Name: {}", or_na(&data.mission_name)),
            format!("Aircraft: {}", data.aircraft),
            format!("Map: {}", or_na(&data.map)),
            format!("Total Rounds: {}", data.rounds.len()),
        ];
        let training = self.card("TRAINING DETAILS", details, 2, self.content_width());
        self.place(ContentBlock::Cards(CardGroup::new(vec![training], 0.0)))?;
        self.gap()?;

        let photo = self.image(
            data.pilot_photo.as_ref(),
            blocks.photo_max_width,
            blocks.photo_max_height,
            false,
        );
        let photo = match photo {
            Some(block) => block,
            None => self.placeholder(
                &content.no_photo,
                Some(blocks.photo_max_width),
                blocks.photo_placeholder_height,
            ),
        };
        self.place(photo)
    }

    fn round(&mut self, round: &RoundRecord, first: bool) -> Result<(), RenderError> {
        let style = self.style;
        let content = &style.content;
        let blocks = &style.blocks;

        self.engine.start_new_page();
        self.place(self.text(&content.round_page_title, TextRole::PageTitle))?;
        self.place(self.rule(style.colors.blue))?;
        if first {
            self.place(self.text(&content.round_intro, TextRole::Body))?;
            self.gap()?;
        }

        let header = ContentBlock::SectionHeader(SectionHeaderBlock {
            title: format!("Round {}", round.number),
            subtitle: None,
            title_style: style.text(TextRole::SectionHeader),
            subtitle_style: style.text(TextRole::SectionHeader),
            fill: style.colors.blue,
            height: blocks.section_header_height,
        });
        self.engine.keep_together(header.height() + blocks.chart_placeholder_height);
        self.place(header)?;

        let chart = self.image(
            round.chart_image.as_ref(),
            self.content_width(),
            blocks.chart_max_height,
            true,
        );
        if round.chart_image.is_some() && chart.is_none() {
            log::warn!("Round {}: chart unavailable", round.number);
        }

        match (chart, round.shots.is_empty()) {
            (None, true) => {
                self.place(self.placeholder(
                    &content.no_chart_no_shots,
                    None,
                    blocks.chart_placeholder_height,
                ))?;
            }
            (Some(chart), true) => {
                self.place(chart)?;
                self.gap()?;
                self.place(self.placeholder(
                    &content.no_shots,
                    None,
                    blocks.chart_placeholder_height,
                ))?;
            }
            (chart, false) => {
                let chart = match chart {
                    Some(chart) => chart,
                    None => {
                        self.placeholder(&content.no_chart, None, blocks.chart_placeholder_height)
                    }
                };
                self.place(chart)?;
                self.gap()?;
                self.shot_table(&round.shots)?;
            }
        }
        Ok(())
    }

    fn shot_table(&mut self, shots: &[ShotRecord]) -> Result<(), RenderError> {
        let style = self.style;
        let table = &style.table;

        let heading = self.text(&style.content.shots_heading, TextRole::Heading);
        let rows: Vec<TableRowData> = shots.iter().map(shot_row).collect();
        let blocks = table.blocks(&rows, style);
        let Some((header, body)) = blocks.split_first() else {
            return Ok(());
        };

        // heading, header row and first body row stay together
        self.engine.keep_together(heading.height() + 2.0 * table.row_height());
        self.place(heading)?;
        self.engine.place(header)?;
        self.engine.place_rows(body, Some(header))?;
        log::debug!("Placed shot table with {} rows", body.len());
        Ok(())
    }

    fn product_page(&mut self) -> Result<(), RenderError> {
        let style = self.style;
        let content = &style.content;

        self.engine.start_new_page();
        self.place(self.text(&content.product_title, TextRole::InfoTitle))?;
        self.place(self.text(&content.product_subtitle, TextRole::InfoSubtitle))?;
        self.place(self.rule(style.colors.gold))?;

        for section in &content.product_sections {
            self.gap()?;
            let heading = self.text(&section.title, TextRole::InfoHeading);
            self.engine.keep_together(heading.height() + line_height_mm(style.fonts.body));
            self.place(heading)?;
            for item in &section.items {
                self.place(self.text(&format!("- {}", item), TextRole::InfoItem))?;
            }
        }
        Ok(())
    }

    fn contact_page(&mut self) -> Result<(), RenderError> {
        let style = self.style;
        let content = &style.content;

        self.engine.start_new_page();
        self.place(self.text(&content.contact_title, TextRole::InfoTitle))?;
        self.place(self.rule(style.colors.gold))?;
        self.gap()?;
        for line in &content.contact_lines {
            self.place(self.text(line, TextRole::InfoItem))?;
        }
        self.gap()?;
        let brand = self.style.text(TextRole::InfoHeading).aligned(TextAlign::Center);
        self.place(ContentBlock::TextLine(TextBlock::new(
            &content.brand_name,
            brand,
            Some(self.content_width()),
        )))
    }
}

fn shot_row(shot: &ShotRecord) -> TableRowData {
    TableRowData {
        values: vec![
            shot.number.to_string(),
            format_measure(shot.speed),
            format_measure(shot.altitude),
            format_measure(shot.distance),
            if shot.hit { "YES" } else { "NO" }.to_string(),
        ],
        status: Some(shot.hit),
    }
}

/// Stamp the footer onto every page: separator rule, generation date, brand
/// name and page number
fn stamp_footers(pages: &mut [Page], style: &Style, ctx: &GenerationContext) {
    let geometry = &style.geometry;
    let total = pages.len();
    let generated = format!("Generated on {}", display_date(ctx.generated_on));
    let footer = style.text(TextRole::Footer);
    let text_height = line_height_mm(footer.font_size);
    let rule_y = geometry.footer_top() + 2.0;
    let text_y = rule_y + 2.0;
    let width = geometry.content_width();
    let x = geometry.margin_left;

    for page in pages.iter_mut() {
        let index = page.index;
        let text = |value: &str, role: TextRole, align: TextAlign| DrawCommand {
            page: index,
            x,
            y: text_y,
            width,
            height: text_height,
            payload: DrawPayload::Text(TextBlock {
                lines: vec![value.to_string()],
                style: style.text(role).aligned(align),
                width: Some(width),
                line_height: text_height,
            }),
        };

        page.commands.push(DrawCommand {
            page: index,
            x,
            y: rule_y,
            width,
            height: 0.0,
            payload: DrawPayload::Rule(RuleBlock {
                thickness: 0.3,
                color: style.colors.dark_gray,
                height: 0.0,
            }),
        });
        page.commands.push(text(&generated, TextRole::Footer, TextAlign::Left));
        page.commands.push(text(
            &style.content.brand_name,
            TextRole::FooterBrand,
            TextAlign::Center,
        ));
        page.commands.push(text(
            &format!("Page {} / {}", index + 1, total),
            TextRole::Footer,
            TextAlign::Right,
        ));
    }
}
