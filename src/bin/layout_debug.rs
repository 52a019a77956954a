//! Debug tool to inspect layout positioning
//! Run with: cargo run --bin layout_debug [report.json]

use anyhow::{Context, Result};
use std::fs;

use mission_report::config::Settings;
use mission_report::model::{MissionReportData, RoundRecord, ShotRecord};
use mission_report::render::{layout_report, DrawPayload, FsImageResolver, GenerationContext};

fn sample_report() -> MissionReportData {
    let shots = (1..=12)
        .map(|n| ShotRecord::new(n, 340.0 + n as f64, 1200.0, 800.0 - n as f64 * 10.0, n % 3 != 0))
        .collect();
    MissionReportData {
        pilot_name: "Jane Doe".to_string(),
        instructor_name: "John Smith".to_string(),
        date: "2024-03-15".to_string(),
        mission_type: "Air-to-Ground".to_string(),
        aircraft: "Alpha Jet".to_string(),
        rounds: vec![
            RoundRecord::new(1).with_shots(shots),
            RoundRecord::new(2),
        ],
        ..Default::default()
    }
}

fn describe(payload: &DrawPayload) -> String {
    match payload {
        DrawPayload::Text(text) => format!("text    {:?}", text.lines.join(" / ")),
        DrawPayload::Image(image) => format!(
            "image   {} ({}x{} px)",
            image.key, image.pixel_width, image.pixel_height
        ),
        DrawPayload::Cell(cell) => format!("cell    {:?} {:?}", cell.role, cell.text),
        DrawPayload::Rule(_) => "rule".to_string(),
        DrawPayload::SectionHeader(header) => format!("header  {:?}", header.title),
        DrawPayload::Placeholder(placeholder) => format!("holder  {:?}", placeholder.label),
        DrawPayload::Card(card) => format!("card    {:?} ({} items)", card.title, card.items.len()),
    }
}

fn main() -> Result<()> {
    let data = match std::env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file: {}", path))?;
            MissionReportData::from_json(&json)?
        }
        None => sample_report(),
    };

    let style = Settings::default().validate()?;
    println!(
        "page {}x{} mm, content {:.1}x{:.1} mm, footer at {:.1} mm",
        style.geometry.page_width,
        style.geometry.page_height,
        style.geometry.content_width(),
        style.geometry.content_height(),
        style.geometry.footer_top(),
    );

    let report = layout_report(
        &data,
        &style,
        &FsImageResolver::new(),
        &GenerationContext::today(),
    )?;

    for page in &report.pages {
        println!("\n=== page {} ({:?}) ===", page.index + 1, page.state);
        for cmd in &page.commands {
            println!(
                "  x={:7.2} y={:7.2} w={:7.2} h={:6.2}  {}",
                cmd.x,
                cmd.y,
                cmd.width,
                cmd.height,
                describe(&cmd.payload)
            );
        }
    }
    println!("\n{} pages, {} images", report.page_count(), report.images.len());

    Ok(())
}
