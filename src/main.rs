use anyhow::{Context, Result};
use clap::Parser;
use std::fs;

use mission_report::cli::Args;
use mission_report::config::Settings;
use mission_report::model::MissionReportData;
use mission_report::render::{FsImageResolver, GenerationContext};
use mission_report::{output_file_name, render_report, write_report};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    // Read input file
    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input file: {}", args.input.display()))?;

    let data = MissionReportData::from_json(&json).with_context(|| "Failed to parse report data")?;

    log::info!(
        "Loaded report for {} with {} rounds",
        data.pilot_name,
        data.rounds.len()
    );

    // Build settings from the style file and CLI args
    let settings = match &args.style {
        Some(path) => {
            let style_json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read style file: {}", path.display()))?;
            Settings::from_json(&style_json)
                .with_context(|| format!("Failed to parse style file: {}", path.display()))?
                .with_args(&args)
        }
        None => Settings::from_args(&args),
    };

    let pdf_data = render_report(
        &data,
        &settings,
        &FsImageResolver::new(),
        &GenerationContext::today(),
    )
    .with_context(|| "Failed to generate mission report PDF")?;

    let file_name = output_file_name(
        &settings.content.file_name_prefix,
        &data.pilot_name,
        &data.mission_type,
        &data.date,
    );
    let output_path = args.output_path(&file_name);

    // Write output
    write_report(&output_path, &pdf_data)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    println!("Successfully wrote PDF to {}", output_path.display());

    Ok(())
}
