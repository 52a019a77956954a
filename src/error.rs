use thiserror::Error;

/// Fatal configuration problems. These abort a generation run before any
/// output is written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid color specification: {0:?} (expected 6 hex digits with optional '#')")]
    InvalidColorFormat(String),

    #[error("Block of height {height:.2}mm can never fit the usable page height of {budget:.2}mm")]
    BlockTooTall { height: f32, budget: f32 },

    #[error("Table columns total {total:.2}mm but the content width is only {available:.2}mm")]
    TableTooWide { total: f32, available: f32 },

    #[error("Table has {labels} column labels but {widths} column widths")]
    InvalidTableColumns { labels: usize, widths: usize },

    #[error("Table column {index} has invalid width {width}mm")]
    InvalidColumnWidth { index: usize, width: f32 },

    #[error("Status column {index} is out of range for a table with {columns} columns")]
    InvalidStatusColumn { index: usize, columns: usize },

    #[error("Table row height must be positive, got {0}mm")]
    InvalidRowHeight(f32),

    #[error("Invalid page geometry: {0}")]
    InvalidPageGeometry(String),
}

/// Problems resolving an image. Always recoverable: the assembler swaps in
/// a placeholder block.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to read image {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {name}: {reason}")]
    Decode { name: String, reason: String },

    #[error("Image {name} has zero width or height")]
    EmptyImage { name: String },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Report has no rounds: at least one round is required")]
    EmptyReport,

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
