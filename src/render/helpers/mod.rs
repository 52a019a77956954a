//! Helper utilities for PDF rendering

pub mod colors;
pub mod compress;
pub mod geometry;
pub mod images;
pub mod layer;
pub mod styles;
pub mod text_metrics;

pub use colors::{ColorPalette, RgbColor, BLACK, WHITE};
pub use compress::compress_pdf;
pub use geometry::{line_height_mm, scale_to_fit, LAYOUT_EPSILON};
pub use images::{FsImageResolver, ImageCache, ImageResolver, LoadedImage};
pub use layer::LayerBuilder;
pub use styles::{CellRole, CellStyle, FontWeight, TextAlign, TextRole, TextStyle};
pub use text_metrics::{wrap_text, BuiltinFontMeasurer, TextMeasure};
