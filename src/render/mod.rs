//! Layout and PDF rendering modules

pub mod blocks;
pub mod components;
pub mod document;
pub mod flow;
pub mod helpers;
pub mod layout;
pub mod layouts;

// Re-export commonly used items for convenience
pub use blocks::{BlockKind, ContentBlock};
pub use document::render_pdf;
pub use flow::{DrawCommand, DrawPayload, FlowEngine, Page, PageState};
pub use helpers::{FsImageResolver, ImageResolver, LayerBuilder, LoadedImage};
pub use layout::PageGeometry;
pub use layouts::{layout_report, GenerationContext, LaidOutReport};
