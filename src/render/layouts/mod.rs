//! Report layouts

pub mod report;

pub use report::{layout_report, GenerationContext, LaidOutReport};
