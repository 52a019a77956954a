//! Parsers for the small text formats embedded in report input and style files

pub mod color;
pub mod date;

pub use color::parse_hex_color;
pub use date::{display_date, display_mission_date, parse_mission_date};
