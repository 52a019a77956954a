//! Input data model for mission reports

pub mod mission;

pub use mission::{ImageRef, MissionReportData, RoundRecord, ShotRecord};
