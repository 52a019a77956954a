pub mod defaults;
pub mod settings;
pub mod style;

pub use settings::{
    BlockSizes, FontSizes, InfoSection, PaletteSettings, ReportContent, Settings, TableSettings,
};
pub use style::Style;
