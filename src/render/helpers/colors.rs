use printpdf::{Color, Rgb};

use crate::error::ConfigError;
use crate::parser::parse_hex_color;

/// An 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);
pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` / `RRGGBB`
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let (r, g, b) = parse_hex_color(hex)?;
        Ok(Self::new(r, g, b))
    }

    /// Channels scaled to 0.0-1.0 as printpdf expects
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    pub fn to_pdf(self) -> Color {
        let (r, g, b) = self.to_unit();
        Color::Rgb(Rgb::new(r, g, b, None))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Resolved report palette
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    pub navy: RgbColor,
    pub blue: RgbColor,
    pub gold: RgbColor,
    pub white: RgbColor,
    pub light_gray: RgbColor,
    pub dark_gray: RgbColor,
    pub black: RgbColor,
    pub hit: RgbColor,
    pub miss: RgbColor,
    pub placeholder_fill: RgbColor,
    pub placeholder_border: RgbColor,
}

impl ColorPalette {
    /// Fill color for a hit/miss status cell
    pub fn status(&self, hit: bool) -> RgbColor {
        if hit {
            self.hit
        } else {
            self.miss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let navy = RgbColor::from_hex("#1C3062").unwrap();
        assert_eq!(navy, RgbColor::new(28, 48, 98));
        assert_eq!(navy.to_hex(), "#1C3062");
    }

    #[test]
    fn test_to_unit() {
        let (r, g, b) = RgbColor::new(255, 0, 51).to_unit();
        assert!((r - 1.0).abs() < f32::EPSILON);
        assert!(g.abs() < f32::EPSILON);
        assert!((b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(
            RgbColor::from_hex("navy"),
            Err(ConfigError::InvalidColorFormat(_))
        ));
    }
}
