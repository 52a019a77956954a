//! Named style presets resolved from the validated palette

use printpdf::BuiltinFont;

use super::colors::RgbColor;
use crate::config::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

impl FontWeight {
    pub fn builtin_font(self) -> BuiltinFont {
        match self {
            FontWeight::Regular => BuiltinFont::Helvetica,
            FontWeight::Bold => BuiltinFont::HelveticaBold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub font_size: f32,
    pub weight: FontWeight,
    pub color: RgbColor,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

/// Text presets, one per place text appears in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    BannerTitle,
    BannerSubtitle,
    ReportTitle,
    PageTitle,
    SectionHeader,
    Heading,
    CardTitle,
    CardText,
    Body,
    InfoTitle,
    InfoSubtitle,
    InfoHeading,
    InfoItem,
    Placeholder,
    Footer,
    FooterBrand,
}

/// Shot table cell presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellRole {
    Header,
    Body,
    StatusHit,
    StatusMiss,
}

impl CellRole {
    pub fn status(hit: bool) -> Self {
        if hit {
            CellRole::StatusHit
        } else {
            CellRole::StatusMiss
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub fill: Option<RgbColor>,
    pub border: RgbColor,
    pub border_width: f32,
    pub text: TextStyle,
}

impl Style {
    pub fn text(&self, role: TextRole) -> TextStyle {
        let fonts = &self.fonts;
        let colors = &self.colors;
        let (font_size, weight, color, align) = match role {
            TextRole::BannerTitle => (fonts.title, FontWeight::Bold, colors.white, TextAlign::Center),
            TextRole::BannerSubtitle => (fonts.body, FontWeight::Regular, colors.gold, TextAlign::Center),
            TextRole::ReportTitle => (fonts.subtitle, FontWeight::Bold, colors.navy, TextAlign::Center),
            TextRole::PageTitle => (fonts.heading, FontWeight::Bold, colors.navy, TextAlign::Left),
            TextRole::SectionHeader => (fonts.subheading, FontWeight::Bold, colors.white, TextAlign::Left),
            TextRole::Heading => (fonts.subheading, FontWeight::Bold, colors.navy, TextAlign::Left),
            TextRole::CardTitle => (fonts.body, FontWeight::Bold, colors.white, TextAlign::Left),
            TextRole::CardText => (fonts.small, FontWeight::Regular, colors.dark_gray, TextAlign::Left),
            TextRole::Body => (fonts.small, FontWeight::Regular, colors.dark_gray, TextAlign::Left),
            TextRole::InfoTitle => (fonts.title, FontWeight::Bold, colors.navy, TextAlign::Left),
            TextRole::InfoSubtitle => (fonts.subheading, FontWeight::Regular, colors.blue, TextAlign::Left),
            TextRole::InfoHeading => (fonts.heading, FontWeight::Bold, colors.navy, TextAlign::Left),
            TextRole::InfoItem => (fonts.body, FontWeight::Regular, colors.black, TextAlign::Left),
            TextRole::Placeholder => (fonts.small, FontWeight::Regular, colors.dark_gray, TextAlign::Center),
            TextRole::Footer => (fonts.tiny, FontWeight::Regular, colors.dark_gray, TextAlign::Left),
            TextRole::FooterBrand => (fonts.tiny, FontWeight::Bold, colors.navy, TextAlign::Center),
        };
        TextStyle {
            font_size,
            weight,
            color,
            align,
        }
    }

    pub fn cell(&self, role: CellRole) -> CellStyle {
        let colors = &self.colors;
        let text = |weight, color| TextStyle {
            font_size: self.fonts.small,
            weight,
            color,
            align: TextAlign::Center,
        };
        match role {
            CellRole::Header => CellStyle {
                fill: Some(colors.navy),
                border: colors.navy,
                border_width: 0.5,
                text: text(FontWeight::Bold, colors.white),
            },
            CellRole::Body => CellStyle {
                fill: None,
                border: colors.placeholder_border,
                border_width: 0.5,
                text: text(FontWeight::Regular, colors.black),
            },
            CellRole::StatusHit | CellRole::StatusMiss => CellStyle {
                fill: Some(colors.status(role == CellRole::StatusHit)),
                border: colors.placeholder_border,
                border_width: 0.5,
                text: text(FontWeight::Bold, colors.white),
            },
        }
    }
}
