use crate::error::ConfigError;

/// Fixed page dimensions and margins, in mm.
///
/// All positions produced by the layout engine are measured from the
/// top-left corner of the page with y growing downwards. The PDF backend
/// flips them into PDF's bottom-left coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Space kept free above the bottom margin for the footer
    pub footer_reserve: f32,
}

impl PageGeometry {
    /// Build a geometry, rejecting layouts that leave no usable area
    pub fn new(
        page_width: f32,
        page_height: f32,
        margins: [f32; 4],
        footer_reserve: f32,
    ) -> Result<Self, ConfigError> {
        let [margin_top, margin_right, margin_bottom, margin_left] = margins;
        let geometry = Self {
            page_width,
            page_height,
            margin_top,
            margin_bottom,
            margin_left,
            margin_right,
            footer_reserve,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("page width", self.page_width),
            ("page height", self.page_height),
            ("top margin", self.margin_top),
            ("bottom margin", self.margin_bottom),
            ("left margin", self.margin_left),
            ("right margin", self.margin_right),
            ("footer reserve", self.footer_reserve),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidPageGeometry(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.content_width() <= 0.0 {
            return Err(ConfigError::InvalidPageGeometry(format!(
                "margins leave no horizontal space on a {}mm wide page",
                self.page_width
            )));
        }
        if self.content_height() <= 0.0 {
            return Err(ConfigError::InvalidPageGeometry(format!(
                "margins and footer leave no vertical space on a {}mm tall page",
                self.page_height
            )));
        }
        Ok(())
    }

    /// Get the usable content area width
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Get the vertical budget available to flowed content on one page
    pub fn content_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom - self.footer_reserve
    }

    /// Top edge of the footer band
    pub fn footer_top(&self) -> f32 {
        self.page_height - self.margin_bottom - self.footer_reserve
    }

    /// Horizontal centre of the content area
    pub fn center_x(&self) -> f32 {
        self.margin_left + self.content_width() / 2.0
    }
}
