//! Unit conversion and aspect-ratio scaling

/// Millimetres per PostScript point
pub const MM_PER_PT: f32 = 0.352_778;

/// Millimetres per CSS pixel (96 DPI)
pub const MM_PER_PX: f32 = 25.4 / 96.0;

/// Tolerance for comparing accumulated layout offsets, in mm
pub const LAYOUT_EPSILON: f32 = 1e-4;

/// Line height multiplier applied to the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_PT
}

pub fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// Intrinsic size of an image in mm, taking one pixel as one CSS pixel
pub fn px_to_mm(px: u32) -> f32 {
    px as f32 * MM_PER_PX
}

/// Height of one text line in mm for a font size in points
pub fn line_height_mm(font_size: f32) -> f32 {
    pt_to_mm(font_size * LINE_HEIGHT_FACTOR)
}

/// Scale `(intrinsic_w, intrinsic_h)` into the `(max_w, max_h)` box.
///
/// The aspect ratio is always preserved. When either dimension exceeds its
/// bound the size shrinks by the smaller of the two ratios. Smaller inputs
/// are returned unchanged unless `allow_upscale`, in which case they grow
/// until one bound is reached. Degenerate inputs yield `(0.0, 0.0)`.
pub fn scale_to_fit(
    intrinsic_w: f32,
    intrinsic_h: f32,
    max_w: f32,
    max_h: f32,
    allow_upscale: bool,
) -> (f32, f32) {
    if intrinsic_w <= 0.0 || intrinsic_h <= 0.0 || max_w <= 0.0 || max_h <= 0.0 {
        return (0.0, 0.0);
    }

    let ratio = (max_w / intrinsic_w).min(max_h / intrinsic_h);
    let exceeds = intrinsic_w > max_w || intrinsic_h > max_h;

    if exceeds || allow_upscale {
        (intrinsic_w * ratio, intrinsic_h * ratio)
    } else {
        (intrinsic_w, intrinsic_h)
    }
}
