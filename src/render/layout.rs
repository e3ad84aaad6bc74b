//! Placement helpers for showing and printing a rendered code.
//!
//! Pure functions over rectangles so any windowing or printing backend can use
//! them.

use crate::models::Rect;

/// Separator between title and field label in captions
pub const CAPTION_SEPARATOR: &str = " - ";

/// Place an image of `image_width × image_height` inside `bounds`.
///
/// Images that already fit keep their natural size (no upscaling). Larger ones
/// are scaled down by `min(bw / iw, bh / ih)`. Either way the result is centered
/// on both axes.
pub fn fit_centered(image_width: u32, image_height: u32, bounds: Rect) -> Rect {
    let (w, h) = (image_width as f32, image_height as f32);
    let bw = bounds.width.max(0.0);
    let bh = bounds.height.max(0.0);

    let scale = if w <= bw && h <= bh {
        1.0
    } else {
        (bw / w).min(bh / h)
    };
    let (sw, sh) = (w * scale, h * scale);

    Rect::new(
        bounds.x + 0.5 * (bw - sw),
        bounds.y + 0.5 * (bh - sh),
        sw,
        sh,
    )
}

/// Areas of a printed page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintLayout {
    /// One text line at the top of the margin box for the caption
    pub caption: Rect,
    /// Where the code image is drawn
    pub image: Rect,
}

/// Lay out a page: caption line on top, code centered in the remaining space.
pub fn print_layout(
    margin_bounds: Rect,
    line_height: f32,
    image_width: u32,
    image_height: u32,
) -> PrintLayout {
    let line_height = line_height.clamp(0.0, margin_bounds.height.max(0.0));
    let caption = Rect::new(margin_bounds.x, margin_bounds.y, margin_bounds.width, line_height);
    let remaining = Rect::new(
        margin_bounds.x,
        margin_bounds.y + line_height,
        margin_bounds.width,
        margin_bounds.height - line_height,
    );
    PrintLayout {
        caption,
        image: fit_centered(image_width, image_height, remaining),
    }
}

/// Keep a display window square: origin stays, both sides take the smaller one.
pub fn clamp_to_square(requested: Rect) -> Rect {
    let side = requested.width.min(requested.height).max(0.0);
    Rect::new(requested.x, requested.y, side, side)
}

/// Join the non-empty parts, trimmed, with [`CAPTION_SEPARATOR`].
pub fn caption(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(CAPTION_SEPARATOR)
}
