//! Visualizations for one directional pass.
//!
//! The annotated image is a copy of the source with box outlines drawn over
//! it; the heat image maps usage counts to gray levels.

use crate::cluster::ComparisonBox;
use crate::image::{ImageView, Rgb, RgbImage};
use crate::search::UsageGrid;
use crate::util::ShiftDiffResult;

/// Draws the outline of `b` onto `image`.
///
/// Edges use half-open ranges: the `y1`/`y2` rows cover `x1..x2` and the
/// `x1`/`x2` columns cover `y1..y2`, so the `(x2, y2)` corner stays undrawn
/// and a single-pixel box draws nothing.
pub fn draw_box(image: &mut RgbImage, b: &ComparisonBox, color: Rgb) {
    for x in b.x1..b.x2 {
        image.put(x, b.y1, color);
        image.put(x, b.y2, color);
    }
    for y in b.y1..b.y2 {
        image.put(b.x1, y, color);
        image.put(b.x2, y, color);
    }
}

/// Draws every box in list order.
pub fn draw_boxes(image: &mut RgbImage, boxes: &[ComparisonBox], color: Rgb) {
    for b in boxes {
        draw_box(image, b, color);
    }
}

/// Copies `source` and outlines `boxes` on the copy.
pub fn annotate(
    source: ImageView<'_, Rgb>,
    boxes: &[ComparisonBox],
    color: Rgb,
) -> ShiftDiffResult<RgbImage> {
    let mut image = RgbImage::from_view(source)?;
    draw_boxes(&mut image, boxes, color);
    Ok(image)
}

/// Gray level for a usage count: `255 * count / max_usage`, integer division.
///
/// Computed in `u64` so the product is exact for any `u32` count.
#[inline]
pub fn usage_intensity(count: u32, max_usage: u32) -> u64 {
    255 * u64::from(count) / u64::from(max_usage)
}

/// Renders `usage` as a grayscale image with equal RGB channels.
///
/// Counts never exceed `max_usage` because the matcher checks the quota before
/// claiming, so every intensity fits in a byte.
pub fn usage_heatmap(usage: &UsageGrid, max_usage: u32) -> ShiftDiffResult<RgbImage> {
    let data = usage
        .as_slice()
        .iter()
        .map(|&count| {
            let intensity = usage_intensity(count, max_usage);
            debug_assert!(intensity <= 255);
            Rgb::gray(intensity as u8)
        })
        .collect();
    RgbImage::new(data, usage.width(), usage.height())
}
