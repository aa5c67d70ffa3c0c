//! Comparison configuration.

use crate::image::{ImageView, Rgb};
use crate::search::MAX_SEARCH_DISTANCE;
use crate::util::{ShiftDiffError, ShiftDiffResult};

/// Denominator used to turn failed-pixel counts into a failure ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelTotal {
    /// `width(a) * width(b) * 2`.
    ///
    /// This ignores the height, which looks unintended, but it is the formula
    /// existing baselines were tuned against and stays the default.
    #[default]
    WidthSquared,
    /// `width * height * 2`, one unit per pixel and direction.
    WidthHeight,
}

impl PixelTotal {
    /// Total compared units for two equally sized images.
    pub fn units<T>(self, a: ImageView<'_, T>, b: ImageView<'_, T>) -> u64 {
        match self {
            PixelTotal::WidthSquared => a.width() as u64 * b.width() as u64 * 2,
            PixelTotal::WidthHeight => a.width() as u64 * a.height() as u64 * 2,
        }
    }
}

/// Tolerances and rendering options for a comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct CompareConfig {
    /// Maximum per-channel difference, in `[0, 1]`, for two pixels to match.
    pub pixel_threshold: f32,
    /// How many source pixels may claim the same target pixel.
    pub max_usage_per_pixel: u32,
    /// Ring radius bound for the neighborhood search; 1 compares in place.
    pub max_search_distance: usize,
    /// Maximum `x2 - x1` of a difference box.
    pub max_box_width: usize,
    /// Maximum `y2 - y1` of a difference box.
    pub max_box_height: usize,
    /// Largest failure ratio still reported as a match.
    pub percent_allowed_different: f32,
    /// Outline color for difference boxes.
    pub outline_color: Rgb,
    /// Denominator of the failure ratio.
    pub pixel_total: PixelTotal,
    /// Run the two directions concurrently (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            pixel_threshold: 0.2,
            max_usage_per_pixel: 1,
            max_search_distance: 5,
            max_box_width: 100,
            max_box_height: 50,
            percent_allowed_different: 0.00005,
            outline_color: Rgb::RED,
            pixel_total: PixelTotal::WidthSquared,
            parallel: false,
        }
    }
}

impl CompareConfig {
    /// Rejects values that would make the comparison meaningless.
    pub fn validate(&self) -> ShiftDiffResult<()> {
        if !self.pixel_threshold.is_finite() || !(0.0..=1.0).contains(&self.pixel_threshold) {
            return Err(invalid("pixel_threshold", "must be within [0, 1]"));
        }
        if self.max_usage_per_pixel == 0 {
            return Err(invalid("max_usage_per_pixel", "must be at least 1"));
        }
        if self.max_search_distance == 0 {
            return Err(invalid("max_search_distance", "must be at least 1"));
        }
        if self.max_search_distance > MAX_SEARCH_DISTANCE {
            return Err(invalid("max_search_distance", "must be at most 1024"));
        }
        if self.max_box_width == 0 {
            return Err(invalid("max_box_width", "must be at least 1"));
        }
        if self.max_box_height == 0 {
            return Err(invalid("max_box_height", "must be at least 1"));
        }
        if !self.percent_allowed_different.is_finite() || self.percent_allowed_different < 0.0 {
            return Err(invalid(
                "percent_allowed_different",
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ShiftDiffError {
    ShiftDiffError::InvalidConfig { field, reason }
}
