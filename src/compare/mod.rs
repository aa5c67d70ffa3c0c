//! Bidirectional comparison and verdict.
//!
//! A comparison runs two directional passes: the forward pass looks for every
//! pixel of A in B, the backward pass for every pixel of B in A. Each pass owns
//! a fresh [`UsageGrid`] and [`BoxAccumulator`]; the passes share only the
//! immutable configuration and search order, so they may run concurrently.
//!
//! Within a pass, source pixels are visited column by column (every `y` for
//! `x = 0`, then `x = 1`, ...). Usage quota is consumed in that order, which
//! fixes both the final usage counts and the box membership.

mod config;

pub use config::{CompareConfig, PixelTotal};

use crate::cluster::{BoxAccumulator, ComparisonBox};
use crate::image::{ImageView, Pixel, Rgb, RgbImage};
use crate::render::{annotate, usage_heatmap};
use crate::search::{NeighborhoodMatcher, SearchOrder, UsageGrid};
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::{ShiftDiffError, ShiftDiffResult};
use std::fmt;

/// Which image plays the source role in a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// A is the source, B the target.
    Forward,
    /// B is the source, A the target.
    Backward,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one directional pass.
#[derive(Clone, Debug)]
pub struct DirectionalResult {
    /// Source pixels without an available match in the target.
    pub failed: usize,
    /// Difference boxes in creation order.
    pub boxes: Vec<ComparisonBox>,
    /// Copy of the source with `boxes` outlined.
    pub comparison_image: RgbImage,
    /// Grayscale rendering of target usage counts.
    pub diff_image: RgbImage,
}

/// The four images returned for a mismatch.
#[derive(Clone, Debug)]
pub struct MismatchImages {
    pub forward_comparison: RgbImage,
    pub backward_comparison: RgbImage,
    pub forward_diff: RgbImage,
    pub backward_diff: RgbImage,
}

/// Verdict of a comparison.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// Width or height differ; nothing was scanned.
    SizeMismatch,
    /// Failure ratio is within the allowed percentage.
    Match,
    /// Failure ratio exceeds the allowed percentage.
    Mismatch(MismatchImages),
}

impl Outcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Match)
    }

    /// Returns the result images, present only for [`Outcome::Mismatch`].
    pub fn images(&self) -> Option<&MismatchImages> {
        match self {
            Outcome::Mismatch(images) => Some(images),
            _ => None,
        }
    }
}

/// Counts behind a verdict for equally sized images.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompareStats {
    pub forward_failed: usize,
    pub backward_failed: usize,
    pub forward_boxes: usize,
    pub backward_boxes: usize,
    /// Denominator chosen by [`PixelTotal`].
    pub total_units: u64,
    /// `(forward_failed + backward_failed) / total_units`.
    pub failure_ratio: f32,
}

impl CompareStats {
    pub fn total_failed(&self) -> usize {
        self.forward_failed + self.backward_failed
    }
}

/// Outcome together with its diagnostics.
#[derive(Clone, Debug)]
pub struct Comparison {
    pub outcome: Outcome,
    /// Absent for [`Outcome::SizeMismatch`].
    pub stats: Option<CompareStats>,
}

/// Reusable comparison engine.
///
/// Holds the validated configuration and the precomputed search order; both
/// are read-only, so one `Comparator` can serve many comparisons and threads.
#[derive(Clone, Debug)]
pub struct Comparator {
    cfg: CompareConfig,
    order: SearchOrder,
}

impl Comparator {
    /// Validates `cfg` and precomputes the search order.
    pub fn new(cfg: CompareConfig) -> ShiftDiffResult<Self> {
        cfg.validate()?;
        let order = SearchOrder::concentric(cfg.max_search_distance)?;
        Ok(Self { cfg, order })
    }

    pub fn config(&self) -> &CompareConfig {
        &self.cfg
    }

    pub fn search_order(&self) -> &SearchOrder {
        &self.order
    }

    /// Compares `a` against `b` and returns the verdict.
    pub fn compare(
        &self,
        a: ImageView<'_, Rgb>,
        b: ImageView<'_, Rgb>,
    ) -> ShiftDiffResult<Outcome> {
        Ok(self.compare_detailed(a, b)?.outcome)
    }

    /// Compares `a` against `b` and also returns the counts behind the verdict.
    pub fn compare_detailed(
        &self,
        a: ImageView<'_, Rgb>,
        b: ImageView<'_, Rgb>,
    ) -> ShiftDiffResult<Comparison> {
        if a.dimensions() != b.dimensions() {
            trace_event!(
                "compare_outcome",
                outcome = "size_mismatch",
                a_width = a.width(),
                b_width = b.width()
            );
            return Ok(Comparison {
                outcome: Outcome::SizeMismatch,
                stats: None,
            });
        }

        let _span = trace_span!("compare", width = a.width(), height = a.height()).entered();

        let (forward, backward) = self.run_both(a, b)?;
        let total_units = self.cfg.pixel_total.units(a, b);
        let stats = CompareStats {
            forward_failed: forward.failed,
            backward_failed: backward.failed,
            forward_boxes: forward.boxes.len(),
            backward_boxes: backward.boxes.len(),
            total_units,
            failure_ratio: failure_ratio(forward.failed + backward.failed, total_units),
        };

        let outcome = if within_tolerance(stats.failure_ratio, self.cfg.percent_allowed_different) {
            Outcome::Match
        } else {
            Outcome::Mismatch(MismatchImages {
                forward_comparison: forward.comparison_image,
                backward_comparison: backward.comparison_image,
                forward_diff: forward.diff_image,
                backward_diff: backward.diff_image,
            })
        };

        trace_event!(
            "compare_outcome",
            failed = stats.total_failed(),
            total = total_units,
            ratio = stats.failure_ratio,
            matched = outcome.is_match()
        );

        Ok(Comparison {
            outcome,
            stats: Some(stats),
        })
    }

    /// Runs a single pass treating `source` as the source image.
    pub fn compare_directional(
        &self,
        source: ImageView<'_, Rgb>,
        target: ImageView<'_, Rgb>,
    ) -> ShiftDiffResult<DirectionalResult> {
        if source.dimensions() != target.dimensions() {
            return Err(ShiftDiffError::SizeMismatch {
                source_width: source.width(),
                source_height: source.height(),
                target_width: target.width(),
                target_height: target.height(),
            });
        }
        self.run_pass(source, target, Direction::Forward)
    }

    #[cfg(feature = "rayon")]
    fn run_both(
        &self,
        a: ImageView<'_, Rgb>,
        b: ImageView<'_, Rgb>,
    ) -> ShiftDiffResult<(DirectionalResult, DirectionalResult)> {
        if self.cfg.parallel {
            let (forward, backward) = rayon::join(
                || self.run_pass(a, b, Direction::Forward),
                || self.run_pass(b, a, Direction::Backward),
            );
            return Ok((forward?, backward?));
        }
        self.run_both_sequential(a, b)
    }

    #[cfg(not(feature = "rayon"))]
    fn run_both(
        &self,
        a: ImageView<'_, Rgb>,
        b: ImageView<'_, Rgb>,
    ) -> ShiftDiffResult<(DirectionalResult, DirectionalResult)> {
        self.run_both_sequential(a, b)
    }

    fn run_both_sequential(
        &self,
        a: ImageView<'_, Rgb>,
        b: ImageView<'_, Rgb>,
    ) -> ShiftDiffResult<(DirectionalResult, DirectionalResult)> {
        let forward = self.run_pass(a, b, Direction::Forward)?;
        let backward = self.run_pass(b, a, Direction::Backward)?;
        Ok((forward, backward))
    }

    fn run_pass(
        &self,
        source: ImageView<'_, Rgb>,
        target: ImageView<'_, Rgb>,
        direction: Direction,
    ) -> ShiftDiffResult<DirectionalResult> {
        let _span = trace_span!("directional_pass", direction = direction.as_str()).entered();

        let matcher = NeighborhoodMatcher::new(
            &self.order,
            self.cfg.pixel_threshold,
            self.cfg.max_usage_per_pixel,
        );
        let mut usage = UsageGrid::new(target.width(), target.height());
        let mut boxes = BoxAccumulator::new(self.cfg.max_box_width, self.cfg.max_box_height);
        let mut failed = 0usize;

        // Column-major: quota consumption depends on this order.
        for x in 0..source.width() {
            for y in 0..source.height() {
                let pixel = Pixel::new(x, y, source.at(x, y));
                if !matcher.is_matched(&pixel, target, &mut usage) {
                    let idx = boxes.add_point(x, y);
                    trace_debug!("unmatched_pixel", x = x, y = y, box_idx = idx);
                    failed += 1;
                }
            }
        }

        let boxes = boxes.into_boxes();
        let comparison_image = annotate(source, &boxes, self.cfg.outline_color)?;
        let diff_image = usage_heatmap(&usage, self.cfg.max_usage_per_pixel)?;

        trace_event!(
            "directional_result",
            direction = direction.as_str(),
            failed = failed,
            boxes = boxes.len()
        );

        Ok(DirectionalResult {
            failed,
            boxes,
            comparison_image,
            diff_image,
        })
    }
}

/// Compares two images with a one-off engine built from `cfg`.
///
/// Prefer [`Comparator`] when comparing many pairs with the same settings.
pub fn compare(
    a: ImageView<'_, Rgb>,
    b: ImageView<'_, Rgb>,
    cfg: &CompareConfig,
) -> ShiftDiffResult<Outcome> {
    Comparator::new(cfg.clone())?.compare(a, b)
}

/// `failed / total_units` in single precision.
pub fn failure_ratio(failed: usize, total_units: u64) -> f32 {
    if total_units == 0 {
        return 0.0;
    }
    failed as f32 / total_units as f32
}

/// True when `ratio` does not exceed `allowed`.
#[inline]
pub fn within_tolerance(ratio: f32, allowed: f32) -> bool {
    ratio <= allowed
}
