//! Per-target-pixel usage counters for one directional pass.

/// How many times each target pixel has been claimed as a match.
///
/// A fresh grid is created for every directional pass and discarded after the
/// diff image has been rendered from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageGrid {
    counts: Vec<u32>,
    width: usize,
    height: usize,
}

impl UsageGrid {
    /// Creates a zeroed grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            counts: vec![0; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the usage count at `(x, y)`.
    #[inline]
    pub fn count(&self, x: usize, y: usize) -> u32 {
        self.counts[self.index(x, y)]
    }

    /// True while `(x, y)` can still be claimed under `quota`.
    #[inline]
    pub fn has_capacity(&self, x: usize, y: usize, quota: u32) -> bool {
        self.count(x, y) < quota
    }

    /// Records one claim of `(x, y)`.
    #[inline]
    pub fn claim(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.counts[idx] += 1;
    }

    /// Sum of all claims, equal to the number of matched source pixels.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Row-major counters.
    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }
}
