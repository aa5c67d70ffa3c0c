//! Concentric-ring search order.
//!
//! Offsets are emitted ring by ring, nearest first, so the first-fit matcher
//! prefers close candidates over distant ones.

use crate::util::{ShiftDiffError, ShiftDiffResult};

/// Largest accepted search distance; the table holds `(2 * 1024 - 1)^2` offsets.
pub const MAX_SEARCH_DISTANCE: usize = 1024;

/// Relative offset from a source pixel to a candidate in the target image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: isize,
    pub dy: isize,
}

impl Offset {
    pub const fn new(dx: isize, dy: isize) -> Self {
        Self { dx, dy }
    }

    /// Chebyshev distance from the origin.
    pub fn ring(&self) -> usize {
        self.dx.unsigned_abs().max(self.dy.unsigned_abs())
    }
}

/// Precomputed, immutable offset table for a maximum search distance.
///
/// Ring 0 is `(0, 0)`. Ring `r` holds `8r` offsets: the `dy = +r` edge with
/// `dx` ascending, the `dx = +r` edge with `dy` descending, the `dy = -r` edge
/// with `dx` descending, then the `dx = -r` edge with `dy` ascending. Each edge
/// skips the corner emitted by the previous one. Rings run up to `distance - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOrder {
    distance: usize,
    offsets: Vec<Offset>,
}

impl SearchOrder {
    /// Builds the table for `1 <= distance <= MAX_SEARCH_DISTANCE`, yielding
    /// `(2 * distance - 1)^2` offsets.
    pub fn concentric(distance: usize) -> ShiftDiffResult<Self> {
        if distance == 0 {
            return Err(ShiftDiffError::InvalidConfig {
                field: "max_search_distance",
                reason: "must be at least 1",
            });
        }
        if distance > MAX_SEARCH_DISTANCE {
            return Err(ShiftDiffError::InvalidConfig {
                field: "max_search_distance",
                reason: "must be at most 1024",
            });
        }
        let side = (2 * distance - 1) * (2 * distance - 1);
        let levels = distance as isize;

        let mut offsets = Vec::new();
        offsets
            .try_reserve_exact(side)
            .map_err(|_| ShiftDiffError::InvalidConfig {
                field: "max_search_distance",
                reason: "offset table too large",
            })?;
        offsets.push(Offset::new(0, 0));
        for r in 1..levels {
            for dx in -r..=r {
                offsets.push(Offset::new(dx, r));
            }
            for dy in (-r..r).rev() {
                offsets.push(Offset::new(r, dy));
            }
            for dx in (-r..r).rev() {
                offsets.push(Offset::new(dx, -r));
            }
            for dy in (-r + 1)..r {
                offsets.push(Offset::new(-r, dy));
            }
        }
        debug_assert_eq!(offsets.len(), side);

        Ok(Self { distance, offsets })
    }

    /// Returns the configured maximum search distance.
    pub fn distance(&self) -> usize {
        self.distance
    }

    /// Returns the offsets in visiting order.
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Offset> {
        self.offsets.iter()
    }
}

impl<'a> IntoIterator for &'a SearchOrder {
    type Item = &'a Offset;
    type IntoIter = std::slice::Iter<'a, Offset>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.iter()
    }
}
