//! Neighborhood-tolerant pixel matching against a usage-limited target.

use crate::image::{ImageView, Pixel, Rgb};
use crate::search::order::{Offset, SearchOrder};
use crate::search::usage::UsageGrid;

/// Matching parameters for one engine configuration.
#[derive(Clone, Copy, Debug)]
pub struct NeighborhoodMatcher<'a> {
    order: &'a SearchOrder,
    threshold: f32,
    max_usage: u32,
}

impl<'a> NeighborhoodMatcher<'a> {
    pub fn new(order: &'a SearchOrder, threshold: f32, max_usage: u32) -> Self {
        Self {
            order,
            threshold,
            max_usage,
        }
    }

    /// Searches the neighborhood of `pixel` in `target` for an unspent match.
    ///
    /// Offsets are tried in search order and candidates are clamped to the
    /// image, so edge pixels may test the same clamped coordinate repeatedly.
    /// The first candidate within threshold whose usage is below the quota is
    /// claimed in `usage` and its coordinates returned.
    pub fn find_match(
        &self,
        pixel: &Pixel,
        target: ImageView<'_, Rgb>,
        usage: &mut UsageGrid,
    ) -> Option<(usize, usize)> {
        debug_assert_eq!(target.dimensions(), (usage.width(), usage.height()));
        for offset in self.order {
            let (x, y) = clamp_offset(pixel.x, pixel.y, *offset, target.width(), target.height());
            let candidate = Pixel::new(x, y, target.at(x, y));
            if pixel.within_threshold(&candidate, self.threshold)
                && usage.has_capacity(x, y, self.max_usage)
            {
                usage.claim(x, y);
                return Some((x, y));
            }
        }
        None
    }

    /// Like [`find_match`](Self::find_match) but only reports success.
    pub fn is_matched(
        &self,
        pixel: &Pixel,
        target: ImageView<'_, Rgb>,
        usage: &mut UsageGrid,
    ) -> bool {
        self.find_match(pixel, target, usage).is_some()
    }
}

fn clamp_offset(x: usize, y: usize, offset: Offset, width: usize, height: usize) -> (usize, usize) {
    let cx = (x as isize + offset.dx).clamp(0, width as isize - 1);
    let cy = (y as isize + offset.dy).clamp(0, height as isize - 1);
    (cx as usize, cy as usize)
}

#[cfg(test)]
mod tests {
    use super::{clamp_offset, NeighborhoodMatcher};
    use crate::image::{Pixel, Rgb, RgbImage};
    use crate::search::order::{Offset, SearchOrder};
    use crate::search::usage::UsageGrid;

    #[test]
    fn clamping_pins_to_edges() {
        assert_eq!(clamp_offset(0, 0, Offset::new(-2, -1), 4, 3), (0, 0));
        assert_eq!(clamp_offset(3, 2, Offset::new(2, 5), 4, 3), (3, 2));
        assert_eq!(clamp_offset(1, 1, Offset::new(1, -1), 4, 3), (2, 0));
    }

    #[test]
    fn prefers_origin_then_ring_order() {
        let order = SearchOrder::concentric(2).unwrap();
        let matcher = NeighborhoodMatcher::new(&order, 0.0, 1);
        let target = RgbImage::filled(3, 3, Rgb::WHITE).unwrap();
        let mut usage = UsageGrid::new(3, 3);
        let pixel = Pixel::new(1, 1, Rgb::WHITE);

        assert_eq!(
            matcher.find_match(&pixel, target.view(), &mut usage),
            Some((1, 1))
        );
        // Origin is spent; next is the first ring offset (-1, +1).
        assert_eq!(
            matcher.find_match(&pixel, target.view(), &mut usage),
            Some((0, 2))
        );
        assert_eq!(
            matcher.find_match(&pixel, target.view(), &mut usage),
            Some((1, 2))
        );
    }

    #[test]
    fn exhausted_neighborhood_reports_no_match() {
        let order = SearchOrder::concentric(1).unwrap();
        let matcher = NeighborhoodMatcher::new(&order, 0.2, 1);
        let target = RgbImage::filled(2, 2, Rgb::BLACK).unwrap();
        let mut usage = UsageGrid::new(2, 2);
        let pixel = Pixel::new(0, 0, Rgb::BLACK);

        assert!(matcher.is_matched(&pixel, target.view(), &mut usage));
        assert!(!matcher.is_matched(&pixel, target.view(), &mut usage));
        assert_eq!(usage.count(0, 0), 1);
    }

    #[test]
    fn color_outside_threshold_is_not_claimed() {
        let order = SearchOrder::concentric(2).unwrap();
        let matcher = NeighborhoodMatcher::new(&order, 0.2, 3);
        let target = RgbImage::filled(3, 3, Rgb::BLACK).unwrap();
        let mut usage = UsageGrid::new(3, 3);
        let pixel = Pixel::new(1, 1, Rgb::RED);

        assert_eq!(matcher.find_match(&pixel, target.view(), &mut usage), None);
        assert_eq!(usage.total(), 0);
    }

    #[test]
    fn corner_pixel_retries_clamped_candidate_under_larger_quota() {
        let order = SearchOrder::concentric(2).unwrap();
        let matcher = NeighborhoodMatcher::new(&order, 0.0, 2);
        let mut target = RgbImage::filled(2, 2, Rgb::BLACK).unwrap();
        target.put(0, 0, Rgb::WHITE);
        let mut usage = UsageGrid::new(2, 2);
        let pixel = Pixel::new(0, 0, Rgb::WHITE);

        assert!(matcher.is_matched(&pixel, target.view(), &mut usage));
        assert!(matcher.is_matched(&pixel, target.view(), &mut usage));
        assert!(!matcher.is_matched(&pixel, target.view(), &mut usage));
        assert_eq!(usage.count(0, 0), 2);
    }
}
