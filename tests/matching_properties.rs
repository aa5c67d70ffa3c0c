//! Behavioral properties of the greedy, quota-limited matcher.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shiftdiff::{Comparator, CompareConfig, Rgb, RgbImage};

fn noise_image(rng: &mut StdRng, width: usize, height: usize) -> RgbImage {
    let data = (0..width * height)
        .map(|_| {
            Rgb::new(
                rng.random_range(0..=255),
                rng.random_range(0..=255),
                rng.random_range(0..=255),
            )
        })
        .collect();
    RgbImage::new(data, width, height).unwrap()
}

/// Copies `base` and perturbs roughly `percent`% of pixels by up to `amount`.
fn perturb(rng: &mut StdRng, base: &RgbImage, percent: u32, amount: i16) -> RgbImage {
    let data = base
        .data()
        .iter()
        .map(|&c| {
            if rng.random_range(0..100) >= percent {
                return c;
            }
            let mut jitter = |v: u8| {
                let delta = rng.random_range(-amount..=amount);
                (i16::from(v) + delta).clamp(0, 255) as u8
            };
            Rgb::new(jitter(c.r), jitter(c.g), jitter(c.b))
        })
        .collect();
    RgbImage::new(data, base.width(), base.height()).unwrap()
}

fn gray_row(values: &[u8]) -> RgbImage {
    RgbImage::new(values.iter().copied().map(Rgb::gray).collect(), values.len(), 1).unwrap()
}

#[test]
fn comparisons_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let a = noise_image(&mut rng, 32, 24);
    let b = perturb(&mut rng, &a, 30, 80);
    let cmp = Comparator::new(CompareConfig::default()).unwrap();

    let first = cmp.compare_detailed(a.view(), b.view()).unwrap();
    let second = cmp.compare_detailed(a.view(), b.view()).unwrap();
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.outcome.is_match(), second.outcome.is_match());

    for (source, target) in [(&a, &b), (&b, &a)] {
        let p1 = cmp.compare_directional(source.view(), target.view()).unwrap();
        let p2 = cmp.compare_directional(source.view(), target.view()).unwrap();
        assert_eq!(p1.failed, p2.failed);
        assert_eq!(p1.boxes, p2.boxes);
        assert_eq!(p1.comparison_image, p2.comparison_image);
        assert_eq!(p1.diff_image, p2.diff_image);
    }
}

#[test]
fn identity_holds_for_random_images_and_configs() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..8 {
        let width = rng.random_range(1..20);
        let height = rng.random_range(1..20);
        let img = noise_image(&mut rng, width, height);
        let cfg = CompareConfig {
            pixel_threshold: rng.random_range(0.0..=1.0),
            max_usage_per_pixel: rng.random_range(1..4),
            max_search_distance: rng.random_range(1..6),
            percent_allowed_different: 0.0,
            ..CompareConfig::default()
        };
        let cmp = Comparator::new(cfg).unwrap();
        let detailed = cmp.compare_detailed(img.view(), img.view()).unwrap();
        assert!(detailed.outcome.is_match());
        assert_eq!(detailed.stats.unwrap().forward_boxes, 0);
        assert_eq!(detailed.stats.unwrap().backward_boxes, 0);
    }
}

#[test]
fn boxes_respect_size_limits() {
    let mut rng = StdRng::seed_from_u64(21);
    let a = noise_image(&mut rng, 40, 30);
    let b = noise_image(&mut rng, 40, 30);
    for (max_w, max_h) in [(1, 1), (3, 2), (7, 11), (100, 50)] {
        let cmp = Comparator::new(CompareConfig {
            pixel_threshold: 0.05,
            max_box_width: max_w,
            max_box_height: max_h,
            ..CompareConfig::default()
        })
        .unwrap();
        let pass = cmp.compare_directional(a.view(), b.view()).unwrap();
        assert!(pass.failed > 0);
        for bx in &pass.boxes {
            assert!(bx.x1 <= bx.x2 && bx.y1 <= bx.y2);
            assert!(bx.width() <= max_w);
            assert!(bx.height() <= max_h);
        }
    }
}

#[test]
fn threshold_is_monotonic_when_quota_does_not_bind() {
    let mut rng = StdRng::seed_from_u64(3);
    let a = noise_image(&mut rng, 24, 24);
    let b = perturb(&mut rng, &a, 60, 120);

    // Each target pixel has at most 9 source pixels within distance 1.
    let mut previous = usize::MAX;
    for step in 0..=10 {
        let cmp = Comparator::new(CompareConfig {
            pixel_threshold: step as f32 / 10.0,
            max_search_distance: 2,
            max_usage_per_pixel: 9,
            ..CompareConfig::default()
        })
        .unwrap();
        let failed = cmp
            .compare_detailed(a.view(), b.view())
            .unwrap()
            .stats
            .unwrap()
            .total_failed();
        assert!(failed <= previous, "threshold step {step}: {failed} > {previous}");
        previous = failed;
    }
    assert_eq!(previous, 0);
}

#[test]
fn higher_threshold_can_displace_a_later_claim() {
    // Source (100, 135, 255) against target (130, 255, 100), quota 1.
    // At a low threshold the first pixel reaches past the 130 and takes the
    // 100, leaving the 130 for the second pixel. At a higher threshold the
    // first pixel accepts the nearer 130 and the second pixel has nothing
    // left within its tolerance.
    let source = gray_row(&[100, 135, 255]);
    let target = gray_row(&[130, 255, 100]);
    let failed_at = |threshold: f32| {
        let cmp = Comparator::new(CompareConfig {
            pixel_threshold: threshold,
            max_search_distance: 3,
            max_usage_per_pixel: 1,
            ..CompareConfig::default()
        })
        .unwrap();
        cmp.compare_directional(source.view(), target.view())
            .unwrap()
            .failed
    };
    assert_eq!(failed_at(0.05), 0);
    assert_eq!(failed_at(0.125), 1);
}

#[test]
fn raising_quota_lets_more_pixels_share_a_popular_target() {
    let source = RgbImage::filled(3, 3, Rgb::WHITE).unwrap();
    let mut target = RgbImage::filled(3, 3, Rgb::BLACK).unwrap();
    target.put(1, 1, Rgb::WHITE);

    let mut previous_matched = 0;
    for quota in 1..=10u32 {
        let cmp = Comparator::new(CompareConfig {
            max_search_distance: 2,
            max_usage_per_pixel: quota,
            ..CompareConfig::default()
        })
        .unwrap();
        let pass = cmp.compare_directional(source.view(), target.view()).unwrap();
        let matched = 9 - pass.failed;
        assert_eq!(matched, quota.min(9) as usize);
        assert!(matched >= previous_matched);
        previous_matched = matched;

        let intensity = (255 * quota.min(9) / quota) as u8;
        assert_eq!(pass.diff_image.get(1, 1), Some(Rgb::gray(intensity)));
    }
}

#[test]
fn directions_are_symmetric_under_swap() {
    let mut rng = StdRng::seed_from_u64(99);
    let a = noise_image(&mut rng, 20, 20);
    let b = perturb(&mut rng, &a, 40, 90);
    let cmp = Comparator::new(CompareConfig::default()).unwrap();

    let ab = cmp.compare_detailed(a.view(), b.view()).unwrap().stats.unwrap();
    let ba = cmp.compare_detailed(b.view(), a.view()).unwrap().stats.unwrap();
    assert_eq!(ab.forward_failed, ba.backward_failed);
    assert_eq!(ab.backward_failed, ba.forward_failed);
    assert_eq!(ab.failure_ratio, ba.failure_ratio);
}
