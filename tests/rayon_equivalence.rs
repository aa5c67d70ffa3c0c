#![cfg(feature = "rayon")]

use shiftdiff::{Comparator, CompareConfig, Outcome, Rgb, RgbImage};

fn make_image(width: usize, height: usize, seed: usize) -> RgbImage {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11 + seed) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.push(Rgb::new(value as u8, (value / 2) as u8, 255 - value as u8));
        }
    }
    RgbImage::new(data, width, height).unwrap()
}

#[test]
fn parallel_directions_match_sequential() {
    let a = make_image(96, 64, 0);
    let b = make_image(96, 64, 17);

    let base_cfg = CompareConfig {
        max_box_width: 20,
        max_box_height: 10,
        ..CompareConfig::default()
    };
    let seq = Comparator::new(CompareConfig {
        parallel: false,
        ..base_cfg.clone()
    })
    .unwrap();
    let par = Comparator::new(CompareConfig {
        parallel: true,
        ..base_cfg
    })
    .unwrap();

    let seq_result = seq.compare_detailed(a.view(), b.view()).unwrap();
    let par_result = par.compare_detailed(a.view(), b.view()).unwrap();
    assert_eq!(seq_result.stats, par_result.stats);

    match (&seq_result.outcome, &par_result.outcome) {
        (Outcome::Mismatch(s), Outcome::Mismatch(p)) => {
            assert_eq!(s.forward_comparison, p.forward_comparison);
            assert_eq!(s.backward_comparison, p.backward_comparison);
            assert_eq!(s.forward_diff, p.forward_diff);
            assert_eq!(s.backward_diff, p.backward_diff);
        }
        (Outcome::Match, Outcome::Match) => {}
        (s, p) => panic!("outcomes differ: {s:?} vs {p:?}"),
    }
}

#[test]
fn comparator_is_shareable_across_threads() {
    let a = make_image(32, 32, 0);
    let b = make_image(32, 32, 5);
    let cmp = Comparator::new(CompareConfig {
        parallel: true,
        ..CompareConfig::default()
    })
    .unwrap();

    let expected = cmp.compare_detailed(a.view(), b.view()).unwrap().stats;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| cmp.compare_detailed(a.view(), b.view()).unwrap().stats))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
