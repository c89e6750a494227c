use endmember::classify::MIN_HOT_NDVI;
use endmember::{
    classify, find_pair, is_temperature_sorted, quantiles, scene_cuts, window_pairs,
    QuantileTriple, RasterView, SceneBands, SearchWindow, Variant,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WIDTH: usize = 80;
const HEIGHT: usize = 80;

struct Scene {
    ndvi: Vec<f32>,
    ts: Vec<f32>,
    albedo: Vec<f32>,
    rn: Vec<f32>,
    g: Vec<f32>,
}

impl Scene {
    fn bands(&self) -> SceneBands<'_> {
        SceneBands::from_slices(
            &self.ndvi,
            &self.ts,
            &self.albedo,
            &self.rn,
            &self.g,
            WIDTH,
            HEIGHT,
        )
        .unwrap()
    }
}

fn band(rng: &mut StdRng, lo: f32, hi: f32, invalid: f64) -> Vec<f32> {
    (0..WIDTH * HEIGHT)
        .map(|_| {
            if rng.random_bool(invalid) {
                f32::NAN
            } else {
                rng.random_range(lo..hi)
            }
        })
        .collect()
}

fn random_scene(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    Scene {
        ndvi: band(&mut rng, 0.12, 0.95, 0.02),
        ts: band(&mut rng, 285.0, 325.0, 0.02),
        albedo: band(&mut rng, 0.05, 0.45, 0.02),
        rn: band(&mut rng, 350.0, 650.0, 0.01),
        g: band(&mut rng, 20.0, 120.0, 0.01),
    }
}

/// Percentages whose `f32` fraction is not below the decimal value, so the
/// nearest-rank index is exactly `pct * pos / 100`.
const PERCENTAGES: [usize; 6] = [15, 20, 30, 50, 60, 97];

#[test]
fn quantiles_match_sorted_order_statistics() {
    let mut rng = StdRng::seed_from_u64(123);
    for len in [1usize, 2, 7, 10, 64, 333, 1000] {
        let mut data: Vec<f32> = (0..len).map(|_| rng.random_range(-50.0..50.0)).collect();
        for value in data.iter_mut() {
            match rng.random_range(0..10) {
                0 => *value = f32::NAN,
                1 => *value = f32::INFINITY,
                _ => {}
            }
        }
        let mut sorted: Vec<f32> = data.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f32::total_cmp);
        let view = RasterView::from_slice(&data, len, 1).unwrap();

        for pct in PERCENTAGES {
            let q = pct as f32 / 100.0;
            let got = quantiles(view, QuantileTriple::new(q, q, q), "test");
            if sorted.is_empty() {
                assert!(got.is_err());
                continue;
            }
            let pos = sorted.len();
            let expected = sorted[(pct * pos / 100).min(pos - 1)];
            assert_eq!(got.unwrap().low, expected, "pct={pct} pos={pos}");
        }
    }
}

#[test]
fn decimal_cuts_over_ranked_values() {
    // 0.7f32 and 0.9f32 sit just below their decimal values.
    for pos in [10usize, 20, 30] {
        let data: Vec<f32> = (0..pos).rev().map(|v| v as f32).collect();
        let view = RasterView::from_slice(&data, pos, 1).unwrap();
        let cuts = quantiles(view, QuantileTriple::new(0.3, 0.7, 0.9), "test").unwrap();
        assert_eq!(cuts.low, (3 * pos / 10) as f32);
        assert_eq!(cuts.mid, (7 * pos / 10) as f32);
        assert_eq!(cuts.high, (9 * pos / 10) as f32);
    }
}

#[test]
fn candidate_sets_are_disjoint_sorted_and_within_cuts() {
    let mut classified = 0;
    for seed in 0..6u64 {
        let scene = random_scene(seed);
        let bands = scene.bands();
        for variant in [Variant::Stepp, Variant::Asebal] {
            let Ok(sets) = classify(&bands, variant) else {
                continue;
            };
            classified += 1;
            let cuts = scene_cuts(&bands, variant).unwrap();
            assert_eq!(sets.cuts, cuts);
            assert!(is_temperature_sorted(&sets.hot));
            assert!(is_temperature_sorted(&sets.cold));

            for hot in &sets.hot {
                assert!(f64::from(hot.ndvi) > MIN_HOT_NDVI && hot.ndvi < cuts.ndvi.low);
                assert!(hot.temperature > cuts.temperature.mid);
                assert!(hot.net_radiation.is_finite() && hot.soil_heat_flux.is_finite());
                assert!(!sets.cold.iter().any(|c| c.same_position(hot)));
            }
            for cold in &sets.cold {
                assert!(cold.ndvi >= cuts.ndvi.mid);
                assert!(cold.temperature < cuts.temperature.low);
            }
        }
    }
    assert!(classified > 0);
}

#[test]
fn found_pair_is_first_inside_window() {
    let mut rng = StdRng::seed_from_u64(7);
    for seed in 10..16u64 {
        let scene = random_scene(seed);
        let Ok(sets) = classify(&scene.bands(), Variant::Asebal) else {
            continue;
        };
        let limit = rng.random_range(2..40);
        let window = SearchWindow::new(limit, rng.random_range(2..40));
        match find_pair(&sets.hot, &sets.cold, window) {
            Ok((hot, cold)) => {
                assert!(window.contains(&hot, &cold));
                assert!(hot.line.abs_diff(cold.line) < window.height_limit);
                assert!(hot.col.abs_diff(cold.col) < window.width_limit);
                let pos = sets.hot.iter().position(|h| h.same_position(&hot)).unwrap();
                for earlier in &sets.hot[..pos] {
                    assert!(!sets.cold.iter().any(|c| window.contains(earlier, c)));
                }
            }
            Err(_) => assert_eq!(window_pairs(&sets.hot, &sets.cold, window).count(), 0),
        }
    }
}

#[test]
fn classification_is_deterministic() {
    let scene = random_scene(42);
    let first = classify(&scene.bands(), Variant::Stepp);
    let second = classify(&scene.bands(), Variant::Stepp);
    match (first, second) {
        (Ok(a), Ok(b)) => {
            assert_eq!(a.hot, b.hot);
            assert_eq!(a.cold, b.cold);
        }
        (Err(a), Err(b)) => assert_eq!(a, b),
        _ => panic!("classification outcome changed between runs"),
    }
}
