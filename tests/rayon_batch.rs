#![cfg(feature = "rayon")]

use endmember::{select_batch, EndmemberSelector, SceneBands, SearchWindow, SelectConfig, Variant};

fn make_band(seed: usize, n: usize, lo: f32, span: f32) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let mixed = i.wrapping_mul(2654435761).wrapping_add(seed * 40503) % 9973;
            lo + span * mixed as f32 / 9973.0
        })
        .collect()
}

#[test]
fn parallel_batch_matches_sequential_selection() {
    let (width, height) = (60, 50);
    let n = width * height;
    let scenes: Vec<[Vec<f32>; 5]> = (0..6)
        .map(|s| {
            [
                make_band(s, n, 0.12, 0.8),
                make_band(s + 11, n, 285.0, 40.0),
                make_band(s + 23, n, 0.05, 0.4),
                make_band(s + 37, n, 400.0, 200.0),
                make_band(s + 41, n, 30.0, 60.0),
            ]
        })
        .collect();
    let bands: Vec<SceneBands<'_>> = scenes
        .iter()
        .map(|[ndvi, ts, albedo, rn, g]| {
            SceneBands::from_slices(ndvi, ts, albedo, rn, g, width, height).unwrap()
        })
        .collect();

    for variant in [Variant::Stepp, Variant::Asebal] {
        let cfg = SelectConfig {
            window: SearchWindow::new(12, 12),
            ..SelectConfig::for_variant(variant)
        };
        let parallel = select_batch(&bands, &cfg);
        assert_eq!(parallel.len(), bands.len());

        let selector = EndmemberSelector::new(cfg);
        for (scene, got) in bands.iter().zip(parallel) {
            assert_eq!(got, selector.select(scene));
        }
    }
}
