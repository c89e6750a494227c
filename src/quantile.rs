//! Nearest-rank percentile extraction over valid raster values.
//!
//! The cut for a fraction `q` is the order statistic at index
//! `floor(q * pos)` evaluated in `f32`, clamped to `[0, pos - 1]`, where
//! `pos` counts the finite values. There is no interpolation: `q = 0.97`
//! over 100 values yields the 98th smallest value.

use crate::raster::RasterView;
use crate::util::{EndmemberError, EndmemberResult};

/// Three ordered fractions or the three cut values computed from them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantileTriple {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl QuantileTriple {
    pub const fn new(low: f32, mid: f32, high: f32) -> Self {
        Self { low, mid, high }
    }

    fn validate(&self) -> EndmemberResult<()> {
        for q in [self.low, self.mid, self.high] {
            if !(0.0..=1.0).contains(&q) {
                return Err(EndmemberError::InvalidQuantile { q });
            }
        }
        Ok(())
    }
}

/// Returns the nearest-rank index for fraction `q` over `pos` values.
///
/// The product is rounded in `f32`, so `0.7` over 10 values gives index 7
/// even though `0.7f32` sits just below 0.7. `pos` must be non-zero.
pub fn quantile_index(q: f32, pos: usize) -> usize {
    debug_assert!(pos > 0);
    let idx = (q * pos as f32).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(pos - 1)
    }
}

/// Computes three percentile cuts over the finite values of `raster`.
///
/// `band` names the raster in the `EmptyInput` error raised when no value
/// is finite. Each cut runs its own O(n) selection over a private copy.
pub fn quantiles(
    raster: RasterView<'_>,
    fractions: QuantileTriple,
    band: &'static str,
) -> EndmemberResult<QuantileTriple> {
    fractions.validate()?;

    let mut values: Vec<f32> = raster.valid_values().collect();
    let pos = values.len();
    if pos == 0 {
        return Err(EndmemberError::EmptyInput { band });
    }

    let mut select = |q: f32| {
        let idx = quantile_index(q, pos);
        let (_, nth, _) = values.select_nth_unstable_by(idx, f32::total_cmp);
        *nth
    };

    Ok(QuantileTriple {
        low: select(fractions.low),
        mid: select(fractions.mid),
        high: select(fractions.high),
    })
}

#[cfg(test)]
mod tests {
    use super::{quantile_index, quantiles, QuantileTriple};
    use crate::raster::RasterView;
    use crate::util::EndmemberError;

    #[test]
    fn index_is_floor_and_clamped() {
        assert_eq!(quantile_index(0.97, 100), 97);
        assert_eq!(quantile_index(0.15, 16), 2);
        assert_eq!(quantile_index(1.0, 10), 9);
        assert_eq!(quantile_index(0.0, 10), 0);
        assert_eq!(quantile_index(0.5, 1), 0);
    }

    #[test]
    fn decimal_fractions_below_their_f32_value_land_on_the_integer() {
        assert_eq!(quantile_index(0.7, 10), 7);
        assert_eq!(quantile_index(0.7, 20), 14);
        assert_eq!(quantile_index(0.3, 10), 3);
        assert_eq!(quantile_index(0.6, 5), 3);
        assert_eq!(quantile_index(0.6, 10), 6);
        assert_eq!(quantile_index(0.9, 10), 9);
        assert_eq!(quantile_index(0.9, 20), 18);

        let data: Vec<f32> = (0..10).map(|v| v as f32).collect();
        let view = RasterView::from_slice(&data, 10, 1).unwrap();
        let cuts = quantiles(view, QuantileTriple::new(0.3, 0.7, 0.9), "ndvi").unwrap();
        assert_eq!(cuts, QuantileTriple::new(3.0, 7.0, 9.0));
    }

    #[test]
    fn picks_order_statistics_ignoring_invalid() {
        let data = [
            5.0,
            f32::NAN,
            1.0,
            4.0,
            f32::INFINITY,
            2.0,
            3.0,
            f32::NEG_INFINITY,
        ];
        let view = RasterView::from_slice(&data, 4, 2).unwrap();
        let cuts = quantiles(view, QuantileTriple::new(0.2, 0.5, 0.97), "ndvi").unwrap();
        // pos = 5: indices 1, 2, 4 over [1, 2, 3, 4, 5]
        assert_eq!(cuts, QuantileTriple::new(2.0, 3.0, 5.0));
    }

    #[test]
    fn single_valid_value_serves_every_cut() {
        let data = [f32::NAN, 7.5, f32::NAN];
        let view = RasterView::from_slice(&data, 3, 1).unwrap();
        let cuts = quantiles(view, QuantileTriple::new(0.0, 0.5, 1.0), "albedo").unwrap();
        assert_eq!(cuts, QuantileTriple::new(7.5, 7.5, 7.5));
    }

    #[test]
    fn all_invalid_is_empty_input() {
        let data = [f32::NAN; 4];
        let view = RasterView::from_slice(&data, 2, 2).unwrap();
        let err = quantiles(view, QuantileTriple::new(0.25, 0.5, 0.75), "ndvi").unwrap_err();
        assert_eq!(err, EndmemberError::EmptyInput { band: "ndvi" });
    }

    #[test]
    fn rejects_fraction_outside_unit_interval() {
        let data = [1.0f32; 4];
        let view = RasterView::from_slice(&data, 2, 2).unwrap();
        let err = quantiles(view, QuantileTriple::new(0.25, 1.5, 0.75), "ts").unwrap_err();
        assert_eq!(err, EndmemberError::InvalidQuantile { q: 1.5 });
    }
}
