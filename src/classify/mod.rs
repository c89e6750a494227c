//! Hot/cold candidate classification.
//!
//! A single scan over the scene tests every pixel that is finite in all five
//! bands against the variant's predicates, using percentile cuts of NDVI,
//! albedo and surface temperature. Both collections come back stably
//! sorted by `(temperature, ndvi)`.

mod variant;

pub use variant::{SceneCuts, Variant, MIN_HOT_NDVI};

use crate::candidate::{sort_candidates, Candidate};
use crate::quantile::quantiles;
use crate::raster::{is_valid, SceneBands};
use crate::trace::{trace_event, trace_span};
use crate::util::{EndmemberError, EndmemberResult};

/// Sorted hot and cold candidates from one classification pass.
#[derive(Clone, Debug)]
pub struct CandidateSets {
    pub hot: Vec<Candidate>,
    pub cold: Vec<Candidate>,
    pub cuts: SceneCuts,
}

/// Computes the variant's percentile cuts for a scene.
pub fn scene_cuts(bands: &SceneBands<'_>, variant: Variant) -> EndmemberResult<SceneCuts> {
    Ok(SceneCuts {
        ndvi: quantiles(bands.ndvi(), variant.ndvi_fractions(), "ndvi")?,
        albedo: quantiles(bands.albedo(), variant.albedo_fractions(), "albedo")?,
        temperature: quantiles(
            bands.surface_temperature(),
            variant.temperature_fractions(),
            "surface_temperature",
        )?,
    })
}

/// Classifies all pixels of `bands` into hot and cold candidates.
///
/// Fails with `NoCandidates` when either collection is empty, including
/// when a band has no valid pixel at all.
pub fn classify(bands: &SceneBands<'_>, variant: Variant) -> EndmemberResult<CandidateSets> {
    let _span = trace_span!(
        "classify",
        variant = variant.name(),
        width = bands.width(),
        height = bands.height()
    )
    .entered();

    let cuts = match scene_cuts(bands, variant) {
        Ok(cuts) => cuts,
        Err(EndmemberError::EmptyInput { band }) => {
            trace_event!("empty_band", band = band);
            return Err(EndmemberError::NoCandidates { hot: 0, cold: 0 });
        }
        Err(err) => return Err(err),
    };
    trace_event!(
        "percentile_cuts",
        ndvi_low = cuts.ndvi.low,
        ndvi_high = cuts.ndvi.high,
        albedo_mid = cuts.albedo.mid,
        ts_low = cuts.temperature.low,
        ts_mid = cuts.temperature.mid,
        ts_high = cuts.temperature.high
    );

    let mut hot = Vec::new();
    let mut cold = Vec::new();
    for line in 0..bands.height() {
        let rows = (
            bands.ndvi().row(line),
            bands.surface_temperature().row(line),
            bands.albedo().row(line),
            bands.net_radiation().row(line),
            bands.soil_heat().row(line),
        );
        let (Some(ndvi), Some(ts), Some(albedo), Some(rn), Some(g)) = rows else {
            return Err(EndmemberError::InvalidDimensions {
                width: bands.width(),
                height: bands.height(),
            });
        };

        for col in 0..bands.width() {
            let (n, t, a, r, s) = (ndvi[col], ts[col], albedo[col], rn[col], g[col]);
            if !(is_valid(n) && is_valid(t) && is_valid(a) && is_valid(r) && is_valid(s)) {
                continue;
            }
            if variant.is_hot(&cuts, n, a, t) {
                hot.push(Candidate::new(n, t, r, s, line, col));
            }
            if variant.is_cold(&cuts, n, a, t) {
                cold.push(Candidate::new(n, t, r, s, line, col));
            }
        }
    }

    trace_event!("candidates", hot = hot.len(), cold = cold.len());
    if hot.is_empty() || cold.is_empty() {
        return Err(EndmemberError::NoCandidates {
            hot: hot.len(),
            cold: cold.len(),
        });
    }

    sort_candidates(&mut hot);
    sort_candidates(&mut cold);
    Ok(CandidateSets { hot, cold, cuts })
}
