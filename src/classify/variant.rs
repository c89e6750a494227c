//! Percentile cut points and candidate predicates per selection algorithm.

use crate::quantile::QuantileTriple;
use crate::search::FallbackPolicy;

/// NDVI floor below which a pixel is treated as water or cloud.
///
/// Compared in `f64`, so an NDVI of `0.1f32` is just above the floor.
pub const MIN_HOT_NDVI: f64 = 0.10;

/// Endmember selection algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// STEPP: narrow NDVI tails, capped albedo and temperature for hot pixels.
    #[default]
    Stepp,
    /// ASEBAL: quartile cuts, open-ended hot albedo and temperature.
    Asebal,
}

/// Percentile cuts computed for one scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCuts {
    pub ndvi: QuantileTriple,
    pub albedo: QuantileTriple,
    pub temperature: QuantileTriple,
}

impl Variant {
    /// Lowercase name used in configs and logs.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Stepp => "stepp",
            Variant::Asebal => "asebal",
        }
    }

    /// Parses `stepp` or `asebal`, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "stepp" | "steep" => Some(Variant::Stepp),
            "asebal" | "sebal" => Some(Variant::Asebal),
            _ => None,
        }
    }

    pub fn ndvi_fractions(self) -> QuantileTriple {
        match self {
            Variant::Stepp => QuantileTriple::new(0.15, 0.97, 0.97),
            Variant::Asebal => QuantileTriple::new(0.25, 0.75, 0.75),
        }
    }

    pub fn albedo_fractions(self) -> QuantileTriple {
        QuantileTriple::new(0.25, 0.50, 0.75)
    }

    pub fn temperature_fractions(self) -> QuantileTriple {
        match self {
            Variant::Stepp => QuantileTriple::new(0.20, 0.85, 0.97),
            Variant::Asebal => QuantileTriple::new(0.25, 0.75, 0.75),
        }
    }

    /// No-match policy used when the caller does not choose one.
    pub fn default_fallback(self) -> FallbackPolicy {
        match self {
            Variant::Stepp => FallbackPolicy::Fail,
            Variant::Asebal => FallbackPolicy::FirstCandidates,
        }
    }

    /// Hot predicate: sparse vegetation, bright and warm.
    ///
    /// Values must already be known finite.
    pub(crate) fn is_hot(self, cuts: &SceneCuts, ndvi: f32, albedo: f32, ts: f32) -> bool {
        let ndvi_ok = f64::from(ndvi) > MIN_HOT_NDVI && ndvi < cuts.ndvi.low;
        match self {
            Variant::Stepp => {
                ndvi_ok
                    && albedo > cuts.albedo.mid
                    && albedo < cuts.albedo.high
                    && ts > cuts.temperature.mid
                    && ts < cuts.temperature.high
            }
            Variant::Asebal => ndvi_ok && albedo > cuts.albedo.mid && ts > cuts.temperature.mid,
        }
    }

    /// Cold predicate: dense vegetation, darker and cool.
    ///
    /// Temperature stays below the low cut, which never exceeds the mid cut
    /// the hot predicate starts above, so no pixel is both.
    pub(crate) fn is_cold(self, cuts: &SceneCuts, ndvi: f32, albedo: f32, ts: f32) -> bool {
        let ts_ok = ts < cuts.temperature.low;
        match self {
            Variant::Stepp => {
                ndvi > cuts.ndvi.high
                    && albedo > cuts.albedo.low
                    && albedo < cuts.albedo.mid
                    && ts_ok
            }
            Variant::Asebal => ndvi >= cuts.ndvi.mid && albedo < cuts.albedo.mid && ts_ok,
        }
    }
}
