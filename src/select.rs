//! Endmember selection: classification followed by spatial matching.
//!
//! A selection call is a single deterministic pass through
//! `Classifying -> Matching -> Done`; any error aborts it and reports the
//! stage through [`EndmemberError::stage`]. Degraded outcomes (an
//! unconstrained fallback pair) are flagged on the result and logged.

use crate::candidate::Candidate;
use crate::classify::{classify, Variant};
use crate::raster::SceneBands;
use crate::search::refine::refine_pair;
use crate::search::{find_pair, first_candidates, FallbackPolicy, SearchWindow};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{EndmemberError, EndmemberResult};

/// Pair search strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// One whole-scene classification and a first-match pair search.
    #[default]
    SinglePass,
    /// Whole-scene pass, then up to `max_probes` cropped re-classifications.
    TwoPass { max_probes: usize },
}

/// Configuration for [`EndmemberSelector`].
#[derive(Clone, Debug, PartialEq)]
pub struct SelectConfig {
    pub variant: Variant,
    pub window: SearchWindow,
    /// Behaviour when no pair fits the window.
    pub fallback: FallbackPolicy,
    pub strategy: Strategy,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl SelectConfig {
    /// Default window and strategy with the variant's fallback policy.
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            window: SearchWindow::default(),
            fallback: variant.default_fallback(),
            strategy: Strategy::SinglePass,
        }
    }

    /// Validates window limits and probe count.
    pub fn validate(&self) -> EndmemberResult<()> {
        if self.window.height_limit == 0 {
            return Err(EndmemberError::InvalidConfig {
                reason: "height_limit must be > 0",
            });
        }
        if self.window.width_limit == 0 {
            return Err(EndmemberError::InvalidConfig {
                reason: "width_limit must be > 0",
            });
        }
        if let Strategy::TwoPass { max_probes: 0 } = self.strategy {
            return Err(EndmemberError::InvalidConfig {
                reason: "max_probes must be > 0",
            });
        }
        Ok(())
    }
}

/// How the returned pair was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// First pair inside the window from the whole-scene pass.
    Windowed,
    /// A cropped refinement probe produced the pair.
    Refined,
    /// No pair fit the window; the first candidates were taken unconstrained.
    Unconstrained,
}

/// Selected hot and cold pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Endmembers {
    pub hot: Candidate,
    pub cold: Candidate,
    pub outcome: MatchOutcome,
}

/// Selects endmembers under a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct EndmemberSelector {
    cfg: SelectConfig,
}

impl EndmemberSelector {
    pub fn new(cfg: SelectConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &SelectConfig {
        &self.cfg
    }

    /// Runs classification and matching over one scene.
    pub fn select(&self, bands: &SceneBands<'_>) -> EndmemberResult<Endmembers> {
        self.cfg.validate()?;
        let cfg = &self.cfg;
        let _span = trace_span!(
            "select_endmembers",
            variant = cfg.variant.name(),
            height_limit = cfg.window.height_limit,
            width_limit = cfg.window.width_limit
        )
        .entered();

        let sets = classify(bands, cfg.variant)?;

        let (hot, cold) = match find_pair(&sets.hot, &sets.cold, cfg.window) {
            Ok(pair) => pair,
            Err(err @ EndmemberError::NoSpatialMatch { .. }) => match cfg.fallback {
                FallbackPolicy::Fail => return Err(err),
                FallbackPolicy::FirstCandidates => {
                    let (hot, cold) = first_candidates(&sets.hot, &sets.cold)?;
                    trace_warn!(
                        "unconstrained_fallback",
                        hot_line = hot.line,
                        hot_col = hot.col,
                        cold_line = cold.line,
                        cold_col = cold.col
                    );
                    return Ok(Endmembers {
                        hot,
                        cold,
                        outcome: MatchOutcome::Unconstrained,
                    });
                }
            },
            Err(err) => return Err(err),
        };

        if let Strategy::TwoPass { max_probes } = cfg.strategy {
            match refine_pair(bands, &sets, cfg.variant, cfg.window, max_probes) {
                Some((hot, cold)) => {
                    trace_event!(
                        "refined_pair",
                        hot_line = hot.line,
                        hot_col = hot.col,
                        cold_line = cold.line,
                        cold_col = cold.col
                    );
                    return Ok(Endmembers {
                        hot,
                        cold,
                        outcome: MatchOutcome::Refined,
                    });
                }
                None => {
                    trace_warn!(
                        "refinement_exhausted",
                        hot_line = hot.line,
                        hot_col = hot.col,
                        cold_line = cold.line,
                        cold_col = cold.col
                    );
                }
            }
        }

        Ok(Endmembers {
            hot,
            cold,
            outcome: MatchOutcome::Windowed,
        })
    }
}

/// Selects the hot and cold pixel from five row-major bands.
///
/// Uses a single pass and the variant's default fallback policy.
#[allow(clippy::too_many_arguments)]
pub fn select_endmembers(
    ndvi: &[f32],
    surface_temperature: &[f32],
    albedo: &[f32],
    net_radiation: &[f32],
    soil_heat: &[f32],
    width: usize,
    height: usize,
    height_limit: usize,
    width_limit: usize,
    variant: Variant,
) -> EndmemberResult<(Candidate, Candidate)> {
    let bands = SceneBands::from_slices(
        ndvi,
        surface_temperature,
        albedo,
        net_radiation,
        soil_heat,
        width,
        height,
    )?;
    let selector = EndmemberSelector::new(SelectConfig {
        window: SearchWindow::new(height_limit, width_limit),
        ..SelectConfig::for_variant(variant)
    });
    let picked = selector.select(&bands)?;
    Ok((picked.hot, picked.cold))
}

/// Selects endmembers for independent scenes in parallel.
///
/// Results keep the order of `scenes`.
#[cfg(feature = "rayon")]
pub fn select_batch(
    scenes: &[SceneBands<'_>],
    cfg: &SelectConfig,
) -> Vec<EndmemberResult<Endmembers>> {
    use rayon::prelude::*;

    let selector = EndmemberSelector::new(cfg.clone());
    scenes
        .par_iter()
        .map(|bands| selector.select(bands))
        .collect()
}
