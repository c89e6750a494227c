//! Endmember is a CPU library for picking the hot and cold reference pixels
//! of a surface-energy-balance scene.
//!
//! Given NDVI, surface temperature, albedo, net radiation and soil heat flux
//! rasters, it classifies hot (dry, bare, warm) and cold (wet, vegetated,
//! cool) candidates from percentile cuts and pairs them under a spatial
//! window. STEPP and ASEBAL cut points are supported, with optional
//! two-pass refinement on cropped sub-scenes and parallel batch selection
//! via the `rayon` feature.

pub mod candidate;
pub mod classify;
pub mod quantile;
pub mod raster;
pub mod search;
pub mod select;
mod trace;
pub mod util;

pub use candidate::{is_temperature_sorted, sort_candidates, Candidate};
pub use classify::{classify, scene_cuts, CandidateSets, SceneCuts, Variant};
pub use quantile::{quantile_index, quantiles, QuantileTriple};
#[cfg(feature = "tiff-io")]
pub use raster::io;
pub use raster::{OwnedRaster, RasterView, SceneBands};
pub use search::{find_pair, first_candidates, window_pairs, FallbackPolicy, SearchWindow};
#[cfg(feature = "rayon")]
pub use select::select_batch;
pub use select::{
    select_endmembers, EndmemberSelector, Endmembers, MatchOutcome, SelectConfig, Strategy,
};
pub use util::{EndmemberError, EndmemberResult, Stage};
