//! Two-pass refinement on cropped sub-scenes.
//!
//! Each window-satisfying pair from the whole-scene pass seeds a probe: the
//! scene is cropped to one window around the pair, percentiles and
//! candidates are recomputed locally, and the pair search is repeated inside
//! the crop. A failed probe moves on to the next seed pair; the first probe
//! that succeeds ends the loop.

use crate::candidate::Candidate;
use crate::classify::{classify, CandidateSets, Variant};
use crate::raster::SceneBands;
use crate::search::{find_pair, window_pairs, SearchWindow};
use crate::trace::{trace_event, trace_span};
use crate::util::EndmemberResult;

/// Start and length of a crop of at most `limit` pixels along one axis that
/// contains both `a` and `b`, clamped to `[0, extent)`.
///
/// Requires `a.abs_diff(b) < limit` and `a, b < extent`.
pub(crate) fn crop_span(a: usize, b: usize, limit: usize, extent: usize) -> (usize, usize) {
    let len = limit.min(extent);
    let lo = a.min(b);
    let slack = len.saturating_sub(a.abs_diff(b) + 1);
    let start = lo.saturating_sub(slack / 2).min(extent - len);
    (start, len)
}

/// Re-runs classification and matching inside the window around one pair.
pub(crate) fn probe(
    bands: &SceneBands<'_>,
    variant: Variant,
    window: SearchWindow,
    hot: &Candidate,
    cold: &Candidate,
) -> EndmemberResult<(Candidate, Candidate)> {
    let (line0, height) = crop_span(hot.line, cold.line, window.height_limit, bands.height());
    let (col0, width) = crop_span(hot.col, cold.col, window.width_limit, bands.width());
    let crop = bands.roi(line0, col0, width, height)?;

    let local = classify(&crop, variant)?;
    let (h, c) = find_pair(&local.hot, &local.cold, window)?;
    Ok((h.offset(line0, col0), c.offset(line0, col0)))
}

/// Probes up to `max_probes` seed pairs and returns the first local pair.
///
/// Returns `None` when there is no seed pair or every probe failed.
pub(crate) fn refine_pair(
    bands: &SceneBands<'_>,
    sets: &CandidateSets,
    variant: Variant,
    window: SearchWindow,
    max_probes: usize,
) -> Option<(Candidate, Candidate)> {
    let _span = trace_span!("refine", max_probes = max_probes).entered();

    for (idx, (hot, cold)) in window_pairs(&sets.hot, &sets.cold, window)
        .take(max_probes)
        .enumerate()
    {
        let _probe = trace_span!("refine_probe", probe = idx).entered();
        match probe(bands, variant, window, &hot, &cold) {
            Ok(pair) => return Some(pair),
            Err(err) => {
                trace_event!("probe_failed", probe = idx, reason = err.to_string().as_str());
            }
        }
    }
    None
}
