//! Spatial pairing of hot and cold candidates.
//!
//! Pairs are visited hot-outer, cold-inner in sorted candidate order and the
//! first pair whose line and column spans fit the window wins. This is a
//! first-match policy: no later pair is scored against it.

pub(crate) mod refine;

use crate::candidate::Candidate;
use crate::trace::{trace_event, trace_span};
use crate::util::{EndmemberError, EndmemberResult};

/// Maximum line/column separation between the hot and cold pixel.
///
/// Spans must be strictly below the limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchWindow {
    pub height_limit: usize,
    pub width_limit: usize,
}

impl Default for SearchWindow {
    /// Half of a full Landsat 8 OLI/TIRS scene in each direction.
    fn default() -> Self {
        Self {
            height_limit: 6502 / 2,
            width_limit: 7295 / 2,
        }
    }
}

impl SearchWindow {
    pub const fn new(height_limit: usize, width_limit: usize) -> Self {
        Self {
            height_limit,
            width_limit,
        }
    }

    /// True when both pixels lie inside one window.
    pub fn contains(&self, hot: &Candidate, cold: &Candidate) -> bool {
        hot.line.abs_diff(cold.line) < self.height_limit
            && hot.col.abs_diff(cold.col) < self.width_limit
    }
}

/// What to do when no pair fits the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Propagate `NoSpatialMatch`.
    Fail,
    /// Return the first hot and first cold candidate, ignoring the window.
    FirstCandidates,
}

impl FallbackPolicy {
    pub fn name(self) -> &'static str {
        match self {
            FallbackPolicy::Fail => "fail",
            FallbackPolicy::FirstCandidates => "first_candidates",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "fail" => Some(FallbackPolicy::Fail),
            "first_candidates" | "first" => Some(FallbackPolicy::FirstCandidates),
            _ => None,
        }
    }
}

/// Iterates window-satisfying pairs in first-match order.
pub fn window_pairs<'a>(
    hot: &'a [Candidate],
    cold: &'a [Candidate],
    window: SearchWindow,
) -> impl Iterator<Item = (Candidate, Candidate)> + 'a {
    hot.iter().flat_map(move |h| {
        cold.iter()
            .filter(move |c| window.contains(h, c))
            .map(move |c| (*h, *c))
    })
}

/// Returns the first hot/cold pair inside `window`.
///
/// Both slices must be sorted with [`crate::sort_candidates`].
pub fn find_pair(
    hot: &[Candidate],
    cold: &[Candidate],
    window: SearchWindow,
) -> EndmemberResult<(Candidate, Candidate)> {
    let _span = trace_span!("find_pair", hot = hot.len(), cold = cold.len()).entered();

    match window_pairs(hot, cold, window).next() {
        Some((h, c)) => {
            trace_event!(
                "pair_found",
                hot_line = h.line,
                hot_col = h.col,
                cold_line = c.line,
                cold_col = c.col
            );
            Ok((h, c))
        }
        None => Err(no_match(hot, cold, window)),
    }
}

/// Returns the first hot and cold candidates with no window constraint.
pub fn first_candidates(
    hot: &[Candidate],
    cold: &[Candidate],
) -> EndmemberResult<(Candidate, Candidate)> {
    match (hot.first(), cold.first()) {
        (Some(h), Some(c)) => Ok((*h, *c)),
        _ => Err(EndmemberError::NoCandidates {
            hot: hot.len(),
            cold: cold.len(),
        }),
    }
}

pub(crate) fn no_match(
    hot: &[Candidate],
    cold: &[Candidate],
    window: SearchWindow,
) -> EndmemberError {
    EndmemberError::NoSpatialMatch {
        hot: hot.len(),
        cold: cold.len(),
        height_limit: window.height_limit,
        width_limit: window.width_limit,
    }
}
