//! Temperature ordering for candidate collections.

use crate::candidate::Candidate;
use std::cmp::Ordering;

impl Candidate {
    /// Orders by ascending temperature, then ascending NDVI.
    ///
    /// Candidate values are finite, so `total_cmp` agrees with `<`.
    pub fn temperature_order(&self, other: &Candidate) -> Ordering {
        self.temperature
            .total_cmp(&other.temperature)
            .then_with(|| self.ndvi.total_cmp(&other.ndvi))
    }
}

/// Stable sort by `(temperature, ndvi)`; equal keys keep scan order.
pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(Candidate::temperature_order);
}

/// Returns true when `candidates` is non-decreasing in `(temperature, ndvi)`.
pub fn is_temperature_sorted(candidates: &[Candidate]) -> bool {
    candidates
        .windows(2)
        .all(|pair| pair[0].temperature_order(&pair[1]) != Ordering::Greater)
}
