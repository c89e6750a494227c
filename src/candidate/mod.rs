//! Classified hot/cold pixel candidates.

mod order;

pub use order::{is_temperature_sorted, sort_candidates};

/// A pixel that passed the hot or cold classification predicates.
///
/// Measurements are copied from the scene bands when the pixel is
/// classified. `zom`, `ustar` and `aerodynamic_resistance` belong to the
/// downstream aerodynamic iteration; selection leaves them at zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Line (row) in the scene, 0-based.
    pub line: usize,
    /// Column in the scene, 0-based.
    pub col: usize,
    pub ndvi: f32,
    /// Surface temperature in Kelvin.
    pub temperature: f32,
    /// Net radiation in W/m².
    pub net_radiation: f32,
    /// Soil heat flux in W/m².
    pub soil_heat_flux: f32,
    /// Available energy `net_radiation - soil_heat_flux`.
    pub ho: f32,
    /// Momentum roughness length.
    pub zom: f32,
    /// Friction velocity.
    pub ustar: f32,
    pub aerodynamic_resistance: f32,
}

impl Candidate {
    /// Creates a candidate, deriving `ho` from the radiation terms.
    pub fn new(
        ndvi: f32,
        temperature: f32,
        net_radiation: f32,
        soil_heat_flux: f32,
        line: usize,
        col: usize,
    ) -> Self {
        Self {
            line,
            col,
            ndvi,
            temperature,
            net_radiation,
            soil_heat_flux,
            ho: net_radiation - soil_heat_flux,
            zom: 0.0,
            ustar: 0.0,
            aerodynamic_resistance: 0.0,
        }
    }

    /// True when both candidates refer to the same pixel.
    pub fn same_position(&self, other: &Candidate) -> bool {
        self.line == other.line && self.col == other.col
    }

    pub fn set_aerodynamic_resistance(&mut self, rah: f32) {
        self.aerodynamic_resistance = rah;
    }

    /// Shifts coordinates from a crop back into the enclosing scene.
    pub(crate) fn offset(mut self, line0: usize, col0: usize) -> Self {
        self.line += line0;
        self.col += col0;
        self
    }
}
