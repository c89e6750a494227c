//! Error types for endmember selection.

use thiserror::Error;

/// Result alias for endmember operations.
pub type EndmemberResult<T> = std::result::Result<T, EndmemberError>;

/// Selection stage an error was raised in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Argument, raster, or configuration validation before any work.
    Input,
    /// Percentile extraction and candidate classification.
    Classifying,
    /// Spatial pair search.
    Matching,
}

/// Errors that can occur while selecting endmembers.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EndmemberError {
    /// A raster holds no finite values, so no percentile cut exists.
    #[error("band {band} has no valid pixels")]
    EmptyInput { band: &'static str },
    /// Classification produced an empty hot or cold collection.
    #[error("no final candidates (hot={hot}, cold={cold})")]
    NoCandidates { hot: usize, cold: usize },
    /// No hot/cold pair lies inside the search window.
    #[error(
        "no candidate pair within {height_limit}x{width_limit} window (hot={hot}, cold={cold})"
    )]
    NoSpatialMatch {
        hot: usize,
        cold: usize,
        height_limit: usize,
        width_limit: usize,
    },
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    #[error(
        "roi ({col}, {line}) {width}x{height} out of bounds for {raster_width}x{raster_height}"
    )]
    RoiOutOfBounds {
        col: usize,
        line: usize,
        width: usize,
        height: usize,
        raster_width: usize,
        raster_height: usize,
    },
    /// Bands of one scene differ in shape.
    #[error("band {band} is {got_width}x{got_height}, expected {width}x{height}")]
    SizeMismatch {
        band: &'static str,
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },
    #[error("quantile {q} outside [0, 1]")]
    InvalidQuantile { q: f32 },
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
    #[error("raster io: {reason}")]
    RasterIo { reason: String },
}

impl EndmemberError {
    /// Returns the stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            Self::EmptyInput { .. } | Self::NoCandidates { .. } => Stage::Classifying,
            Self::NoSpatialMatch { .. } => Stage::Matching,
            _ => Stage::Input,
        }
    }
}
