//! Python bindings for the endmember selection library.
//!
//! Bands are passed as 2-D C-contiguous float32 numpy arrays of shape
//! `(lines, columns)`; NaN marks invalid pixels.

use numpy::{PyArray1, PyArray2, PyArrayMethods, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use endmember::{
    Candidate as RustCandidate, EndmemberError, EndmemberSelector, FallbackPolicy, MatchOutcome,
    QuantileTriple, RasterView, SceneBands, SearchWindow, SelectConfig, Stage, Strategy, Variant,
};

/// Convert an EndmemberError to a Python exception.
///
/// Argument problems raise ValueError; selection failures raise RuntimeError.
fn to_py_err(err: EndmemberError) -> PyErr {
    match err.stage() {
        Stage::Input => PyValueError::new_err(err.to_string()),
        Stage::Classifying | Stage::Matching => PyRuntimeError::new_err(err.to_string()),
    }
}

fn view<'a>(array: &'a PyReadonlyArray2<'_, f32>) -> PyResult<RasterView<'a>> {
    let shape = array.shape();
    let height = shape[0];
    let width = shape[1];
    RasterView::from_slice(array.as_slice()?, width, height).map_err(to_py_err)
}

/// A hot or cold pixel with the per-pixel values read at its position.
#[pyclass]
#[derive(Clone)]
pub struct Candidate {
    #[pyo3(get)]
    pub line: usize,
    #[pyo3(get)]
    pub col: usize,
    #[pyo3(get)]
    pub ndvi: f32,
    /// Surface temperature in Kelvin.
    #[pyo3(get)]
    pub temperature: f32,
    #[pyo3(get)]
    pub net_radiation: f32,
    #[pyo3(get)]
    pub soil_heat_flux: f32,
    /// Available energy, net radiation minus soil heat flux.
    #[pyo3(get)]
    pub ho: f32,
}

#[pymethods]
impl Candidate {
    fn __repr__(&self) -> String {
        format!(
            "Candidate(line={}, col={}, ndvi={:.4}, temperature={:.2}, ho={:.2})",
            self.line, self.col, self.ndvi, self.temperature, self.ho
        )
    }
}

impl From<RustCandidate> for Candidate {
    fn from(c: RustCandidate) -> Self {
        Self {
            line: c.line,
            col: c.col,
            ndvi: c.ndvi,
            temperature: c.temperature,
            net_radiation: c.net_radiation,
            soil_heat_flux: c.soil_heat_flux,
            ho: c.ho,
        }
    }
}

/// Nearest-rank percentile cuts over the finite values of an array.
///
/// Args:
///     array: 2D float32 numpy array
///     low, mid, high: fractions in [0, 1]
///
/// Returns:
///     Tuple (low, mid, high) of cut values
#[pyfunction]
fn quantiles(
    array: PyReadonlyArray2<'_, f32>,
    low: f32,
    mid: f32,
    high: f32,
) -> PyResult<(f32, f32, f32)> {
    let raster = view(&array)?;
    let cuts = endmember::quantiles(raster, QuantileTriple::new(low, mid, high), "array")
        .map_err(to_py_err)?;
    Ok((cuts.low, cuts.mid, cuts.high))
}

/// Select the hot and cold endmember pixels of one scene.
///
/// Args:
///     ndvi, ts, albedo, rn, g: 2D float32 numpy arrays of equal shape
///     variant: "stepp" or "asebal" (default: "stepp")
///     height_limit: Maximum line separation, exclusive (default: 3251)
///     width_limit: Maximum column separation, exclusive (default: 3647)
///     fallback: "fail", "first_candidates" or None for the variant default
///     two_pass: Refine on cropped sub-scenes (default: False)
///     max_probes: Refinement probes when two_pass is set (default: 16)
///
/// Returns:
///     Tuple (hot, cold, outcome) where outcome is "windowed", "refined"
///     or "unconstrained"
#[pyfunction]
#[pyo3(signature = (
    ndvi,
    ts,
    albedo,
    rn,
    g,
    variant = "stepp",
    height_limit = 3251,
    width_limit = 3647,
    fallback = None,
    two_pass = false,
    max_probes = 16
))]
#[allow(clippy::too_many_arguments)]
fn select_endmembers(
    ndvi: PyReadonlyArray2<'_, f32>,
    ts: PyReadonlyArray2<'_, f32>,
    albedo: PyReadonlyArray2<'_, f32>,
    rn: PyReadonlyArray2<'_, f32>,
    g: PyReadonlyArray2<'_, f32>,
    variant: &str,
    height_limit: usize,
    width_limit: usize,
    fallback: Option<&str>,
    two_pass: bool,
    max_probes: usize,
) -> PyResult<(Candidate, Candidate, &'static str)> {
    let variant = Variant::from_name(variant)
        .ok_or_else(|| PyValueError::new_err("variant must be 'stepp' or 'asebal'"))?;
    let fallback = match fallback {
        Some(name) => FallbackPolicy::from_name(name).ok_or_else(|| {
            PyValueError::new_err("fallback must be 'fail' or 'first_candidates'")
        })?,
        None => variant.default_fallback(),
    };
    let strategy = if two_pass {
        Strategy::TwoPass { max_probes }
    } else {
        Strategy::SinglePass
    };
    let selector = EndmemberSelector::new(SelectConfig {
        variant,
        window: SearchWindow::new(height_limit, width_limit),
        fallback,
        strategy,
    });

    let bands = SceneBands::new(
        view(&ndvi)?,
        view(&ts)?,
        view(&albedo)?,
        view(&rn)?,
        view(&g)?,
    )
    .map_err(to_py_err)?;
    let picked = selector.select(&bands).map_err(to_py_err)?;

    let outcome = match picked.outcome {
        MatchOutcome::Windowed => "windowed",
        MatchOutcome::Refined => "refined",
        MatchOutcome::Unconstrained => "unconstrained",
    };
    Ok((picked.hot.into(), picked.cold.into(), outcome))
}

/// Load a single-band float TIFF as a 2D float32 array.
///
/// Args:
///     path: Path to a float32 or float64 GeoTIFF band
#[pyfunction]
fn load_band<'py>(py: Python<'py>, path: &str) -> PyResult<Bound<'py, PyArray2<f32>>> {
    let raster = endmember::io::load_f32_tiff(path).map_err(to_py_err)?;
    let (width, height) = (raster.width(), raster.height());
    PyArray1::from_vec(py, raster.into_vec()).reshape([height, width])
}

/// Python module for endmember selection.
#[pymodule]
fn _endmember(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Candidate>()?;
    m.add_function(wrap_pyfunction!(quantiles, m)?)?;
    m.add_function(wrap_pyfunction!(select_endmembers, m)?)?;
    m.add_function(wrap_pyfunction!(load_band, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
