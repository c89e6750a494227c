//! The five per-pixel products consumed by endmember selection.

use crate::raster::RasterView;
use crate::util::{EndmemberError, EndmemberResult};

/// Equal-shape rasters for one scene.
///
/// Surface temperature is in Kelvin; net radiation and soil heat flux are in
/// W/m². Shapes are checked once at construction so downstream code can
/// index all bands with the same `(line, col)`.
#[derive(Copy, Clone, Debug)]
pub struct SceneBands<'a> {
    ndvi: RasterView<'a>,
    surface_temperature: RasterView<'a>,
    albedo: RasterView<'a>,
    net_radiation: RasterView<'a>,
    soil_heat: RasterView<'a>,
}

impl<'a> SceneBands<'a> {
    /// Bundles the five bands, rejecting shape mismatches against NDVI.
    pub fn new(
        ndvi: RasterView<'a>,
        surface_temperature: RasterView<'a>,
        albedo: RasterView<'a>,
        net_radiation: RasterView<'a>,
        soil_heat: RasterView<'a>,
    ) -> EndmemberResult<Self> {
        let width = ndvi.width();
        let height = ndvi.height();
        let others = [
            ("surface_temperature", &surface_temperature),
            ("albedo", &albedo),
            ("net_radiation", &net_radiation),
            ("soil_heat", &soil_heat),
        ];
        for (band, view) in others {
            if view.width() != width || view.height() != height {
                return Err(EndmemberError::SizeMismatch {
                    band,
                    width,
                    height,
                    got_width: view.width(),
                    got_height: view.height(),
                });
            }
        }
        Ok(Self {
            ndvi,
            surface_temperature,
            albedo,
            net_radiation,
            soil_heat,
        })
    }

    /// Bundles five contiguous row-major buffers of `width * height` pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn from_slices(
        ndvi: &'a [f32],
        surface_temperature: &'a [f32],
        albedo: &'a [f32],
        net_radiation: &'a [f32],
        soil_heat: &'a [f32],
        width: usize,
        height: usize,
    ) -> EndmemberResult<Self> {
        Self::new(
            RasterView::from_slice(ndvi, width, height)?,
            RasterView::from_slice(surface_temperature, width, height)?,
            RasterView::from_slice(albedo, width, height)?,
            RasterView::from_slice(net_radiation, width, height)?,
            RasterView::from_slice(soil_heat, width, height)?,
        )
    }

    pub fn width(&self) -> usize {
        self.ndvi.width()
    }

    pub fn height(&self) -> usize {
        self.ndvi.height()
    }

    pub fn ndvi(&self) -> RasterView<'a> {
        self.ndvi
    }

    pub fn surface_temperature(&self) -> RasterView<'a> {
        self.surface_temperature
    }

    pub fn albedo(&self) -> RasterView<'a> {
        self.albedo
    }

    pub fn net_radiation(&self) -> RasterView<'a> {
        self.net_radiation
    }

    pub fn soil_heat(&self) -> RasterView<'a> {
        self.soil_heat
    }

    /// Crops all five bands to the same window.
    pub fn roi(
        &self,
        line: usize,
        col: usize,
        width: usize,
        height: usize,
    ) -> EndmemberResult<SceneBands<'a>> {
        Ok(Self {
            ndvi: self.ndvi.roi(line, col, width, height)?,
            surface_temperature: self.surface_temperature.roi(line, col, width, height)?,
            albedo: self.albedo.roi(line, col, width, height)?,
            net_radiation: self.net_radiation.roi(line, col, width, height)?,
            soil_heat: self.soil_heat.roi(line, col, width, height)?,
        })
    }
}
