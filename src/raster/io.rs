//! Loading single-band float rasters via the `tiff` crate.
//!
//! Available when the `tiff-io` feature is enabled.

use crate::raster::OwnedRaster;
use crate::util::{EndmemberError, EndmemberResult};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};

/// Decodes the first image of a TIFF stream into an `f32` raster.
///
/// `F32` and `F64` samples are accepted; integer bands are rejected since
/// they cannot carry the NaN markers for invalid pixels.
pub fn decode_f32_tiff<R: Read + Seek>(reader: R) -> EndmemberResult<OwnedRaster> {
    let mut decoder = Decoder::new(reader).map_err(|err| EndmemberError::RasterIo {
        reason: format!("tiff decode error: {err}"),
    })?;
    let (width, height) = decoder
        .dimensions()
        .map_err(|err| EndmemberError::RasterIo {
            reason: format!("cannot read dimensions: {err}"),
        })?;
    let data = match decoder
        .read_image()
        .map_err(|err| EndmemberError::RasterIo {
            reason: format!("cannot read image data: {err}"),
        })? {
        DecodingResult::F32(buf) => buf,
        DecodingResult::F64(buf) => buf.into_iter().map(|v| v as f32).collect(),
        _ => {
            return Err(EndmemberError::RasterIo {
                reason: "unsupported sample format (expected float32 or float64)".to_string(),
            })
        }
    };
    OwnedRaster::new(data, width as usize, height as usize)
}

/// Loads a float TIFF band from disk.
pub fn load_f32_tiff<P: AsRef<Path>>(path: P) -> EndmemberResult<OwnedRaster> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| EndmemberError::RasterIo {
        reason: format!("{}: {err}", path.display()),
    })?;
    decode_f32_tiff(BufReader::new(file))
}
