use std::path::Path;

use image::{ImageFormat, RgbImage};
use tracing::debug;

use crate::bitplane::{capacity, RGB_CHANNELS};
use crate::error::{CarrierError, Result};

/// An 8-bit-per-channel RGB raster held as a row-major interleaved buffer.
///
/// This is the fundamental carrier type. Decoding any supported container
/// converts it to RGB8; saving always writes PNG so the LSB plane survives.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Wrap an existing interleaved RGB buffer.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = capacity(width, height, RGB_CHANNELS);
        if pixels.len() != expected {
            return Err(CarrierError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
                expected,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A raster filled with a single color.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(capacity(width, height, RGB_CHANNELS))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode an image file into an RGB raster.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| CarrierError::Open {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();
        debug!(?path, width = img.width(), height = img.height(), "opened raster");
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            pixels: img.into_raw(),
        })
    }

    /// Encode the raster as PNG at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let img = RgbImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or(
            CarrierError::DimensionMismatch {
                width: self.width,
                height: self.height,
                len: self.pixels.len(),
                expected: capacity(self.width, self.height, RGB_CHANNELS),
            },
        )?;
        img.save_with_format(path, ImageFormat::Png)
            .map_err(|source| CarrierError::Save {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(?path, width = self.width, height = self.height, "saved raster");
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bits available in the LSB plane.
    pub fn capacity_bits(&self) -> usize {
        self.pixels.len()
    }

    /// Borrow the interleaved pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutably borrow the interleaved pixel bytes.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the raster and return the pixel buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}
