use crate::types::{PlancheError, Result};
use image::RgbImage;

/// One rasterized page, alive only until it is placed
#[derive(Debug, Clone)]
pub struct RasterImage {
    /// Zero-based index of the source page
    pub page_index: usize,
    pub pixels: RgbImage,
}

impl RasterImage {
    pub fn new(page_index: usize, pixels: RgbImage) -> Self {
        Self { page_index, pixels }
    }

    /// Build from tightly packed RGBA rows, dropping alpha
    pub fn from_rgba(page_index: usize, width: u32, height: u32, rgba: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() < expected {
            return Err(PlancheError::rasterization(
                Some(page_index),
                format!(
                    "bitmap holds {} bytes, expected {} for {}x{}",
                    rgba.len(),
                    expected,
                    width,
                    height
                ),
            ));
        }

        let rgb: Vec<u8> = rgba[..expected]
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        let pixels = RgbImage::from_raw(width, height, rgb).ok_or_else(|| {
            PlancheError::rasterization(Some(page_index), "bitmap dimensions do not match data")
        })?;
        Ok(Self { page_index, pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw RGB samples, row-major, 8 bits per component
    pub fn into_rgb_bytes(self) -> Vec<u8> {
        self.pixels.into_raw()
    }
}
