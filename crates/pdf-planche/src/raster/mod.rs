//! Page rasterization
//!
//! The composer places pages as bitmaps. A [`Rasterizer`] turns a PDF held
//! in memory into one [`RasterImage`] per page, in document order, honoring
//! each page's CropBox only.

mod bitmap;
#[cfg(feature = "pdfium")]
mod pdfium;

pub use bitmap::RasterImage;
#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumRasterizer;

use crate::types::Result;

/// Renders every page of a PDF to a bitmap.
///
/// Implementations hand pages to `sink` one at a time, in page order, and
/// must stop at the first error returned by either the backend or `sink`.
pub trait Rasterizer: Send {
    fn rasterize_pages(
        &self,
        pdf: &[u8],
        dpi: f32,
        sink: &mut dyn FnMut(RasterImage) -> Result<()>,
    ) -> Result<()>;
}

impl<R: Rasterizer + Sync + ?Sized> Rasterizer for &R {
    fn rasterize_pages(
        &self,
        pdf: &[u8],
        dpi: f32,
        sink: &mut dyn FnMut(RasterImage) -> Result<()>,
    ) -> Result<()> {
        (**self).rasterize_pages(pdf, dpi, sink)
    }
}

impl<R: Rasterizer + ?Sized> Rasterizer for Box<R> {
    fn rasterize_pages(
        &self,
        pdf: &[u8],
        dpi: f32,
        sink: &mut dyn FnMut(RasterImage) -> Result<()>,
    ) -> Result<()> {
        (**self).rasterize_pages(pdf, dpi, sink)
    }
}

/// Pixel count covering `points` at `dpi`
pub fn pixels_for(points: f32, dpi: f32) -> u32 {
    (points / crate::constants::POINTS_PER_INCH * dpi).round().max(1.0) as u32
}
