//! Pdfium-backed rasterizer

use super::{RasterImage, Rasterizer};
use crate::constants::POINTS_PER_INCH;
use crate::types::{PlancheError, Result};
use pdfium_render::prelude::*;
use std::path::PathBuf;

/// Directory probed for a vendored Pdfium build, relative to the working directory
const VENDOR_LIBRARY_DIR: &str = "vendor/pdfium/lib";

/// Rasterizes pages with the Pdfium library.
///
/// The shared library is bound on each call, trying an explicit directory
/// first, then the vendored copy, then the system search path.
#[derive(Debug, Clone, Default)]
pub struct PdfiumRasterizer {
    library_dir: Option<PathBuf>,
}

impl PdfiumRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for the Pdfium shared library in `dir` before anywhere else
    pub fn with_library_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: Some(dir.into()),
        }
    }

    /// Check that the backend can be bound
    pub fn check(&self) -> Result<()> {
        self.bind().map(|_| ())
    }

    fn bind(&self) -> Result<Pdfium> {
        let vendor_dir = std::env::current_dir()
            .ok()
            .map(|dir| dir.join(VENDOR_LIBRARY_DIR))
            .filter(|dir| dir.exists());

        for dir in self.library_dir.iter().chain(vendor_dir.iter()) {
            match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)) {
                Ok(bindings) => return Ok(Pdfium::new(bindings)),
                Err(e) => log::debug!("Pdfium not usable from {}: {}", dir.display(), e),
            }
        }

        Pdfium::bind_to_system_library()
            .map(Pdfium::new)
            .map_err(|e| {
                PlancheError::rasterization(None, format!("Pdfium library unavailable: {}", e))
            })
    }
}

impl Rasterizer for PdfiumRasterizer {
    fn rasterize_pages(
        &self,
        pdf: &[u8],
        dpi: f32,
        sink: &mut dyn FnMut(RasterImage) -> Result<()>,
    ) -> Result<()> {
        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|e| PlancheError::rasterization(None, format!("Failed to open PDF: {}", e)))?;

        // Pdfium renders the CropBox, so only the visible window reaches the bitmap
        let config = PdfRenderConfig::new().scale_page_by_factor(dpi / POINTS_PER_INCH);

        for (page_index, page) in document.pages().iter().enumerate() {
            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| PlancheError::rasterization(Some(page_index), e.to_string()))?;

            let width = bitmap.width() as u32;
            let height = bitmap.height() as u32;
            let rgba = bitmap.as_rgba_bytes();
            let image = RasterImage::from_rgba(page_index, width, height, &rgba)?;

            log::trace!("Rasterized page {} at {}x{} px", page_index + 1, width, height);
            sink(image)?;
        }

        Ok(())
    }
}
