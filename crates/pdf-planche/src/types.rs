use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlancheError {
    #[error("Invalid input document: {0}")]
    InvalidInput(String),
    #[error("Invalid geometry: {0}")]
    Geometry(String),
    #[error("Rasterization failed{}: {message}", page_suffix(.page))]
    Rasterization {
        /// Zero-based source page, when the failure is tied to one page
        page: Option<usize>,
        message: String,
    },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

fn page_suffix(page: &Option<usize>) -> String {
    match page {
        Some(index) => format!(" on page {}", index + 1),
        None => String::new(),
    }
}

impl PlancheError {
    pub(crate) fn rasterization(page: Option<usize>, message: impl Into<String>) -> Self {
        PlancheError::Rasterization {
            page,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlancheError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes for the output sheets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// A width/height pair in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalSize {
    pub width: f32,
    pub height: f32,
}

impl PhysicalSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Build a size from millimetre dimensions
    pub fn from_mm(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width: crate::constants::mm_to_pt(width_mm),
            height: crate::constants::mm_to_pt(height_mm),
        }
    }

    /// Both dimensions are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub(crate) fn ensure_valid(&self, what: &str) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(PlancheError::Geometry(format!(
                "{} must be positive, got {} x {} pt",
                what, self.width, self.height
            )))
        }
    }
}

/// Crop sizes the tool ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CropPreset {
    /// 140 x 70 mm horizontal strip
    #[default]
    Strip140x70,
    /// 70 x 140 mm upright strip
    Upright70x140,
}

impl CropPreset {
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            CropPreset::Strip140x70 => (140.0, 70.0),
            CropPreset::Upright70x140 => (70.0, 140.0),
        }
    }
}

/// Statistics about a planche job
#[derive(Debug, Clone, PartialEq)]
pub struct PlancheStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Number of output sheets (planches)
    pub output_sheets: usize,
    /// Slots available on each sheet
    pub slots_per_sheet: usize,
    /// Slots left empty on the last sheet
    pub empty_slots: usize,
    /// Pixel size of each rasterized page (width, height)
    pub raster_pixels: (u32, u32),
    /// Whether the slot stack is larger than the sheet
    pub overflows_sheet: bool,
}
