//! Shared constants for cropping and planche composition
//!
//! Planche defaults feed `PlancheOptions::default()`. Naming suffixes, the
//! fallback page size and the geometry tolerance are read by the modules
//! that need them.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Page size assumed when a page carries no MediaBox anywhere in its tree
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Planche Defaults
// =============================================================================

/// Default crop window width (mm)
pub const DEFAULT_CROP_WIDTH_MM: f32 = 140.0;

/// Default crop window height (mm)
pub const DEFAULT_CROP_HEIGHT_MM: f32 = 70.0;

/// Vertical gap between stacked slots (points)
pub const DEFAULT_SLOT_GAP_PT: f32 = 5.0;

/// Pages per output sheet
pub const DEFAULT_SLOTS_PER_SHEET: usize = 4;

/// Upper bound on slots per sheet
pub const MAX_SLOTS_PER_SHEET: usize = 64;

/// Rasterization resolution
pub const DEFAULT_DPI: f32 = 300.0;

// =============================================================================
// Naming
// =============================================================================

/// Suffixes stripped from a derived base name, in priority order
pub const CROPPED_SUFFIXES: [&str; 3] = ["-cropped", "_cropped", " cropped"];

/// Marker appended to the base name of the composed file
pub const PLANCHE_SUFFIX: &str = "-planche";

/// Extension of every file this crate writes
pub const PDF_EXTENSION: &str = "pdf";

// =============================================================================
// Tolerances
// =============================================================================

/// Maximum deviation (points) tolerated when comparing computed boxes
pub const GEOMETRY_EPSILON: f32 = 1e-3;
