pub mod compose;
mod constants;
pub mod crop;
mod io;
pub mod layout;
pub mod naming;
mod options;
mod progress;
pub mod raster;
mod stats;
mod types;

pub use compose::{PlancheBuilder, compose_document, compose_file};
pub use constants::{MAX_SLOTS_PER_SHEET, POINTS_PER_MM, mm_to_pt};
pub use crop::{crop_document, crop_file, crop_window};
pub use io::{document_to_bytes, load_pdf, load_pdf_bytes, save_pdf};
pub use naming::{planche_file_name, planche_output_path, strip_cropped_suffix};
pub use options::*;
pub use progress::{NoProgress, Progress, ProgressObserver};
#[cfg(feature = "pdfium")]
pub use raster::PdfiumRasterizer;
pub use raster::{RasterImage, Rasterizer};
pub use stats::{calculate_statistics, statistics_for_page_count};
pub use types::*;
