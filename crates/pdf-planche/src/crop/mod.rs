//! Page cropping
//!
//! Every page of a document gets a new visible area: a window of a fixed
//! physical size centered on the page's original MediaBox. Only the MediaBox
//! and CropBox entries change; content streams are left exactly as they were,
//! so content outside the window is clipped rather than removed.

mod boxes;

pub use boxes::{effective_media_box, rect_to_object};

use crate::io::{load_pdf, save_pdf};
use crate::layout::Rect;
use crate::options::PlancheOptions;
use crate::types::*;
use boxes::set_page_box;
use lopdf::{Document, ObjectId};
use std::path::Path;

/// Compute the crop window for a page box.
///
/// The window keeps the page's coordinate system: its origin is offset by
/// half the size difference on each axis. A page smaller than `size` yields
/// a window reaching past the page edges.
pub fn crop_window(media_box: &Rect, size: PhysicalSize) -> Rect {
    let left = media_box.x + (media_box.width - size.width) / 2.0;
    let bottom = media_box.y + (media_box.height - size.height) / 2.0;
    Rect::new(left, bottom, size.width, size.height)
}

/// Produce a copy of `source` with every page cropped to `size`.
///
/// Page count and order are preserved. An empty document yields an empty
/// document.
pub fn crop_document(source: &Document, size: PhysicalSize) -> Result<Document> {
    size.ensure_valid("Crop size")?;

    let mut cropped = source.clone();
    let page_ids: Vec<ObjectId> = cropped.get_pages().values().copied().collect();

    for (index, page_id) in page_ids.iter().enumerate() {
        let media_box = effective_media_box(&cropped, *page_id)?;
        let window = crop_window(&media_box, size);

        if window.x < media_box.x || window.y < media_box.y {
            log::debug!(
                "Page {} ({} x {} pt) is smaller than the crop window",
                index + 1,
                media_box.width,
                media_box.height
            );
        }

        set_page_box(&mut cropped, *page_id, b"MediaBox", &window)?;
        set_page_box(&mut cropped, *page_id, b"CropBox", &window)?;
    }

    log::debug!("Cropped {} page(s) to {} x {} pt", page_ids.len(), size.width, size.height);
    Ok(cropped)
}

/// Crop the PDF at `input` and write the result to `output`
pub async fn crop_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &PlancheOptions,
) -> Result<()> {
    options.validate()?;
    let size = options.crop_size();

    let source = load_pdf(input).await?;
    let cropped = tokio::task::spawn_blocking(move || crop_document(&source, size)).await??;
    save_pdf(cropped, output).await
}
