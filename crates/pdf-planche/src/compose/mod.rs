//! Planche composition
//!
//! This module orchestrates the composition process:
//! 1. Resolve options into sheet geometry
//! 2. Rasterize each cropped page
//! 3. Place bitmaps into stacked slots, one sheet per group of pages
//! 4. Serialize the sheets into the output PDF

mod builder;
mod sheet;

pub use builder::{PlacedSlot, PlancheBuilder};

use crate::constants::GEOMETRY_EPSILON;
use crate::crop::effective_media_box;
use crate::io::{document_to_bytes, load_pdf, save_pdf};
use crate::layout::PlancheLayout;
use crate::naming::planche_output_path;
use crate::options::PlancheOptions;
use crate::progress::ProgressObserver;
use crate::raster::{RasterImage, Rasterizer};
use crate::types::*;
use lopdf::{Document, ObjectId};
use std::path::{Path, PathBuf};

/// Compose a cropped document into planches.
///
/// Pages are taken in order and grouped by `slots_per_sheet`; the last sheet
/// may be partially filled. Any rasterization failure aborts the whole job.
pub fn compose_document(
    cropped: &Document,
    options: &PlancheOptions,
    rasterizer: &dyn Rasterizer,
    progress: &mut dyn ProgressObserver,
) -> Result<Document> {
    let layout = options.layout()?;
    if layout.overflows_sheet() {
        log::warn!(
            "Slot stack ({} x {} pt) does not fit on the {} x {} pt sheet",
            layout.slot.width,
            layout.stack_height(),
            layout.sheet.width,
            layout.sheet.height
        );
    }

    let page_ids: Vec<ObjectId> = cropped.get_pages().values().copied().collect();
    let total = page_ids.len();
    warn_on_size_mismatch(cropped, &page_ids, &layout)?;

    let mut builder = PlancheBuilder::new(layout);

    if total > 0 {
        let pdf = document_to_bytes(&mut cropped.clone())?;
        let mut done = 0;

        rasterizer.rasterize_pages(&pdf, options.dpi, &mut |image: RasterImage| -> Result<()> {
            if image.page_index >= total {
                return Err(PlancheError::rasterization(
                    Some(image.page_index),
                    format!("document only has {} page(s)", total),
                ));
            }
            builder.place(image)?;
            done += 1;
            progress.on_progress(done, total);
            Ok(())
        })?;

        if done != total {
            return Err(PlancheError::rasterization(
                None,
                format!("backend produced {} of {} page(s)", done, total),
            ));
        }
    }

    progress.on_progress(total, total);
    builder.finish()
}

/// Compose the cropped PDF at `input` and write the planches.
///
/// The output goes to `output` when given, otherwise next to `input` under a
/// name derived by [`planche_output_path`]. Returns the written path. On
/// failure no output file is left behind.
pub async fn compose_file<R, P>(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    base_name: Option<&str>,
    options: &PlancheOptions,
    rasterizer: R,
    progress: P,
) -> Result<PathBuf>
where
    R: Rasterizer + 'static,
    P: ProgressObserver + 'static,
{
    let input = input.as_ref();
    let output_path = match output {
        Some(path) => path.to_owned(),
        None => planche_output_path(input, base_name),
    };
    options.validate()?;

    let cropped = load_pdf(input).await?;
    let options = options.clone();
    let planches = tokio::task::spawn_blocking(move || {
        let mut progress = progress;
        compose_document(&cropped, &options, &rasterizer, &mut progress)
    })
    .await??;

    save_pdf(planches, &output_path).await?;
    log::info!("Wrote {}", output_path.display());
    Ok(output_path)
}

fn warn_on_size_mismatch(
    doc: &Document,
    page_ids: &[ObjectId],
    layout: &PlancheLayout,
) -> Result<()> {
    for (index, page_id) in page_ids.iter().enumerate() {
        let media_box = effective_media_box(doc, *page_id)?;
        if (media_box.width - layout.slot.width).abs() > GEOMETRY_EPSILON
            || (media_box.height - layout.slot.height).abs() > GEOMETRY_EPSILON
        {
            log::warn!(
                "Page {} is {} x {} pt, slot is {} x {} pt; it will be stretched",
                index + 1,
                media_box.width,
                media_box.height,
                layout.slot.width,
                layout.slot.height
            );
        }
    }
    Ok(())
}
