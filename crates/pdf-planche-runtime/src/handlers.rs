use crate::{JobError, PlancheUpdate};
use pdf_planche::{
    PlancheError, PlancheOptions, Rasterizer, calculate_statistics, compose_file, crop_file,
    load_pdf_bytes, statistics_for_page_count,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

const INPUT_FILE_NAME: &str = "input.pdf";
const CROPPED_FILE_NAME: &str = "cropped.pdf";
const FALLBACK_BASE_NAME: &str = "document";

/// Steps reported before the per-page composition progress starts
const PREPARE_STEPS: usize = 2;

pub async fn handle_generate<R>(
    source_bytes: Vec<u8>,
    file_name: &str,
    destination_dir: PathBuf,
    options: PlancheOptions,
    rasterizer: R,
    update_tx: &mpsc::UnboundedSender<PlancheUpdate>,
) where
    R: Rasterizer + 'static,
{
    let update = match generate(
        source_bytes,
        file_name,
        &destination_dir,
        &options,
        rasterizer,
        update_tx,
    )
    .await
    {
        Ok((path, sheets)) => {
            log::info!("Generated {} planche(s) → {}", sheets, path.display());
            PlancheUpdate::Complete { path, sheets }
        }
        Err(e) => {
            log::error!("{}", e);
            PlancheUpdate::Error {
                message: e.to_string(),
            }
        }
    };
    let _ = update_tx.send(update);
}

/// Run the whole job inside a scratch directory that is removed on return
async fn generate<R>(
    source_bytes: Vec<u8>,
    file_name: &str,
    destination_dir: &Path,
    options: &PlancheOptions,
    rasterizer: R,
    update_tx: &mpsc::UnboundedSender<PlancheUpdate>,
) -> Result<(PathBuf, usize), JobError>
where
    R: Rasterizer + 'static,
{
    let scratch = tempfile::tempdir().map_err(JobError::Scratch)?;
    let input_path = scratch.path().join(INPUT_FILE_NAME);
    let cropped_path = scratch.path().join(CROPPED_FILE_NAME);

    tokio::fs::write(&input_path, &source_bytes)
        .await
        .map_err(JobError::Scratch)?;

    send_step(update_tx, "Cropping pages", 0);
    crop_file(&input_path, &cropped_path, options)
        .await
        .map_err(JobError::Crop)?;

    send_step(update_tx, "Composing planches", 1);
    let progress_tx = update_tx.clone();
    let page_count = Arc::new(AtomicUsize::new(0));
    let observed_pages = Arc::clone(&page_count);
    let progress = move |current: usize, total: usize| {
        observed_pages.store(total, Ordering::Relaxed);
        let _ = progress_tx.send(PlancheUpdate::Progress {
            operation: "Placing pages".to_string(),
            current,
            total,
        });
    };
    let base_name = upload_base_name(file_name);
    let composed = compose_file(
        &cropped_path,
        None,
        Some(base_name.as_str()),
        options,
        rasterizer,
        progress,
    )
    .await
    .map_err(JobError::Compose)?;

    // The final progress report always carries the page total
    let sheets = statistics_for_page_count(page_count.load(Ordering::Relaxed), options)
        .map_err(JobError::Compose)?
        .output_sheets;

    let delivered = deliver(&composed, destination_dir).await?;
    Ok((delivered, sheets))
}

/// Copy the composed file into `destination_dir`, keeping its name
async fn deliver(composed: &Path, destination_dir: &Path) -> Result<PathBuf, JobError> {
    let target = match composed.file_name() {
        Some(name) => destination_dir.join(name),
        None => destination_dir.to_owned(),
    };
    let deliver_error = |source| JobError::Deliver {
        path: target.clone(),
        source,
    };

    tokio::fs::create_dir_all(destination_dir)
        .await
        .map_err(deliver_error)?;
    tokio::fs::copy(composed, &target)
        .await
        .map_err(deliver_error)?;
    Ok(target)
}

/// Base name for an uploaded file: its stem, used verbatim
fn upload_base_name(file_name: &str) -> String {
    match Path::new(file_name).file_stem() {
        Some(stem) if !stem.is_empty() => stem.to_string_lossy().into_owned(),
        _ => FALLBACK_BASE_NAME.to_string(),
    }
}

fn send_step(update_tx: &mpsc::UnboundedSender<PlancheUpdate>, operation: &str, current: usize) {
    let _ = update_tx.send(PlancheUpdate::Progress {
        operation: operation.to_string(),
        current,
        total: PREPARE_STEPS,
    });
}

pub async fn handle_calculate_stats(
    source_bytes: Vec<u8>,
    options: PlancheOptions,
    update_tx: &mpsc::UnboundedSender<PlancheUpdate>,
) {
    let result = tokio::task::spawn_blocking(move || {
        let doc = load_pdf_bytes(&source_bytes)?;
        calculate_statistics(&doc, &options)
    })
    .await
    .map_err(PlancheError::from)
    .and_then(|stats| stats)
    .map_err(JobError::Stats);

    let update = match result {
        Ok(stats) => PlancheUpdate::StatsCalculated { stats },
        Err(e) => PlancheUpdate::Error {
            message: e.to_string(),
        },
    };
    let _ = update_tx.send(update);
}
