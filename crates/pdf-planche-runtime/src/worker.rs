use crate::{PlancheCommand, PlancheUpdate, handlers};
use pdf_planche::Rasterizer;
use tokio::sync::mpsc;

/// Async worker task that processes planche commands and sends updates.
///
/// Runs until every command sender is dropped.
pub async fn worker_task<R>(
    rasterizer: R,
    mut command_rx: mpsc::UnboundedReceiver<PlancheCommand>,
    update_tx: mpsc::UnboundedSender<PlancheUpdate>,
) where
    R: Rasterizer + Clone + 'static,
{
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &rasterizer, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command<R>(
    cmd: PlancheCommand,
    rasterizer: &R,
    update_tx: &mpsc::UnboundedSender<PlancheUpdate>,
) where
    R: Rasterizer + Clone + 'static,
{
    match cmd {
        PlancheCommand::Generate {
            source_bytes,
            file_name,
            destination_dir,
            options,
        } => {
            log::debug!("Generating planches for {}", file_name);
            handlers::handle_generate(
                source_bytes,
                &file_name,
                destination_dir,
                options,
                rasterizer.clone(),
                update_tx,
            )
            .await;
        }
        PlancheCommand::CalculateStats {
            source_bytes,
            options,
        } => {
            log::debug!("Calculating statistics");
            handlers::handle_calculate_stats(source_bytes, options, update_tx).await;
        }
    }
}
