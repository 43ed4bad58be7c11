//! Document I/O

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    tokio::task::spawn_blocking(move || load_pdf_bytes(&bytes)).await?
}

/// Parse a PDF held in memory
pub fn load_pdf_bytes(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(|e| PlancheError::InvalidInput(e.to_string()))
}

/// Serialize a document into memory
pub fn document_to_bytes(doc: &mut Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

/// Save a document, leaving nothing behind if the write fails
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || document_to_bytes(&mut doc)).await??;
    write_or_remove(&path, &bytes).await
}

pub(crate) async fn write_or_remove(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Err(e) = tokio::fs::write(path, bytes).await {
        // A short write can still have created the file
        let _ = tokio::fs::remove_file(path).await;
        return Err(e.into());
    }
    Ok(())
}
