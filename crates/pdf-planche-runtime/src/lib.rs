//! Command/update plumbing between a front-end and the planche pipeline.
//!
//! A front-end sends [`PlancheCommand`]s over an unbounded channel and reads
//! [`PlancheUpdate`]s back. [`worker_task`] handles one command at a time.

mod handlers;
mod worker;

use std::path::PathBuf;

// Re-export types from the library crate
pub use pdf_planche::{PlancheOptions, PlancheStatistics};
pub use worker::worker_task;

/// Commands sent from a front-end to the worker
#[derive(Debug)]
pub enum PlancheCommand {
    /// Crop and compose an uploaded PDF, delivering the planche to `destination_dir`
    Generate {
        source_bytes: Vec<u8>,
        /// Name the file was uploaded under; its stem becomes the output base name
        file_name: String,
        destination_dir: PathBuf,
        options: PlancheOptions,
    },
    CalculateStats {
        source_bytes: Vec<u8>,
        options: PlancheOptions,
    },
}

/// Updates sent from the worker to a front-end
#[derive(Debug, Clone)]
pub enum PlancheUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    Complete {
        path: PathBuf,
        sheets: usize,
    },
    StatsCalculated {
        stats: PlancheStatistics,
    },
    Error {
        message: String,
    },
}

/// Failures inside a worker job, flattened into [`PlancheUpdate::Error`]
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Failed to prepare scratch directory: {0}")]
    Scratch(#[source] std::io::Error),
    #[error("Failed to crop PDF: {0}")]
    Crop(#[source] pdf_planche::PlancheError),
    #[error("Failed to compose planches: {0}")]
    Compose(#[source] pdf_planche::PlancheError),
    #[error("Failed to deliver {path}: {source}")]
    Deliver {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to calculate statistics: {0}")]
    Stats(#[source] pdf_planche::PlancheError),
}
