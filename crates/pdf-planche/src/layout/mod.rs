//! Layout calculation for planches
//!
//! This module handles the geometry of a planche:
//! - Slot rectangles stacked in a single centered column
//! - Mapping source page indices to (sheet, slot) addresses
//! - Sheet counts for pagination

mod grid;
mod types;

pub use grid::*;
pub use types::*;
