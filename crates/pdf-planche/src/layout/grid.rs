//! Slot stacking geometry
//!
//! A planche is a single column of equally sized slots separated by a fixed
//! gap. The column is centered horizontally and the whole stack (as if every
//! slot were filled) is centered vertically on the sheet.

use crate::types::PhysicalSize;

use super::{Rect, SlotAddress};

/// Resolved geometry for one planche job, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlancheLayout {
    pub sheet: PhysicalSize,
    pub slot: PhysicalSize,
    pub gap: f32,
    pub slots_per_sheet: usize,
}

impl PlancheLayout {
    pub fn new(sheet: PhysicalSize, slot: PhysicalSize, gap: f32, slots_per_sheet: usize) -> Self {
        Self {
            sheet,
            slot,
            gap,
            slots_per_sheet,
        }
    }

    /// Height of the full slot stack, gaps included
    pub fn stack_height(&self) -> f32 {
        let n = self.slots_per_sheet as f32;
        n * self.slot.height + (n - 1.0).max(0.0) * self.gap
    }

    /// Space between the top of the sheet and the top of the first slot
    pub fn margin_top(&self) -> f32 {
        (self.sheet.height - self.stack_height()) / 2.0
    }

    /// Left edge shared by every slot
    pub fn slot_x(&self) -> f32 {
        (self.sheet.width - self.slot.width) / 2.0
    }

    /// Bottom edge of slot `index` (0 = topmost)
    pub fn slot_y(&self, index: usize) -> f32 {
        let j = index as f32;
        self.sheet.height - self.margin_top() - (j + 1.0) * self.slot.height - j * self.gap
    }

    /// Rectangle of slot `index` on the sheet
    pub fn slot_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.slot_x(),
            self.slot_y(index),
            self.slot.width,
            self.slot.height,
        )
    }

    /// Every slot rectangle, top to bottom
    pub fn slot_rects(&self) -> Vec<Rect> {
        (0..self.slots_per_sheet)
            .map(|index| self.slot_rect(index))
            .collect()
    }

    /// Sheet and slot for a zero-based source page index
    pub fn locate(&self, page_index: usize) -> SlotAddress {
        SlotAddress {
            sheet: page_index / self.slots_per_sheet,
            slot: page_index % self.slots_per_sheet,
        }
    }

    /// Number of sheets needed for `page_count` pages
    pub fn sheet_count(&self, page_count: usize) -> usize {
        page_count.div_ceil(self.slots_per_sheet)
    }

    /// Filled slots on sheet `sheet` when composing `page_count` pages
    pub fn filled_slots(&self, sheet: usize, page_count: usize) -> usize {
        let start = sheet.saturating_mul(self.slots_per_sheet);
        page_count
            .saturating_sub(start)
            .min(self.slots_per_sheet)
    }

    /// The slot stack does not fit inside the sheet
    pub fn overflows_sheet(&self) -> bool {
        self.stack_height() > self.sheet.height || self.slot.width > self.sheet.width
    }
}
