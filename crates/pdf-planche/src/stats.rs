use crate::options::PlancheOptions;
use crate::raster::pixels_for;
use crate::types::*;
use lopdf::Document;

/// Calculate statistics for composing `document` with `options`
pub fn calculate_statistics(
    document: &Document,
    options: &PlancheOptions,
) -> Result<PlancheStatistics> {
    statistics_for_page_count(document.get_pages().len(), options)
}

/// Calculate statistics from a page count alone
pub fn statistics_for_page_count(
    source_pages: usize,
    options: &PlancheOptions,
) -> Result<PlancheStatistics> {
    let layout = options.layout()?;

    let output_sheets = layout.sheet_count(source_pages);
    let capacity = output_sheets * layout.slots_per_sheet;
    let empty_slots = capacity - source_pages;

    let raster_pixels = (
        pixels_for(layout.slot.width, options.dpi),
        pixels_for(layout.slot.height, options.dpi),
    );

    Ok(PlancheStatistics {
        source_pages,
        output_sheets,
        slots_per_sheet: layout.slots_per_sheet,
        empty_slots,
        raster_pixels,
        overflows_sheet: layout.overflows_sheet(),
    })
}
