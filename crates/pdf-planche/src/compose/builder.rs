//! Accumulates placed pages and serializes them as planches

use super::sheet::render_sheet;
use crate::layout::{PlancheLayout, SlotAddress};
use crate::raster::RasterImage;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// A page that has been written to the output as an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedSlot {
    /// Zero-based source page index
    pub page_index: usize,
    /// Image XObject holding the page bitmap
    pub image_id: ObjectId,
}

/// Builder owning the output document and the ordered sheets.
///
/// Each sheet is a fixed row of optional slots. Bitmaps are written into the
/// output as soon as they are placed; pages and the page tree are only
/// written by [`PlancheBuilder::finish`].
pub struct PlancheBuilder {
    output: Document,
    layout: PlancheLayout,
    sheets: Vec<Vec<Option<PlacedSlot>>>,
}

impl PlancheBuilder {
    pub fn new(layout: PlancheLayout) -> Self {
        Self {
            output: Document::with_version("1.7"),
            layout,
            sheets: Vec::new(),
        }
    }

    pub fn layout(&self) -> &PlancheLayout {
        &self.layout
    }

    /// Number of sheets started so far
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Slots of sheet `index`, top to bottom
    pub fn sheet(&self, index: usize) -> Option<&[Option<PlacedSlot>]> {
        self.sheets.get(index).map(Vec::as_slice)
    }

    /// Place a rasterized page into the slot its index maps to
    pub fn place(&mut self, image: RasterImage) -> Result<SlotAddress> {
        let page_index = image.page_index;
        let address = self.layout.locate(page_index);

        while self.sheets.len() <= address.sheet {
            self.sheets.push(vec![None; self.layout.slots_per_sheet]);
        }

        if self.sheets[address.sheet][address.slot].is_some() {
            return Err(PlancheError::rasterization(
                Some(page_index),
                "page delivered more than once",
            ));
        }

        let image_id = self.add_image(image);
        self.sheets[address.sheet][address.slot] = Some(PlacedSlot {
            page_index,
            image_id,
        });
        Ok(address)
    }

    fn add_image(&mut self, image: RasterImage) -> ObjectId {
        let mut image_dict = Dictionary::new();
        image_dict.set("Type", Object::Name(b"XObject".to_vec()));
        image_dict.set("Subtype", Object::Name(b"Image".to_vec()));
        image_dict.set("Width", Object::Integer(image.width() as i64));
        image_dict.set("Height", Object::Integer(image.height() as i64));
        image_dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
        image_dict.set("BitsPerComponent", Object::Integer(8));

        self.output
            .add_object(Stream::new(image_dict, image.into_rgb_bytes()))
    }

    /// Write every sheet, the page tree and the catalog
    pub fn finish(mut self) -> Result<Document> {
        let pages_tree_id = self.output.new_object_id();
        let mut page_refs = Vec::with_capacity(self.sheets.len());

        for (index, slots) in self.sheets.iter().enumerate() {
            let page_id = render_sheet(&mut self.output, &self.layout, slots, pages_tree_id)?;
            log::debug!(
                "Sheet {}: {} of {} slot(s) filled",
                index + 1,
                slots.iter().flatten().count(),
                slots.len()
            );
            page_refs.push(Object::Reference(page_id));
        }

        // Create pages tree
        let count = page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(pages_tree_id, Object::Dictionary(pages_dict));

        // Create catalog
        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_tree_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        self.output.compress();
        Ok(self.output)
    }
}
