//! Sheet rendering

use super::builder::PlacedSlot;
use crate::crop::rect_to_object;
use crate::layout::{PlancheLayout, Rect};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Write one planche page: every filled slot draws its image scaled to the
/// slot rectangle, empty slots draw nothing.
pub(crate) fn render_sheet(
    output: &mut Document,
    layout: &PlancheLayout,
    slots: &[Option<PlacedSlot>],
    parent_pages_id: ObjectId,
) -> Result<ObjectId> {
    let sheet_box = Rect::new(0.0, 0.0, layout.sheet.width, layout.sheet.height);

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set("MediaBox", rect_to_object(&sheet_box));

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for (slot_index, slot) in slots.iter().enumerate() {
        if let Some(placed) = slot {
            let name = format!("Im{}", slot_index);
            xobjects.set(name.as_bytes(), Object::Reference(placed.image_id));
            content_ops.push(generate_image_command(
                &name,
                &layout.slot_rect(slot_index),
            ));
        }
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// Image space is the unit square, so scaling by the slot size fills it exactly
fn generate_image_command(xobject_name: &str, rect: &Rect) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        rect.width, rect.height, rect.x, rect.y, xobject_name
    )
}
