//! Page box access
//!
//! Page boxes may live on the page itself or be inherited from an ancestor
//! `Pages` node, so lookups walk the `Parent` chain.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::Rect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Guards against malformed page trees that loop back on themselves
const MAX_TREE_DEPTH: usize = 32;

/// Effective MediaBox of a page, falling back to US Letter at the origin
pub fn effective_media_box(doc: &Document, page_id: ObjectId) -> Result<Rect> {
    let page_dict = doc.get_dictionary(page_id)?;
    let media_box = inherited_attribute(doc, page_dict, b"MediaBox")
        .and_then(|obj| box_from_object(doc, obj));

    Ok(media_box.unwrap_or_else(|| {
        Rect::new(0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1)
    }))
}

/// Write a box onto the page dictionary
pub fn set_page_box(doc: &mut Document, page_id: ObjectId, key: &[u8], rect: &Rect) -> Result<()> {
    let page_dict = doc.get_dictionary_mut(page_id)?;
    page_dict.set(key.to_vec(), rect_to_object(rect));
    Ok(())
}

/// Encode a rectangle as a PDF box array
pub fn rect_to_object(rect: &Rect) -> Object {
    Object::Array(vec![
        Object::Real(rect.x),
        Object::Real(rect.y),
        Object::Real(rect.right()),
        Object::Real(rect.top()),
    ])
}

fn inherited_attribute<'a>(
    doc: &'a Document,
    page_dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = page_dict;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
        let parent_id = current.get(b"Parent").and_then(|p| p.as_reference()).ok()?;
        current = doc.get_dictionary(parent_id).ok()?;
    }
    None
}

/// Decode a box array, normalizing corner order
fn box_from_object(doc: &Document, obj: &Object) -> Option<Rect> {
    let obj = match obj {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let values = obj.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }

    let numbers: Vec<f32> = values
        .iter()
        .map(|value| extract_number(doc, value))
        .collect::<Option<_>>()?;

    let (llx, urx) = (numbers[0].min(numbers[2]), numbers[0].max(numbers[2]));
    let (lly, ury) = (numbers[1].min(numbers[3]), numbers[1].max(numbers[3]));
    Some(Rect::from_corners(llx, lly, urx, ury))
}

/// Extract numeric value from a PDF object
fn extract_number(doc: &Document, obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        Object::Reference(id) => doc
            .get_object(*id)
            .ok()
            .and_then(|inner| match inner {
                Object::Integer(i) => Some(*i as f32),
                Object::Real(r) => Some(*r),
                _ => None,
            }),
        _ => None,
    }
}
