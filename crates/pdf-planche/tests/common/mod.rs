#![allow(dead_code)]

use image::{Rgb, RgbImage};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_planche::*;
use std::sync::{Arc, Mutex};

/// Build a document whose pages all share one MediaBox
pub fn create_test_pdf(num_pages: usize, media_box: [f32; 4]) -> Document {
    create_test_pdf_with_boxes(&vec![media_box; num_pages])
}

/// Build a document with one page per MediaBox
pub fn create_test_pdf_with_boxes(media_boxes: &[[f32; 4]]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for (index, media_box) in media_boxes.iter().enumerate() {
        let content = format!("BT /F1 12 Tf 10 10 Td (Page {}) Tj ET", index + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(media_box.iter().map(|v| Object::Real(*v)).collect()),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(media_boxes.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

pub const LETTER: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Cropped document ready for composition with default options
pub fn cropped_test_pdf(num_pages: usize) -> Document {
    let options = PlancheOptions::default();
    crop_document(&create_test_pdf(num_pages, LETTER), options.crop_size()).unwrap()
}

pub fn save_to_bytes(doc: &Document) -> Vec<u8> {
    document_to_bytes(&mut doc.clone()).unwrap()
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

pub fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("expected a number, got {:?}", other),
    }
}

pub fn box_values(doc: &Document, page_id: ObjectId, key: &[u8]) -> [f32; 4] {
    let array = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(key)
        .unwrap()
        .as_array()
        .unwrap();
    [
        number(&array[0]),
        number(&array[1]),
        number(&array[2]),
        number(&array[3]),
    ]
}

/// A placed image found on an output sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Red channel of the image's first pixel (the fake rasterizer stores the page index there)
    pub marker: u8,
}

/// Decode every image placement on a planche, in drawing order
pub fn placements(doc: &Document, page_id: ObjectId) -> Vec<Placement> {
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    let xobjects = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap()
        .get(b"XObject")
        .unwrap()
        .as_dict()
        .unwrap();

    let mut result = Vec::new();
    let mut matrix = [0.0f32; 6];
    for op in &content.operations {
        match op.operator.as_str() {
            "cm" => {
                for (slot, operand) in matrix.iter_mut().zip(op.operands.iter()) {
                    *slot = number(operand);
                }
            }
            "Do" => {
                let name = op.operands[0].as_name().unwrap();
                let image_id = xobjects.get(name).unwrap().as_reference().unwrap();
                let stream = doc.get_object(image_id).unwrap().as_stream().unwrap();
                let data = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                result.push(Placement {
                    x: matrix[4],
                    y: matrix[5],
                    width: matrix[0],
                    height: matrix[3],
                    marker: data[0],
                });
            }
            _ => {}
        }
    }
    result
}

/// Rasterizer that paints each page a flat color keyed by its index
#[derive(Debug, Clone, Default)]
pub struct FakeRasterizer {
    /// Stop after this many pages without error
    pub truncate_after: Option<usize>,
    pub seen_dpi: Arc<Mutex<Option<f32>>>,
}

impl Rasterizer for FakeRasterizer {
    fn rasterize_pages(
        &self,
        pdf: &[u8],
        dpi: f32,
        sink: &mut dyn FnMut(RasterImage) -> pdf_planche::Result<()>,
    ) -> pdf_planche::Result<()> {
        *self.seen_dpi.lock().unwrap() = Some(dpi);
        let doc = load_pdf_bytes(pdf)?;
        let count = doc.get_pages().len();
        let limit = self.truncate_after.unwrap_or(count).min(count);

        for page_index in 0..limit {
            let pixels = RgbImage::from_pixel(4, 2, Rgb([page_index as u8, 10, 20]));
            sink(RasterImage::new(page_index, pixels))?;
        }
        Ok(())
    }
}

/// Rasterizer standing in for a missing backend
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRasterizer;

impl Rasterizer for UnavailableRasterizer {
    fn rasterize_pages(
        &self,
        _pdf: &[u8],
        _dpi: f32,
        _sink: &mut dyn FnMut(RasterImage) -> pdf_planche::Result<()>,
    ) -> pdf_planche::Result<()> {
        Err(PlancheError::Rasterization {
            page: None,
            message: "backend library not found".to_string(),
        })
    }
}

/// Rasterizer that fails on one page after rendering the earlier ones
#[derive(Debug, Clone, Copy)]
pub struct FailingRasterizer {
    pub fail_at: usize,
}

impl Rasterizer for FailingRasterizer {
    fn rasterize_pages(
        &self,
        _pdf: &[u8],
        _dpi: f32,
        sink: &mut dyn FnMut(RasterImage) -> pdf_planche::Result<()>,
    ) -> pdf_planche::Result<()> {
        for page_index in 0..self.fail_at {
            sink(RasterImage::new(page_index, RgbImage::new(2, 1)))?;
        }
        Err(PlancheError::Rasterization {
            page: Some(self.fail_at),
            message: "corrupt page content".to_string(),
        })
    }
}
