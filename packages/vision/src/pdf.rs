//! PDF assembly
//!
//! One page per band. Each band is JPEG encoded and embedded as an image
//! XObject drawn at full page width, flush with the top edge.

use crate::paginate::PageBand;
use crate::types::{mm_to_pt, PageLayout};
use crate::Result;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// Build a PDF from `image` cut along `bands`, entirely in memory
pub fn assemble_pdf(image: &RgbImage, bands: &[PageBand], layout: &PageLayout, jpeg_quality: u8) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let page_width = layout.page_width_pt();
    let page_height = layout.page_height_pt();

    let mut kids: Vec<Object> = Vec::with_capacity(bands.len());
    for band in bands {
        let page_id = add_band_page(&mut doc, pages_id, image, band, page_width, page_height, jpeg_quality)?;
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn add_band_page(
    doc: &mut Document,
    pages_id: ObjectId,
    image: &RgbImage,
    band: &PageBand,
    page_width: f32,
    page_height: f32,
    jpeg_quality: u8,
) -> Result<ObjectId> {
    let slice = imageops::crop_imm(image, 0, band.y_px, image.width(), band.height_px).to_image();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, jpeg_quality).encode_image(&slice)?;

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => slice.width() as i64,
            "Height" => slice.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ));

    let drawn_height = mm_to_pt(band.height_mm);
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    page_width.into(),
                    0_i64.into(),
                    0_i64.into(),
                    drawn_height.into(),
                    0_i64.into(),
                    (page_height - drawn_height).into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0_i64.into(), 0_i64.into(), page_width.into(), page_height.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        },
    });

    Ok(page_id)
}
