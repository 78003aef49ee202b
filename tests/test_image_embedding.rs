//! Integration tests for image embedding.
//!
//! Covers the path from pixel buffer to written image object:
//! - Repacking of gray, RGB and RGBA buffers with and without padding
//! - ASCII85 and Flate encoded image streams
//! - Deferred writing and object numbering
//! - Compressor failures surfacing as errors

mod common;

use common::{object_text, parse_xref, stream_object};
use flate2::read::ZlibDecoder;
use pdf_plotter::encoders::{Ascii85Decoder, StreamEncoder};
use pdf_plotter::geometry::Rect;
use pdf_plotter::writer::{ColorSpace, Document, DocumentState, ImagePlacement, RasterImage};
use pdf_plotter::{Error, ErrorKind, ObjectId, WriterConfig};
use std::io::Read;

const GRAY_4X6: [u8; 24] = [
    0x40, 0x40, 0x40, 0x40, 0x50, 0x00, 0x00, 0x50, 0x60, 0x77, 0x77, 0x60, 0x60, 0xCC, 0xCC,
    0x60, 0x70, 0x00, 0x00, 0x70, 0x80, 0x80, 0x80, 0x80,
];

fn letter() -> Rect {
    Rect::from_coords(0.0, 0.0, 612.0, 792.0)
}

fn placement() -> ImagePlacement {
    ImagePlacement::new(100.0, 100.0, 40.0, 60.0)
}

fn write_single_image(config: WriterConfig, image: RasterImage) -> Vec<u8> {
    let mut doc = Document::new(config);
    doc.open(Vec::new(), letter()).unwrap();
    let id = doc.draw_image(image, placement()).unwrap();
    assert_eq!(id, ObjectId::new(6));
    doc.close().unwrap().unwrap()
}

struct BrokenCompressor;

impl StreamEncoder for BrokenCompressor {
    fn encode(&mut self, _input: &[u8]) -> pdf_plotter::Result<Vec<u8>> {
        Err(Error::Encoding {
            filter: "FlateDecode".to_string(),
            object: None,
            reason: "stream error".to_string(),
        })
    }

    fn filter_name(&self) -> &str {
        "FlateDecode"
    }
}

#[test]
fn test_gray_repack_without_padding_is_identity() {
    let image = RasterImage::new(4, 6, 8, 4, GRAY_4X6.to_vec()).unwrap();
    assert_eq!(image.color_space(), ColorSpace::DeviceGray);
    assert_eq!(image.repack(), GRAY_4X6.to_vec());
}

#[test]
fn test_rgba_repack_drops_alpha() {
    let width = 3;
    let height = 2;
    let pixels: Vec<u8> = (0..(width * height * 4) as u8).collect();
    let image = RasterImage::new(width, height, 32, (width * 4) as usize, pixels.clone()).unwrap();

    let packed = image.repack();
    assert_eq!(packed.len(), (width * height * 3) as usize);
    let expected: Vec<u8> = pixels
        .chunks_exact(4)
        .flat_map(|pixel| pixel[..3].to_vec())
        .collect();
    assert_eq!(packed, expected);
}

#[test]
fn test_rgba_repack_with_padding() {
    // 1 pixel per row, 4 padding bytes.
    let pixels = vec![1, 2, 3, 9, 0xAA, 0xAA, 0xAA, 0xAA, 4, 5, 6, 9, 0xAA, 0xAA, 0xAA, 0xAA];
    let image = RasterImage::new(1, 2, 32, 8, pixels).unwrap();
    assert_eq!(image.repack(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_ascii85_image_object() {
    let image = RasterImage::new(4, 6, 8, 4, GRAY_4X6.to_vec()).unwrap();
    let bytes = write_single_image(WriterConfig::default(), image);

    let (dict, data) = stream_object(&bytes, 6);
    assert!(dict.contains(
        "/Type /XObject\r\n/Subtype /Image\r\n/Name /Im0\r\n/Width 4\r\n/Height 6\r\n\
         /BitsPerComponent 8\r\n/ColorSpace /DeviceGray\r\n/Filter /ASCII85Decode\r\n/Length "
    ));
    assert!(data.ends_with(b"~>\r\n"));
    assert_eq!(Ascii85Decoder.decode(&data).unwrap(), GRAY_4X6.to_vec());
}

#[test]
fn test_flate_image_object() {
    let pixels: Vec<u8> = (0..48u8).collect();
    let image = RasterImage::new(2, 4, 32, 12, pixels.clone()).unwrap();
    let expected = image.repack();
    let bytes = write_single_image(WriterConfig::default().with_image_compression(true), image);

    let (dict, data) = stream_object(&bytes, 6);
    assert!(dict.contains("/ColorSpace /DeviceRGB\r\n/Filter /FlateDecode\r\n"));
    let mut decoded = Vec::new();
    ZlibDecoder::new(&data[..]).read_to_end(&mut decoded).unwrap();
    assert_eq!(decoded, expected);
    assert_eq!(decoded.len(), 2 * 4 * 3);
}

#[test]
fn test_image_directory_maps_names_to_objects() {
    let mut doc = Document::new(WriterConfig::default());
    doc.open(Vec::new(), letter()).unwrap();
    let first = RasterImage::new(4, 6, 8, 4, GRAY_4X6.to_vec()).unwrap();
    let second = RasterImage::new(1, 1, 24, 3, vec![1, 2, 3]).unwrap();
    let a = doc.draw_image(first, placement()).unwrap();
    let b = doc.draw_image(second, placement()).unwrap();
    assert!(a < b);
    let bytes = doc.close().unwrap().unwrap();

    assert_eq!(
        object_text(&bytes, 5),
        "5 0 obj\r\n<<\r\n/Im0 6 0 R\r\n/Im1 7 0 R\r\n>>\r\nendobj\r\n"
    );
    let (dict, _) = stream_object(&bytes, 7);
    assert!(dict.contains("/Name /Im1\r\n"));
}

#[test]
fn test_images_written_after_page_objects() {
    // The image id is reserved before the next page's ids, but written
    // at the end of its own page.
    let mut doc = Document::new(WriterConfig::default());
    doc.open(Vec::new(), letter()).unwrap();
    let image = RasterImage::new(1, 1, 8, 1, vec![0x7F]).unwrap();
    let id = doc.draw_image(image, placement()).unwrap();
    doc.next_page().unwrap();
    let bytes = doc.close().unwrap().unwrap();

    let entries = parse_xref(&bytes);
    let offset_of = |n: u32| entries.iter().find(|(id, _)| *id == n).unwrap().1;
    assert_eq!(id.get(), 6);
    // Image 6 lands after the first page's directory (5) and before page 7.
    assert!(offset_of(6) > offset_of(5));
    assert!(offset_of(6) < offset_of(7));
}

#[test]
fn test_image_compression_toggle_on_open_document() {
    let mut doc = Document::new(WriterConfig::default());
    doc.open(Vec::new(), letter()).unwrap();
    let image = RasterImage::new(1, 1, 8, 1, vec![0]).unwrap();
    doc.draw_image(image, placement()).unwrap();
    doc.set_image_compression(true);
    let bytes = doc.close().unwrap().unwrap();

    let (dict, _) = stream_object(&bytes, 6);
    assert!(dict.contains("/Filter /FlateDecode"));
}

#[test]
fn test_compressor_failure_is_reported_not_masked() {
    let mut doc = Document::with_compressor(
        WriterConfig::default().with_image_compression(true),
        Box::new(BrokenCompressor),
    );
    doc.open(Vec::new(), letter()).unwrap();
    let image = RasterImage::new(4, 6, 8, 4, GRAY_4X6.to_vec()).unwrap();
    let id = doc.draw_image(image, placement()).unwrap();

    let err = doc.close().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);
    assert!(err.to_string().contains(&format!("object {}", id)));
    assert_eq!(doc.state(), DocumentState::Failed);
}

#[test]
fn test_invalid_buffers_rejected_before_writing() {
    let mut doc = Document::new(WriterConfig::default());
    doc.open(Vec::new(), letter()).unwrap();

    let err = doc
        .draw_image_from_slice(&[0; 10], 2, 2, 16, 4, placement())
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedBitsPerPixel(16)));

    let err = doc
        .draw_image_from_slice(&[0; 11], 2, 2, 24, 6, placement())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::PixelBufferSize {
            expected: 12,
            actual: 11
        }
    ));

    let err = doc
        .draw_image_from_slice(&[0; 10], 2, 2, 24, 5, placement())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);

    let err = doc
        .draw_image_from_slice(&[0; 4], 1, 3, 8, usize::MAX / 2, placement())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);

    assert_eq!(doc.content_len(), 0);
    assert_eq!(doc.state(), DocumentState::PageOpen);

    // The failed calls reserved nothing: the document still has 5 objects.
    let bytes = doc.close().unwrap().unwrap();
    assert_eq!(parse_xref(&bytes).len(), 5);
}
