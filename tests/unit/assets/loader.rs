use std::io::Cursor;

use super::*;

fn encode(img: image::RgbaImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

#[test]
fn load_png_bytes_populates_dimensions() {
    let img = image::RgbaImage::from_pixel(7, 3, image::Rgba([10, 20, 30, 255]));
    let handle = load(&ImageSource::from_bytes(encode(img, image::ImageFormat::Png))).unwrap();
    assert_eq!(handle.width(), 7);
    assert_eq!(handle.height(), 3);
}

#[test]
fn load_jpeg_data_url() {
    let img = image::RgbaImage::from_pixel(16, 8, image::Rgba([200, 10, 10, 255]));
    let rgb = image::DynamicImage::ImageRgba8(img).to_rgb8();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();

    let src = ImageSource::data_url_from_bytes(&buf, "image/jpeg");
    let handle = load(&src).unwrap();
    assert_eq!((handle.width(), handle.height()), (16, 8));
}

#[test]
fn declared_mime_does_not_override_content() {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
    let png = encode(img, image::ImageFormat::Png);
    let src = ImageSource::data_url_from_bytes(&png, "image/webp");
    assert!(load(&src).is_ok());
}

#[test]
fn corrupt_bytes_are_decode_errors() {
    let err = load(&ImageSource::from_bytes(b"definitely not an image".to_vec())).unwrap_err();
    assert!(matches!(err, PhotoframeError::Decode(_)));

    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]));
    let mut png = encode(img, image::ImageFormat::Png);
    png.truncate(png.len() / 2);
    assert!(matches!(
        load(&ImageSource::from_bytes(png)).unwrap_err(),
        PhotoframeError::Decode(_)
    ));
}

#[test]
fn load_optional_treats_missing_and_empty_as_absent() {
    assert!(load_optional(None).unwrap().is_none());
    assert!(
        load_optional(Some(&ImageSource::from_bytes(Vec::new())))
            .unwrap()
            .is_none()
    );
    assert!(
        load_optional(Some(&ImageSource::from_data_url("")))
            .unwrap()
            .is_none()
    );
    assert!(load_optional(Some(&ImageSource::from_bytes(vec![1u8, 2, 3]))).is_err());
}

#[test]
fn from_rgba8_rejects_zero_and_oversized_dimensions() {
    assert!(RasterHandle::from_rgba8(0, 1, Vec::new()).is_err());
    assert!(RasterHandle::from_rgba8(1, 0, Vec::new()).is_err());
    assert!(RasterHandle::from_rgba8(70_000, 1, vec![0u8; 70_000 * 4]).is_err());
    assert!(RasterHandle::from_rgba8(2, 2, vec![0u8; 3]).is_err());
}

#[test]
fn debug_shows_dimensions() {
    let h = RasterHandle::from_rgba8(1, 2, vec![255u8; 8]).unwrap();
    let s = format!("{h:?}");
    assert!(s.contains("width: 1"));
    assert!(s.contains("height: 2"));
}
