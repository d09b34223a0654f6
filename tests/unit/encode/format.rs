use super::*;

fn white_surface(size: u32) -> Surface {
    let mut s = Surface::new(size).unwrap();
    s.fill([255, 255, 255, 255]);
    s
}

#[test]
fn format_names() {
    assert_eq!(ExportFormat::Png.mime(), "image/png");
    assert_eq!(ExportFormat::Jpeg.mime(), "image/jpeg");
    assert_eq!(ExportFormat::Png.extension(), "png");
    assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
    assert!(ExportFormat::Jpeg.is_lossy());
    assert!(!ExportFormat::Png.is_lossy());
    assert_eq!(ExportFormat::default(), ExportFormat::Png);
}

#[test]
fn format_parsing() {
    assert_eq!("png".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
    assert_eq!("JPG".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
    assert_eq!(
        "image/jpeg".parse::<ExportFormat>().unwrap(),
        ExportFormat::Jpeg
    );
    assert!("webp".parse::<ExportFormat>().is_err());
    assert_eq!(
        serde_json::to_string(&ExportFormat::Jpeg).unwrap(),
        "\"jpeg\""
    );
}

#[test]
fn png_output_is_rgba_and_opaque() {
    let out = encode_surface(&white_surface(8), ExportFormat::Png, 90).unwrap();
    assert_eq!(out.quality, None);
    assert_eq!(out.size, 8);
    assert_eq!(out.mime(), "image/png");
    assert_eq!(
        image::guess_format(&out.bytes).unwrap(),
        image::ImageFormat::Png
    );

    let decoded = image::load_from_memory(&out.bytes).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgba8);
    assert!(
        decoded
            .to_rgba8()
            .pixels()
            .all(|p| p.0 == [255, 255, 255, 255])
    );
}

#[test]
fn jpeg_output_has_no_alpha_channel() {
    let out = encode_surface(&white_surface(16), ExportFormat::Jpeg, 90).unwrap();
    assert_eq!(out.quality, Some(90));
    assert_eq!(out.file_name("profile-overlay"), "profile-overlay.jpg");
    assert_eq!(
        image::guess_format(&out.bytes).unwrap(),
        image::ImageFormat::Jpeg
    );

    let decoded = image::load_from_memory(&out.bytes).unwrap();
    assert!(!decoded.color().has_alpha());
    assert!(decoded.to_rgb8().pixels().all(|p| p.0.iter().all(|&c| c >= 250)));
}

#[test]
fn jpeg_quality_out_of_range_is_rejected() {
    let s = white_surface(2);
    assert!(encode_surface(&s, ExportFormat::Jpeg, 0).is_err());
    assert!(encode_surface(&s, ExportFormat::Jpeg, 101).is_err());
    assert!(encode_surface(&s, ExportFormat::Png, 0).is_ok());
}
