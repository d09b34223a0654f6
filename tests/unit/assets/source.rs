use super::*;

#[test]
fn data_url_round_trips_payload() {
    let src = ImageSource::data_url_from_bytes(&[1, 2, 3, 250], "image/png");
    let ImageSource::DataUrl(url) = &src else {
        panic!("expected a data URL");
    };
    assert!(url.starts_with("data:image/png;base64,"));

    let parsed = decode_data_url(url).unwrap();
    assert_eq!(parsed.mime, "image/png");
    assert_eq!(parsed.payload, vec![1, 2, 3, 250]);
    assert_eq!(src.encoded_bytes().unwrap().as_ref(), &[1, 2, 3, 250]);
}

#[test]
fn data_url_scheme_is_case_insensitive_and_whitespace_tolerant() {
    let parsed = decode_data_url("  DATA:Image/JPEG;base64,AQID\nBA==  ").unwrap();
    assert_eq!(parsed.mime, "image/jpeg");
    assert_eq!(parsed.payload, vec![1, 2, 3, 4]);
}

#[test]
fn data_url_without_mime_is_accepted() {
    let parsed = decode_data_url("data:;base64,AQ==").unwrap();
    assert_eq!(parsed.mime, "");
    assert_eq!(parsed.payload, vec![1]);
}

#[test]
fn data_url_rejections() {
    assert!(decode_data_url("image/png;base64,AQ==").is_err());
    assert!(decode_data_url("data:image/png;base64").is_err());
    assert!(decode_data_url("data:text/plain,hello").is_err());
    assert!(decode_data_url("data:image/png;base64,@@@").is_err());
}

#[test]
fn bad_data_url_maps_to_decode_error() {
    let err = ImageSource::from_data_url("nope").encoded_bytes().unwrap_err();
    assert!(matches!(err, PhotoframeError::Decode(_)));
}

#[test]
fn missing_file_maps_to_decode_error_with_path() {
    let err = ImageSource::from_path("target/definitely/missing.png")
        .encoded_bytes()
        .unwrap_err();
    let PhotoframeError::Decode(msg) = err else {
        panic!("expected decode error");
    };
    assert!(msg.contains("missing.png"));
}

#[test]
fn empty_sources() {
    assert!(ImageSource::from_bytes(Vec::new()).is_empty());
    assert!(ImageSource::from_data_url("   ").is_empty());
    assert!(ImageSource::from_path("").is_empty());
    assert!(!ImageSource::from_bytes(vec![0u8]).is_empty());
    assert!(!ImageSource::from_data_url("data:,").is_empty());
}

#[test]
fn kind_labels() {
    assert_eq!(ImageSource::from_bytes(vec![1u8]).kind(), "bytes");
    assert_eq!(ImageSource::from_data_url("data:,").kind(), "data-url");
    assert_eq!(ImageSource::from_path("a.png").kind(), "path");
}
