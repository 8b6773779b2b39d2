use std::fs;

use quotecraft::logo_store::{LogoStore, DEFAULT_LOGO, MAX_LOGO_BYTES};
use quotecraft::rendering::raster::encode_png;
use quotecraft::{Error, LogoState};

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 30, 30, 255]));
    encode_png(&img).unwrap()
}

#[test]
fn upload_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("logo.png");
    fs::write(&file, png_bytes()).unwrap();

    let store = LogoStore::open(dir.path().join("store"), Some(DEFAULT_LOGO.into())).unwrap();
    let uri = store.upload_file(&file).unwrap().expect("logo accepted");

    let reopened = LogoStore::open(dir.path().join("store"), Some(DEFAULT_LOGO.into())).unwrap();
    assert_eq!(reopened.load(), LogoState::Uploaded(uri));
}

#[test]
fn oversized_file_is_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("huge.png");
    let f = fs::File::create(&file).unwrap();
    f.set_len(MAX_LOGO_BYTES + 1).unwrap();

    let store = LogoStore::open(dir.path(), None).unwrap();
    let err = store.upload_file(&file).unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
    assert_eq!(err.to_string(), "Logo file size must be less than 5MB");
    assert!(!store.path().exists());
    assert_eq!(store.load(), LogoState::None);
}

#[test]
fn exactly_five_megabytes_is_allowed_through_size_check() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("edge.bin");
    let f = fs::File::create(&file).unwrap();
    f.set_len(MAX_LOGO_BYTES).unwrap();

    let store = LogoStore::open(dir.path(), None).unwrap();
    // passes the size check, then is ignored as a non-image
    assert_eq!(store.upload_file(&file).unwrap(), None);
}

#[test]
fn missing_file_counts_as_no_selection() {
    let dir = tempfile::tempdir().unwrap();
    let store = LogoStore::open(dir.path(), None).unwrap();
    assert_eq!(store.upload_file(dir.path().join("nope.png")).unwrap(), None);
}

#[test]
fn remove_without_upload_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let store = LogoStore::open(dir.path(), Some(DEFAULT_LOGO.into())).unwrap();
    store.remove().unwrap();
    assert_eq!(store.load(), LogoState::Default(DEFAULT_LOGO.into()));
}

#[test]
fn oversized_upload_keeps_previous_logo() {
    let dir = tempfile::tempdir().unwrap();
    let store = LogoStore::open(dir.path().join("store"), Some(DEFAULT_LOGO.into())).unwrap();
    let first = store.upload_bytes(&png_bytes()).unwrap().expect("logo accepted");

    let file = dir.path().join("huge.png");
    let f = fs::File::create(&file).unwrap();
    f.set_len(MAX_LOGO_BYTES + 1).unwrap();

    let err = store.upload_file(&file).unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
    assert_eq!(store.load(), LogoState::Uploaded(first));
}

// 1x1 GIF89a; the raster backend is built without a GIF decoder
const TINY_GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0xff, 0xff, 0xff, 0x00, 0x00,
    0x00, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00,
    0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

#[test]
fn undecodable_format_keeps_previous_logo() {
    let dir = tempfile::tempdir().unwrap();
    let store = LogoStore::open(dir.path(), Some(DEFAULT_LOGO.into())).unwrap();
    let first = store.upload_bytes(&png_bytes()).unwrap().expect("logo accepted");

    assert_eq!(store.upload_bytes(TINY_GIF).unwrap(), None);
    assert_eq!(store.load(), LogoState::Uploaded(first.clone()));

    let file = dir.path().join("logo.gif");
    fs::write(&file, TINY_GIF).unwrap();
    assert_eq!(store.upload_file(&file).unwrap(), None);
    assert_eq!(store.load(), LogoState::Uploaded(first));
}
