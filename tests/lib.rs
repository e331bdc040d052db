//! Tests for PNG classification, fixed-region checks and in-memory repair.

use pngfy::png::{
    check_footer, check_header, classify, diff_regions, repair, validate, FOOTER_LEN, HEADER_LEN,
    MIN_PNG_SIZE, PNG_FOOTER, PNG_HEADER, PNG_MAGIC,
};
use pngfy::{PngfyError, Region};

/// Header + `body_len` filler bytes + IEND.
fn png_with_body(body_len: usize) -> Vec<u8> {
    let mut v = PNG_HEADER.to_vec();
    v.extend((0..body_len).map(|i| (i % 251) as u8));
    v.extend_from_slice(&PNG_FOOTER);
    v
}

#[test]
fn classify_png_magic() {
    assert!(classify(&png_with_body(10)));
    assert!(classify(&PNG_MAGIC));
}

#[test]
fn classify_rejects_other_formats() {
    assert!(!classify(b"GIF89a\x01\x00\x01\x00"));
    assert!(!classify(b"%PDF-1.4"));
    assert!(!classify(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F']));
    assert!(!classify(&[]));
    assert!(!classify(&PNG_MAGIC[..7]));
}

#[test]
fn check_header_and_footer_on_valid_png() {
    let v = png_with_body(100);
    assert!(check_header(&v));
    assert!(check_footer(&v));
    assert!(validate(&v).is_valid());
}

#[test]
fn check_header_requires_sixteen_bytes() {
    assert!(!check_header(&PNG_HEADER[..HEADER_LEN - 1]));
    assert!(check_header(&PNG_HEADER));
}

#[test]
fn check_footer_requires_minimum_size() {
    let mut v = PNG_MAGIC.to_vec();
    v.extend_from_slice(&PNG_FOOTER);
    assert!(v.len() < MIN_PNG_SIZE);
    assert!(!check_footer(&v));
}

#[test]
fn corrupted_ihdr_tag_detected_and_diffed() {
    let mut v = png_with_body(40);
    v[15] = 0x00;
    let r = validate(&v);
    assert!(r.is_png);
    assert!(!r.header_valid);
    assert!(r.footer_valid);
    let diffs = diff_regions(&v);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].region, Region::Header);
    assert_eq!(diffs[0].current[15], 0x00);
    assert_eq!(diffs[0].expected[15], 0x52);
    assert_eq!(diffs[0].mismatched_offsets(), vec![15]);
}

#[test]
fn repair_header_only_touches_header_region() {
    let original = png_with_body(40);
    let mut v = original.clone();
    v[15] = 0x00;
    let fixed = repair(&v).unwrap();
    assert_eq!(fixed, original);
    assert_eq!(fixed[HEADER_LEN..], v[HEADER_LEN..]);
    assert!(check_header(&fixed) && check_footer(&fixed));
}

#[test]
fn repair_footer_only_touches_footer_region() {
    let mut v = png_with_body(40);
    let n = v.len();
    v[n - 4..].copy_from_slice(&[0, 0, 0, 0]);
    let fixed = repair(&v).unwrap();
    assert_eq!(fixed[..n - FOOTER_LEN], v[..n - FOOTER_LEN]);
    assert_eq!(fixed[n - FOOTER_LEN..], PNG_FOOTER);
}

#[test]
fn repair_valid_buffer_is_noop() {
    let v = png_with_body(64);
    assert_eq!(repair(&v).unwrap(), v);
    assert!(diff_regions(&v).is_empty());
}

#[test]
fn repair_too_small_buffer_is_rejected() {
    for len in [0usize, 8, 16, MIN_PNG_SIZE - 1] {
        let v = vec![0u8; len];
        assert!(
            matches!(repair(&v), Err(PngfyError::TooSmall { size }) if size == len),
            "len {}",
            len
        );
    }
}
