//! Validation of the fixed PNG regions and byte-level diffs for mismatches.

use crate::png::signature::{
    check_footer, check_header, classify, FOOTER_LEN, HEADER_LEN, MIN_PNG_SIZE, PNG_FOOTER,
    PNG_HEADER,
};
use crate::result::{Region, RegionDiff, ValidationResult};

/// Run the magic, header and footer checks on `data`.
pub fn validate(data: &[u8]) -> ValidationResult {
    ValidationResult {
        is_png: classify(data),
        header_valid: check_header(data),
        footer_valid: check_footer(data),
        size_bytes: data.len(),
    }
}

/// Current vs expected bytes for each mismatched region, header first.
/// Buffers shorter than [`MIN_PNG_SIZE`] have no addressable regions and yield none.
pub fn diff_regions(data: &[u8]) -> Vec<RegionDiff> {
    let mut diffs = Vec::new();
    if data.len() < MIN_PNG_SIZE {
        return diffs;
    }
    if !check_header(data) {
        diffs.push(RegionDiff {
            region: Region::Header,
            offset: 0,
            current: data[..HEADER_LEN].to_vec(),
            expected: PNG_HEADER.to_vec(),
        });
    }
    if !check_footer(data) {
        let offset = data.len() - FOOTER_LEN;
        diffs.push(RegionDiff {
            region: Region::Footer,
            offset,
            current: data[offset..].to_vec(),
            expected: PNG_FOOTER.to_vec(),
        });
    }
    diffs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_png() -> Vec<u8> {
        let mut v = PNG_HEADER.to_vec();
        v.extend_from_slice(&[0u8; 17]);
        v.extend_from_slice(&PNG_FOOTER);
        v
    }

    #[test]
    fn valid_png_has_no_diffs() {
        let v = minimal_png();
        assert!(validate(&v).is_valid());
        assert!(diff_regions(&v).is_empty());
    }

    #[test]
    fn corrupted_footer_diff_points_at_tail() {
        let mut v = minimal_png();
        let last = v.len() - 1;
        v[last] = 0x00;
        let r = validate(&v);
        assert!(r.is_png && r.header_valid && !r.footer_valid);
        let diffs = diff_regions(&v);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].region, Region::Footer);
        assert_eq!(diffs[0].offset, v.len() - FOOTER_LEN);
        assert_eq!(diffs[0].mismatched_offsets(), vec![FOOTER_LEN - 1]);
    }

    #[test]
    fn short_buffer_yields_no_diffs() {
        assert!(diff_regions(&PNG_HEADER).is_empty());
        let r = validate(&PNG_HEADER);
        assert!(r.is_png && r.header_valid && !r.footer_valid);
    }
}
