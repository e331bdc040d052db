//! In-memory repair: overwrite the invalid fixed regions with the canonical bytes.

use crate::error::PngfyError;
use crate::png::signature::{
    check_footer, check_header, FOOTER_LEN, HEADER_LEN, MIN_PNG_SIZE, PNG_FOOTER, PNG_HEADER,
};

/// Copy of `data` with `[0, 16)` and/or `[len-12, len)` replaced when they do not
/// match. Bytes outside those regions are never touched; a valid buffer comes back
/// unchanged.
pub fn repair(data: &[u8]) -> Result<Vec<u8>, PngfyError> {
    if data.len() < MIN_PNG_SIZE {
        return Err(PngfyError::TooSmall { size: data.len() });
    }
    let mut out = data.to_vec();
    if !check_header(data) {
        out[..HEADER_LEN].copy_from_slice(&PNG_HEADER);
    }
    if !check_footer(data) {
        let start = out.len() - FOOTER_LEN;
        out[start..].copy_from_slice(&PNG_FOOTER);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repair_rewrites_both_regions_only() {
        let mut v = vec![0xAAu8; 64];
        v[..8].copy_from_slice(&PNG_HEADER[..8]);
        let fixed = repair(&v).unwrap();
        assert!(check_header(&fixed));
        assert!(check_footer(&fixed));
        assert_eq!(fixed[HEADER_LEN..64 - FOOTER_LEN], v[HEADER_LEN..64 - FOOTER_LEN]);
    }

    #[test]
    fn repair_exact_minimum_size() {
        let v = vec![0u8; MIN_PNG_SIZE];
        let fixed = repair(&v).unwrap();
        assert_eq!(fixed[..HEADER_LEN], PNG_HEADER);
        assert_eq!(fixed[HEADER_LEN..], PNG_FOOTER);
    }

    #[test]
    fn repair_rejects_too_small() {
        let err = repair(&[0u8; MIN_PNG_SIZE - 1]).unwrap_err();
        assert!(matches!(err, PngfyError::TooSmall { size: 27 }));
    }
}
