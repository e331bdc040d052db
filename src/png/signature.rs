//! PNG signature constants and fixed-offset comparisons.

/// PNG magic: 89 50 4E 47 0D 0A 1A 0A.
pub const PNG_MAGIC: [u8; MAGIC_LEN] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Magic followed by the IHDR length (13) and the `IHDR` chunk type.
pub const PNG_HEADER: [u8; HEADER_LEN] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

/// Complete IEND chunk: zero length, `IEND`, CRC AE 42 60 82.
pub const PNG_FOOTER: [u8; FOOTER_LEN] = [
    0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub const MAGIC_LEN: usize = 8;
pub const HEADER_LEN: usize = 16;
pub const FOOTER_LEN: usize = 12;

/// Smallest buffer that can hold both header and footer without overlap.
pub const MIN_PNG_SIZE: usize = HEADER_LEN + FOOTER_LEN;

/// True iff the first 8 bytes are the PNG magic. False for shorter input.
#[inline]
pub fn classify(data: &[u8]) -> bool {
    data.len() >= MAGIC_LEN && data[..MAGIC_LEN] == PNG_MAGIC
}

/// True iff the first 16 bytes equal [`PNG_HEADER`].
#[inline]
pub fn check_header(data: &[u8]) -> bool {
    data.len() >= HEADER_LEN && data[..HEADER_LEN] == PNG_HEADER
}

/// True iff the last 12 bytes equal [`PNG_FOOTER`] and the buffer is at least
/// [`MIN_PNG_SIZE`] long.
#[inline]
pub fn check_footer(data: &[u8]) -> bool {
    data.len() >= MIN_PNG_SIZE && data[data.len() - FOOTER_LEN..] == PNG_FOOTER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_starts_with_magic() {
        assert_eq!(PNG_HEADER[..MAGIC_LEN], PNG_MAGIC);
    }

    #[test]
    fn classify_short_input_is_false() {
        assert!(!classify(&PNG_MAGIC[..7]));
        assert!(classify(&PNG_MAGIC));
    }

    #[test]
    fn footer_needs_min_size() {
        // Footer bytes alone (12) are not a PNG.
        assert!(!check_footer(&PNG_FOOTER));
        let mut v = PNG_HEADER.to_vec();
        v.extend_from_slice(&PNG_FOOTER);
        assert!(check_footer(&v));
    }
}
