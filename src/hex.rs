//! Hex rendering for byte-level diffs and region dumps.

use std::fmt::Write;

/// Upper-case, space-separated hex (e.g. `89 50 4E 47`).
pub fn hex_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:02X}", b);
    }
    out
}

/// Classic hex dump: 16 bytes per line, 8-digit offset, ASCII gutter.
/// `start_offset` is the file offset of `bytes[0]`.
pub fn hex_dump(bytes: &[u8], start_offset: usize) -> Vec<String> {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let ascii: String = chunk
                .iter()
                .map(|&b| if (32..=126).contains(&b) { b as char } else { '.' })
                .collect();
            format!("{:08X}: {:<48} {}", start_offset + i * 16, hex_bytes(chunk), ascii)
        })
        .collect()
}
