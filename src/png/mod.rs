//! PNG fixed-region checks: 8-byte magic, 16-byte IHDR prefix, 12-byte IEND chunk.
//!
//! Only the first 16 and last 12 bytes are inspected; chunk CRCs and intermediate
//! chunks are never parsed.

mod signature;

pub mod analyzer;
pub mod repair;

pub use analyzer::{diff_regions, validate};
pub use repair::repair;
pub use signature::{
    check_footer, check_header, classify, FOOTER_LEN, HEADER_LEN, MAGIC_LEN, MIN_PNG_SIZE,
    PNG_FOOTER, PNG_HEADER, PNG_MAGIC,
};
