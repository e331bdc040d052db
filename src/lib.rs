//! # pngfy
//!
//! Validate that a file starts and ends with the fixed byte sequences every
//! well-formed PNG carries, and repair them in place when they are corrupted.
//!
//! ## What is checked
//!
//! - **Magic** (8 bytes): `89 50 4E 47 0D 0A 1A 0A`. Files without it are not PNGs
//!   and are never written.
//! - **Header** (first 16 bytes): magic + IHDR length `00 00 00 0D` + `IHDR`.
//! - **Footer** (last 12 bytes): the IEND chunk `00 00 00 00 49 45 4E 44 AE 42 60 82`.
//!
//! Nothing between those regions is parsed: no chunk walking, no CRC checks, no
//! image decoding.
//!
//! ## Repair
//!
//! A corrupted header or footer is overwritten with the canonical bytes after the
//! original file is copied to `<path>.backup`. An existing backup is never
//! overwritten: it is reused only when it already holds the current bytes, and
//! anything else at that path stops the repair before the file is touched. The
//! file is read back and re-checked after writing.
//!
//! ## Example
//!
//! ```no_run
//! use pngfy::{process_file, RepairAction, RepairOptions};
//!
//! let report = process_file("image.png".as_ref(), &RepairOptions::default())?;
//! match report.action {
//!     RepairAction::None => println!("already valid"),
//!     RepairAction::Repaired { backup } => println!("repaired, backup at {}", backup.path().display()),
//!     RepairAction::DryRun => {}
//! }
//! # Ok::<(), pngfy::PngfyError>(())
//! ```
//!
//! In-memory checks work on plain slices:
//!
//! ```
//! use pngfy::png::{classify, repair, PNG_FOOTER, PNG_HEADER};
//!
//! let mut bytes = PNG_HEADER.to_vec();
//! bytes.extend_from_slice(&[0u8; 8]);
//! bytes.extend_from_slice(&PNG_FOOTER);
//! bytes[15] = 0x00;
//! assert!(classify(&bytes));
//! assert_eq!(repair(&bytes).unwrap()[15], 0x52);
//! ```

mod error;
mod hex;
mod result;
mod run;
pub mod png;

pub use error::PngfyError;
pub use hex::{hex_bytes, hex_dump};
pub use result::{BackupOutcome, Region, RegionDiff, RepairAction, RepairReport, ValidationResult};
pub use run::{backup_path, process_bytes, process_file, read_file, RepairOptions, DEFAULT_BACKUP_SUFFIX};
