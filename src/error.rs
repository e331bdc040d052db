//! Errors for reading, validating and repairing a PNG file.

use std::io;
use std::path::{Path, PathBuf};

use crate::hex::hex_bytes;

/// Errors that end a run on one file. None are retried.
#[derive(Debug, thiserror::Error)]
pub enum PngfyError {
    #[error("File does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File is not a PNG file (invalid header signature): found {}, expected 89 50 4E 47 0D 0A 1A 0A", hex_bytes(found))]
    NotAPng { found: Vec<u8> },

    #[error("File too small to be a valid PNG: {size} bytes (minimum 28)")]
    TooSmall { size: usize },

    #[error("Failed to create backup {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Existing backup {} is not a copy of the current file; refusing to repair", path.display())]
    BackupConflict { path: PathBuf },

    #[error("Failed to write repaired file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Repair could not be verified: {} is still corrupted", path.display())]
    RepairVerificationFailed { path: PathBuf },
}

impl PngfyError {
    /// Map an I/O error from reading `path` onto the matching variant.
    pub(crate) fn from_read(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => PngfyError::FileNotFound { path },
            io::ErrorKind::PermissionDenied => PngfyError::PermissionDenied { path },
            _ => PngfyError::Read { path, source },
        }
    }

    /// Stable identifier for machine-readable output (e.g. "not_a_png").
    pub fn code(&self) -> &'static str {
        match self {
            PngfyError::FileNotFound { .. } => "file_not_found",
            PngfyError::PermissionDenied { .. } => "permission_denied",
            PngfyError::Read { .. } => "read_error",
            PngfyError::NotAPng { .. } => "not_a_png",
            PngfyError::TooSmall { .. } => "too_small",
            PngfyError::Backup { .. } => "backup_error",
            PngfyError::BackupConflict { .. } => "backup_conflict",
            PngfyError::Write { .. } => "write_error",
            PngfyError::RepairVerificationFailed { .. } => "repair_verification_failed",
        }
    }
}
