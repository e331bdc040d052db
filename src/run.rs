//! File-level flow: read, classify, check, back up, rewrite, re-verify.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::PngfyError;
use crate::png::{self, MAGIC_LEN, MIN_PNG_SIZE};
use crate::result::{BackupOutcome, RepairReport};

/// Suffix appended to the original path for the backup copy.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".backup";

/// Options for [`process_file`].
#[derive(Debug, Clone)]
pub struct RepairOptions {
    /// Appended to the file path to name the backup (empty falls back to `.backup`).
    pub backup_suffix: String,
    /// Report corruption without writing anything.
    pub dry_run: bool,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            dry_run: false,
        }
    }
}

/// `<path><suffix>`, e.g. `image.png.backup`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let suffix = if suffix.is_empty() {
        DEFAULT_BACKUP_SUFFIX
    } else {
        suffix
    };
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// Read the whole file, mapping I/O failures onto [`PngfyError`] variants.
pub fn read_file(path: &Path) -> Result<Vec<u8>, PngfyError> {
    debug!(path = %path.display(), "reading file");
    fs::read(path).map_err(|e| PngfyError::from_read(path, e))
}

/// Validate the file at `path` and repair its header/footer in place if needed.
/// Reads the file and hands the bytes to [`process_bytes`].
pub fn process_file(path: &Path, opts: &RepairOptions) -> Result<RepairReport, PngfyError> {
    let original = read_file(path)?;
    process_bytes(path, &original, opts)
}

/// Validate `original` (the current contents of `path`) and repair `path` in place
/// if needed.
///
/// Files under 28 bytes fail with [`PngfyError::TooSmall`] and files without the
/// PNG magic with [`PngfyError::NotAPng`]; neither is ever written. A valid file
/// is left alone and no backup is made. Otherwise the original bytes are saved to
/// the backup path, the repaired bytes replace the file, and the file is read back
/// and checked again. An existing backup is kept only if it already holds exactly
/// `original`; anything else there fails with [`PngfyError::BackupConflict`] and
/// the file is not written.
pub fn process_bytes(
    path: &Path,
    original: &[u8],
    opts: &RepairOptions,
) -> Result<RepairReport, PngfyError> {
    let size = original.len();
    debug!(path = %path.display(), size, "file read");

    if size < MIN_PNG_SIZE {
        return Err(PngfyError::TooSmall { size });
    }
    if !png::classify(original) {
        return Err(PngfyError::NotAPng {
            found: original[..MAGIC_LEN].to_vec(),
        });
    }

    let initial = png::validate(original);
    if initial.is_valid() {
        debug!(path = %path.display(), "header and footer valid");
        return Ok(RepairReport::untouched(path.to_path_buf(), initial));
    }

    let diffs = png::diff_regions(original);
    for d in &diffs {
        debug!(
            path = %path.display(),
            region = d.region.label(),
            offset = d.offset,
            mismatched = d.mismatched_offsets().len(),
            "region mismatch"
        );
    }

    if opts.dry_run {
        return Ok(RepairReport::dry_run(path.to_path_buf(), initial, diffs));
    }

    let repaired = png::repair(original)?;
    let backup = ensure_backup(&backup_path(path, &opts.backup_suffix), original)?;

    fs::write(path, &repaired).map_err(|source| PngfyError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), regions = diffs.len(), "repaired file written");

    let written = read_file(path)?;
    let final_state = png::validate(&written);
    if !final_state.is_valid() {
        return Err(PngfyError::RepairVerificationFailed {
            path: path.to_path_buf(),
        });
    }

    Ok(RepairReport::repaired(
        path.to_path_buf(),
        initial,
        diffs,
        backup,
        final_state,
    ))
}

/// Write `original` to `backup`. An existing backup is reused only when it is a
/// regular file holding exactly `original`.
fn ensure_backup(backup: &Path, original: &[u8]) -> Result<BackupOutcome, PngfyError> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(backup) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return existing_backup(backup, original);
        }
        Err(source) => {
            return Err(PngfyError::Backup {
                path: backup.to_path_buf(),
                source,
            })
        }
    };
    if let Err(source) = file.write_all(original).and_then(|_| file.sync_all()) {
        drop(file);
        let _ = fs::remove_file(backup);
        return Err(PngfyError::Backup {
            path: backup.to_path_buf(),
            source,
        });
    }
    debug!(backup = %backup.display(), "backup created");
    Ok(BackupOutcome::Created(backup.to_path_buf()))
}

fn existing_backup(backup: &Path, original: &[u8]) -> Result<BackupOutcome, PngfyError> {
    let conflict = || PngfyError::BackupConflict {
        path: backup.to_path_buf(),
    };
    let meta = fs::metadata(backup).map_err(|source| PngfyError::Backup {
        path: backup.to_path_buf(),
        source,
    })?;
    if !meta.is_file() || meta.len() != original.len() as u64 {
        warn!(backup = %backup.display(), "backup path holds something else, refusing to repair");
        return Err(conflict());
    }
    let existing = fs::read(backup).map_err(|source| PngfyError::Backup {
        path: backup.to_path_buf(),
        source,
    })?;
    if existing != original {
        warn!(backup = %backup.display(), "backup differs from current file, refusing to repair");
        return Err(conflict());
    }
    debug!(backup = %backup.display(), "matching backup already exists, keeping it");
    Ok(BackupOutcome::Preserved(backup.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("dir/a.png"), ".backup"),
            PathBuf::from("dir/a.png.backup")
        );
        assert_eq!(
            backup_path(Path::new("a.png"), ".orig"),
            PathBuf::from("a.png.orig")
        );
    }

    #[test]
    fn empty_suffix_never_targets_the_file_itself() {
        assert_eq!(
            backup_path(Path::new("a.png"), ""),
            PathBuf::from("a.png.backup")
        );
    }

    #[test]
    fn ensure_backup_keeps_identical_file() {
        let dir = tempfile::tempdir().unwrap();
        let b = dir.path().join("x.png.backup");
        fs::write(&b, b"same").unwrap();
        let out = ensure_backup(&b, b"same").unwrap();
        assert_eq!(out, BackupOutcome::Preserved(b.clone()));
        assert_eq!(fs::read(&b).unwrap(), b"same");
    }

    #[test]
    fn ensure_backup_rejects_different_file() {
        let dir = tempfile::tempdir().unwrap();
        let b = dir.path().join("x.png.backup");
        fs::write(&b, b"first").unwrap();
        let err = ensure_backup(&b, b"second").unwrap_err();
        assert!(matches!(err, PngfyError::BackupConflict { .. }));
        assert_eq!(fs::read(&b).unwrap(), b"first");
    }
}
