//! Result types: signature validation state, region diffs and the per-file repair report.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Which fixed region of the file a check or diff refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Region {
    /// First 16 bytes: PNG magic + IHDR length + `IHDR`.
    Header,
    /// Last 12 bytes: the complete IEND chunk.
    Footer,
}

impl Region {
    /// Short label for display (e.g. "Header").
    pub fn label(self) -> &'static str {
        match self {
            Region::Header => "Header",
            Region::Footer => "Footer",
        }
    }
}

/// Outcome of checking a buffer against the PNG signature constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ValidationResult {
    /// First 8 bytes are the PNG magic.
    pub is_png: bool,
    /// First 16 bytes match the expected header.
    pub header_valid: bool,
    /// Last 12 bytes match the expected footer.
    pub footer_valid: bool,
    /// Size of the checked buffer.
    pub size_bytes: usize,
}

impl ValidationResult {
    /// PNG magic present and both fixed regions intact.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_png && self.header_valid && self.footer_valid
    }
}

/// A mismatched region: what the file holds vs what a PNG must hold there.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RegionDiff {
    pub region: Region,
    /// Byte offset of the region within the file.
    pub offset: usize,
    pub current: Vec<u8>,
    pub expected: Vec<u8>,
}

impl RegionDiff {
    /// Offsets (relative to the region start) of the bytes that differ.
    pub fn mismatched_offsets(&self) -> Vec<usize> {
        self.current
            .iter()
            .zip(self.expected.iter())
            .enumerate()
            .filter(|(_, (c, e))| c != e)
            .map(|(i, _)| i)
            .collect()
    }
}

/// What happened to the backup file during a repair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", content = "path", rename_all = "lowercase"))]
pub enum BackupOutcome {
    /// Original bytes were written to a new backup file.
    Created(PathBuf),
    /// A backup holding exactly the pre-repair bytes already existed and was left untouched.
    Preserved(PathBuf),
}

impl BackupOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            BackupOutcome::Created(p) | BackupOutcome::Preserved(p) => p,
        }
    }
}

/// Action taken on the file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum RepairAction {
    /// File was already valid; nothing written.
    None,
    /// Corruption found but check-only mode was requested; nothing written.
    DryRun,
    /// Corrupted regions were rewritten in place.
    Repaired { backup: BackupOutcome },
}

/// Everything observed while validating (and possibly repairing) one file.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RepairReport {
    pub path: PathBuf,
    /// State of the file as it was read.
    pub initial: ValidationResult,
    /// Mismatched regions in the original bytes (empty if valid).
    pub diffs: Vec<RegionDiff>,
    pub action: RepairAction,
    /// State after the run; re-read from disk when a repair was written.
    pub final_state: ValidationResult,
}

impl RepairReport {
    /// Report for a file that needed no changes.
    pub fn untouched(path: PathBuf, initial: ValidationResult) -> Self {
        Self {
            path,
            initial,
            diffs: Vec::new(),
            action: RepairAction::None,
            final_state: initial,
        }
    }

    /// Report for a corrupted file inspected in check-only mode.
    pub fn dry_run(path: PathBuf, initial: ValidationResult, diffs: Vec<RegionDiff>) -> Self {
        Self {
            path,
            initial,
            diffs,
            action: RepairAction::DryRun,
            final_state: initial,
        }
    }

    /// Report for a file that was rewritten and verified.
    pub fn repaired(
        path: PathBuf,
        initial: ValidationResult,
        diffs: Vec<RegionDiff>,
        backup: BackupOutcome,
        final_state: ValidationResult,
    ) -> Self {
        Self {
            path,
            initial,
            diffs,
            action: RepairAction::Repaired { backup },
            final_state,
        }
    }

    /// File ends the run valid (either untouched or repaired).
    #[inline]
    pub fn is_success(&self) -> bool {
        self.final_state.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_offsets_lists_only_differing_bytes() {
        let d = RegionDiff {
            region: Region::Header,
            offset: 0,
            current: vec![1, 2, 0, 4],
            expected: vec![1, 2, 3, 5],
        };
        assert_eq!(d.mismatched_offsets(), vec![2, 3]);
    }

    #[test]
    fn dry_run_report_is_not_success_when_corrupted() {
        let state = ValidationResult {
            is_png: true,
            header_valid: false,
            footer_valid: true,
            size_bytes: 40,
        };
        let r = RepairReport::dry_run(PathBuf::from("a.png"), state, Vec::new());
        assert!(!r.is_success());
        assert_eq!(r.action, RepairAction::DryRun);
    }
}
