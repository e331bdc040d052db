//! CLI for pngfy: validate PNG header/footer signatures and repair them in place.

#![cfg(feature = "cli")]

use clap::Parser;
use indexmap::IndexMap;
use pngfy::{
    hex_bytes, hex_dump, process_bytes, read_file, BackupOutcome, PngfyError, RegionDiff,
    RepairAction, RepairOptions, RepairReport, DEFAULT_BACKUP_SUFFIX,
};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[derive(Parser)]
#[command(name = "pngfy")]
#[command(
    about = "Validate PNG files by their header/footer signatures and repair corrupted ones",
    long_about = "Validate PNG files by their header/footer signatures and repair corrupted ones.\n\
                  File extension doesn't matter: PNG format is detected by header signature.\n\
                  The original is saved to <path>.backup before any repair; an existing backup is never overwritten."
)]
struct Args {
    /// Path to the file to check (or a directory with -d/--directory)
    #[arg(required_unless_present = "directory")]
    path: Option<PathBuf>,

    /// Process every matching file in a directory (optionally with -r to recurse)
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    directory: Option<PathBuf>,

    /// When processing a directory, recurse into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// File extensions to process in directory mode (comma-separated). Files without an extension are always processed.
    #[arg(short, long, default_value = "png")]
    extensions: String,

    /// Process all files in directory mode (ignore extension filter)
    #[arg(long)]
    all: bool,

    /// Only report corruption; never write the file or a backup
    #[arg(long)]
    check: bool,

    /// Suffix appended to the file path for the backup copy
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_BACKUP_SUFFIX)]
    backup_suffix: String,

    /// Show a hex dump of each corrupted region
    #[arg(long)]
    dump: bool,

    /// Output JSON per file (one line per file unless --pretty)
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON (use with --json)
    #[arg(long)]
    pretty: bool,

    /// Quiet: only print files that were repaired, corrupted or failed
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Per-file outcome counted by directory mode.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Status {
    Valid,
    Repaired,
    Corrupted,
    Failed,
}

impl Status {
    fn of(result: &Result<RepairReport, PngfyError>) -> Self {
        match result {
            Ok(r) => match r.action {
                RepairAction::None => Status::Valid,
                RepairAction::Repaired { .. } => Status::Repaired,
                RepairAction::DryRun => Status::Corrupted,
            },
            Err(_) => Status::Failed,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Status::Valid => "valid",
            Status::Repaired => "repaired",
            Status::Corrupted => "corrupted",
            Status::Failed => "error",
        }
    }

    fn is_success(self) -> bool {
        matches!(self, Status::Valid | Status::Repaired)
    }
}

/// Directory-mode counters. The run succeeds only if nothing is left corrupted or failed.
#[derive(Default)]
struct Tally {
    total: u64,
    repaired: u64,
    corrupted: u64,
    failed: u64,
}

impl Tally {
    fn record(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Valid => {}
            Status::Repaired => self.repaired += 1,
            Status::Corrupted => self.corrupted += 1,
            Status::Failed => self.failed += 1,
        }
    }

    fn is_success(&self) -> bool {
        self.corrupted == 0 && self.failed == 0
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let opts = RepairOptions {
        backup_suffix: args.backup_suffix.clone(),
        dry_run: args.check,
    };
    let exts: HashSet<String> = args
        .extensions
        .split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let path = args
        .directory
        .as_ref()
        .or(args.path.as_ref())
        .ok_or("Missing path: give a file as argument or use -d/--directory <DIR>")?;

    if !args.json && !args.quiet {
        println!("{}", "=".repeat(60));
        println!("PNG File Validator and Repairer");
        println!("{}", "=".repeat(60));
    }

    let ok = if args.directory.is_some() {
        if !path.is_dir() {
            eprintln!("--directory expects a directory: {}", path.display());
            std::process::exit(1);
        }
        scan_dir(path, &args, &opts, &exts)?
    } else {
        run_file(path, &args, &opts)?.is_success()
    };

    if !args.json && !args.quiet {
        if ok {
            println!("\nProcessing completed successfully!");
        } else {
            println!("\nProcessing failed!");
        }
    }
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn run_file(
    path: &Path,
    args: &Args,
    opts: &RepairOptions,
) -> Result<Status, Box<dyn std::error::Error>> {
    // Hash exactly the bytes that get validated and backed up.
    let mut sha256 = None;
    let result = read_file(path).and_then(|original| {
        sha256 = Some(sha256_hex(&original));
        process_bytes(path, &original, opts)
    });
    let status = Status::of(&result);
    print_result(path, &result, status, sha256.as_deref(), args)?;
    Ok(status)
}

fn scan_dir(
    dir: &Path,
    args: &Args,
    opts: &RepairOptions,
    exts: &HashSet<String>,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !args.quiet && !args.json {
        eprintln!(
            "Processing directory: {} {}",
            dir.display(),
            if args.recursive { "(recursive)" } else { "" }
        );
    }
    let walker = if args.recursive {
        WalkDir::new(dir).into_iter()
    } else {
        WalkDir::new(dir).max_depth(1).into_iter()
    };

    let mut tally = Tally::default();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || is_backup(path, &opts.backup_suffix) {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !args.all && !ext.is_empty() && !exts.is_empty() && !exts.contains(&ext) {
            continue;
        }
        tally.record(run_file(path, args, opts)?);
    }

    if !args.quiet && !args.json {
        eprintln!(
            "Processed {} files, {} repaired, {} corrupted, {} failed",
            tally.total, tally.repaired, tally.corrupted, tally.failed
        );
    }
    Ok(tally.is_success())
}

/// Backups written by earlier runs are not inputs.
fn is_backup(path: &Path, suffix: &str) -> bool {
    let suffix = if suffix.is_empty() { DEFAULT_BACKUP_SUFFIX } else { suffix };
    path.to_str().is_some_and(|p| p.ends_with(suffix))
}

fn print_result(
    path: &Path,
    result: &Result<RepairReport, PngfyError>,
    status: Status,
    sha256: Option<&str>,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        let out = json_result(path, result, status, sha256)?;
        let json_str = if args.pretty {
            serde_json::to_string_pretty(&out)?
        } else {
            serde_json::to_string(&out)?
        };
        println!("{}", json_str);
        return Ok(());
    }
    if args.quiet && status == Status::Valid {
        return Ok(());
    }

    println!("\nProcessing file: {}", path.display());
    if let Some(h) = sha256 {
        println!("  sha256: {}", h);
    }
    let report = match result {
        Ok(r) => r,
        Err(e) => {
            println!("FAILED {}", path.display());
            eprintln!("  error: {}", e);
            return Ok(());
        }
    };

    println!("  File identified as PNG by header signature");
    println!("  File size: {} bytes", report.initial.size_bytes);
    println!(
        "  Header: {}",
        if report.initial.header_valid { "valid" } else { "corrupted" }
    );
    println!(
        "  Footer: {}",
        if report.initial.footer_valid { "valid" } else { "corrupted" }
    );
    for d in &report.diffs {
        print_diff(d, args.dump);
    }

    match &report.action {
        RepairAction::None => println!("OK {} (no repair needed)", path.display()),
        RepairAction::DryRun => println!("CORRUPTED {} (check only, not modified)", path.display()),
        RepairAction::Repaired { backup } => {
            match backup {
                BackupOutcome::Created(p) => println!("  Backup created: {}", p.display()),
                BackupOutcome::Preserved(p) => {
                    println!("  Existing backup kept: {}", p.display())
                }
            }
            for d in &report.diffs {
                println!("  {} repaired", d.region.label());
            }
            println!("  Verified: header and footer valid");
            println!("REPAIRED {}", path.display());
        }
    }
    Ok(())
}

fn print_diff(d: &RegionDiff, dump: bool) {
    println!("  {} corrupted at offset {}:", d.region.label(), d.offset);
    println!("    Current:  {}", hex_bytes(&d.current));
    println!("    Expected: {}", hex_bytes(&d.expected));
    if dump {
        for line in hex_dump(&d.current, d.offset) {
            println!("    {}", line);
        }
    }
}

fn json_diff(d: &RegionDiff) -> Value {
    let mut out = Map::new();
    out.insert("region".to_string(), Value::String(d.region.label().to_lowercase()));
    out.insert("offset".to_string(), Value::from(d.offset));
    out.insert("current".to_string(), Value::String(hex_bytes(&d.current)));
    out.insert("expected".to_string(), Value::String(hex_bytes(&d.expected)));
    out.insert("mismatched_offsets".to_string(), Value::from(d.mismatched_offsets()));
    Value::Object(out)
}

fn json_result(
    path: &Path,
    result: &Result<RepairReport, PngfyError>,
    status: Status,
    sha256: Option<&str>,
) -> Result<IndexMap<String, Value>, serde_json::Error> {
    let mut out = IndexMap::<String, Value>::new();
    out.insert("path".to_string(), Value::String(path.display().to_string()));
    out.insert("sha256".to_string(), serde_json::to_value(sha256)?);
    out.insert("status".to_string(), Value::String(status.label().to_string()));
    match result {
        Ok(r) => {
            out.insert("size_bytes".to_string(), Value::from(r.initial.size_bytes));
            out.insert("initial".to_string(), serde_json::to_value(r.initial)?);
            out.insert(
                "diffs".to_string(),
                Value::Array(r.diffs.iter().map(json_diff).collect()),
            );
            out.insert("action".to_string(), serde_json::to_value(&r.action)?);
            out.insert("final".to_string(), serde_json::to_value(r.final_state)?);
        }
        Err(e) => {
            let mut err = Map::new();
            err.insert("code".to_string(), Value::String(e.code().to_string()));
            err.insert("message".to_string(), Value::String(e.to_string()));
            out.insert("error".to_string(), Value::Object(err));
        }
    }
    Ok(out)
}
