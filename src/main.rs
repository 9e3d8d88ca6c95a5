//! Texsplice CLI - Command-line tool for texture extraction and reinsertion.
//!
//! Every command walks a directory recursively, picks the files whose
//! extension is in the filter list and applies one operation to each. A
//! failing file is logged and counted; it never stops the walk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use texsplice::prelude::*;
use texsplice::splice::{convert_file, extracted_path, Error as SpliceError, Transcoded};

/// Extensions processed when `--ext` is not given.
const DEFAULT_EXTENSIONS: [&str; 5] = ["bin", "dat", "sti", "jmb", "gm2"];

/// Texsplice - extract, fingerprint and reimport embedded textures
#[derive(Parser)]
#[command(name = "texsplice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// File extensions to process, comma separated
    #[arg(long = "ext", value_delimiter = ',', global = true, default_values = DEFAULT_EXTENSIONS)]
    extensions: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the embedded texture of each file to <stem>_extracted.dds
    Extract {
        /// Directory to walk
        #[arg(env = "TEXSPLICE_DIR")]
        dir: PathBuf,
    },

    /// Extract each embedded texture to <fingerprint>.dds
    ExtractHashed {
        /// Directory to walk
        #[arg(env = "TEXSPLICE_DIR")]
        dir: PathBuf,
    },

    /// Splice <stem>_extracted.dds back into each file
    Import {
        /// Directory to walk
        #[arg(env = "TEXSPLICE_DIR")]
        dir: PathBuf,

        /// End the original texture at the resource terminator
        #[arg(long)]
        bounded: bool,
    },

    /// Extract every texture of multi-texture archives
    ExtractArchive {
        /// Directory to walk
        #[arg(env = "TEXSPLICE_DIR")]
        dir: PathBuf,
    },

    /// Drop the 16-byte trailer and rename to <fingerprint>.bin
    FixAndHash {
        /// Directory to walk
        #[arg(env = "TEXSPLICE_DIR")]
        dir: PathBuf,
    },

    /// Convert GCT0 CMPR textures to DXT1 DDS files
    Transcode {
        /// Directory to walk
        #[arg(env = "TEXSPLICE_DIR")]
        dir: PathBuf,
    },

    /// Reverse the byte order of every 32-bit word into <stem>_le.bin
    EndianConvert {
        /// Directory to walk
        #[arg(env = "TEXSPLICE_DIR")]
        dir: PathBuf,
    },
}

/// What happened to one file.
enum Outcome {
    Done,
    Skipped,
}

/// Per-command totals.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    processed: usize,
    skipped: usize,
    failed: usize,
}

impl Summary {
    fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let extensions = normalize_extensions(&cli.extensions);

    let summary = match cli.command {
        Commands::Extract { dir } => run(&dir, &extensions, "Extracting", cmd_extract)?,
        Commands::ExtractHashed { dir } => {
            run(&dir, &extensions, "Extracting", cmd_extract_hashed)?
        }
        Commands::Import { dir, bounded } => {
            let policy = if bounded {
                TailPolicy::Terminator
            } else {
                TailPolicy::ReplacementLength
            };
            run(&dir, &extensions, "Importing", |path| cmd_import(path, policy))?
        }
        Commands::ExtractArchive { dir } => {
            run(&dir, &extensions, "Extracting", cmd_extract_archive)?
        }
        Commands::FixAndHash { dir } => run(&dir, &extensions, "Renaming", cmd_fix_and_hash)?,
        Commands::Transcode { dir } => run(&dir, &extensions, "Transcoding", cmd_transcode)?,
        Commands::EndianConvert { dir } => {
            run(&dir, &extensions, "Converting", cmd_endian_convert)?
        }
    };

    if summary.failed > 0 {
        anyhow::bail!("{} of {} files failed", summary.failed, summary.total());
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Lowercase extensions without leading dots.
fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Case-insensitive extension match against normalized `extensions`.
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| extensions.iter().any(|x| *x == e))
}

/// Every matching file below `dir`, in a stable order.
///
/// The list is collected before any file is touched, so outputs written
/// next to the inputs are never picked up by the same run.
fn collect_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn run<F>(dir: &Path, extensions: &[String], verb: &str, mut op: F) -> Result<Summary>
where
    F: FnMut(&Path) -> Result<Outcome>,
{
    let files = collect_files(dir, extensions)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;
    info!("{} {} files in {}", verb, files.len(), dir.display());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut summary = Summary::default();

    for path in &files {
        if let Some(name) = path.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }

        match pb.suspend(|| op(path)) {
            Ok(Outcome::Done) => summary.processed += 1,
            Ok(Outcome::Skipped) => summary.skipped += 1,
            Err(e) => {
                pb.suspend(|| error!("{}: {:#}", path.display(), e));
                summary.failed += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    info!(
        "Finished in {:?}: {} processed, {} skipped, {} failed",
        start.elapsed(),
        summary.processed,
        summary.skipped,
        summary.failed
    );

    Ok(summary)
}

fn cmd_extract(path: &Path) -> Result<Outcome> {
    match extract_file(path) {
        Ok(_) => Ok(Outcome::Done),
        Err(SpliceError::SignatureNotFound { .. }) => {
            debug!(path = %path.display(), "no embedded texture");
            Ok(Outcome::Skipped)
        }
        Err(e) => Err(e).context("Failed to extract texture"),
    }
}

fn cmd_extract_hashed(path: &Path) -> Result<Outcome> {
    match extract_file_hashed(path) {
        Ok(_) => Ok(Outcome::Done),
        Err(SpliceError::SignatureNotFound { .. }) => {
            debug!(path = %path.display(), "no embedded texture");
            Ok(Outcome::Skipped)
        }
        Err(e) => Err(e).context("Failed to extract texture"),
    }
}

fn cmd_import(path: &Path, policy: TailPolicy) -> Result<Outcome> {
    let replacement = extracted_path(path)?;
    if !replacement.is_file() {
        debug!(path = %path.display(), "no replacement texture");
        return Ok(Outcome::Skipped);
    }

    reimport_file(path, &replacement, policy).context("Failed to reimport texture")?;
    Ok(Outcome::Done)
}

fn cmd_extract_archive(path: &Path) -> Result<Outcome> {
    let written = extract_archive_file(path).context("Failed to split archive")?;
    Ok(if written.is_empty() {
        Outcome::Skipped
    } else {
        Outcome::Done
    })
}

fn cmd_fix_and_hash(path: &Path) -> Result<Outcome> {
    let trimmed = fix_and_rename(path).context("Failed to trim file")?;
    Ok(if trimmed.renamed {
        Outcome::Done
    } else {
        Outcome::Skipped
    })
}

fn cmd_transcode(path: &Path) -> Result<Outcome> {
    match transcode_file(path).context("Failed to transcode texture")? {
        Transcoded::Written(_) => Ok(Outcome::Done),
        Transcoded::Skipped(skip) => {
            info!(path = %path.display(), ?skip, "skipped");
            Ok(Outcome::Skipped)
        }
    }
}

fn cmd_endian_convert(path: &Path) -> Result<Outcome> {
    convert_file(path).context("Failed to convert byte order")?;
    Ok(Outcome::Done)
}
