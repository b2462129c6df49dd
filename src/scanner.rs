//! Content scanning: expand the merged config's globs against a project tree.
//!
//! Patterns are compiled into a single [`GlobSet`] and matched against
//! root-relative paths, so `./src/**/*.ts` written in a config fragment
//! matches `src/components/Button.ts` under the project root. A pattern that
//! matches zero files is a valid, empty result rather than an error.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::error::ConfigError;
use crate::theme::GlobPattern;

/// Directories never scanned for content files
const SKIP_DIRECTORIES: &[&str] = &["node_modules", ".git", ".svn", ".hg"];

/// Cache-line aligned atomic counter to prevent false sharing
/// Each counter is on its own 64-byte cache line
#[repr(align(64))]
pub struct CacheAlignedAtomic(pub AtomicU64);

impl CacheAlignedAtomic {
    pub const fn new(val: u64) -> Self {
        Self(AtomicU64::new(val))
    }
}

/// Global counters for scan progress
/// Cache line padding prevents false sharing between counters
/// when updated from different threads
pub struct ScanStats {
    pub files_seen: CacheAlignedAtomic,
    pub files_matched: CacheAlignedAtomic,
}

impl ScanStats {
    pub fn new() -> Self {
        Self {
            files_seen: CacheAlignedAtomic::new(0),
            files_matched: CacheAlignedAtomic::new(0),
        }
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of scanning the project tree against the content globs
#[derive(Debug)]
pub struct ScanReport {
    /// Root-relative matched paths, sorted for deterministic output
    pub matched: Vec<PathBuf>,
    /// Match count per content glob, in config order
    pub per_pattern: Vec<u64>,
}

/// Compile content globs into one matcher.
/// Leading "./" is stripped so patterns apply to root-relative paths
pub fn build_matcher(globs: &[GlobPattern]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();

    for pattern in globs {
        let glob = Glob::new(pattern.normalized()).map_err(|e| ConfigError::InvalidGlob {
            pattern: pattern.as_str().to_string(),
            source: e,
        })?;
        builder.add(glob);
    }

    builder.build().map_err(|e| ConfigError::InvalidGlob {
        pattern: e.glob().map(ToString::to_string).unwrap_or_default(),
        source: e,
    })
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIP_DIRECTORIES.contains(&name))
            .unwrap_or(false)
}

/// Scan the project tree for files matching the content globs.
/// Returns sorted root-relative matches plus per-pattern counts
#[must_use = "this returns the scan report which should be processed"]
pub fn scan_content(
    root: &Path,
    globs: &[GlobPattern],
    shutdown: &AtomicBool,
    stats: &ScanStats,
) -> Result<ScanReport, ConfigError> {
    let matcher = build_matcher(globs)?;

    // Collect file entries first, then match in parallel
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
    {
        if shutdown.load(Ordering::Relaxed) {
            return Err(ConfigError::Cancelled);
        }
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    let matches: Vec<(PathBuf, Vec<usize>)> = files
        .par_iter()
        .filter_map(|path| {
            stats.files_seen.0.fetch_add(1, Ordering::Relaxed);

            let relative = path.strip_prefix(root).unwrap_or(path);
            let indices = matcher.matches(relative);
            if indices.is_empty() {
                None
            } else {
                stats.files_matched.0.fetch_add(1, Ordering::Relaxed);
                Some((relative.to_path_buf(), indices))
            }
        })
        .collect();

    if shutdown.load(Ordering::Relaxed) {
        return Err(ConfigError::Cancelled);
    }

    let mut per_pattern = vec![0u64; globs.len()];
    let mut matched = Vec::with_capacity(matches.len());
    for (path, indices) in matches {
        for index in indices {
            per_pattern[index] += 1;
        }
        matched.push(path);
    }
    matched.sort();

    Ok(ScanReport {
        matched,
        per_pattern,
    })
}
