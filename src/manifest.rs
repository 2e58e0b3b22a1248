/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::manifest
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Load the release manifest (one `<hash> <filename> <size>`
    record per line) into a validated release catalog.

  Security / Safety Notes:
    Reads operator-supplied manifest files only; filenames are
    reduced to their last path segment and never opened.

  Dependencies:
    chrono for default release dates.

  Operational Scope:
    Supplies the update planner with an immutable catalog
    snapshot per planning request.

  Revision History:
    2025-11-12 COD  Authored release manifest loader.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Per-line failures are skipped and reported, not hidden
    - Catalog invariants are checked before planning
    - Deterministic ordering of parsed records
============================================================*/

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{Result, SynrelError};
use crate::extract::VersionExtractor;
use crate::release::ReleaseEntry;
use crate::version::RawVersion;

/// Releases parsed from a manifest plus the lines that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ReleaseCatalog {
    pub entries: Vec<ReleaseEntry>,
    pub skipped: Vec<SkippedLine>,
}

/// Manifest line rejected during parsing.
#[derive(Debug, Clone)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

impl ReleaseCatalog {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a single manifest record.
///
/// `line_no` is 1-based and only used for diagnostics.
pub fn parse_release_entry(
    extractor: &VersionExtractor,
    line: &str,
    line_no: usize,
    default_date: DateTime<Utc>,
) -> Result<ReleaseEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [hash, filename, size] = fields.as_slice() else {
        return Err(SynrelError::Manifest {
            line: line_no,
            reason: format!("expected `<hash> <filename> <size>`, found {} fields", fields.len()),
        });
    };

    if !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SynrelError::Manifest {
            line: line_no,
            reason: format!("hash `{hash}` is not hexadecimal"),
        });
    }

    let filesize = size.parse::<u64>().map_err(|err| SynrelError::Manifest {
        line: line_no,
        reason: format!("size `{size}` is not a byte count: {err}"),
    })?;

    let filename = filename.rsplit(['/', '\\']).next().unwrap_or(*filename);
    if filename.is_empty() {
        return Err(SynrelError::Manifest {
            line: line_no,
            reason: "empty package filename".into(),
        });
    }

    ReleaseEntry::from_filename(
        extractor,
        hash.to_ascii_lowercase(),
        filename.to_string(),
        filesize,
        default_date,
    )
}

/// Parse manifest text into a catalog.
///
/// Malformed records are collected in [`ReleaseCatalog::skipped`]; duplicate
/// packages violate the catalog invariants and fail the whole load.
pub fn parse_releases(
    extractor: &VersionExtractor,
    text: &str,
    default_date: DateTime<Utc>,
) -> Result<ReleaseCatalog> {
    let mut catalog = ReleaseCatalog::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_start_matches('\u{feff}').trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_release_entry(extractor, line, idx + 1, default_date) {
            Ok(entry) => catalog.entries.push(entry),
            Err(err @ (SynrelError::Format { .. } | SynrelError::Manifest { .. })) => {
                catalog.skipped.push(SkippedLine {
                    line: idx + 1,
                    reason: err.to_string(),
                });
            }
            Err(other) => return Err(other),
        }
    }

    validate_catalog(&catalog.entries)?;
    Ok(catalog)
}

/// Read and parse a manifest file.
pub fn load_releases(
    extractor: &VersionExtractor,
    path: &Path,
    default_date: DateTime<Utc>,
) -> Result<ReleaseCatalog> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        SynrelError::Filesystem(format!(
            "Failed to read release manifest {}: {err}",
            path.display()
        ))
    })?;
    parse_releases(extractor, &text, default_date)
}

/// Check that filenames are unique and each version has at most one full
/// and one delta package.
pub fn validate_catalog(entries: &[ReleaseEntry]) -> Result<()> {
    let mut filenames: HashSet<&str> = HashSet::new();
    let mut versions: HashSet<(&RawVersion, bool)> = HashSet::new();

    for entry in entries {
        if !filenames.insert(entry.filename.as_str()) {
            return Err(SynrelError::DuplicateRelease {
                filename: entry.filename.clone(),
                reason: "filename listed more than once".into(),
            });
        }
        if !versions.insert((&entry.version, entry.is_delta)) {
            return Err(SynrelError::DuplicateRelease {
                filename: entry.filename.clone(),
                reason: format!(
                    "another {} package already provides version {}",
                    if entry.is_delta { "delta" } else { "full" },
                    entry.version
                ),
            });
        }
    }
    Ok(())
}
