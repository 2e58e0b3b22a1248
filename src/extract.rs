/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::extract
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Recover the application version and package kind from a
    release package filename such as
    `My.Great-Product-1.2.0-full.nupkg`.

  Security / Safety Notes:
    Operates on filename text only; paths are never opened.

  Dependencies:
    serde for the package kind tag in reports.

  Operational Scope:
    Used by the manifest loader to derive version and delta
    flags for every catalog record.

  Revision History:
    2025-11-12 COD  Authored separator-scanning extractor.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Product names may contain dots and dashes
    - First numeric segment marks the start of the version
    - Malformed names fail with a format error, never a panic
============================================================*/

use serde::Serialize;

use crate::error::{Result, SynrelError};
use crate::version::RawVersion;

/// Package extensions stripped before scanning.
pub const DEFAULT_PACKAGE_EXTENSIONS: &[&str] = &[".nupkg", ".pkg"];
/// Suffix marking an incremental package.
pub const DELTA_SUFFIX: &str = "-delta";
/// Suffix marking a standalone package.
pub const FULL_SUFFIX: &str = "-full";

/// Build type of a release package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageKind {
    Full,
    Delta,
}

/// Extracts versions from package filenames.
#[derive(Debug, Clone)]
pub struct VersionExtractor {
    extensions: Vec<String>,
}

impl Default for VersionExtractor {
    fn default() -> Self {
        Self::with_extensions(DEFAULT_PACKAGE_EXTENSIONS.iter().copied())
    }
}

impl VersionExtractor {
    /// Build an extractor that recognises the given package extensions.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// File name with directory and package extension removed.
    pub fn package_stem<'a>(&self, filename: &'a str) -> &'a str {
        let name = base_name(filename);
        for ext in &self.extensions {
            if let Some(split) = name.len().checked_sub(ext.len()) {
                if let Some(tail) = name.get(split..) {
                    if tail.eq_ignore_ascii_case(ext) {
                        return &name[..split];
                    }
                }
            }
        }
        name
    }

    /// Delta when the stem ends in `-delta`, full otherwise.
    pub fn package_kind(&self, filename: &str) -> PackageKind {
        if self.package_stem(filename).ends_with(DELTA_SUFFIX) {
            PackageKind::Delta
        } else {
            PackageKind::Full
        }
    }

    /// Extract the raw version embedded in a package filename.
    pub fn extract_version(&self, filename: &str) -> Result<RawVersion> {
        let mut remaining = strip_build_suffixes(self.package_stem(filename));

        while let Some(idx) = remaining.find(['.', '-']) {
            if is_numeric(&remaining[..idx]) {
                return parse_for(filename, remaining);
            }
            remaining = &remaining[idx + 1..];
        }

        if is_numeric(remaining) {
            return parse_for(filename, remaining);
        }

        Err(SynrelError::format(
            filename,
            "no numeric version segment in package name",
        ))
    }
}

/// Extract a version using the default package extensions.
pub fn extract_version(filename: &str) -> Result<RawVersion> {
    VersionExtractor::default().extract_version(filename)
}

fn base_name(filename: &str) -> &str {
    filename.rsplit(['/', '\\']).next().unwrap_or(filename)
}

fn strip_build_suffixes(mut stem: &str) -> &str {
    loop {
        if let Some(rest) = stem.strip_suffix(DELTA_SUFFIX) {
            stem = rest;
        } else if let Some(rest) = stem.strip_suffix(FULL_SUFFIX) {
            stem = rest;
        } else {
            return stem;
        }
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn parse_for(filename: &str, candidate: &str) -> Result<RawVersion> {
    RawVersion::parse(candidate).map_err(|err| match err {
        SynrelError::Format { reason, .. } => SynrelError::format(filename, reason),
        other => other,
    })
}
