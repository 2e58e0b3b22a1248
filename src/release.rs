/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::release
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Shared release record describing one package in a release
    catalog (version, kind, size and publication date).

  Security / Safety Notes:
    Pure data container; no I/O performed in this module.

  Dependencies:
    chrono for release dates, serde for report output.

  Operational Scope:
    Produced by the manifest loader, consumed read-only by the
    update planner and report writer.

  Revision History:
    2025-11-12 COD  Introduced shared ReleaseEntry type.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Clear data contracts between modules
    - Serializable structures for report output
============================================================*/

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::extract::{PackageKind, VersionExtractor};
use crate::timestamp::release_date_from_filename;
use crate::version::RawVersion;

/// One package from a release catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseEntry {
    pub hash: String,
    pub filename: String,
    pub filesize: u64,
    pub is_delta: bool,
    pub version: RawVersion,
    pub release_date: DateTime<Utc>,
}

impl ReleaseEntry {
    pub fn new(
        hash: String,
        filename: String,
        filesize: u64,
        is_delta: bool,
        version: RawVersion,
        release_date: DateTime<Utc>,
    ) -> Self {
        Self {
            hash,
            filename,
            filesize,
            is_delta,
            version,
            release_date,
        }
    }

    /// Derive version, kind and release date from the package filename.
    ///
    /// `default_date` applies when the filename carries no release stamp.
    pub fn from_filename(
        extractor: &VersionExtractor,
        hash: String,
        filename: String,
        filesize: u64,
        default_date: DateTime<Utc>,
    ) -> Result<Self> {
        let version = extractor.extract_version(&filename)?;
        let is_delta = extractor.package_kind(&filename) == PackageKind::Delta;
        let release_date = release_date_from_filename(&filename, default_date);
        Ok(Self::new(
            hash,
            filename,
            filesize,
            is_delta,
            version,
            release_date,
        ))
    }

    pub fn kind(&self) -> PackageKind {
        if self.is_delta {
            PackageKind::Delta
        } else {
            PackageKind::Full
        }
    }
}

/// Greatest version among the given releases.
pub fn max_version(entries: &[ReleaseEntry]) -> Option<&RawVersion> {
    entries.iter().map(|entry| &entry.version).max()
}

/// Smallest version among the given releases.
pub fn min_version(entries: &[ReleaseEntry]) -> Option<&RawVersion> {
    entries.iter().map(|entry| &entry.version).min()
}

/// Greatest of a set of version strings; any unparsable string is an error.
pub fn max_version_of<I, S>(versions: I) -> Result<Option<RawVersion>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parsed = parse_all(versions)?;
    Ok(parsed.into_iter().max())
}

/// Smallest of a set of version strings; any unparsable string is an error.
pub fn min_version_of<I, S>(versions: I) -> Result<Option<RawVersion>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parsed = parse_all(versions)?;
    Ok(parsed.into_iter().min())
}

/// Sort releases ascending by version; equal versions keep their input order.
pub fn sort_releases(entries: &mut [ReleaseEntry]) {
    entries.sort_by(|a, b| a.version.cmp(&b.version));
}

fn parse_all<I, S>(versions: I) -> Result<Vec<RawVersion>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    versions
        .into_iter()
        .map(|text| RawVersion::parse(text.as_ref()))
        .collect()
}
