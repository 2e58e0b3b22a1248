/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::planner
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Decide which release packages bring an installation to
    the newest eligible version, choosing a delta chain over
    a full package whenever the chain is smaller.

  Security / Safety Notes:
    Pure computation over a caller-owned catalog snapshot; the
    delta chain is not validated here.

  Dependencies:
    chrono for the release date cutoff, serde for reporting.

  Operational Scope:
    Invoked once per update check by the orchestrator; the
    resulting plan drives downloads and the exit status.

  Revision History:
    2025-11-12 COD  Authored full/delta plan selection.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Missing full release is fatal, never defaulted
    - Cutoff-excluded releases are reported, never applied
    - Deterministic ascending application order
============================================================*/

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, SynrelError};
use crate::release::{sort_releases, ReleaseEntry};
use crate::version::RawVersion;

/// Outcome of a planning request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePlan {
    installed_version: Option<RawVersion>,
    target_version: RawVersion,
    releases_to_apply: Vec<ReleaseEntry>,
    releases_excluded_by_cutoff: Vec<ReleaseEntry>,
}

impl UpdatePlan {
    /// Installed version; `None` when bootstrapping.
    pub fn installed_version(&self) -> Option<&RawVersion> {
        self.installed_version.as_ref()
    }

    pub fn target_version(&self) -> &RawVersion {
        &self.target_version
    }

    /// Packages to apply, ascending by version.
    pub fn releases_to_apply(&self) -> &[ReleaseEntry] {
        &self.releases_to_apply
    }

    pub fn releases_excluded_by_cutoff(&self) -> &[ReleaseEntry] {
        &self.releases_excluded_by_cutoff
    }

    pub fn is_bootstrapping(&self) -> bool {
        self.installed_version.is_none()
    }

    pub fn is_update_available(&self) -> bool {
        !self.releases_to_apply.is_empty()
    }

    pub fn uses_deltas(&self) -> bool {
        self.releases_to_apply.iter().any(|entry| entry.is_delta)
    }

    pub fn has_releases_after_maximum_date(&self) -> bool {
        !self.releases_excluded_by_cutoff.is_empty()
    }

    /// True when the cutoff holds back a release newer than the target.
    pub fn has_newer_releases_after_maximum_date(&self) -> bool {
        self.releases_excluded_by_cutoff
            .iter()
            .any(|entry| entry.version > self.target_version)
    }

    /// Bytes to download for the planned releases.
    pub fn download_size(&self) -> u64 {
        self.releases_to_apply
            .iter()
            .fold(0u64, |total, entry| total.saturating_add(entry.filesize))
    }
}

/// Plan an update from `installed` (or a fresh install) using `catalog`.
///
/// Releases dated after `max_release_date` are listed as excluded and never
/// applied. Fails with [`SynrelError::NoFullRelease`] when no eligible full
/// release exists.
pub fn plan(
    installed: Option<&RawVersion>,
    catalog: &[ReleaseEntry],
    max_release_date: Option<DateTime<Utc>>,
) -> Result<UpdatePlan> {
    let (eligible, mut excluded): (Vec<&ReleaseEntry>, Vec<&ReleaseEntry>) = catalog
        .iter()
        .partition(|entry| max_release_date.map_or(true, |cutoff| entry.release_date <= cutoff));

    let latest_full = eligible
        .iter()
        .copied()
        .filter(|entry| !entry.is_delta)
        .max_by(|a, b| a.version.cmp(&b.version))
        .ok_or(SynrelError::NoFullRelease)?;

    let releases_to_apply = match installed {
        None => vec![latest_full.clone()],
        Some(current) if *current == latest_full.version => Vec::new(),
        Some(current) => select_releases(current, &eligible, latest_full),
    };

    let target_version = releases_to_apply
        .iter()
        .map(|entry| &entry.version)
        .max()
        .or(installed)
        .unwrap_or(&latest_full.version)
        .clone();

    excluded.sort_by(|a, b| a.version.cmp(&b.version));

    Ok(UpdatePlan {
        installed_version: installed.cloned(),
        target_version,
        releases_to_apply,
        releases_excluded_by_cutoff: excluded.into_iter().cloned().collect(),
    })
}

/// Plan from the installed catalog record rather than a bare version.
pub fn plan_from_entry(
    installed: Option<&ReleaseEntry>,
    catalog: &[ReleaseEntry],
    max_release_date: Option<DateTime<Utc>>,
) -> Result<UpdatePlan> {
    plan(
        installed.map(|entry| &entry.version),
        catalog,
        max_release_date,
    )
}

fn select_releases(
    current: &RawVersion,
    eligible: &[&ReleaseEntry],
    latest_full: &ReleaseEntry,
) -> Vec<ReleaseEntry> {
    let mut deltas: Vec<ReleaseEntry> = eligible
        .iter()
        .filter(|entry| entry.is_delta && entry.version > *current)
        .map(|entry| (*entry).clone())
        .collect();
    sort_releases(&mut deltas);

    let delta_bytes = deltas
        .iter()
        .fold(0u64, |total, entry| total.saturating_add(entry.filesize));

    if delta_bytes > 0 && delta_bytes < latest_full.filesize {
        deltas
    } else {
        vec![latest_full.clone()]
    }
}
