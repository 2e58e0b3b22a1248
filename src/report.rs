/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::report
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Render an update plan as a JSON report for the installer
    shell and for operators auditing update decisions.

  Security / Safety Notes:
    Reports are written to operator-controlled paths; no
    privileged operations are performed.

  Dependencies:
    serde/serde_json for serialization, chrono for stamps.

  Operational Scope:
    Written once per planning run unless a dry run is
    requested.

  Revision History:
    2025-11-12 COD  Authored plan report writer.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Plan is embedded verbatim; summary fields are derived
    - Rich metadata for audit and observability
============================================================*/

use std::fs::File;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{Result, SynrelError};
use crate::exit::ExitStatus;
use crate::planner::UpdatePlan;

/// Wrapper representing the full report document.
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub metadata: ReportMetadata,
    pub plan: &'a UpdatePlan,
}

/// Summary block describing the plan and how it was produced.
#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub generated_by: String,
    pub status: ExitStatus,
    pub status_code: i32,
    pub bootstrapping: bool,
    pub releases_to_apply: usize,
    pub releases_excluded: usize,
    pub newer_releases_after_cutoff: bool,
    pub uses_deltas: bool,
    pub download_size_total: u64,
    pub skipped_manifest_lines: usize,
}

/// Build a report for `plan`.
pub fn build_report(plan: &UpdatePlan, status: ExitStatus, skipped_lines: usize) -> PlanReport<'_> {
    let metadata = ReportMetadata {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        generated_by: "synrel_core".to_string(),
        status,
        status_code: status.code(),
        bootstrapping: plan.is_bootstrapping(),
        releases_to_apply: plan.releases_to_apply().len(),
        releases_excluded: plan.releases_excluded_by_cutoff().len(),
        newer_releases_after_cutoff: plan.has_newer_releases_after_maximum_date(),
        uses_deltas: plan.uses_deltas(),
        download_size_total: plan.download_size(),
        skipped_manifest_lines: skipped_lines,
    };

    PlanReport { metadata, plan }
}

/// Persist the report to the given path.
pub fn write_plan_report(report: &PlanReport<'_>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            SynrelError::Filesystem(format!(
                "Failed to create report directory {}: {err}",
                parent.display()
            ))
        })?;
    }
    let file = File::create(path).map_err(|err| {
        SynrelError::Filesystem(format!(
            "Failed to create report file {}: {err}",
            path.display()
        ))
    })?;
    serde_json::to_writer_pretty(file, report).map_err(|err| {
        SynrelError::Serialization(format!(
            "Failed to write report {}: {err}",
            path.display()
        ))
    })?;
    Ok(())
}
