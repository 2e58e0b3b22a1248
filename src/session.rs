/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::session
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Drive one planning run: resolve options against the
    config, load the manifest, plan, report and settle the
    session log.

  Security / Safety Notes:
    Reads the manifest and config, writes the report and the
    session log; no network I/O.

  Dependencies:
    chrono for session stamps; logger, manifest, planner and
    report modules for the work itself.

  Operational Scope:
    Called by the binary entry point with parsed CLI options,
    and directly by integration tests.

  Revision History:
    2025-11-12 COD  Lifted runtime out of the binary.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Every failure after the log opens is logged and hashed
    - CLI values override configuration values
============================================================*/

use std::path::PathBuf;

use chrono::Utc;

use crate::config::SynrelConfig;
use crate::error::Result;
use crate::exit::ExitStatus;
use crate::logger::Logger;
use crate::manifest::load_releases;
use crate::planner::{plan, UpdatePlan};
use crate::report::{build_report, write_plan_report};
use crate::timestamp::parse_cutoff;
use crate::version::RawVersion;

/// Options for a single run; `None` falls back to the configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub releases: Option<PathBuf>,
    pub installed: Option<String>,
    pub installed_package: Option<String>,
    pub max_release_date: Option<String>,
    pub report: Option<PathBuf>,
    pub log: Option<PathBuf>,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Run one planning session and return the status to exit with.
///
/// Failures before the session log opens go to stderr; later failures are
/// also written to the log, which is hashed either way.
pub fn run_session(options: &RunOptions) -> Result<ExitStatus> {
    let console = Logger::stderr_only(options.verbose);

    let config = SynrelConfig::load_from_optional_path(options.config.as_deref())
        .inspect_err(|err| console.error("CONFIG", err.to_string()))?;

    let session_stamp = Utc::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let log_path = options
        .log
        .clone()
        .unwrap_or_else(|| config.log_dir().join(format!("core_{session_stamp}.log")));
    let logger = Logger::new(Some(log_path), options.verbose, config.general.log_level)
        .inspect_err(|err| console.error("LOGGER", err.to_string()))?;
    logger.info("INIT", "Syn-Rel Core awakening.");

    match plan_session(options, &config, &logger) {
        Ok(status) => {
            logger.info("COMPLETE", "Plan settled.");
            logger.finalize()?;
            Ok(status)
        }
        Err(err) => {
            logger.error("FAILURE", err.to_string());
            if let Err(hash_err) = logger.finalize() {
                console.error("LOGGER", hash_err.to_string());
            }
            Err(err)
        }
    }
}

fn plan_session(options: &RunOptions, config: &SynrelConfig, logger: &Logger) -> Result<ExitStatus> {
    let extractor = config.extractor();

    let installed = match (&options.installed, &options.installed_package) {
        (Some(text), _) => Some(RawVersion::parse(text)?),
        (None, Some(filename)) => Some(extractor.extract_version(filename)?),
        (None, None) => None,
    };
    let max_release_date = match options.max_release_date.as_deref() {
        Some(text) => Some(parse_cutoff(text)?),
        None => config.max_release_date()?,
    };
    let mandatory = config.mandatory_versions()?;
    let default_date = config.default_release_date()?;

    let releases_path = options
        .releases
        .clone()
        .unwrap_or_else(|| config.releases_path());
    let catalog = load_releases(&extractor, &releases_path, default_date)?;
    for skipped in &catalog.skipped {
        logger.warn("SKIP", format!("line {}: {}", skipped.line, skipped.reason));
    }
    logger.info(
        "CATALOG",
        format!(
            "Loaded {} releases from {} ({} skipped)",
            catalog.entries.len(),
            releases_path.display(),
            catalog.skipped.len()
        ),
    );

    if catalog.is_empty() && catalog.skipped.is_empty() {
        logger.warn("EMPTY", "Release manifest lists no packages; exiting");
        return Ok(ExitStatus::NothingToReport);
    }

    let update = plan(installed.as_ref(), &catalog.entries, max_release_date)?;
    log_plan(logger, &update);

    let status = ExitStatus::from_plan(&update, &mandatory);
    let report = build_report(&update, status, catalog.skipped.len());

    if options.dry_run {
        print_summary(&update, status);
    } else {
        let report_path = options.report.clone().unwrap_or_else(|| config.report_path());
        write_plan_report(&report, &report_path)?;
        logger.info(
            "REPORT",
            format!("Plan report written to {}", report_path.display()),
        );
    }

    logger.info(
        "SUMMARY",
        format!("status={status:?} code={}", status.code()),
    );
    Ok(status)
}

fn log_plan(logger: &Logger, update: &UpdatePlan) {
    let installed = update
        .installed_version()
        .map_or_else(|| "none".to_string(), ToString::to_string);

    if update
        .installed_version()
        .is_some_and(|current| current > update.target_version())
    {
        logger.warn(
            "AHEAD",
            format!(
                "Installed {installed} is newer than latest eligible full {}; nothing to apply",
                update.target_version()
            ),
        );
    }

    for entry in update.releases_to_apply() {
        logger.debug(
            "APPLY",
            format!("{} ({} bytes)", entry.filename, entry.filesize),
        );
    }
    for entry in update.releases_excluded_by_cutoff() {
        logger.debug("CUTOFF", format!("{} held back", entry.filename));
    }

    logger.info(
        "PLAN",
        format!(
            "{installed} → {} via {} package(s), {} bytes, deltas={}, held back={}",
            update.target_version(),
            update.releases_to_apply().len(),
            update.download_size(),
            update.uses_deltas(),
            update.releases_excluded_by_cutoff().len()
        ),
    );
}

fn print_summary(update: &UpdatePlan, status: ExitStatus) {
    println!(
        "→ Plan dry-run. Target={} Packages={} Bytes={} HeldBack={} Status={}",
        update.target_version(),
        update.releases_to_apply().len(),
        update.download_size(),
        update.releases_excluded_by_cutoff().len(),
        status.code()
    );
}
