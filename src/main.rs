/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::main
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Entry point for Syn-Rel Core. Parses the command line,
    runs a planning session and exits with the updater status
    code.

  Security / Safety Notes:
    Operates within user privileges. Reads the manifest and
    config, writes the report and session log; no network I/O.

  Dependencies:
    clap for CLI parsing.

  Operational Scope:
    Invoked by the installer shell before downloading
    packages, or by operators auditing what an update would do.

  Revision History:
    2025-11-12 COD  Authored Syn-Rel Core runtime.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Result-first error handling with deterministic exits
    - Structured logging following Synavera cadence
    - Configurable execution via CLI and config file
============================================================*/

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use synrel_core::session::{run_session, RunOptions};

/// Command-line arguments for Syn-Rel-Core.
#[derive(Debug, Parser)]
#[command(
    name = "Syn-Rel-Core",
    version,
    author = "Synavera Systems",
    about = "Update planner for Syn-Rel release feeds"
)]
struct Cli {
    /// Override configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override release manifest path.
    #[arg(long, value_name = "PATH")]
    releases: Option<PathBuf>,
    /// Installed version; omit to plan a fresh install.
    #[arg(long, value_name = "VERSION", conflicts_with = "installed_package")]
    installed: Option<String>,
    /// Installed package filename, version derived from it.
    #[arg(long, value_name = "FILENAME")]
    installed_package: Option<String>,
    /// Latest release date eligible for application (yyyyMMddHHmmss or RFC 3339).
    #[arg(long, value_name = "STAMP")]
    max_release_date: Option<String>,
    /// Override plan report output path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// Explicit log file path.
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
    /// Do not write the report; emit summary only.
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,
    /// Enable verbose logging to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> ExitCode {
    let options = RunOptions::from(Cli::parse());
    match run_session(&options) {
        Ok(status) => status.exit_code(),
        // Already reported to stderr and the session log.
        Err(err) => err.exit_code(),
    }
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            config: cli.config,
            releases: cli.releases,
            installed: cli.installed,
            installed_package: cli.installed_package,
            max_release_date: cli.max_release_date,
            report: cli.report,
            log: cli.log,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        }
    }
}
