/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Release identity and update planning for desktop
    application updaters: version extraction from package
    filenames, version ordering, and full/delta plan choice.

  Security / Safety Notes:
    The planning core (extract, version, planner) performs no
    I/O; manifest, report, config and logger modules form the
    thin orchestration layer around it.

  Dependencies:
    See Cargo.toml; the core depends on chrono and serde only.

  Operational Scope:
    Linked by the `syn-rel-core` binary and by updaters that
    embed planning directly.

  Revision History:
    2025-11-12 COD  Split library surface from the binary.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Pure core, effectful shell
    - Explicit error values for every failure
============================================================*/

pub mod config;
pub mod error;
pub mod exit;
pub mod extract;
pub mod logger;
pub mod manifest;
pub mod planner;
pub mod release;
pub mod report;
pub mod session;
pub mod timestamp;
pub mod version;

pub use error::{Result, SynrelError};
pub use exit::ExitStatus;
pub use extract::{extract_version, PackageKind, VersionExtractor};
pub use planner::{plan, plan_from_entry, UpdatePlan};
pub use release::ReleaseEntry;
pub use version::{compare, RawVersion};
