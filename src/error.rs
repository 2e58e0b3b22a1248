/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::error
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Centralise Syn-Rel-Core error types so version parsing,
    manifest loading and planning report failures uniformly.

  Security / Safety Notes:
    Error contexts carry filenames and manifest line numbers
    only; no file contents beyond the offending token.

  Dependencies:
    thiserror for ergonomic error definitions.

  Operational Scope:
    Used across modules to separate per-entry format failures
    from fatal planning failures, and to map both onto the
    updater exit status contract.

  Revision History:
    2025-11-12 COD  Established shared error definitions.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit error taxonomy with actionable context
    - No silent failure paths
    - Stable exit codes for operational tooling
============================================================*/

use std::process::ExitCode;

use thiserror::Error;

use crate::exit::ExitStatus;

/// Result alias for Syn-Rel-Core operations.
pub type Result<T> = std::result::Result<T, SynrelError>;

/// Enumerates error domains surfaced by Syn-Rel-Core.
#[derive(Debug, Error)]
pub enum SynrelError {
    #[error("Format: `{input}` is not a valid version ({reason})")]
    Format { input: String, reason: String },
    #[error("Catalog has no eligible full release (delta-only, or every full release is past the cutoff)")]
    NoFullRelease,
    #[error("Catalog holds duplicate release `{filename}`: {reason}")]
    DuplicateRelease { filename: String, reason: String },
    #[error("Manifest line {line}: {reason}")]
    Manifest { line: usize, reason: String },
    #[error("Configuration: {0}")]
    Config(String),
    #[error("Serialization: {0}")]
    Serialization(String),
    #[error("Filesystem: {0}")]
    Filesystem(String),
}

impl SynrelError {
    /// Build a format error for the given input text.
    pub fn format<I: Into<String>, R: Into<String>>(input: I, reason: R) -> Self {
        SynrelError::Format {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// True when the failure concerns a single input that callers may skip.
    pub fn is_format(&self) -> bool {
        matches!(self, SynrelError::Format { .. })
    }

    /// Every failure surfaces as the updater's "error occurred" status.
    pub fn exit_code(&self) -> ExitCode {
        ExitStatus::ErrorOccurred.exit_code()
    }
}
