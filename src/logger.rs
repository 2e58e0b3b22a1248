/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::logger
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1
  ------------------------------------------------------------
  Purpose:
    Structured, append-only session log for Syn-Rel-Core
    planning runs, with a level threshold and an integrity
    digest written on completion.

  Security / Safety Notes:
    Entries carry versions, filenames and byte counts only;
    manifest hashes are never logged.

  Dependencies:
    std::fs::File, std::sync::Mutex, chrono for UTC stamps,
    sha2 for the session digest.

  Operational Scope:
    Owned by the binary entry point; the planning core never
    logs.

  Revision History:
    2025-11-12 COD  Adapted Synavera logger for Syn-Rel.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Append-only logging with UTC timestamps
    - Deterministic formatting for auditability
    - Graceful error propagation on I/O failures
============================================================*/

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::{Result, SynrelError};

/// Severity of a log entry, ordered from least to most severe.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Session logger writing `<stamp> [LEVEL] [CODE] message` lines.
pub struct Logger {
    file: Option<Mutex<BufWriter<File>>>,
    path: Option<PathBuf>,
    verbose: bool,
    threshold: LogLevel,
}

impl Logger {
    /// Build a logger that echoes to stderr and optionally appends to `path`.
    ///
    /// Entries below `threshold` are dropped from the file; `verbose` echoes
    /// every entry to stderr, otherwise only warnings and errors are echoed.
    pub fn new(path: Option<PathBuf>, verbose: bool, threshold: LogLevel) -> Result<Self> {
        let file = match path.as_deref() {
            Some(file_path) => Some(Mutex::new(BufWriter::new(open_log(file_path)?))),
            None => None,
        };

        Ok(Self {
            file,
            path,
            verbose,
            threshold,
        })
    }

    /// Logger without a file sink.
    pub fn stderr_only(verbose: bool) -> Self {
        Self {
            file: None,
            path: None,
            verbose,
            threshold: LogLevel::Info,
        }
    }

    pub fn log<S: AsRef<str>>(&self, level: LogLevel, code: &str, message: S) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let payload = format_entry(&timestamp, level, code, message.as_ref());

        if self.verbose || level >= LogLevel::Warn {
            eprintln!("{payload}");
        }

        if level < self.threshold {
            return;
        }
        let Some(file) = &self.file else {
            return;
        };
        if let Ok(mut guard) = file.lock() {
            if writeln!(guard, "{payload}").and_then(|_| guard.flush()).is_err() {
                eprintln!(
                    "{}",
                    format_entry(&timestamp, LogLevel::Error, "LOGGER", "Failed to write log file")
                );
            }
        }
    }

    pub fn info<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Info, code, message);
    }

    pub fn warn<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Warn, code, message);
    }

    pub fn error<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Error, code, message);
    }

    pub fn debug<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Debug, code, message);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write `<log>.hash` holding the SHA-256 of the session log.
    pub fn finalize(&self) -> Result<Option<PathBuf>> {
        let Some(path) = self.path() else {
            return Ok(None);
        };

        let data = std::fs::read(path).map_err(|err| {
            SynrelError::Filesystem(format!(
                "Failed to read log for hashing {}: {err}",
                path.display()
            ))
        })?;
        let digest = Sha256::digest(&data);

        let mut hash_os = path.as_os_str().to_os_string();
        hash_os.push(".hash");
        let hash_path = PathBuf::from(hash_os);
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        std::fs::write(&hash_path, format!("{digest:x}  {file_name}\n")).map_err(|err| {
            SynrelError::Filesystem(format!(
                "Failed to write hash file {}: {err}",
                hash_path.display()
            ))
        })?;
        Ok(Some(hash_path))
    }
}

fn open_log(file_path: &Path) -> Result<File> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            SynrelError::Filesystem(format!(
                "Failed to create log directory {}: {err}",
                parent.display()
            ))
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)
        .map_err(|err| {
            SynrelError::Filesystem(format!(
                "Failed to open log file {}: {err}",
                file_path.display()
            ))
        })
}

fn format_entry(timestamp: &str, level: LogLevel, code: &str, message: &str) -> String {
    format!("{timestamp} [{}] [{code}] {message}", level.as_str())
}
