/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::config
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Load and validate the Syn-Rel TOML configuration and
    resolve default paths for manifests, reports and logs.

  Security / Safety Notes:
    Reads a single operator-owned file; unknown keys are
    rejected rather than ignored.

  Dependencies:
    toml + serde for parsing, dirs for XDG path resolution.

  Operational Scope:
    Consumed by the binary entry point; CLI flags override
    every value loaded here.

  Revision History:
    2025-11-12 COD  Authored configuration layer.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Missing default config yields documented defaults
    - Invalid values fail before any planning occurs
============================================================*/

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::{Result, SynrelError};
use crate::extract::{VersionExtractor, DEFAULT_PACKAGE_EXTENSIONS};
use crate::logger::LogLevel;
use crate::timestamp::parse_cutoff;
use crate::version::RawVersion;

const APP_DIR: &str = "syn-rel";
const CONFIG_FILE: &str = "config.toml";

/// Root configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynrelConfig {
    pub general: GeneralConfig,
    pub packages: PackageConfig,
    pub updates: UpdatesConfig,
}

/// File locations and logging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub releases_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: LogLevel,
}

/// Package naming.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageConfig {
    /// Extensions stripped from package filenames, e.g. `.nupkg`.
    pub extensions: Vec<String>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_PACKAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Update policy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdatesConfig {
    /// Latest release date eligible for automatic application.
    pub max_release_date: Option<String>,
    /// Versions that must not be skipped silently.
    pub mandatory_versions: Vec<String>,
    /// Date given to releases whose filename carries no stamp.
    pub default_release_date: Option<String>,
}

impl SynrelConfig {
    /// `$XDG_CONFIG_HOME/syn-rel/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load an explicit config file, or the default one when present.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load_from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => Self::load(explicit),
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::load(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            SynrelError::Config(format!("Failed to read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&text)
            .map_err(|err| SynrelError::Config(format!("{}: {err}", path.display())))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SynrelConfig = toml::from_str(text)
            .map_err(|err| SynrelError::Config(format!("Invalid TOML: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.packages.extensions.is_empty() {
            return Err(SynrelError::Config(
                "packages.extensions must list at least one extension".into(),
            ));
        }
        if let Some(bad) = self
            .packages
            .extensions
            .iter()
            .find(|ext| ext.len() < 2 || !ext.starts_with('.'))
        {
            return Err(SynrelError::Config(format!(
                "package extension `{bad}` must start with `.`"
            )));
        }
        self.mandatory_versions()?;
        self.max_release_date()?;
        self.default_release_date()?;
        Ok(())
    }

    pub fn extractor(&self) -> VersionExtractor {
        VersionExtractor::with_extensions(self.packages.extensions.iter().cloned())
    }

    pub fn mandatory_versions(&self) -> Result<Vec<RawVersion>> {
        self.updates
            .mandatory_versions
            .iter()
            .map(|text| {
                RawVersion::parse(text).map_err(|err| {
                    SynrelError::Config(format!("updates.mandatory_versions: {err}"))
                })
            })
            .collect()
    }

    pub fn max_release_date(&self) -> Result<Option<DateTime<Utc>>> {
        self.updates
            .max_release_date
            .as_deref()
            .map(parse_cutoff)
            .transpose()
    }

    /// Date for unstamped releases; the Unix epoch unless configured, so
    /// an unstamped release stays eligible under any cutoff.
    pub fn default_release_date(&self) -> Result<DateTime<Utc>> {
        match self.updates.default_release_date.as_deref() {
            Some(text) => parse_cutoff(text),
            None => Ok(Utc
                .timestamp_opt(0, 0)
                .single()
                .unwrap_or(DateTime::<Utc>::MIN_UTC)),
        }
    }

    pub fn releases_path(&self) -> PathBuf {
        self.general
            .releases_path
            .clone()
            .unwrap_or_else(|| state_dir().join("RELEASES"))
    }

    pub fn report_path(&self) -> PathBuf {
        self.general
            .report_path
            .clone()
            .unwrap_or_else(|| state_dir().join("plan.json"))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.general
            .log_dir
            .clone()
            .unwrap_or_else(|| state_dir().join("logs"))
    }
}

fn state_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
