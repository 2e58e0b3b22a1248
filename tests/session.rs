use std::path::{Path, PathBuf};

use tempfile::TempDir;

use synrel_core::session::{run_session, RunOptions};
use synrel_core::{ExitStatus, SynrelError};

const HASH: &str = "94689fede03fed7ab59c24337673a27837f0c3ec";

/// Workspace with an explicit config, manifest, report and log path.
fn workspace(config: &str, releases: &[&str]) -> (TempDir, RunOptions) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, config).unwrap();

    let body: String = releases
        .iter()
        .map(|name| format!("{HASH} {name} 1000\n"))
        .collect();
    let releases_path = temp_dir.path().join("RELEASES");
    std::fs::write(&releases_path, body).unwrap();

    let options = RunOptions {
        config: Some(config_path),
        releases: Some(releases_path),
        report: Some(temp_dir.path().join("out").join("plan.json")),
        log: Some(temp_dir.path().join("logs").join("core.log")),
        ..RunOptions::default()
    };
    (temp_dir, options)
}

fn log_text(options: &RunOptions) -> String {
    std::fs::read_to_string(options.log.as_ref().unwrap()).unwrap()
}

fn hash_path(log: &Path) -> PathBuf {
    let mut os = log.as_os_str().to_os_string();
    os.push(".hash");
    PathBuf::from(os)
}

fn report_json(options: &RunOptions) -> serde_json::Value {
    let text = std::fs::read_to_string(options.report.as_ref().unwrap()).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn empty_manifest_has_nothing_to_report() {
    let (_dir, options) = workspace("", &[]);
    let status = run_session(&options).unwrap();

    assert_eq!(status, ExitStatus::NothingToReport);
    assert!(!options.report.as_ref().unwrap().exists());
    assert!(log_text(&options).contains("[WARN] [EMPTY]"));
    assert!(hash_path(options.log.as_ref().unwrap()).exists());
}

#[test]
fn run_writes_report_and_hashed_log() {
    let (_dir, mut options) = workspace(
        "",
        &["App-1.0.0-full.nupkg", "App-1.1.0-delta.nupkg", "App-1.1.0-full.nupkg"],
    );
    options.installed = Some("1.0.0".into());

    let status = run_session(&options).unwrap();
    assert_eq!(status, ExitStatus::NewVersionInstalled);

    let report = report_json(&options);
    assert_eq!(report["plan"]["target_version"], "1.1.0");
    assert_eq!(report["metadata"]["status"], "NEW_VERSION_INSTALLED");

    let log = log_text(&options);
    assert!(log.contains("[INFO] [REPORT]"));
    assert!(log.contains("[INFO] [COMPLETE]"));
    let digest = std::fs::read_to_string(hash_path(options.log.as_ref().unwrap())).unwrap();
    assert!(digest.ends_with("  core.log\n"));
}

#[test]
fn dry_run_leaves_no_report() {
    let (_dir, mut options) = workspace("", &["App-1.0.0-full.nupkg", "App-2.0.0-full.nupkg"]);
    options.installed_package = Some("App-1.0.0-full.nupkg".into());
    options.dry_run = true;

    let status = run_session(&options).unwrap();
    assert_eq!(status, ExitStatus::NewVersionInstalled);
    assert!(!options.report.as_ref().unwrap().exists());
}

#[test]
fn unstamped_releases_stay_eligible_under_past_cutoff() {
    let (_dir, mut options) = workspace(
        "",
        &[
            "App-1.0.0-full.nupkg",
            "App-2.0.0-full.nupkg",
            "App-3.0.0-ci20240601000000-full.nupkg",
        ],
    );
    options.installed = Some("1.0.0".into());
    options.max_release_date = Some("20200101000000".into());

    let status = run_session(&options).unwrap();
    assert_eq!(status, ExitStatus::NewVersionInstalled);
    let report = report_json(&options);
    assert_eq!(report["plan"]["target_version"], "2.0.0");
    assert_eq!(report["metadata"]["releases_excluded"], 1);

    options.installed = Some("2.0.0".into());
    assert_eq!(
        run_session(&options).unwrap(),
        ExitStatus::NewVersionAvailableButNewerThanMaximumDate
    );
}

#[test]
fn configured_default_release_date_applies_to_unstamped_releases() {
    let (_dir, mut options) = workspace(
        "[updates]\ndefault_release_date = \"20250101000000\"\n",
        &["App-1.0.0-full.nupkg", "App-2.0.0-full.nupkg"],
    );
    options.max_release_date = Some("20200101000000".into());

    let err = run_session(&options).unwrap_err();
    assert!(matches!(err, SynrelError::NoFullRelease));
}

#[test]
fn config_cutoff_applies_without_flag() {
    let (_dir, mut options) = workspace(
        "[updates]\nmax_release_date = \"20240401000000\"\n",
        &[
            "App-1.0.0-ci20240101000000-full.nupkg",
            "App-1.1.0-ci20240301000000-full.nupkg",
            "App-1.2.0-ci20240601000000-full.nupkg",
        ],
    );
    options.installed = Some("1.1.0".into());
    assert_eq!(
        run_session(&options).unwrap(),
        ExitStatus::NewVersionAvailableButNewerThanMaximumDate
    );

    options.max_release_date = Some("20240701000000".into());
    assert_eq!(run_session(&options).unwrap(), ExitStatus::NewVersionInstalled);
}

#[test]
fn failure_after_log_opens_is_logged_and_hashed() {
    let (dir, mut options) = workspace("", &["App-1.0.0-full.nupkg"]);
    options.releases = Some(dir.path().join("missing").join("RELEASES"));

    let err = run_session(&options).unwrap_err();
    assert!(matches!(err, SynrelError::Filesystem(_)));
    assert!(log_text(&options).contains("[ERROR] [FAILURE]"));
    assert!(hash_path(options.log.as_ref().unwrap()).exists());
}

#[test]
fn invalid_installed_version_is_logged() {
    let (_dir, mut options) = workspace("", &["App-1.0.0-full.nupkg"]);
    options.installed = Some("not-a-version".into());

    let err = run_session(&options).unwrap_err();
    assert!(err.is_format());
    assert!(log_text(&options).contains("[ERROR] [FAILURE] Format"));
}

#[test]
fn missing_config_fails_before_log_opens() {
    let (dir, mut options) = workspace("", &["App-1.0.0-full.nupkg"]);
    options.config = Some(dir.path().join("absent.toml"));

    let err = run_session(&options).unwrap_err();
    assert!(matches!(err, SynrelError::Config(_)));
    assert!(!options.log.as_ref().unwrap().exists());
}

#[test]
fn installed_ahead_warns_and_reports_no_new_version() {
    let (_dir, mut options) = workspace("", &["App-1.0.0-full.nupkg", "App-2.0.0-full.nupkg"]);
    options.installed = Some("3.0.0".into());

    let status = run_session(&options).unwrap();
    assert_eq!(status, ExitStatus::NoNewVersionAvailable);
    assert!(log_text(&options).contains("[WARN] [AHEAD] Installed 3.0.0"));
}
