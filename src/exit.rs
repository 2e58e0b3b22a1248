/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::exit
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1
  ------------------------------------------------------------
  Purpose:
    Translate an update plan into the stable process status
    codes consumed by the installer shell.

  Security / Safety Notes:
    Pure mapping; no I/O.

  Dependencies:
    serde for report output.

  Operational Scope:
    Used by the binary entry point and embedded in plan
    reports.

  Revision History:
    2025-11-12 COD  Fixed updater exit status contract.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Stable exit codes for operational tooling
    - Every plan maps to exactly one status
============================================================*/

use std::process::ExitCode;

use serde::Serialize;

use crate::planner::UpdatePlan;
use crate::version::RawVersion;

/// Process status reported to the installer shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitStatus {
    ErrorOccurred,
    NothingToReport,
    NewVersionInstalled,
    NewMandatoryVersionInstalled,
    NoNewVersionAvailable,
    NewVersionAvailableButNewerThanMaximumDate,
}

impl ExitStatus {
    /// Signed status code; `-1` surfaces as byte 255 on exit.
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::ErrorOccurred => -1,
            ExitStatus::NothingToReport => 0,
            ExitStatus::NewVersionInstalled => 1,
            ExitStatus::NewMandatoryVersionInstalled => 2,
            ExitStatus::NoNewVersionAvailable => 3,
            ExitStatus::NewVersionAvailableButNewerThanMaximumDate => 4,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code() as u8)
    }

    /// Pick the status for a plan.
    ///
    /// A plan is mandatory when it crosses one of `mandatory` versions, i.e.
    /// `installed < mandatory <= target`. A bootstrap crosses every mandatory
    /// version up to its target. An install already ahead of the target is
    /// never reported as a new version, since applying the plan would
    /// downgrade it.
    pub fn from_plan(plan: &UpdatePlan, mandatory: &[RawVersion]) -> Self {
        if let Some(installed) = plan
            .installed_version()
            .filter(|installed| *installed > plan.target_version())
        {
            let held_back_newer = plan
                .releases_excluded_by_cutoff()
                .iter()
                .any(|entry| entry.version > *installed);
            return if held_back_newer {
                ExitStatus::NewVersionAvailableButNewerThanMaximumDate
            } else {
                ExitStatus::NoNewVersionAvailable
            };
        }

        if plan.is_update_available() {
            let target = plan.target_version();
            let crosses = mandatory.iter().any(|required| {
                required <= target
                    && plan
                        .installed_version()
                        .map_or(true, |installed| installed < required)
            });
            if crosses {
                ExitStatus::NewMandatoryVersionInstalled
            } else {
                ExitStatus::NewVersionInstalled
            }
        } else if plan.has_newer_releases_after_maximum_date() {
            ExitStatus::NewVersionAvailableButNewerThanMaximumDate
        } else {
            ExitStatus::NoNewVersionAvailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan;
    use crate::release::ReleaseEntry;
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap()
    }

    fn v(text: &str) -> RawVersion {
        RawVersion::parse(text).unwrap()
    }

    fn full(version: &str, date: DateTime<Utc>) -> ReleaseEntry {
        ReleaseEntry::new(
            "00".into(),
            format!("App-{version}-full.nupkg"),
            1_000,
            false,
            v(version),
            date,
        )
    }

    fn catalog() -> Vec<ReleaseEntry> {
        vec![full("1.0.0", day(1)), full("1.5.0", day(5)), full("2.0.0", day(20))]
    }

    #[rstest]
    #[case(ExitStatus::ErrorOccurred, -1)]
    #[case(ExitStatus::NothingToReport, 0)]
    #[case(ExitStatus::NewVersionInstalled, 1)]
    #[case(ExitStatus::NewMandatoryVersionInstalled, 2)]
    #[case(ExitStatus::NoNewVersionAvailable, 3)]
    #[case(ExitStatus::NewVersionAvailableButNewerThanMaximumDate, 4)]
    fn codes_are_stable(#[case] status: ExitStatus, #[case] code: i32) {
        assert_eq!(status.code(), code);
    }

    #[test]
    fn update_available_reports_new_version() {
        let plan = plan(Some(&v("1.0.0")), &catalog(), None).unwrap();
        assert_eq!(ExitStatus::from_plan(&plan, &[]), ExitStatus::NewVersionInstalled);
    }

    #[rstest]
    #[case(Some("1.0.0"), "1.5.0", ExitStatus::NewMandatoryVersionInstalled)]
    #[case(Some("1.0.0"), "2.0.0", ExitStatus::NewMandatoryVersionInstalled)]
    #[case(Some("1.0.0"), "1.0.0", ExitStatus::NewVersionInstalled)]
    #[case(Some("1.0.0"), "3.0.0", ExitStatus::NewVersionInstalled)]
    #[case(None, "1.0.0", ExitStatus::NewMandatoryVersionInstalled)]
    fn mandatory_versions_crossed(
        #[case] installed: Option<&str>,
        #[case] mandatory: &str,
        #[case] expected: ExitStatus,
    ) {
        let installed = installed.map(v);
        let plan = plan(installed.as_ref(), &catalog(), None).unwrap();
        assert_eq!(ExitStatus::from_plan(&plan, &[v(mandatory)]), expected);
    }

    #[test]
    fn current_install_reports_no_new_version() {
        let plan = plan(Some(&v("2.0.0")), &catalog(), None).unwrap();
        assert_eq!(ExitStatus::from_plan(&plan, &[]), ExitStatus::NoNewVersionAvailable);
    }

    #[test]
    fn installed_ahead_of_catalog_is_not_a_new_version() {
        let plan = plan(Some(&v("3.0.0")), &catalog(), None).unwrap();
        assert!(plan.is_update_available());
        assert_eq!(
            ExitStatus::from_plan(&plan, &[v("2.0.0")]),
            ExitStatus::NoNewVersionAvailable
        );
    }

    #[test]
    fn installed_ahead_of_cutoff_target_sees_newer_held_back() {
        let mut releases = catalog();
        releases.push(full("4.0.0", day(25)));
        let plan = plan(Some(&v("3.0.0")), &releases, Some(day(21))).unwrap();
        assert_eq!(
            ExitStatus::from_plan(&plan, &[]),
            ExitStatus::NewVersionAvailableButNewerThanMaximumDate
        );
    }

    #[test]
    fn held_back_release_reports_cutoff_status() {
        let plan = plan(Some(&v("1.5.0")), &catalog(), Some(day(10))).unwrap();
        assert_eq!(
            ExitStatus::from_plan(&plan, &[]),
            ExitStatus::NewVersionAvailableButNewerThanMaximumDate
        );
    }
}
