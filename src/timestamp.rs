/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::timestamp
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1
  ------------------------------------------------------------
  Purpose:
    Parse compact `yyyyMMddHHmmss` release stamps embedded in
    package filenames and cutoff dates supplied by operators.

  Security / Safety Notes:
    Pure text parsing; all stamps are interpreted as UTC.

  Dependencies:
    chrono for calendar validation.

  Operational Scope:
    Feeds release dates into catalog records and the planner
    cutoff.

  Revision History:
    2025-11-12 COD  Added release stamp parsing.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Invalid stamps fall back to caller defaults explicitly
    - No locale or local-time interpretation
============================================================*/

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::{Result, SynrelError};

/// Width of a compact release stamp.
pub const RELEASE_STAMP_LEN: usize = 14;

/// Parse a strict `yyyyMMddHHmmss` stamp.
pub fn parse_release_stamp(text: &str) -> Option<DateTime<Utc>> {
    if text.len() != RELEASE_STAMP_LEN || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let field = |range: std::ops::Range<usize>| text[range].parse::<u32>().ok();

    let year = i32::try_from(field(0..4)?).ok()?;
    let naive = NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?)?.and_hms_opt(
        field(8..10)?,
        field(10..12)?,
        field(12..14)?,
    )?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Release date taken from the first 14-digit run in a filename that forms a valid stamp.
pub fn release_date_from_filename(filename: &str, default: DateTime<Utc>) -> DateTime<Utc> {
    filename
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| run.len() == RELEASE_STAMP_LEN)
        .find_map(parse_release_stamp)
        .unwrap_or(default)
}

/// Parse an operator-supplied cutoff: a compact stamp or RFC 3339.
pub fn parse_cutoff(text: &str) -> Result<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Some(stamp) = parse_release_stamp(trimmed) {
        return Ok(stamp);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| {
            SynrelError::Config(format!(
                "Invalid maximum release date `{trimmed}` (expected yyyyMMddHHmmss or RFC 3339): {err}"
            ))
        })
}
