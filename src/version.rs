/*============================================================
  Synavera Project: Syn-Rel
  Module: synrel_core::version
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Define the RawVersion value and the single total ordering
    used for every version decision in Syn-Rel-Core.

  Security / Safety Notes:
    Pure data and comparison logic; no I/O performed here.

  Dependencies:
    serde for string-form serialization.

  Operational Scope:
    Consumed by the filename extractor, manifest loader and
    update planner for sorting and maximum selection.

  Revision History:
    2025-11-12 COD  Authored dotted release + tag ordering.
  ------------------------------------------------------------
  SSE Principles Observed:
    - One ordering, consistent with equality and hashing
    - Construction fails loudly on malformed release parts
    - Deterministic, locale-free tag comparison
============================================================*/

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SynrelError};

/// Separator introducing a pre-release tag.
pub const TAG_SEPARATOR: char = '-';

const MIN_COMPONENTS: usize = 2;
const MAX_COMPONENTS: usize = 4;

/// Application version as found in package filenames, e.g. `1.7.0-unstable0036`.
///
/// The release part is a dotted integer sequence; the optional tag is
/// everything after the first `-` and is compared as opaque bytes.
#[derive(Debug, Clone)]
pub struct RawVersion {
    original: String,
    release: Vec<u32>,
    tag: Option<String>,
}

impl RawVersion {
    /// Parse a raw version string.
    pub fn parse(input: &str) -> Result<Self> {
        let (release_text, tag) = match input.split_once(TAG_SEPARATOR) {
            Some((release, tag)) => (release, Some(tag)),
            None => (input, None),
        };

        let release = parse_release(input, release_text)?;

        if let Some(tag) = tag {
            if tag.is_empty() {
                return Err(SynrelError::format(input, "empty pre-release tag"));
            }
            if tag.chars().any(char::is_whitespace) {
                return Err(SynrelError::format(
                    input,
                    "pre-release tag contains whitespace",
                ));
            }
        }

        Ok(Self {
            original: input.to_string(),
            release,
            tag: tag.map(str::to_string),
        })
    }

    /// The string this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Dotted integer components of the release part.
    pub fn release(&self) -> &[u32] {
        &self.release
    }

    /// Release part rendered without the tag, e.g. `1.1.0`.
    pub fn release_str(&self) -> &str {
        match self.original.split_once(TAG_SEPARATOR) {
            Some((release, _)) => release,
            None => &self.original,
        }
    }

    pub fn pre_release(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn is_pre_release(&self) -> bool {
        self.tag.is_some()
    }

    /// Release components with trailing zeros removed; `1.0` and `1.0.0` agree.
    fn significant_release(&self) -> &[u32] {
        let len = self
            .release
            .iter()
            .rposition(|component| *component != 0)
            .map_or(0, |idx| idx + 1);
        &self.release[..len]
    }
}

fn parse_release(input: &str, release_text: &str) -> Result<Vec<u32>> {
    if release_text.is_empty() {
        return Err(SynrelError::format(input, "missing release number"));
    }

    let mut components = Vec::new();
    for part in release_text.split('.') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SynrelError::format(
                input,
                format!("release component `{part}` is not a non-negative integer"),
            ));
        }
        let value = part.parse::<u32>().map_err(|err| {
            SynrelError::format(input, format!("release component `{part}`: {err}"))
        })?;
        components.push(value);
    }

    if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&components.len()) {
        return Err(SynrelError::format(
            input,
            format!(
                "expected {MIN_COMPONENTS} to {MAX_COMPONENTS} release components, found {}",
                components.len()
            ),
        ));
    }

    Ok(components)
}

/// Compare two versions: release numbers first, then stable above tagged,
/// then tags by ordinal byte order.
///
/// Tag comparison is lexical, so `1.0.0-beta9` sorts above `1.0.0-beta10`.
pub fn compare(a: &RawVersion, b: &RawVersion) -> Ordering {
    let width = a.release.len().max(b.release.len());
    for idx in 0..width {
        let left = a.release.get(idx).copied().unwrap_or(0);
        let right = b.release.get(idx).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    match (&a.tag, &b.tag) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => left.as_bytes().cmp(right.as_bytes()),
    }
}

impl Ord for RawVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl PartialOrd for RawVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RawVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RawVersion {}

impl Hash for RawVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_release().hash(state);
        self.tag.hash(state);
    }
}

impl FromStr for RawVersion {
    type Err = SynrelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RawVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Serialize for RawVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for RawVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        RawVersion::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    fn v(text: &str) -> RawVersion {
        RawVersion::parse(text).unwrap()
    }

    #[rstest]
    #[case("1.1.0-unstable0036", "1.1.0", Some("unstable0036"))]
    #[case("1.1.0-beta", "1.1.0", Some("beta"))]
    #[case("1.1.0", "1.1.0", None)]
    #[case("2.0.0-rc-1", "2.0.0", Some("rc-1"))]
    fn splits_release_and_tag(
        #[case] input: &str,
        #[case] release: &str,
        #[case] tag: Option<&str>,
    ) {
        let version = v(input);
        assert_eq!(version.release_str(), release);
        assert_eq!(version.pre_release(), tag);
        assert_eq!(version.as_str(), input);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1")]
    #[case("1.2.3.4.5")]
    #[case("1..0")]
    #[case("1.x.0")]
    #[case("-1.0")]
    #[case("1.0.0-")]
    #[case("1.0.0-be ta")]
    #[case("1.+2.0")]
    #[case("99999999999.0")]
    fn rejects_malformed_versions(#[case] input: &str) {
        let err = RawVersion::parse(input).unwrap_err();
        assert!(err.is_format(), "{input} gave {err}");
    }

    #[rstest]
    #[case("1.1.0", "1.1.0", Ordering::Equal)]
    #[case("1.2.0", "1.1.0", Ordering::Greater)]
    #[case("1.1.0", "1.2.0", Ordering::Less)]
    #[case("1.2.0-beta", "1.1.0", Ordering::Greater)]
    #[case("1.1.0", "1.2.0-beta", Ordering::Less)]
    #[case("1.1.0", "1.1.0-beta", Ordering::Greater)]
    #[case("1.1.0-beta", "1.1.0", Ordering::Less)]
    #[case("1.0.0-unstable0016", "1.0.0", Ordering::Less)]
    #[case("1.0.0-unstable0016", "1.0.0-beta0001", Ordering::Greater)]
    #[case("1.0.0-beta0016", "1.0.0-unstable0001", Ordering::Less)]
    #[case("2.0.0", "1.9.9", Ordering::Greater)]
    #[case("1.10.0", "1.9.0", Ordering::Greater)]
    #[case("1.0", "1.0.0", Ordering::Equal)]
    #[case("1.0.0.1", "1.0.0", Ordering::Greater)]
    #[case("1.0.0-beta9", "1.0.0-beta10", Ordering::Greater)]
    #[case("1.0.0-Beta", "1.0.0-beta", Ordering::Less)]
    fn orders_versions(#[case] left: &str, #[case] right: &str, #[case] expected: Ordering) {
        assert_eq!(compare(&v(left), &v(right)), expected);
        assert_eq!(compare(&v(right), &v(left)), expected.reverse());
    }

    #[test]
    fn ordering_is_transitive_and_total() {
        let samples: Vec<RawVersion> = [
            "1.0", "1.0.0", "1.0.0-beta", "1.0.0-beta10", "1.0.0-beta9", "1.0.1", "1.10.0",
            "1.9.0", "2.0.0-rc1", "2.0.0", "2.0.0.0",
        ]
        .iter()
        .map(|text| v(text))
        .collect();

        for a in &samples {
            for b in &samples {
                let forward = a.cmp(b);
                assert_eq!(forward, b.cmp(a).reverse(), "{a} vs {b}");
                assert_eq!(forward == Ordering::Equal, a == b);
                for c in &samples {
                    if a < b && b < c {
                        assert!(a < c, "{a} < {b} < {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn stable_outranks_any_tag() {
        for tag in ["alpha", "beta", "rc1", "zzz", "0"] {
            let tagged = v(&format!("3.1.4-{tag}"));
            assert!(v("3.1.4") > tagged);
        }
    }

    #[test]
    fn equal_versions_hash_alike() {
        let mut set = HashSet::new();
        set.insert(v("1.0"));
        assert!(set.contains(&v("1.0.0")));
        assert!(!set.contains(&v("1.0.0-beta")));
    }

    #[test]
    fn max_and_min_follow_ordering() {
        let versions: Vec<RawVersion> = [
            "1.0.0",
            "1.0.0-beta002",
            "1.0.0-unstable002",
            "2.0.0",
            "2.0.0-beta005",
            "2.0.0-unstable0025",
        ]
        .iter()
        .map(|text| v(text))
        .collect();

        assert_eq!(versions.iter().max().unwrap().as_str(), "2.0.0");
        assert_eq!(versions.iter().min().unwrap().as_str(), "1.0.0-beta002");
    }

    #[test]
    fn serializes_as_original_string() {
        let version = v("1.7.0-unstable0036");
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"1.7.0-unstable0036\"");
        let back: RawVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, version);
        assert!(serde_json::from_str::<RawVersion>("\"nope\"").is_err());
    }
}
