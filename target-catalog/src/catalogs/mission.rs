//! Discovery mission tagging
//!
//! Each target is tagged with the survey or observatory that discovered it,
//! based on a case-insensitive keyword match against the archive's
//! `disc_facility` string. Keywords are applied in a fixed priority order and
//! a later match overwrites an earlier one, so a facility naming both
//! "Kepler" and "K2" ends up tagged K2.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discovery mission tag attached to every target record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionSource {
    Kepler,
    K2,
    #[serde(rename = "TESS")]
    Tess,
    CoRoT,
    #[serde(rename = "WASP")]
    Wasp,
    #[serde(rename = "HAT")]
    Hat,
    #[serde(rename = "KELT")]
    Kelt,
    #[serde(rename = "TRAPPIST")]
    Trappist,
    #[serde(rename = "NGTS")]
    Ngts,
    #[default]
    Other,
}

/// Keyword rules in application order. Later entries win.
pub const MISSION_KEYWORDS: [(&str, MissionSource); 9] = [
    ("kepler", MissionSource::Kepler),
    ("k2", MissionSource::K2),
    ("tess", MissionSource::Tess),
    ("corot", MissionSource::CoRoT),
    ("wasp", MissionSource::Wasp),
    ("hat", MissionSource::Hat),
    ("kelt", MissionSource::Kelt),
    ("trappist", MissionSource::Trappist),
    ("ngts", MissionSource::Ngts),
];

impl MissionSource {
    /// All tags in priority order, `Other` last
    pub const ALL: [MissionSource; 10] = [
        MissionSource::Kepler,
        MissionSource::K2,
        MissionSource::Tess,
        MissionSource::CoRoT,
        MissionSource::Wasp,
        MissionSource::Hat,
        MissionSource::Kelt,
        MissionSource::Trappist,
        MissionSource::Ngts,
        MissionSource::Other,
    ];

    /// Label written to the `mission_source` column
    pub fn label(&self) -> &'static str {
        match self {
            MissionSource::Kepler => "Kepler",
            MissionSource::K2 => "K2",
            MissionSource::Tess => "TESS",
            MissionSource::CoRoT => "CoRoT",
            MissionSource::Wasp => "WASP",
            MissionSource::Hat => "HAT",
            MissionSource::Kelt => "KELT",
            MissionSource::Trappist => "TRAPPIST",
            MissionSource::Ngts => "NGTS",
            MissionSource::Other => "Other",
        }
    }

    /// Classify a discovery facility string.
    ///
    /// Starts from `Other` and walks [`MISSION_KEYWORDS`] in order,
    /// overwriting the tag on every case-insensitive substring hit.
    ///
    /// # Example
    /// ```
    /// use target_catalog::catalogs::MissionSource;
    ///
    /// assert_eq!(MissionSource::classify("WASP-South"), MissionSource::Wasp);
    /// assert_eq!(MissionSource::classify("K2 (Kepler)"), MissionSource::K2);
    /// assert_eq!(MissionSource::classify(""), MissionSource::Other);
    /// ```
    pub fn classify(facility: &str) -> Self {
        let facility = facility.to_lowercase();
        MISSION_KEYWORDS
            .iter()
            .fold(MissionSource::Other, |tag, (keyword, mission)| {
                if facility.contains(keyword) {
                    *mission
                } else {
                    tag
                }
            })
    }

    /// Position in the priority order, used to break ties in reports
    pub fn priority(&self) -> usize {
        Self::ALL
            .iter()
            .position(|m| m == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for MissionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MissionSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|m| m.label() == s.trim())
            .copied()
            .ok_or_else(|| format!("Unknown mission source: {s}"))
    }
}
