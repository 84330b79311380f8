use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug, Default)]
/// How the sorted team list is split into match-ups by the Swiss generator.
pub enum PairingMethod {
    /// Top half against top half, matched by adjacent rank (standard power
    /// pairing).
    #[serde(rename = "high_high")]
    #[default]
    HighHigh,
    /// Top half against the reversed bottom half, so the strongest team meets
    /// the weakest team in the paired set.
    #[serde(rename = "high_low")]
    HighLow,
    /// Uniform shuffle, then split into halves.
    #[serde(rename = "random")]
    Random,
}

impl PairingMethod {
    pub const ALL: [PairingMethod; 3] = [
        PairingMethod::HighHigh,
        PairingMethod::HighLow,
        PairingMethod::Random,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PairingMethod::HighHigh => "high_high",
            PairingMethod::HighLow => "high_low",
            PairingMethod::Random => "random",
        }
    }
}

impl fmt::Display for PairingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PairingMethod::HighHigh => "high-high power pairing",
            PairingMethod::HighLow => "high-low power pairing",
            PairingMethod::Random => "random pairing",
        })
    }
}

impl FromStr for PairingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PairingMethod::ALL
            .into_iter()
            .find(|method| method.key() == s)
            .ok_or_else(|| {
                format!(
                    "unknown pairing method `{s}` (expected one of: {})",
                    PairingMethod::ALL.map(|m| m.key()).join(", ")
                )
            })
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug, Default)]
/// Whether a team's speaker score is the sum over its rounds or the mean per
/// round debated.
pub enum SpeaksAggregation {
    #[serde(rename = "total")]
    #[default]
    Total,
    #[serde(rename = "average")]
    Average,
}

impl fmt::Display for SpeaksAggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpeaksAggregation::Total => "total speaker score",
            SpeaksAggregation::Average => "avg total speaker score",
        })
    }
}

impl FromStr for SpeaksAggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total" => Ok(SpeaksAggregation::Total),
            "average" => Ok(SpeaksAggregation::Average),
            _ => Err(format!(
                "unknown speaks aggregation `{s}` (expected `total` or \
                 `average`)"
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StandingsConfig {
    pub speaks: SpeaksAggregation,
    /// When set, only teams of this division (and only matches between two
    /// teams of this division) count towards the standings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SpeakerAwardsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    /// Omit speakers whose team is listed in `breaking_teams`.
    pub exclude_breaking: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breaking_teams: Vec<String>,
    /// Number of highest scores dropped from each speaker before totalling.
    pub drop_high: usize,
    /// Number of lowest scores dropped from each speaker before totalling.
    pub drop_low: usize,
    /// Return only the best `top` speakers. `None` returns everyone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,
}

#[cfg(test)]
#[test]
fn test_pairing_method_names_roundtrip() {
    for method in PairingMethod::ALL {
        let serialized = serde_json::to_string(&method).unwrap();
        assert_eq!(serialized, format!("\"{}\"", method.key()));

        let deserialized: PairingMethod =
            serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, method);
        assert_eq!(method.key().parse::<PairingMethod>().unwrap(), method);
    }

    assert!("swiss".parse::<PairingMethod>().is_err());
}

#[cfg(test)]
#[test]
fn test_speaker_awards_config_defaults() {
    let config: SpeakerAwardsConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.drop_high, 0);
    assert_eq!(config.drop_low, 0);
    assert_eq!(config.top, None);
    assert!(!config.exclude_breaking);

    let config: SpeakerAwardsConfig =
        serde_json::from_str(r#"{"drop_high": 1, "top": 3}"#).unwrap();
    assert_eq!(config.drop_high, 1);
    assert_eq!(config.top, Some(3));
}
