//! JSON export, wrapped in an envelope recording when and how the table was
//! produced:
//!
//! ```json
//! {
//!   "generatedAt": "2025-03-01T12:00:00Z",
//!   "filters": { "division": "novice", "drop_high": 1, ... },
//!   "counts": { "entries": 10, "individuals": 42 },
//!   "entries": [ ... ]
//! }
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::tournaments::{
    config::{SpeakerAwardsConfig, StandingsConfig},
    standings::{
        compute::TeamStandings, export::ExportError, speakers::SpeakerStandings,
    },
};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<'t, F, E> {
    pub generated_at: DateTime<Utc>,
    pub filters: &'t F,
    pub counts: Counts,
    pub entries: Vec<E>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Counts {
    pub entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individuals: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<usize>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerEntry<'s> {
    pub id: &'s str,
    pub name: &'s str,
    pub team_id: &'s str,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub adjusted_total: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub raw_total: Decimal,
    pub rank: usize,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry<'s> {
    pub id: &'s str,
    pub wins: i64,
    pub losses: i64,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub speaks: Decimal,
    pub opponent_strength: i64,
    pub rank: usize,
}

/// Tables which can be exported as a JSON envelope. The timestamp is passed
/// in so that output is reproducible.
pub trait JsonExport {
    fn to_json(
        &self,
        generated_at: DateTime<Utc>,
    ) -> Result<String, ExportError>;
}

impl SpeakerStandings {
    pub fn envelope(
        &self,
        generated_at: DateTime<Utc>,
    ) -> Envelope<'_, SpeakerAwardsConfig, SpeakerEntry<'_>> {
        Envelope {
            generated_at,
            filters: &self.config,
            counts: Counts {
                entries: self.ranked.len(),
                individuals: Some(self.individuals_considered),
                teams: None,
            },
            entries: self
                .ranked
                .iter()
                .map(|standing| SpeakerEntry {
                    id: &standing.speaker_id,
                    name: standing.display_name(),
                    team_id: &standing.team_id,
                    adjusted_total: standing.adjusted_total,
                    raw_total: standing.raw_total,
                    rank: standing.rank,
                })
                .collect(),
        }
    }
}

impl JsonExport for SpeakerStandings {
    fn to_json(
        &self,
        generated_at: DateTime<Utc>,
    ) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.envelope(generated_at))?)
    }
}

impl TeamStandings {
    pub fn envelope(
        &self,
        generated_at: DateTime<Utc>,
    ) -> Envelope<'_, StandingsConfig, TeamEntry<'_>> {
        Envelope {
            generated_at,
            filters: &self.config,
            counts: Counts {
                entries: self.ranked.len(),
                individuals: None,
                teams: Some(self.ranked.len()),
            },
            entries: self
                .ranked
                .iter()
                .map(|standing| TeamEntry {
                    id: &standing.team_id,
                    wins: standing.wins,
                    losses: standing.losses,
                    speaks: standing.speaks,
                    opponent_strength: standing.opponent_strength,
                    rank: standing.rank,
                })
                .collect(),
        }
    }
}

impl JsonExport for TeamStandings {
    fn to_json(
        &self,
        generated_at: DateTime<Utc>,
    ) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.envelope(generated_at))?)
    }
}
