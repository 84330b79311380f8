//! Result rows, as they enter the core.
//!
//! Results arrive from outside (the application's database, an export from
//! another tab program, a hand-written file) as tagged [`ResultRecord`]s or
//! as CSV tables. Every record is checked here, once, so that the standings
//! code can trust what it is given.

use std::io::Read;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// The error messages will be shown to tournament administrators, and
/// therefore should be readable.
#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

impl From<serde_json::Error> for ImportError {
    fn from(e: serde_json::Error) -> Self {
        ImportError::InvalidFormat(e.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(e: csv::Error) -> Self {
        ImportError::InvalidFormat(e.to_string())
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// Team points awarded for this outcome.
    pub fn points(&self) -> i64 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss => 0,
        }
    }
}

/// One team's result in one round.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TeamResult {
    pub round: u32,
    pub team_id: String,
    /// `None` for a bye or a round without a recorded opponent.
    #[serde(default)]
    pub opponent_id: Option<String>,
    pub outcome: Outcome,
    /// The team's speaker points for this round.
    #[serde(default, deserialize_with = "zero_if_missing")]
    pub speaks: Decimal,
    #[serde(default)]
    pub division: Option<String>,
}

/// Empty CSV cells and JSON `null`s both count as zero speaks.
fn zero_if_missing<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Decimal, D::Error> {
    Ok(Option::<Decimal>::deserialize(d)?.unwrap_or_default())
}

impl TeamResult {
    fn validate(&self) -> Result<(), String> {
        if self.team_id.trim().is_empty() {
            return Err("team id is empty".to_string());
        }

        match &self.opponent_id {
            Some(opponent) if opponent.trim().is_empty() => {
                Err("opponent id is empty".to_string())
            }
            Some(opponent) if *opponent == self.team_id => Err(format!(
                "team `{}` is listed as its own opponent in round {}",
                self.team_id, self.round
            )),
            _ => Ok(()),
        }
    }
}

/// One individual's score in one round. `points` is `None` when no scored
/// ballot was submitted for them; such entries are skipped by the speaker
/// tab rather than counted as zero.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SpeakerScore {
    pub speaker_id: String,
    #[serde(default)]
    pub name: String,
    pub team_id: String,
    pub round: u32,
    #[serde(default)]
    pub points: Option<Decimal>,
    #[serde(default)]
    pub division: Option<String>,
}

impl SpeakerScore {
    fn validate(&self) -> Result<(), String> {
        if self.speaker_id.trim().is_empty() {
            return Err("speaker id is empty".to_string());
        }
        if self.team_id.trim().is_empty() {
            return Err(format!(
                "speaker `{}` has no team id",
                self.speaker_id
            ));
        }
        Ok(())
    }
}

/// A single row of round results, tagged with its kind:
///
/// ```json
/// {"kind": "team_result", "round": 1, "team_id": "t1", "opponent_id": "t2",
///  "outcome": "win", "speaks": 151.5}
/// {"kind": "speaker_score", "speaker_id": "s1", "name": "Ada",
///  "team_id": "t1", "round": 1, "points": 76}
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultRecord {
    TeamResult(TeamResult),
    SpeakerScore(SpeakerScore),
}

/// All validated results for a tournament (or whatever scope the caller
/// fetched), in the order they were supplied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub team_results: Vec<TeamResult>,
    pub speaker_scores: Vec<SpeakerScore>,
}

impl ResultSet {
    pub fn from_records(
        records: Vec<ResultRecord>,
    ) -> Result<Self, ImportError> {
        let mut set = ResultSet::default();

        for (index, record) in records.into_iter().enumerate() {
            let checked = match &record {
                ResultRecord::TeamResult(result) => result.validate(),
                ResultRecord::SpeakerScore(score) => score.validate(),
            };
            checked.map_err(|reason| ImportError::InvalidRecord {
                index,
                reason,
            })?;

            match record {
                ResultRecord::TeamResult(result) => {
                    set.team_results.push(result)
                }
                ResultRecord::SpeakerScore(score) => {
                    set.speaker_scores.push(score)
                }
            }
        }

        tracing::debug!(
            "Imported {} team results and {} speaker scores",
            set.team_results.len(),
            set.speaker_scores.len()
        );

        Ok(set)
    }

    /// Parses a JSON array of [`ResultRecord`]s.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let records: Vec<ResultRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, ImportError> {
        let records: Vec<ResultRecord> = serde_json::from_reader(reader)?;
        Self::from_records(records)
    }
}

/// Reads team results from a CSV table with the headers `round`, `team_id`,
/// `opponent_id`, `outcome`, `speaks` and `division` (the last three may be
/// left empty).
pub fn team_results_from_csv(
    reader: impl Read,
) -> Result<Vec<TeamResult>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut results = Vec::new();
    for (index, row) in reader.deserialize::<TeamResult>().enumerate() {
        let row = row?;
        row.validate()
            .map_err(|reason| ImportError::InvalidRecord { index, reason })?;
        results.push(row);
    }

    Ok(results)
}

/// Reads speaker scores from a CSV table with the headers `speaker_id`,
/// `name`, `team_id`, `round`, `points` and `division`. An empty `points`
/// cell means that no scored ballot was submitted.
pub fn speaker_scores_from_csv(
    reader: impl Read,
) -> Result<Vec<SpeakerScore>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut scores = Vec::new();
    for (index, row) in reader.deserialize::<SpeakerScore>().enumerate() {
        let row = row?;
        row.validate()
            .map_err(|reason| ImportError::InvalidRecord { index, reason })?;
        scores.push(row);
    }

    Ok(scores)
}
