use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A team's record going into the next round.
///
/// Records are snapshots: they are rebuilt from the full result history every
/// time they are needed (see
/// [`crate::tournaments::standings::compute::TeamStandings::team_records`])
/// and never updated in place. Values are not validated, so negative wins and
/// the like pass straight through to the pairing arithmetic.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TeamRecord {
    pub id: String,
    #[serde(default)]
    pub wins: i64,
    #[serde(default)]
    pub losses: i64,
    /// Total or average speaker score, depending on how the record was
    /// produced.
    #[serde(default)]
    pub speaks: Decimal,
    /// Sum of the win counts of every team this team has faced.
    #[serde(default)]
    pub opponent_strength: i64,
}

impl TeamRecord {
    /// A team with no rounds behind it.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            wins: 0,
            losses: 0,
            speaks: Decimal::ZERO,
            opponent_strength: 0,
        }
    }

    pub fn rounds_completed(&self) -> i64 {
        self.wins + self.losses
    }
}

/// An entry in an elimination bracket. Lower seeds are stronger.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SeededTeam {
    pub team_id: String,
    pub seed: u32,
}
