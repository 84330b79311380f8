use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::tournaments::standings::compute::{
    history::TeamHistory, metrics::Metric,
};

/// The sum of each team's speaker points over every round it debated.
pub struct TotalTeamSpeakerScoreComputer;

impl Metric<Decimal> for TotalTeamSpeakerScoreComputer {
    fn compute(&self, history: &TeamHistory) -> IndexMap<String, Decimal> {
        history
            .rows_of_team
            .iter()
            .map(|(team, rows)| {
                let total: Decimal = rows.iter().map(|row| row.speaks).sum();
                (team.to_string(), total)
            })
            .collect()
    }
}
