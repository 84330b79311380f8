use indexmap::IndexMap;

use crate::tournaments::{
    rounds::results::Outcome,
    standings::compute::{history::TeamHistory, metrics::Metric},
};

/// The number of times each team achieved the given outcome. Standings use
/// this to count losses.
pub struct NTimesSpecificResultComputer(pub Outcome);

impl Metric<i64> for NTimesSpecificResultComputer {
    fn compute(&self, history: &TeamHistory) -> IndexMap<String, i64> {
        history
            .rows_of_team
            .iter()
            .map(|(team, rows)| {
                let count =
                    rows.iter().filter(|row| row.outcome == self.0).count();
                (team.to_string(), count as i64)
            })
            .collect()
    }
}
