use indexmap::IndexMap;

use crate::tournaments::standings::compute::{
    history::TeamHistory, metrics::Metric,
};

/// The number of team points (i.e. wins) of each team.
pub struct TeamPointsComputer;

impl Metric<i64> for TeamPointsComputer {
    fn compute(&self, history: &TeamHistory) -> IndexMap<String, i64> {
        history
            .rows_of_team
            .iter()
            .map(|(team, rows)| {
                let points: i64 =
                    rows.iter().map(|row| row.outcome.points()).sum();
                (team.to_string(), points)
            })
            .collect()
    }
}
