use indexmap::IndexMap;

use crate::tournaments::standings::compute::{
    history::TeamHistory, metrics::Metric,
};

/// Draw strength by wins: the sum of the win counts of every opponent a team
/// has faced (counted once per meeting).
///
/// **Note:** the win counts are the opponents' totals over the whole history
/// passed in, not their totals at the time of the meeting. Opponents without
/// a record in the history count as zero.
pub struct DsWinsComputer<'w>(pub &'w IndexMap<String, i64>);

impl Metric<i64> for DsWinsComputer<'_> {
    fn compute(&self, history: &TeamHistory) -> IndexMap<String, i64> {
        history
            .teams()
            .map(|team| {
                let ds: i64 = history
                    .opponents_of(team)
                    .map(|opponent| self.0.get(opponent).copied().unwrap_or(0))
                    .sum();
                (team.to_string(), ds)
            })
            .collect()
    }
}
