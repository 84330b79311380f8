use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::tournaments::standings::compute::history::TeamHistory;

/// Converts total speaker scores into averages per round debated. A team that
/// has not debated any (counted) round averages zero.
pub fn atss(
    tss: IndexMap<String, Decimal>,
    history: &TeamHistory,
) -> IndexMap<String, Decimal> {
    tss.into_iter()
        .map(|(team, total)| {
            let n_rounds_debated = history
                .rows_of_team
                .get(team.as_str())
                .map(Vec::len)
                .unwrap_or(0);

            let average = if n_rounds_debated == 0 {
                Decimal::ZERO
            } else {
                total / Decimal::from(n_rounds_debated)
            };
            (team, average)
        })
        .collect()
}
