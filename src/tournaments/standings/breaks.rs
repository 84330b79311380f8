//! Selecting the teams which advance to elimination rounds.

use crate::tournaments::{
    standings::compute::TeamStandings, teams::SeededTeam,
};

/// The ids of the top `size` teams. If fewer teams have a standing, all of
/// them break.
pub fn breaking_teams(standings: &TeamStandings, size: usize) -> Vec<String> {
    standings
        .ranked
        .iter()
        .take(size)
        .map(|standing| standing.team_id.clone())
        .collect()
}

/// Seeds the top `size` teams for the first elimination round. A team's seed
/// is its rank.
pub fn seed_break(standings: &TeamStandings, size: usize) -> Vec<SeededTeam> {
    standings
        .ranked
        .iter()
        .take(size)
        .map(|standing| SeededTeam {
            team_id: standing.team_id.clone(),
            seed: standing.rank as u32,
        })
        .collect()
}
