//! Single-elimination brackets.
//!
//! Only the first round of a bracket is generated here. Later rounds are
//! drawn by calling [`make_draw`] again with the winners and their seeds.

use crate::tournaments::{
    participants::{JudgeProfile, Room},
    rounds::draws::{Draw, drawalgs::allocate},
    teams::SeededTeam,
};

/// Pairs the best seed with the worst, the second best with the second
/// worst, and so on. The lower (stronger) seed is affirmative. With an odd
/// number of teams the middle seed gets a bye.
///
/// Seeds are sorted stably, so teams sharing a seed keep their input order.
/// Duplicate seeds are not rejected.
#[tracing::instrument(skip_all, fields(teams = teams.len()))]
pub fn make_draw(
    teams: &[SeededTeam],
    judges: &[JudgeProfile],
    rooms: &[Room],
) -> Draw {
    let mut seeded: Vec<&SeededTeam> = teams.iter().collect();
    seeded.sort_by_key(|team| team.seed);

    let n = seeded.len();
    let rooms_of_draw = (0..n / 2)
        .map(|i| (seeded[i].team_id.clone(), seeded[n - 1 - i].team_id.clone()))
        .collect();

    let bye = (n % 2 == 1).then(|| seeded[n / 2].team_id.clone());

    let draw = Draw {
        proposals: allocate(rooms_of_draw, judges, rooms),
        bye,
    };

    tracing::debug!("Generated {} elimination pairings", draw.proposals.len());

    draw
}
