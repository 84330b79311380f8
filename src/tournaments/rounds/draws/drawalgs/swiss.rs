//! Swiss (power-matched) draws.

use itertools::Itertools;
use rand::Rng;

use crate::tournaments::{
    config::PairingMethod,
    rounds::draws::{
        Draw,
        drawalgs::{DrawInput, allocate, pair_split_halves, random},
    },
    teams::TeamRecord,
};

/// Orders teams for pairing: wins, then speaks, then opponent strength, all
/// descending.
///
/// **Note:** teams which are still tied after all three keys stay in the
/// order they were supplied in. Ties are deliberately not randomised, so the
/// same input always produces the same draw; use [`PairingMethod::Random`] to
/// get a shuffled draw.
pub fn rank_for_pairing(teams: &[TeamRecord]) -> Vec<&TeamRecord> {
    let mut ranked: Vec<&TeamRecord> = teams.iter().collect();
    ranked.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.speaks.cmp(&a.speaks))
            .then_with(|| b.opponent_strength.cmp(&a.opponent_strength))
    });
    ranked
}

/// Draws the next round.
///
/// The ordered teams are split at `floor(n/2)`; upper-half teams are always
/// affirmative. With an odd number of teams the last team in the order gets
/// a bye. `rng` is only consulted by [`PairingMethod::Random`].
///
/// This never fails: fewer than two teams simply produce an empty draw.
#[tracing::instrument(
    skip_all,
    fields(method = method.key(), teams = input.teams.len())
)]
pub fn make_draw<R: Rng + ?Sized>(
    input: &DrawInput,
    method: PairingMethod,
    rng: &mut R,
) -> Draw {
    let ordered = match method {
        PairingMethod::HighHigh | PairingMethod::HighLow => {
            rank_for_pairing(input.teams)
        }
        PairingMethod::Random => random::shuffled(input.teams, rng),
    };
    tracing::trace!(
        "Pairing order: {}",
        ordered.iter().map(|team| &team.id).join(", ")
    );

    let (rooms_of_draw, bye) =
        pair_split_halves(&ordered, method == PairingMethod::HighLow);

    if let Some(team) = bye {
        tracing::trace!("Team {} receives a bye", team.id);
    }

    let draw = Draw {
        proposals: allocate(rooms_of_draw, input.judges, input.rooms),
        bye: bye.map(|team| team.id.clone()),
    };

    tracing::debug!("Generated {} pairings ({method})", draw.proposals.len());

    draw
}
