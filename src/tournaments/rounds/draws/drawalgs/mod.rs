//! Draw generators.
//!
//! Each generator reduces its input to an ordered list of
//! `(affirmative, negative)` team ids; [`allocate`] then hands out judges and
//! rooms by index.

use crate::tournaments::{
    participants::{JudgeProfile, Room},
    rounds::draws::PairingProposal,
    teams::TeamRecord,
};

pub mod elim;
pub mod random;
pub mod swiss;

/// The `(affirmative, negative)` team ids of one debate.
pub type TeamsOfRoom = (String, String);

pub struct DrawInput<'a> {
    pub teams: &'a [TeamRecord],
    /// Judges, in the order they should be handed out.
    pub judges: &'a [JudgeProfile],
    /// Rooms, in the order they should be handed out.
    pub rooms: &'a [Room],
}

impl<'a> DrawInput<'a> {
    pub fn new(teams: &'a [TeamRecord]) -> Self {
        Self {
            teams,
            judges: &[],
            rooms: &[],
        }
    }

    pub fn judges(mut self, judges: &'a [JudgeProfile]) -> Self {
        self.judges = judges;
        self
    }

    pub fn rooms(mut self, rooms: &'a [Room]) -> Self {
        self.rooms = rooms;
        self
    }
}

/// Splits `ordered` at `floor(n/2)` and pairs the halves index by index. The
/// upper half provides the affirmative teams. With an odd number of teams
/// the last one is left over and returned as the bye.
///
/// When `reverse_lower` is set the lower half is reversed first, so the top
/// team meets the weakest team that is being paired.
pub(crate) fn pair_split_halves<'t>(
    ordered: &[&'t TeamRecord],
    reverse_lower: bool,
) -> (Vec<TeamsOfRoom>, Option<&'t TeamRecord>) {
    let half = ordered.len() / 2;

    let upper = &ordered[..half];
    let mut lower = ordered[half..2 * half].to_vec();
    if reverse_lower {
        lower.reverse();
    }

    let rooms_of_draw = upper
        .iter()
        .zip(lower)
        .map(|(aff, neg)| (aff.id.clone(), neg.id.clone()))
        .collect();

    (rooms_of_draw, ordered.get(2 * half).copied())
}

/// Turns paired teams into proposals. The debate at index `i` receives the
/// judge and room at index `i`, or none if the lists are too short.
pub fn allocate(
    rooms_of_draw: Vec<TeamsOfRoom>,
    judges: &[JudgeProfile],
    rooms: &[Room],
) -> Vec<PairingProposal> {
    if judges.len() < rooms_of_draw.len() {
        tracing::trace!(
            "{} debates will be left without a judge",
            rooms_of_draw.len() - judges.len()
        );
    }

    rooms_of_draw
        .into_iter()
        .enumerate()
        .map(|(i, (aff_team_id, neg_team_id))| PairingProposal {
            aff_team_id,
            neg_team_id,
            judge_id: judges.get(i).map(|judge| judge.id.clone()),
            room: rooms.get(i).map(|room| room.label.clone()),
        })
        .collect()
}
