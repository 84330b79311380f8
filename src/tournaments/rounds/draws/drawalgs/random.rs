//! Creates a random draw.

use rand::{Rng, seq::SliceRandom};

use crate::tournaments::teams::TeamRecord;

/// Returns the teams in a uniformly random order drawn from `rng`. Team
/// records are ignored entirely.
pub fn shuffled<'t, R: Rng + ?Sized>(
    teams: &'t [TeamRecord],
    rng: &mut R,
) -> Vec<&'t TeamRecord> {
    let mut order: Vec<&TeamRecord> = teams.iter().collect();
    order.shuffle(rng);
    order
}
