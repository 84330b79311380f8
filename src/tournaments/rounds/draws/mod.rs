use serde::{Deserialize, Serialize};

use crate::tournaments::rounds::side_names::Side;

pub mod drawalgs;
pub mod print;

/// A proposed debate for the next round. Judge and room are left empty when
/// the supplied lists run out, for an administrator to fill in by hand.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PairingProposal {
    pub aff_team_id: String,
    pub neg_team_id: String,
    #[serde(default)]
    pub judge_id: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

impl PairingProposal {
    pub fn team_of_side(&self, side: Side) -> &str {
        match side {
            Side::Aff => &self.aff_team_id,
            Side::Neg => &self.neg_team_id,
        }
    }
}

/// The output of a draw generator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Draw {
    /// One proposal per pair of teams, in pairing order.
    pub proposals: Vec<PairingProposal>,
    /// The team left without an opponent when an odd number of teams was
    /// drawn.
    #[serde(default)]
    pub bye: Option<String>,
}

impl Draw {
    /// All team ids appearing in a proposal, affirmative first.
    pub fn paired_team_ids(&self) -> impl Iterator<Item = &str> {
        self.proposals.iter().flat_map(|proposal| {
            [proposal.aff_team_id.as_str(), proposal.neg_team_id.as_str()]
        })
    }
}
