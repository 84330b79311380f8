use serde::{Deserialize, Serialize};

/// A judge available for the round being drawn.
///
/// Pairings take judges strictly by index, so `position` only matters to
/// callers who hold an unordered list and want to sort it first (see
/// [`JudgeProfile::in_assignment_order`]). Conflicts of interest are not
/// checked here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct JudgeProfile {
    pub id: String,
    #[serde(default)]
    pub position: i64,
}

impl JudgeProfile {
    /// Returns the judges sorted by `position`. Judges sharing a position
    /// keep the order they were supplied in.
    pub fn in_assignment_order(judges: &[JudgeProfile]) -> Vec<JudgeProfile> {
        let mut judges = judges.to_vec();
        judges.sort_by_key(|judge| judge.position);
        judges
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub label: String,
}
