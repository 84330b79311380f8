use std::collections::HashMap;

use indexmap::IndexMap;

use crate::tournaments::rounds::results::TeamResult;

/// The result rows of each team, after the division filter has been applied.
///
/// Teams are kept in the order in which they first appear as `team_id` in
/// the input; this order is the final tiebreak of the standings.
pub struct TeamHistory<'r> {
    pub rows_of_team: IndexMap<&'r str, Vec<&'r TeamResult>>,
}

impl<'r> TeamHistory<'r> {
    /// Groups `results` by team.
    ///
    /// With a `division`, a team belongs to the division named by its first
    /// tagged row. Only teams in the division are kept. A row is only kept
    /// if it is not tagged with another division and its opponent (when
    /// there is one) is in the division too, so a cross-division match
    /// counts for neither side. Untagged rows inherit the team's division.
    pub fn build(results: &'r [TeamResult], division: Option<&str>) -> Self {
        let Some(division) = division else {
            let mut rows_of_team: IndexMap<&str, Vec<&TeamResult>> =
                IndexMap::new();
            for row in results {
                rows_of_team
                    .entry(row.team_id.as_str())
                    .or_default()
                    .push(row);
            }
            return Self { rows_of_team };
        };

        let mut division_of_team: HashMap<&str, &str> = HashMap::new();
        for row in results {
            if let Some(tag) = &row.division {
                division_of_team.entry(row.team_id.as_str()).or_insert(tag);
            }
        }
        let in_division =
            |team: &str| division_of_team.get(team) == Some(&division);

        let mut rows_of_team: IndexMap<&str, Vec<&TeamResult>> =
            IndexMap::new();
        let mut excluded = 0;
        for row in results {
            if !in_division(&row.team_id) {
                continue;
            }

            let entry = rows_of_team.entry(row.team_id.as_str()).or_default();
            let tagged_elsewhere =
                row.division.as_deref().is_some_and(|tag| tag != division);
            let opponent_elsewhere = row
                .opponent_id
                .as_deref()
                .is_some_and(|opponent| !in_division(opponent));
            if tagged_elsewhere || opponent_elsewhere {
                excluded += 1;
            } else {
                entry.push(row);
            }
        }

        if excluded > 0 {
            tracing::debug!(
                "Excluded {excluded} rows from division {division}"
            );
        }

        Self { rows_of_team }
    }

    pub fn teams(&self) -> impl Iterator<Item = &'r str> + '_ {
        self.rows_of_team.keys().copied()
    }

    pub fn rows_considered(&self) -> usize {
        self.rows_of_team.values().map(Vec::len).sum()
    }

    /// Opponents faced by `team`, once per round in which they met.
    pub fn opponents_of(
        &self,
        team: &str,
    ) -> impl Iterator<Item = &'r str> + '_ {
        self.rows_of_team
            .get(team)
            .into_iter()
            .flatten()
            .copied()
            .filter_map(|row| row.opponent_id.as_deref())
    }
}
