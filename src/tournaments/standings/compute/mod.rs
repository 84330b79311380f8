use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tournaments::{
    config::{SpeaksAggregation, StandingsConfig},
    rounds::results::{Outcome, TeamResult},
    standings::compute::{
        history::TeamHistory,
        metrics::{
            Metric, atss::atss, ds_wins::DsWinsComputer,
            n_times_specific_result::NTimesSpecificResultComputer,
            points::TeamPointsComputer, tss::TotalTeamSpeakerScoreComputer,
        },
    },
    teams::TeamRecord,
};

pub mod history;
pub mod metrics;

/// A team's place in the standings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ComputedStanding {
    pub team_id: String,
    pub wins: i64,
    pub losses: i64,
    pub speaks: Decimal,
    pub opponent_strength: i64,
    /// 1-based. No two teams share a rank.
    pub rank: usize,
}

/// Ranked team standings, recomputed from scratch from the result rows on
/// every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamStandings {
    pub config: StandingsConfig,
    pub ranked: Vec<ComputedStanding>,
    /// Result rows which survived the division filter.
    pub rows_considered: usize,
}

impl TeamStandings {
    /// Ranks teams by wins, then speaks, then opponent strength (all
    /// descending).
    ///
    /// **Important:** teams which are tied on all three are ranked in the
    /// order they first appear in `results`. Every team gets its own rank
    /// number, so two identical records still occupy adjacent, distinct
    /// ranks.
    ///
    /// Opponent strength is computed against each opponent's final win total
    /// over `results`, not the total it had when the teams met.
    #[tracing::instrument(skip_all, fields(rows = results.len()))]
    pub fn compute(results: &[TeamResult], config: &StandingsConfig) -> Self {
        let history = TeamHistory::build(results, config.division.as_deref());

        let wins = TeamPointsComputer.compute(&history);
        let losses =
            NTimesSpecificResultComputer(Outcome::Loss).compute(&history);
        let speaks = {
            let tss = TotalTeamSpeakerScoreComputer.compute(&history);
            match config.speaks {
                SpeaksAggregation::Total => tss,
                SpeaksAggregation::Average => atss(tss, &history),
            }
        };
        let ds_wins = DsWinsComputer(&wins).compute(&history);

        let mut ranked: Vec<ComputedStanding> = history
            .teams()
            .map(|team| ComputedStanding {
                team_id: team.to_string(),
                wins: wins[team],
                losses: losses[team],
                speaks: speaks[team],
                opponent_strength: ds_wins[team],
                rank: 0,
            })
            .collect();

        // stable, so full ties keep first-appearance order
        ranked.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| b.speaks.cmp(&a.speaks))
                .then_with(|| b.opponent_strength.cmp(&a.opponent_strength))
        });
        for (i, standing) in ranked.iter_mut().enumerate() {
            standing.rank = i + 1;
        }

        tracing::debug!("Ranked {} teams", ranked.len());

        Self {
            config: config.clone(),
            ranked,
            rows_considered: history.rows_considered(),
        }
    }

    pub fn get(&self, team_id: &str) -> Option<&ComputedStanding> {
        self.ranked.iter().find(|standing| standing.team_id == team_id)
    }

    /// Team records for the Swiss draw generator, in rank order. Drawing from
    /// these keeps opponent strength consistent between the standings and
    /// the draw.
    pub fn team_records(&self) -> Vec<TeamRecord> {
        self.ranked
            .iter()
            .map(|standing| TeamRecord {
                id: standing.team_id.clone(),
                wins: standing.wins,
                losses: standing.losses,
                speaks: standing.speaks,
                opponent_strength: standing.opponent_strength,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::tournaments::{
        config::{SpeaksAggregation, StandingsConfig},
        rounds::results::{Outcome, TeamResult},
    };

    use super::TeamStandings;

    fn row(
        round: u32,
        team: &str,
        opponent: &str,
        outcome: Outcome,
        speaks: i64,
    ) -> TeamResult {
        TeamResult {
            round,
            team_id: team.to_string(),
            opponent_id: Some(opponent.to_string()),
            outcome,
            speaks: Decimal::from(speaks),
            division: None,
        }
    }

    /// Both rows of a debate.
    fn debate(
        round: u32,
        winner: (&str, i64),
        loser: (&str, i64),
    ) -> [TeamResult; 2] {
        [
            row(round, winner.0, loser.0, Outcome::Win, winner.1),
            row(round, loser.0, winner.0, Outcome::Loss, loser.1),
        ]
    }

    fn two_round_results() -> Vec<TeamResult> {
        [
            debate(1, ("a", 150), ("b", 148)),
            debate(1, ("c", 152), ("d", 140)),
            debate(2, ("a", 151), ("c", 150)),
            debate(2, ("b", 149), ("d", 145)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn ids(standings: &TeamStandings) -> Vec<&str> {
        standings
            .ranked
            .iter()
            .map(|s| s.team_id.as_str())
            .collect()
    }

    #[test]
    fn test_two_rounds() {
        let standings =
            TeamStandings::compute(&two_round_results(), &Default::default());

        // b and c both have one win; c has more speaks
        assert_eq!(ids(&standings), ["a", "c", "b", "d"]);

        let a = standings.get("a").unwrap();
        assert_eq!((a.wins, a.losses, a.rank), (2, 0, 1));
        assert_eq!(a.speaks, Decimal::from(301));
        // a beat b (1 win) and c (1 win)
        assert_eq!(a.opponent_strength, 2);

        let d = standings.get("d").unwrap();
        assert_eq!((d.wins, d.losses, d.rank), (0, 2, 4));
        // d lost to c (1 win) and b (1 win)
        assert_eq!(d.opponent_strength, 2);

        for standing in &standings.ranked {
            assert_eq!(standing.wins + standing.losses, 2);
        }
        assert_eq!(standings.rows_considered, 8);
    }

    #[test]
    fn test_recomputing_is_idempotent() {
        let results = two_round_results();
        let config = StandingsConfig::default();

        let first = TeamStandings::compute(&results, &config);
        let second = TeamStandings::compute(&results, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_records_get_adjacent_distinct_ranks() {
        let results: Vec<TeamResult> = [
            debate(1, ("x", 150), ("p", 140)),
            debate(1, ("y", 150), ("q", 140)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let standings = TeamStandings::compute(&results, &Default::default());

        let x = standings.get("x").unwrap();
        let y = standings.get("y").unwrap();
        assert_eq!(x.rank, 1);
        assert_eq!(y.rank, 2);

        let p = standings.get("p").unwrap();
        let q = standings.get("q").unwrap();
        assert_eq!(p.rank, 3);
        assert_eq!(q.rank, 4);
    }

    #[test]
    fn test_opponent_strength_breaks_speaks_ties() {
        // e and f both win once with equal speaks, but e's opponent went on to
        // win again
        let results: Vec<TeamResult> = [
            debate(1, ("f", 150), ("h", 140)),
            debate(1, ("e", 150), ("g", 140)),
            debate(2, ("g", 150), ("h", 140)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let standings = TeamStandings::compute(&results, &Default::default());
        assert_eq!(standings.get("e").unwrap().opponent_strength, 1);
        assert_eq!(standings.get("f").unwrap().opponent_strength, 0);
        assert!(
            standings.get("e").unwrap().rank
                < standings.get("f").unwrap().rank
        );
    }

    #[test]
    fn test_average_speaks() {
        let mut results = two_round_results();
        // a bye round for a, counted with no speaks
        results.push(TeamResult {
            round: 3,
            team_id: "a".to_string(),
            opponent_id: None,
            outcome: Outcome::Win,
            speaks: Decimal::ZERO,
            division: None,
        });

        let standings = TeamStandings::compute(
            &results,
            &StandingsConfig {
                speaks: SpeaksAggregation::Average,
                division: None,
            },
        );

        let a = standings.get("a").unwrap();
        assert_eq!(a.wins, 3);
        assert_eq!(a.speaks, Decimal::from(301) / Decimal::from(3));

        let d = standings.get("d").unwrap();
        assert_eq!(d.speaks, Decimal::new(1425, 1));
    }

    #[test]
    fn test_division_filter_excludes_cross_division_matches() {
        let tag = |mut rows: [TeamResult; 2], a: &str, b: &str| {
            rows[0].division = Some(a.to_string());
            rows[1].division = Some(b.to_string());
            rows
        };

        let results: Vec<TeamResult> = [
            tag(debate(1, ("n1", 150), ("n2", 140)), "novice", "novice"),
            tag(debate(1, ("o1", 150), ("n3", 140)), "open", "novice"),
            tag(debate(2, ("n3", 150), ("n1", 140)), "novice", "novice"),
            tag(debate(2, ("n2", 150), ("o1", 140)), "novice", "open"),
        ]
        .into_iter()
        .flatten()
        .collect();

        let standings = TeamStandings::compute(
            &results,
            &StandingsConfig {
                speaks: SpeaksAggregation::Total,
                division: Some("novice".to_string()),
            },
        );

        assert!(standings.get("o1").is_none());

        // n3's loss to o1 and n2's win over o1 do not count
        let n2 = standings.get("n2").unwrap();
        assert_eq!((n2.wins, n2.losses), (0, 1));
        let n3 = standings.get("n3").unwrap();
        assert_eq!((n3.wins, n3.losses), (1, 0));
        let n1 = standings.get("n1").unwrap();
        assert_eq!((n1.wins, n1.losses), (1, 1));

        assert_eq!(standings.rows_considered, 4);
    }

    #[test]
    fn test_division_filter_skips_rows_tagged_with_another_division() {
        let tag = |mut rows: [TeamResult; 2], division: Option<&str>| {
            for row in &mut rows {
                row.division = division.map(str::to_string);
            }
            rows
        };

        let results: Vec<TeamResult> = [
            tag(debate(1, ("n1", 70), ("n2", 60)), Some("novice")),
            tag(debate(2, ("n1", 70), ("n2", 60)), Some("open")),
            // untagged rows take the team's division
            tag(debate(3, ("n2", 75), ("n1", 65)), None),
        ]
        .into_iter()
        .flatten()
        .collect();

        let standings = TeamStandings::compute(
            &results,
            &StandingsConfig {
                speaks: SpeaksAggregation::Total,
                division: Some("novice".to_string()),
            },
        );

        let n1 = standings.get("n1").unwrap();
        assert_eq!((n1.wins, n1.losses), (1, 1));
        assert_eq!(n1.speaks, Decimal::from(135));
        let n2 = standings.get("n2").unwrap();
        assert_eq!((n2.wins, n2.losses), (1, 1));
        assert_eq!(standings.rows_considered, 4);
    }

    #[test]
    fn test_empty_results() {
        let standings = TeamStandings::compute(&[], &Default::default());
        assert!(standings.ranked.is_empty());
        assert!(standings.team_records().is_empty());
    }

    #[test]
    fn test_team_records_follow_rank_order() {
        let standings =
            TeamStandings::compute(&two_round_results(), &Default::default());
        let records = standings.team_records();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b", "d"]);
        assert_eq!(records[0].opponent_strength, 2);
    }
}
