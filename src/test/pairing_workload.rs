//! Crash workload. Runs a whole Swiss tournament (draws, results, standings,
//! the break and the speaker tab) from roughly-formed input, checking the
//! invariants of every step along the way. This is connected to a fuzzing
//! harness (which can be found in the `fuzz/` directory).

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::tournaments::{
    config::{PairingMethod, SpeakerAwardsConfig, StandingsConfig},
    participants::{JudgeProfile, Room},
    rounds::{
        draws::{
            Draw,
            drawalgs::{DrawInput, elim, swiss},
        },
        results::{Outcome, ResultSet, SpeakerScore, TeamResult},
    },
    standings::{
        breaks::{breaking_teams, seed_break},
        compute::TeamStandings,
        export::{Tabular, delimited, print},
        speakers::SpeakerStandings,
    },
    teams::TeamRecord,
};

const MAX_TEAMS: usize = 64;
const SPEAKERS_PER_TEAM: usize = 2;

#[derive(Debug, Deserialize)]
pub struct RoundData {
    pub method: PairingMethod,
    #[serde(default)]
    pub seed: u64,
    /// Whether the affirmative team wins, by debate index (cycled).
    #[serde(default)]
    pub aff_wins: Vec<bool>,
    /// Raw speaker points, cycled over the speakers of the round. A zero
    /// means no scored ballot came back for that speaker.
    #[serde(default)]
    pub points: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub struct Workload {
    pub team_count: usize,
    #[serde(default)]
    pub judge_count: usize,
    #[serde(default)]
    pub room_count: usize,
    pub rounds: Vec<RoundData>,
    #[serde(default)]
    pub break_size: usize,
    #[serde(default)]
    pub drop_high: usize,
    #[serde(default)]
    pub drop_low: usize,
}

#[cfg(feature = "fuzzing")]
impl<'a> arbitrary::Arbitrary<'a> for RoundData {
    fn arbitrary(
        u: &mut arbitrary::Unstructured<'a>,
    ) -> arbitrary::Result<Self> {
        Ok(Self {
            method: *u.choose(&PairingMethod::ALL)?,
            seed: u.arbitrary()?,
            aff_wins: u.arbitrary()?,
            points: u.arbitrary()?,
        })
    }
}

#[cfg(feature = "fuzzing")]
impl<'a> arbitrary::Arbitrary<'a> for Workload {
    fn arbitrary(
        u: &mut arbitrary::Unstructured<'a>,
    ) -> arbitrary::Result<Self> {
        let round_count = u.int_in_range(1..=6)?;

        Ok(Self {
            team_count: u.int_in_range(0..=MAX_TEAMS)?,
            judge_count: u.int_in_range(0..=MAX_TEAMS / 2)?,
            room_count: u.int_in_range(0..=MAX_TEAMS / 2)?,
            rounds: (0..round_count)
                .map(|_| {
                    <RoundData as arbitrary::Arbitrary>::arbitrary(u)
                })
                .collect::<arbitrary::Result<_>>()?,
            break_size: u.int_in_range(0..=16)?,
            drop_high: u.int_in_range(0..=3)?,
            drop_low: u.int_in_range(0..=3)?,
        })
    }
}

impl RoundData {
    fn aff_wins(&self, debate: usize) -> bool {
        if self.aff_wins.is_empty() {
            true
        } else {
            self.aff_wins[debate % self.aff_wins.len()]
        }
    }

    fn points(&self, speaker: usize) -> Option<Decimal> {
        let raw = if self.points.is_empty() {
            75
        } else {
            self.points[speaker % self.points.len()]
        };
        (raw != 0).then(|| Decimal::from(60 + raw % 40))
    }
}

fn check_draw(draw: &Draw, team_count: usize) {
    assert_eq!(draw.proposals.len(), team_count / 2);
    assert_eq!(draw.bye.is_some(), team_count % 2 == 1);

    let mut seen = HashSet::new();
    for proposal in &draw.proposals {
        assert_ne!(proposal.aff_team_id, proposal.neg_team_id);
    }
    for team in draw.paired_team_ids() {
        assert!(seen.insert(team), "{team} was paired twice");
    }
    if let Some(bye) = &draw.bye {
        assert!(!seen.contains(bye.as_str()), "{bye} was paired and had a bye");
    }
}

fn check_standings(standings: &TeamStandings, rounds_completed: i64) {
    for (i, standing) in standings.ranked.iter().enumerate() {
        assert_eq!(standing.rank, i + 1);
        assert_eq!(standing.wins + standing.losses, rounds_completed);
    }

    for pair in standings.ranked.windows(2) {
        assert!(pair[0].wins >= pair[1].wins);
    }
}

impl Workload {
    pub fn run(&self) {
        let span = tracing::info_span!(
            "workload_run",
            num_rounds = self.rounds.len()
        );
        let _guard = span.enter();

        let team_ids: Vec<String> = (0..self.team_count.min(MAX_TEAMS))
            .map(|i| format!("team{i}"))
            .collect();
        // supplied in reverse so that sorting has something to do
        let judges: Vec<JudgeProfile> = (0..self.judge_count.min(MAX_TEAMS))
            .map(|i| JudgeProfile {
                id: format!("judge{i}"),
                position: -(i as i64),
            })
            .collect();
        let judges = JudgeProfile::in_assignment_order(&judges);
        let rooms: Vec<Room> = (0..self.room_count.min(MAX_TEAMS))
            .map(|i| Room {
                label: format!("room{i}"),
            })
            .collect();

        let mut results = ResultSet::default();

        for (i, round) in self.rounds.iter().enumerate() {
            let round_no = i as u32 + 1;

            let standings = TeamStandings::compute(
                &results.team_results,
                &StandingsConfig::default(),
            );
            check_standings(&standings, i as i64);

            let mut records = standings.team_records();
            for id in &team_ids {
                if standings.get(id).is_none() {
                    records.push(TeamRecord::new(id));
                }
            }
            assert_eq!(records.len(), team_ids.len());
            for record in &records {
                assert_eq!(record.rounds_completed(), i as i64);
            }

            let mut rng = ChaCha20Rng::seed_from_u64(round.seed);
            let draw = swiss::make_draw(
                &DrawInput::new(&records).judges(&judges).rooms(&rooms),
                round.method,
                &mut rng,
            );
            check_draw(&draw, records.len());

            for (debate, proposal) in draw.proposals.iter().enumerate() {
                assert_eq!(
                    proposal.judge_id,
                    judges.get(debate).map(|judge| judge.id.clone())
                );

                let aff_wins = round.aff_wins(debate);
                for (team, opponent, won) in [
                    (&proposal.aff_team_id, &proposal.neg_team_id, aff_wins),
                    (&proposal.neg_team_id, &proposal.aff_team_id, !aff_wins),
                ] {
                    let mut speaks = Decimal::ZERO;
                    for s in 0..SPEAKERS_PER_TEAM {
                        let points =
                            round.points(results.speaker_scores.len());
                        speaks += points.unwrap_or_default();
                        results.speaker_scores.push(SpeakerScore {
                            speaker_id: format!("{team}-{s}"),
                            name: String::new(),
                            team_id: team.clone(),
                            round: round_no,
                            points,
                            division: None,
                        });
                    }

                    results.team_results.push(TeamResult {
                        round: round_no,
                        team_id: team.clone(),
                        opponent_id: Some(opponent.clone()),
                        outcome: if won { Outcome::Win } else { Outcome::Loss },
                        speaks,
                        division: None,
                    });
                }
            }

            if let Some(bye) = &draw.bye {
                results.team_results.push(TeamResult {
                    round: round_no,
                    team_id: bye.clone(),
                    opponent_id: None,
                    outcome: Outcome::Win,
                    speaks: Decimal::ZERO,
                    division: None,
                });
            }
        }

        let config = StandingsConfig::default();
        let standings = TeamStandings::compute(&results.team_results, &config);
        check_standings(&standings, self.rounds.len() as i64);
        assert_eq!(
            standings,
            TeamStandings::compute(&results.team_results, &config)
        );

        let seeds = seed_break(&standings, self.break_size);
        let bracket = elim::make_draw(&seeds, &judges, &rooms);
        check_draw(&bracket, seeds.len());
        for proposal in &bracket.proposals {
            let seed_of = |team: &str| {
                seeds
                    .iter()
                    .find(|seeded| seeded.team_id == team)
                    .map(|seeded| seeded.seed)
            };
            assert!(
                seed_of(&proposal.aff_team_id) < seed_of(&proposal.neg_team_id)
            );
        }

        let speakers = SpeakerStandings::compute(
            &results.speaker_scores,
            &SpeakerAwardsConfig {
                exclude_breaking: true,
                breaking_teams: breaking_teams(&standings, self.break_size),
                drop_high: self.drop_high,
                drop_low: self.drop_low,
                ..Default::default()
            },
        );
        for (i, speaker) in speakers.ranked.iter().enumerate() {
            assert_eq!(speaker.rank, i + 1);
            assert!(!speaker.points.is_empty());
            assert!(speaker.adjusted_total <= speaker.raw_total);
            assert!(!speakers.config.breaking_teams.contains(&speaker.team_id));
        }

        for table in [&standings as &dyn Tabular, &speakers] {
            let csv = delimited::to_string(table).unwrap();
            assert_eq!(csv.lines().count(), table.rows().len() + 1);

            let html = print::to_html(table, "Tab");
            assert_eq!(html.matches("<tr>").count(), table.rows().len() + 1);
        }
    }
}

#[cfg(test)]
pub mod regressions {
    use crate::test::pairing_workload::Workload;

    #[test]
    fn odd_field_with_few_judges() {
        let input: Workload = serde_json::from_str(include_str!(
            "pairing_regressions/r1.json"
        ))
        .unwrap();

        input.run();
    }

    #[test]
    fn empty_tournament() {
        let input: Workload = serde_json::from_str(
            r#"{"team_count": 0, "rounds": [{"method": "high_low"}]}"#,
        )
        .unwrap();

        input.run();
    }

    #[test]
    fn every_method_with_drops() {
        for method in ["high_high", "high_low", "random"] {
            let input: Workload = serde_json::from_str(&format!(
                r#"{{
                    "team_count": 12,
                    "judge_count": 6,
                    "room_count": 6,
                    "rounds": [
                        {{"method": "{method}", "seed": 1,
                          "aff_wins": [true, false]}},
                        {{"method": "{method}", "seed": 2,
                          "points": [10, 0, 39]}},
                        {{"method": "{method}", "seed": 3,
                          "aff_wins": [false]}}
                    ],
                    "break_size": 4,
                    "drop_high": 1,
                    "drop_low": 1
                }}"#
            ))
            .unwrap();

            input.run();
        }
    }
}
