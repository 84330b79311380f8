//! Individual speaker awards.

use std::collections::HashSet;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tournaments::{
    config::SpeakerAwardsConfig, rounds::results::SpeakerScore,
};

/// One speaker's line in the speaker tab.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SpeakerStanding {
    pub speaker_id: String,
    pub name: String,
    pub team_id: String,
    /// Every scored round which passed the filters, in input order.
    pub points: Vec<Decimal>,
    pub raw_total: Decimal,
    /// Total after the configured highest and lowest scores were dropped.
    pub adjusted_total: Decimal,
    /// 1-based. No two speakers share a rank.
    pub rank: usize,
}

impl SpeakerStanding {
    /// The name to print, falling back to the id for anonymous entries.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.speaker_id
        } else {
            &self.name
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeakerStandings {
    pub config: SpeakerAwardsConfig,
    pub ranked: Vec<SpeakerStanding>,
    /// Speakers ranked before truncating to the configured top-N.
    pub individuals_considered: usize,
}

/// Sums `points` after dropping the `drop_high` highest and `drop_low` lowest
/// entries. Dropping more entries than there are leaves nothing, so the
/// total is zero.
pub fn adjusted_total(
    points: &[Decimal],
    drop_high: usize,
    drop_low: usize,
) -> Decimal {
    let mut sorted = points.to_vec();
    sorted.sort();

    let end = sorted.len().saturating_sub(drop_high);
    let start = drop_low.min(end);
    sorted[start..end].iter().sum()
}

impl SpeakerStandings {
    /// Builds the speaker tab.
    ///
    /// Entries without a submitted score, and entries outside the configured
    /// division, are ignored. Speakers left with no entries never competed
    /// and are omitted; speakers whose entries were all dropped by the
    /// drop-high/drop-low adjustment are kept with a total of zero.
    ///
    /// Ranking is by adjusted total, then raw total (both descending), then
    /// the order in which speakers first appear in `scores`.
    #[tracing::instrument(skip_all, fields(entries = scores.len()))]
    pub fn compute(
        scores: &[SpeakerScore],
        config: &SpeakerAwardsConfig,
    ) -> Self {
        let breaking: HashSet<&str> = if config.exclude_breaking {
            config.breaking_teams.iter().map(String::as_str).collect()
        } else {
            HashSet::new()
        };

        let mut entries_of_speaker: IndexMap<&str, Vec<&SpeakerScore>> =
            IndexMap::new();
        for score in scores {
            let in_division = match &config.division {
                Some(division) => score.division.as_ref() == Some(division),
                None => true,
            };
            if in_division && score.points.is_some() {
                entries_of_speaker
                    .entry(score.speaker_id.as_str())
                    .or_default()
                    .push(score);
            }
        }

        let mut ranked: Vec<SpeakerStanding> = entries_of_speaker
            .into_iter()
            .filter(|(speaker, entries)| {
                let excluded = breaking.contains(entries[0].team_id.as_str());
                if excluded {
                    tracing::trace!("Excluding {speaker} (breaking team)");
                }
                !excluded
            })
            .map(|(speaker, entries)| {
                let points: Vec<Decimal> =
                    entries.iter().filter_map(|entry| entry.points).collect();

                if config.drop_high + config.drop_low >= points.len() {
                    tracing::trace!(
                        "All {} scores of {speaker} dropped",
                        points.len()
                    );
                }

                SpeakerStanding {
                    speaker_id: speaker.to_string(),
                    name: entries[0].name.clone(),
                    team_id: entries[0].team_id.clone(),
                    raw_total: points.iter().sum(),
                    adjusted_total: adjusted_total(
                        &points,
                        config.drop_high,
                        config.drop_low,
                    ),
                    points,
                    rank: 0,
                }
            })
            .collect();

        // stable, so full ties keep first-appearance order
        ranked.sort_by(|a, b| {
            b.adjusted_total
                .cmp(&a.adjusted_total)
                .then_with(|| b.raw_total.cmp(&a.raw_total))
        });
        for (i, standing) in ranked.iter_mut().enumerate() {
            standing.rank = i + 1;
        }

        let individuals_considered = ranked.len();
        if let Some(top) = config.top {
            ranked.truncate(top);
        }

        tracing::debug!(
            "Ranked {individuals_considered} speakers, returning {}",
            ranked.len()
        );

        Self {
            config: config.clone(),
            ranked,
            individuals_considered,
        }
    }
}
