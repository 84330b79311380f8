//! Formatting of computed standings for people and other programs.
//!
//! Every exporter works from the already-ranked tables; nothing here
//! recomputes standings.

use std::fmt;

use rust_decimal::Decimal;

use crate::tournaments::standings::{
    compute::TeamStandings, speakers::SpeakerStandings,
};

pub mod delimited;
pub mod json;
pub mod print;
pub mod spreadsheet;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("could not write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not write spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => write!(f, "{text}"),
            Cell::Integer(n) => write!(f, "{n}"),
            // averages do not terminate, so keep tables readable
            Cell::Decimal(d) => write!(f, "{}", d.round_dp(2).normalize()),
        }
    }
}

/// A ranked table with a fixed set of columns.
///
/// `rows` returns one row per ranked entry, each with exactly
/// `headers().len()` cells.
pub trait Tabular {
    fn sheet_name(&self) -> &'static str;
    fn headers(&self) -> Vec<&'static str>;
    fn rows(&self) -> Vec<Vec<Cell>>;
}

impl Tabular for TeamStandings {
    fn sheet_name(&self) -> &'static str {
        "Team standings"
    }

    fn headers(&self) -> Vec<&'static str> {
        vec![
            "Rank",
            "Team",
            "Wins",
            "Losses",
            "Speaks",
            "Opponent strength",
        ]
    }

    fn rows(&self) -> Vec<Vec<Cell>> {
        self.ranked
            .iter()
            .map(|standing| {
                vec![
                    Cell::Integer(standing.rank as i64),
                    Cell::Text(standing.team_id.clone()),
                    Cell::Integer(standing.wins),
                    Cell::Integer(standing.losses),
                    Cell::Decimal(standing.speaks),
                    Cell::Integer(standing.opponent_strength),
                ]
            })
            .collect()
    }
}

impl Tabular for SpeakerStandings {
    fn sheet_name(&self) -> &'static str {
        "Speaker awards"
    }

    fn headers(&self) -> Vec<&'static str> {
        vec![
            "Rank",
            "Speaker",
            "Name",
            "Team",
            "Adjusted total",
            "Raw total",
            "Rounds scored",
        ]
    }

    fn rows(&self) -> Vec<Vec<Cell>> {
        self.ranked
            .iter()
            .map(|standing| {
                vec![
                    Cell::Integer(standing.rank as i64),
                    Cell::Text(standing.speaker_id.clone()),
                    Cell::Text(standing.display_name().to_string()),
                    Cell::Text(standing.team_id.clone()),
                    Cell::Decimal(standing.adjusted_total),
                    Cell::Decimal(standing.raw_total),
                    Cell::Integer(standing.points.len() as i64),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::Cell;

    #[test]
    fn test_decimal_cells_are_rounded_for_display() {
        assert_eq!(Cell::Decimal(Decimal::from(301)).to_string(), "301");
        assert_eq!(
            Cell::Decimal(Decimal::from(301) / Decimal::from(3)).to_string(),
            "100.33"
        );
        assert_eq!(Cell::Decimal(Decimal::new(1425, 1)).to_string(), "142.5");
    }
}
