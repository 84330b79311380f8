//! Pairing and standings computation for debate and speech tournaments.
//!
//! Everything in [`tournaments`] is a pure function of its inputs: callers
//! fetch team records, result rows and judge lists from wherever they keep
//! them, and persist whatever comes back.

pub mod config;
#[cfg(any(test, feature = "fuzzing"))]
pub mod test;
pub mod tournaments;
