use indexmap::IndexMap;

use crate::tournaments::standings::compute::history::TeamHistory;

pub mod atss;
pub mod ds_wins;
pub mod n_times_specific_result;
pub mod points;
pub mod tss;

/// A per-team quantity computed from the (filtered) result history. Every
/// team in the history gets a value, in history order.
pub trait Metric<V> {
    fn compute(&self, history: &TeamHistory) -> IndexMap<String, V>;
}
