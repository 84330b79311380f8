use serde::{Deserialize, Serialize};

/// The two sides of a debate. In every generated pairing the stronger team
/// (upper half of a Swiss split, lower seed of a bracket) is affirmative.
#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Aff,
    Neg,
}

impl Side {
    pub fn name(&self, short: bool) -> &'static str {
        match (self, short) {
            (Side::Aff, true) => "Aff",
            (Side::Aff, false) => "Affirmative",
            (Side::Neg, true) => "Neg",
            (Side::Neg, false) => "Negative",
        }
    }
}

#[cfg(test)]
#[test]
fn test_side_names() {
    assert_eq!(Side::Aff.name(true), "Aff");
    assert_eq!(Side::Neg.name(false), "Negative");
}
