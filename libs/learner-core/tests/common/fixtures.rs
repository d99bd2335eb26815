//! Sample sets shared by the integration tests.

use learner_core::{parse, Delimiters, TermSet};

/// Eight capitals, one with a year and one with two hints.
pub const CAPITALS: &str = "\\\\ European capitals\n\
    Paris - Capital of France\n\
    Berlin - 1237 - Capital of Germany\n\
    Rome - Capital of Italy. Built on seven hills\n\
    Madrid - Capital of Spain\n\
    Lisbon - Capital of Portugal\n\
    Vienna - Capital of Austria\n\
    Oslo - Capital of Norway\n\
    Athens - Capital of Greece\n";

pub fn capitals() -> TermSet {
    parse(CAPITALS, "capitals", &Delimiters::default())
        .expect("fixture parses")
        .set
}
