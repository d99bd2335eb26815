//! Session orchestrators.
//!
//! Each session drives a [`crate::exercise::Drill`] (or, for flashcards,
//! just the set) through a full run and returns a serializable summary.

mod flashcards;
mod learn;
mod test;

pub use flashcards::{run_flashcards, FlashcardCommand, FlashcardCursor};
pub use learn::{learn, LearnEnd, LearnOptions, LearnSummary};
pub use test::{run_test, BlockResult, TestReport};
