//! Term/definition drilling engine.
//!
//! Provides:
//! - Flat text codec for term sets
//! - Answer judging with typo forgiveness (Ratcliff/Obershelp similarity)
//! - Per-term mastery tracking
//! - Exercises (multiple choice, write, true/false, connect) and the learn,
//!   test and flashcard sessions built on them
//!
//! The engine does no I/O of its own. Shells implement [`Interaction`] to
//! display [`Event`]s and answer [`Request`]s.

pub mod error;
pub mod exercise;
pub mod interaction;
pub mod judge;
pub mod mastery;
pub mod matching;
pub mod parser;
pub mod random;
pub mod session;
pub mod set;
pub mod types;

pub use error::{LearnerError, Result};
pub use exercise::Drill;
pub use interaction::{CardSide, Event, Interaction, Request};
pub use judge::{MatchingReport, Outcome, SlotFeedback, SlotVerdict};
pub use mastery::{MasteryTracker, TermScore, MASTERY_SCORE};
pub use matching::{compare_answers, is_typo, ratio, MatchResult, Verdict};
pub use parser::{parse, serialize, ParsedSet, SkippedCard};
pub use random::{RandomSource, StdRandom};
pub use session::{
    learn, run_flashcards, run_test, LearnEnd, LearnOptions, LearnSummary, TestReport,
};
pub use set::{SetInfo, TermSet};
pub use types::{
    default_test_configuration, same_term, Delimiters, ExerciseKind, Settings, TermRecord,
    TestBlock,
};
