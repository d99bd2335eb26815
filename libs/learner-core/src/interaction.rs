//! The boundary between the engine and whatever shell drives it.
//!
//! The engine emits [`Event`]s to display and sends [`Request`]s when it
//! needs a line of input. A console, a network peer, or a scripted test
//! harness can sit on the other side.

use serde::Serialize;

use crate::error::Result;
use crate::mastery::TermScore;
use crate::set::SetInfo;

/// Which side of a flashcard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSide {
    Term,
    Definition,
}

/// Something for the shell to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SetLoaded(SetInfo),
    SectionHeader {
        title: String,
    },
    QuestionHeader {
        number: usize,
    },
    MultipleChoice {
        hint: String,
        options: Vec<String>,
    },
    WriteAnswer {
        hint: String,
    },
    TrueFalse {
        hint: String,
        term: String,
    },
    /// Hints are numbered from 1 in the order given.
    Connect {
        hints: Vec<String>,
        terms: Vec<String>,
    },
    YearQuestion,
    YearShown {
        year: String,
    },
    Correct,
    Incorrect {
        expected: String,
    },
    Overwritten,
    TrueFalseIncorrect {
        expected: bool,
    },
    SlotNotAnswered {
        slot: usize,
        expected: String,
    },
    SlotIncorrect {
        slot: usize,
        expected: String,
        given: String,
    },
    ConnectResult {
        incorrect: usize,
        total: usize,
    },
    FormatError {
        message: String,
    },
    RoundResult {
        round: usize,
        scores: Vec<TermScore>,
        total: u32,
        ceiling: u32,
    },
    AllMastered,
    TestResult {
        missed: usize,
        total: usize,
    },
    Card {
        position: usize,
        side: CardSide,
        text: String,
    },
    FirstCard,
    Exiting,
}

/// A line of input the engine is waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    TermAnswer,
    YearAnswer,
    TrueFalse,
    /// Re-asked after an unrecognised answer.
    TrueFalseRetry,
    ConnectPairs,
    ConfirmOverwrite,
    ContinueRound { round: usize },
    FlashcardCommand,
    StartOver,
    Acknowledge,
}

/// Display and input capabilities the engine depends on.
pub trait Interaction {
    fn show(&mut self, event: &Event) -> Result<()>;

    /// Block until a line of input is available. A closed source is
    /// reported as [`crate::LearnerError::InputClosed`].
    fn ask(&mut self, request: &Request) -> Result<String>;
}

const TRUE_WORDS: [&str; 4] = ["true", "t", "yes", "y"];
const FALSE_WORDS: [&str; 4] = ["false", "f", "no", "n"];
const AFFIRMATIVE_WORDS: [&str; 5] = ["y", "yes", "true", "1", "t"];
const DECLINE_WORDS: [&str; 5] = ["n", "no", "false", "0", "f"];

/// Normalize a true/false answer; `None` when it is not in the vocabulary.
pub fn parse_truth(answer: &str) -> Option<bool> {
    let answer = answer.trim().to_lowercase();
    if TRUE_WORDS.contains(&answer.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&answer.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Whether an answer to a yes/no confirmation says yes.
pub fn is_affirmative(answer: &str) -> bool {
    AFFIRMATIVE_WORDS.contains(&answer.trim().to_lowercase().as_str())
}

/// Whether an answer to "continue?" says no.
pub fn is_decline(answer: &str) -> bool {
    DECLINE_WORDS.contains(&answer.trim().to_lowercase().as_str())
}

/// Ask a true/false question until a recognised answer comes back.
pub fn ask_truth(io: &mut dyn Interaction) -> Result<bool> {
    let mut answer = io.ask(&Request::TrueFalse)?;
    loop {
        if let Some(value) = parse_truth(&answer) {
            return Ok(value);
        }
        answer = io.ask(&Request::TrueFalseRetry)?;
    }
}

pub fn confirm(io: &mut dyn Interaction, request: &Request) -> Result<bool> {
    Ok(is_affirmative(&io.ask(request)?))
}

/// Pause until the user is ready to move on.
pub fn acknowledge(io: &mut dyn Interaction) -> Result<()> {
    io.ask(&Request::Acknowledge).map(|_| ())
}
