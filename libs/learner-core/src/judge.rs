//! Answer judging.
//!
//! Decisions are made by [`compare_answers`] and [`parse_pairs`]; the
//! functions here apply them to a [`TermSet`], asking the shell to confirm
//! when a wrong answer looks like a typo.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{LearnerError, Result};
use crate::interaction::{acknowledge, confirm, Event, Interaction, Request};
use crate::matching::{compare_answers, Verdict};
use crate::set::TermSet;
use crate::types::TermRecord;

/// Terminal state of a single-answer question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    /// Wrong as typed, accepted as a typo.
    CorrectAfterOverwrite,
    Incorrect,
}

impl Outcome {
    pub fn is_correct(self) -> bool {
        !matches!(self, Self::Incorrect)
    }
}

/// Judge a typed term against the expected record and update mastery.
pub fn judge_single(
    set: &mut TermSet,
    correct: &TermRecord,
    answer: &str,
    io: &mut dyn Interaction,
) -> Result<Outcome> {
    let result = compare_answers(answer, correct.term(), set.similarity_threshold());

    let outcome = match result.verdict {
        Verdict::Exact => {
            io.show(&Event::Correct)?;
            Outcome::Correct
        }
        Verdict::NearMiss => {
            io.show(&Event::Incorrect {
                expected: correct.term().to_string(),
            })?;
            if confirm(io, &Request::ConfirmOverwrite)? {
                io.show(&Event::Overwritten)?;
                Outcome::CorrectAfterOverwrite
            } else {
                Outcome::Incorrect
            }
        }
        Verdict::Wrong => {
            io.show(&Event::Incorrect {
                expected: correct.term().to_string(),
            })?;
            Outcome::Incorrect
        }
    };

    if outcome.is_correct() {
        set.mastery_mut().on_correct(correct.term());
    } else {
        set.mastery_mut().on_incorrect(correct.term());
        set.record_miss();
    }
    debug!(
        term = correct.term(),
        similarity = result.similarity,
        ?outcome,
        "judged answer"
    );

    acknowledge(io)?;
    Ok(outcome)
}

/// Exact comparison against the record's year. Not scored.
pub fn judge_year(correct: &TermRecord, answer: &str) -> bool {
    correct.year() == Some(answer)
}

/// Compare a normalized true/false answer with what was asserted.
pub fn judge_true_false(set: &mut TermSet, asserted_true: bool, answer: bool) -> bool {
    let correct = asserted_true == answer;
    if !correct {
        set.record_miss();
    }
    correct
}

/// How one slot of a matching exercise was judged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SlotVerdict {
    Correct,
    /// A typo the user chose to accept.
    Forgiven,
    NotAnswered,
    Incorrect { given: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotFeedback {
    pub slot: usize,
    pub expected: String,
    #[serde(flatten)]
    pub verdict: SlotVerdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchingReport {
    pub incorrect: usize,
    pub slots: Vec<SlotFeedback>,
}

/// Judge a slot -> term mapping against the records in display order.
/// Slots are numbered from 1.
pub fn judge_matching(
    set: &mut TermSet,
    correct: &[TermRecord],
    answers: &BTreeMap<usize, String>,
    io: &mut dyn Interaction,
) -> Result<MatchingReport> {
    let mut slots = Vec::with_capacity(correct.len());
    let mut incorrect = 0;

    for (index, record) in correct.iter().enumerate() {
        let slot = index + 1;
        let expected = record.term().to_string();

        let verdict = match answers.get(&slot) {
            None => {
                io.show(&Event::SlotNotAnswered {
                    slot,
                    expected: expected.clone(),
                })?;
                acknowledge(io)?;
                SlotVerdict::NotAnswered
            }
            Some(given) => {
                let result = compare_answers(given, &expected, set.similarity_threshold());
                match result.verdict {
                    Verdict::Exact => SlotVerdict::Correct,
                    Verdict::NearMiss | Verdict::Wrong => {
                        io.show(&Event::SlotIncorrect {
                            slot,
                            expected: expected.clone(),
                            given: given.clone(),
                        })?;
                        let forgiven = result.verdict == Verdict::NearMiss
                            && confirm(io, &Request::ConfirmOverwrite)?;
                        if forgiven {
                            io.show(&Event::Overwritten)?;
                        }
                        acknowledge(io)?;
                        if forgiven {
                            SlotVerdict::Forgiven
                        } else {
                            SlotVerdict::Incorrect {
                                given: given.clone(),
                            }
                        }
                    }
                }
            }
        };

        if matches!(
            verdict,
            SlotVerdict::NotAnswered | SlotVerdict::Incorrect { .. }
        ) {
            incorrect += 1;
            set.record_miss();
        }
        slots.push(SlotFeedback {
            slot,
            expected,
            verdict,
        });
    }

    Ok(MatchingReport { incorrect, slots })
}

/// Parse `idx term, idx term, ...` into a slot -> term mapping.
///
/// Each pair is split on its first space, so terms may contain spaces.
/// Blank input is an empty mapping.
pub fn parse_pairs(input: &str) -> Result<BTreeMap<usize, String>> {
    let mut pairs = BTreeMap::new();
    if input.trim().is_empty() {
        return Ok(pairs);
    }

    for pair in input.trim().split(", ") {
        let (index, term) = pair
            .trim()
            .split_once(' ')
            .ok_or_else(|| LearnerError::format(input, format!("{pair:?} is not a pair")))?;

        if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
            return Err(LearnerError::format(
                input,
                format!("{index:?} is not a slot number"),
            ));
        }
        let slot = index
            .parse::<usize>()
            .map_err(|_| LearnerError::format(input, format!("{index:?} is out of range")))?;

        let term = term.trim();
        if term.is_empty() {
            return Err(LearnerError::format(
                input,
                format!("slot {slot} has no term"),
            ));
        }
        if joins_next_pair(term) {
            return Err(LearnerError::format(
                input,
                format!("{pair:?} is missing a space after a comma"),
            ));
        }
        pairs.insert(slot, term.to_string());
    }

    Ok(pairs)
}

/// `Paris,2 Berlin`: a comma after a word, then a slot number.
fn joins_next_pair(term: &str) -> bool {
    term.match_indices(',').any(|(at, _)| {
        let after_word = term[..at]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_ascii_digit());
        let rest = term[at + 1..].trim_start();
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        after_word && digits > 0 && (rest[digits..].is_empty() || rest[digits..].starts_with(' '))
    })
}
