//! Question generators.
//!
//! A [`Drill`] borrows the set, the randomness source and the shell for the
//! length of a session and turns each exercise into events, requests and a
//! judged result.

use tracing::{debug, warn};

use crate::error::{LearnerError, Result};
use crate::interaction::{acknowledge, ask_truth, Event, Interaction, Request};
use crate::judge::{self, MatchingReport, Outcome};
use crate::random::{shuffled, RandomSource};
use crate::set::TermSet;
use crate::types::{ExerciseKind, TermRecord};

/// Candidates shown in a multiple choice question.
pub const MULTIPLE_CHOICE_OPTIONS: usize = 4;

/// Check that `set` can supply `count` questions of `kind` before any are asked.
/// For connect, `count` is the number of pairs.
pub fn check_capacity(set: &TermSet, kind: ExerciseKind, count: usize) -> Result<()> {
    if count == 0 {
        return Ok(());
    }
    let (needed, available) = match kind {
        ExerciseKind::TrueFalse => (2, set.distinct_terms()),
        ExerciseKind::MultipleChoice => (MULTIPLE_CHOICE_OPTIONS, set.distinct_terms()),
        ExerciseKind::Write => (1, set.len()),
        ExerciseKind::Connect => (count, set.len()),
    };
    if available < needed {
        return Err(LearnerError::NotEnoughTerms {
            exercise: kind.as_str(),
            needed,
            available,
        });
    }
    Ok(())
}

pub struct Drill<'a> {
    set: &'a mut TermSet,
    rng: &'a mut dyn RandomSource,
    io: &'a mut dyn Interaction,
}

impl<'a> Drill<'a> {
    pub fn new(
        set: &'a mut TermSet,
        rng: &'a mut dyn RandomSource,
        io: &'a mut dyn Interaction,
    ) -> Self {
        Self { set, rng, io }
    }

    pub fn set(&self) -> &TermSet {
        &*self.set
    }

    pub fn set_mut(&mut self) -> &mut TermSet {
        &mut *self.set
    }

    pub fn show(&mut self, event: &Event) -> Result<()> {
        self.io.show(event)
    }

    pub fn ask(&mut self, request: &Request) -> Result<String> {
        self.io.ask(request)
    }

    /// A record whose term is below the mastery score.
    pub fn pick_unmastered(&mut self) -> Option<TermRecord> {
        self.set.random_unmastered(self.rng).cloned()
    }

    /// Show a hint and `options` candidate terms; judge the typed term.
    pub fn multiple_choice(
        &mut self,
        options: usize,
        correct: Option<TermRecord>,
    ) -> Result<Outcome> {
        let correct = self.resolve(correct)?;

        let mut candidates: Vec<String> = self
            .set
            .distractors(self.rng, &correct, options.saturating_sub(1))?
            .into_iter()
            .map(|record| record.term().to_string())
            .collect();
        candidates.push(correct.term().to_string());

        let hint = correct.random_hint(self.rng).to_string();
        let options = shuffled(self.rng, &candidates);
        self.io.show(&Event::MultipleChoice { hint, options })?;

        let answer = self.io.ask(&Request::TermAnswer)?;
        judge::judge_single(self.set, &correct, &answer, self.io)
    }

    /// Show a hint; judge the typed term.
    pub fn write_answer(&mut self, correct: Option<TermRecord>) -> Result<Outcome> {
        let correct = self.resolve(correct)?;

        let hint = correct.random_hint(self.rng).to_string();
        self.io.show(&Event::WriteAnswer { hint })?;

        let answer = self.io.ask(&Request::TermAnswer)?;
        judge::judge_single(self.set, &correct, &answer, self.io)
    }

    /// Pair a hint with a term, half the time its own. Returns whether the
    /// user judged the pairing correctly.
    pub fn true_false(&mut self) -> Result<bool> {
        let asserted = self.rng.coin_flip();

        let (hint, term) = if asserted {
            let record = self.set.random_record(self.rng)?;
            (record.random_hint(self.rng).to_string(), record.term().to_string())
        } else {
            let (hint_from, term_from) = self.set.mismatched_pair(self.rng)?;
            (
                hint_from.random_hint(self.rng).to_string(),
                term_from.term().to_string(),
            )
        };
        self.io.show(&Event::TrueFalse { hint, term })?;

        let answer = ask_truth(self.io)?;
        let correct = judge::judge_true_false(self.set, asserted, answer);
        if correct {
            self.io.show(&Event::Correct)?;
        } else {
            self.io.show(&Event::TrueFalseIncorrect { expected: asserted })?;
        }
        acknowledge(self.io)?;
        Ok(correct)
    }

    /// Match `count` numbered hints with a shuffled list of their terms.
    pub fn connect(&mut self, count: usize) -> Result<MatchingReport> {
        let picked: Vec<TermRecord> = self
            .set
            .random_records(self.rng, count)?
            .into_iter()
            .cloned()
            .collect();

        let terms: Vec<String> = shuffled(
            self.rng,
            &picked.iter().map(|r| r.term().to_string()).collect::<Vec<_>>(),
        );
        let order = shuffled(self.rng, &picked);
        let hints = order
            .iter()
            .map(|record| record.random_hint(self.rng).to_string())
            .collect();
        self.io.show(&Event::Connect { hints, terms })?;

        let answers = loop {
            let raw = self.io.ask(&Request::ConnectPairs)?;
            match judge::parse_pairs(&raw) {
                Ok(answers) => break answers,
                Err(error @ LearnerError::Format { .. }) => {
                    warn!(%error, "malformed connect answer");
                    self.io.show(&Event::FormatError {
                        message: error.to_string(),
                    })?;
                }
                Err(error) => return Err(error),
            }
        };

        let report = judge::judge_matching(self.set, &order, &answers, self.io)?;
        self.io.show(&Event::ConnectResult {
            incorrect: report.incorrect,
            total: order.len(),
        })?;
        acknowledge(self.io)?;
        Ok(report)
    }

    /// Follow-up for records with a year: ask and judge it, or just show it.
    /// Returns `None` when nothing was judged.
    pub fn year_prompt(&mut self, record: &TermRecord, judged: bool) -> Result<Option<bool>> {
        let Some(year) = record.year() else {
            return Ok(None);
        };

        if !judged {
            self.io.show(&Event::YearShown {
                year: year.to_string(),
            })?;
            acknowledge(self.io)?;
            return Ok(None);
        }

        self.io.show(&Event::YearQuestion)?;
        let answer = self.io.ask(&Request::YearAnswer)?;
        let correct = judge::judge_year(record, &answer);
        if correct {
            self.io.show(&Event::Correct)?;
        } else {
            self.io.show(&Event::Incorrect {
                expected: year.to_string(),
            })?;
        }
        acknowledge(self.io)?;
        debug!(term = record.term(), correct, "judged year");
        Ok(Some(correct))
    }

    fn resolve(&mut self, correct: Option<TermRecord>) -> Result<TermRecord> {
        match correct {
            Some(record) => Ok(record),
            None => Ok(self.set.random_record(self.rng)?.clone()),
        }
    }
}
