use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{LearnerError, Result};
use crate::exercise::{check_capacity, Drill, MULTIPLE_CHOICE_OPTIONS};
use crate::interaction::{is_decline, Event, Request};
use crate::set::TermSet;
use crate::types::{ExerciseKind, Settings};

/// Score above which a term is asked as a free-text question.
const WRITE_AFTER_SCORE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearnOptions {
    pub round_length: usize,
    /// Ask for the year of dated records instead of just showing it.
    pub ask_years: bool,
}

impl From<&Settings> for LearnOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            round_length: settings.round_length,
            ask_years: settings.ask_years,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnEnd {
    Mastered,
    Declined,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearnSummary {
    pub set_name: String,
    pub end: LearnEnd,
    pub rounds: usize,
    pub questions: usize,
    pub total: u32,
    pub ceiling: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drill the set in rounds until every term is mastered or the user stops.
///
/// Scores start from zero. Terms at 0..=2 are asked as multiple choice,
/// terms at 3..=5 as free text. The session ends the moment the last term
/// reaches the mastery score, even partway through a round.
pub fn learn(drill: &mut Drill<'_>, options: &LearnOptions) -> Result<LearnSummary> {
    if options.round_length == 0 {
        return Err(LearnerError::Config(
            "round length must be at least 1".to_string(),
        ));
    }
    check_capacity(
        drill.set(),
        ExerciseKind::MultipleChoice,
        MULTIPLE_CHOICE_OPTIONS,
    )?;

    let started_at = Utc::now();
    drill.set_mut().mastery_mut().reset_all();
    info!(
        set = drill.set().name(),
        terms = drill.set().len(),
        round_length = options.round_length,
        "learn session started"
    );

    let mut rounds = 0;
    let mut questions = 0;
    let end = 'session: loop {
        rounds += 1;

        for number in 1..=options.round_length {
            let Some(record) = drill.pick_unmastered() else {
                drill.show(&Event::AllMastered)?;
                break 'session LearnEnd::Mastered;
            };
            drill.show(&Event::QuestionHeader { number })?;
            questions += 1;

            let score = drill.set().mastery().score(record.term());
            if score > WRITE_AFTER_SCORE {
                drill.write_answer(Some(record.clone()))?;
            } else {
                drill.multiple_choice(MULTIPLE_CHOICE_OPTIONS, Some(record.clone()))?;
            }
            drill.year_prompt(&record, options.ask_years)?;

            if drill.set().mastery().all_mastered() {
                drill.show(&Event::AllMastered)?;
                break 'session LearnEnd::Mastered;
            }
        }

        let result = round_result(drill.set(), rounds);
        drill.show(&result)?;
        let answer = drill.ask(&Request::ContinueRound { round: rounds })?;
        if is_decline(&answer) {
            break LearnEnd::Declined;
        }
        debug!(round = rounds, "starting next round");
    };

    let mastery = drill.set().mastery();
    let summary = LearnSummary {
        set_name: drill.set().name().to_string(),
        end,
        rounds,
        questions,
        total: mastery.total(),
        ceiling: mastery.ceiling(),
        started_at,
        finished_at: Utc::now(),
    };
    info!(?end, rounds, questions, "learn session finished");
    Ok(summary)
}

fn round_result(set: &TermSet, round: usize) -> Event {
    let mastery = set.mastery();
    Event::RoundResult {
        round,
        scores: mastery.progress(),
        total: mastery.total(),
        ceiling: mastery.ceiling(),
    }
}
