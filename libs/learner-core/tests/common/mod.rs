//! Common test utilities for integration tests.
//!
//! [`Oracle`] plays a user who knows every card: it reads the hints out of
//! the events it is shown and answers each request correctly.

#![allow(dead_code)]

pub mod fixtures;

use std::collections::HashMap;

use learner_core::{Event, Interaction, LearnerError, Request, Result, TermSet};

#[derive(Debug, Clone)]
struct Card {
    term: String,
    year: Option<String>,
}

#[derive(Debug, Default)]
pub struct Oracle {
    cards: HashMap<String, Card>,
    term: Option<String>,
    year: Option<String>,
    truth: Option<bool>,
    pairs: Option<String>,
    /// Decline to continue after this many rounds.
    rounds: Option<usize>,
    pub events: Vec<Event>,
    pub requests: Vec<Request>,
}

impl Oracle {
    pub fn new(set: &TermSet) -> Self {
        let cards = set
            .items()
            .iter()
            .flat_map(|record| {
                let card = Card {
                    term: record.term().to_string(),
                    year: record.year().map(str::to_string),
                };
                record
                    .hints()
                    .iter()
                    .map(move |hint| (hint.clone(), card.clone()))
            })
            .collect();
        Self {
            cards,
            ..Default::default()
        }
    }

    pub fn stop_after_rounds(mut self, rounds: usize) -> Self {
        self.rounds = Some(rounds);
        self
    }

    pub fn count_events(&self, matches: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|event| matches(event)).count()
    }

    pub fn count_requests(&self, request: &Request) -> usize {
        self.requests.iter().filter(|r| *r == request).count()
    }

    fn card(&self, hint: &str) -> Card {
        self.cards
            .get(hint)
            .cloned()
            .unwrap_or_else(|| panic!("no card has the hint {hint:?}"))
    }
}

impl Interaction for Oracle {
    fn show(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::MultipleChoice { hint, .. } | Event::WriteAnswer { hint } => {
                let card = self.card(hint);
                self.term = Some(card.term);
                self.year = card.year;
            }
            Event::TrueFalse { hint, term } => {
                let card = self.card(hint);
                self.truth = Some(card.term.to_lowercase() == term.to_lowercase());
            }
            Event::Connect { hints, .. } => {
                let pairs: Vec<String> = hints
                    .iter()
                    .enumerate()
                    .map(|(index, hint)| format!("{} {}", index + 1, self.card(hint).term))
                    .collect();
                self.pairs = Some(pairs.join(", "));
            }
            _ => {}
        }
        self.events.push(event.clone());
        Ok(())
    }

    fn ask(&mut self, request: &Request) -> Result<String> {
        self.requests.push(request.clone());
        let answer = match request {
            Request::TermAnswer => self.term.clone(),
            Request::YearAnswer => self.year.clone(),
            Request::TrueFalse | Request::TrueFalseRetry => self.truth.map(|t| t.to_string()),
            Request::ConnectPairs => self.pairs.clone(),
            Request::ConfirmOverwrite => Some("y".to_string()),
            Request::ContinueRound { round } => {
                let stop = self.rounds.is_some_and(|max| *round >= max);
                Some(if stop { "n" } else { "y" }.to_string())
            }
            Request::FlashcardCommand => Some("e".to_string()),
            Request::StartOver => Some("n".to_string()),
            Request::Acknowledge => Some(String::new()),
        };
        answer.ok_or(LearnerError::InputClosed)
    }
}
