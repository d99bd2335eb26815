//! Per-term mastery scores.

use std::collections::BTreeMap;

use serde::Serialize;

/// Score at which a term counts as mastered.
pub const MASTERY_SCORE: u32 = 6;

/// Mapping from term to how many net correct answers it has collected.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MasteryTracker {
    scores: BTreeMap<String, u32>,
}

/// One row of a round result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermScore {
    pub term: String,
    pub score: u32,
}

impl MasteryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `term` at zero, overwriting any earlier score.
    pub fn seed(&mut self, term: &str) {
        self.scores.insert(term.to_string(), 0);
    }

    /// No upper clamp here; selection stops drawing a term once it passes 5.
    pub fn on_correct(&mut self, term: &str) {
        *self.scores.entry(term.to_string()).or_insert(0) += 1;
    }

    pub fn on_incorrect(&mut self, term: &str) {
        let score = self.scores.entry(term.to_string()).or_insert(0);
        *score = score.saturating_sub(1);
    }

    /// Zero the given terms' scores. Untracked terms are ignored.
    pub fn reset<'a>(&mut self, terms: impl IntoIterator<Item = &'a str>) {
        for term in terms {
            if let Some(score) = self.scores.get_mut(term) {
                *score = 0;
            }
        }
    }

    pub fn reset_all(&mut self) {
        self.scores.values_mut().for_each(|score| *score = 0);
    }

    pub fn score(&self, term: &str) -> u32 {
        self.scores.get(term).copied().unwrap_or(0)
    }

    pub fn is_mastered(&self, term: &str) -> bool {
        self.score(term) >= MASTERY_SCORE
    }

    /// True iff every tracked score is exactly the mastery score.
    pub fn all_mastered(&self) -> bool {
        self.scores.values().all(|&score| score == MASTERY_SCORE)
    }

    pub fn total(&self) -> u32 {
        self.scores.values().sum()
    }

    /// Highest reachable total.
    pub fn ceiling(&self) -> u32 {
        self.scores.len() as u32 * MASTERY_SCORE
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.scores.contains_key(term)
    }

    /// Terms with a non-zero score, for round results.
    pub fn progress(&self) -> Vec<TermScore> {
        self.scores
            .iter()
            .filter(|(_, score)| **score > 0)
            .map(|(term, &score)| TermScore {
                term: term.clone(),
                score,
            })
            .collect()
    }

    /// Fold in another tracker; its scores win on collisions.
    pub fn merge(&mut self, other: &MasteryTracker) {
        self.scores
            .extend(other.scores.iter().map(|(term, &score)| (term.clone(), score)));
    }
}
