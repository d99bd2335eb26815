//! Term sets and the random draws exercises make from them.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{LearnerError, Result};
use crate::mastery::{MasteryTracker, MASTERY_SCORE};
use crate::random::RandomSource;
use crate::types::{same_term, TermRecord};

/// Minimum similarity for an answer to be offered as a typo.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Summary printed after a set is loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetInfo {
    pub name: String,
    pub terms: usize,
    pub similarity_threshold: f64,
}

/// An ordered collection of records with their mastery scores.
#[derive(Debug, Clone)]
pub struct TermSet {
    name: String,
    items: Vec<TermRecord>,
    mastery: MasteryTracker,
    missed_count: usize,
    similarity_threshold: f64,
}

impl TermSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            mastery: MasteryTracker::new(),
            missed_count: 0,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn from_records(
        name: impl Into<String>,
        records: impl IntoIterator<Item = TermRecord>,
    ) -> Self {
        let mut set = Self::new(name);
        for record in records {
            set.add(record);
        }
        set
    }

    pub fn with_threshold(mut self, similarity_threshold: f64) -> Self {
        self.similarity_threshold = similarity_threshold;
        self
    }

    /// Append a record and seed its score at 0.
    pub fn add(&mut self, record: TermRecord) {
        self.mastery.seed(record.term());
        self.items.push(record);
    }

    /// Items of `self` then `other`; `other`'s scores win on shared terms.
    pub fn union(&self, other: &TermSet) -> TermSet {
        let mut mastery = self.mastery.clone();
        mastery.merge(&other.mastery);

        TermSet {
            name: "union".to_string(),
            items: self.items.iter().chain(&other.items).cloned().collect(),
            mastery,
            missed_count: 0,
            similarity_threshold: self.similarity_threshold,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[TermRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    pub fn mastery(&self) -> &MasteryTracker {
        &self.mastery
    }

    pub fn mastery_mut(&mut self) -> &mut MasteryTracker {
        &mut self.mastery
    }

    pub fn missed_count(&self) -> usize {
        self.missed_count
    }

    pub fn record_miss(&mut self) {
        self.missed_count += 1;
    }

    pub fn reset_missed(&mut self) {
        self.missed_count = 0;
    }

    pub fn info(&self) -> SetInfo {
        SetInfo {
            name: self.name.clone(),
            terms: self.items.len(),
            similarity_threshold: self.similarity_threshold,
        }
    }

    /// Number of terms that differ ignoring case.
    pub fn distinct_terms(&self) -> usize {
        self.items
            .iter()
            .map(|record| record.term().to_lowercase())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn random_record(&self, rng: &mut dyn RandomSource) -> Result<&TermRecord> {
        if self.items.is_empty() {
            return Err(LearnerError::NotEnoughTerms {
                exercise: "question",
                needed: 1,
                available: 0,
            });
        }
        Ok(&self.items[rng.pick_index(self.items.len())])
    }

    /// `amount` distinct records in random order.
    pub fn random_records(
        &self,
        rng: &mut dyn RandomSource,
        amount: usize,
    ) -> Result<Vec<&TermRecord>> {
        if amount > self.items.len() {
            return Err(LearnerError::NotEnoughTerms {
                exercise: "connect",
                needed: amount,
                available: self.items.len(),
            });
        }
        Ok(rng
            .pick_distinct(self.items.len(), amount)
            .into_iter()
            .map(|i| &self.items[i])
            .collect())
    }

    /// `amount` distinct records, none sharing the term of `correct`.
    pub fn distractors(
        &self,
        rng: &mut dyn RandomSource,
        correct: &TermRecord,
        amount: usize,
    ) -> Result<Vec<&TermRecord>> {
        let candidates = self.others(correct.term());
        if amount > candidates.len() {
            return Err(LearnerError::NotEnoughTerms {
                exercise: "multiple choice",
                needed: amount + 1,
                available: self.distinct_terms(),
            });
        }
        Ok(rng
            .pick_distinct(candidates.len(), amount)
            .into_iter()
            .map(|i| candidates[i])
            .collect())
    }

    /// Two records with different terms: the first lends its hint, the
    /// second its term.
    pub fn mismatched_pair(
        &self,
        rng: &mut dyn RandomSource,
    ) -> Result<(&TermRecord, &TermRecord)> {
        let not_enough = || LearnerError::NotEnoughTerms {
            exercise: "true/false",
            needed: 2,
            available: self.distinct_terms(),
        };

        let first = self.random_record(rng).map_err(|_| not_enough())?;
        let others = self.others(first.term());
        if others.is_empty() {
            return Err(not_enough());
        }
        Ok((first, others[rng.pick_index(others.len())]))
    }

    /// A record whose term is not yet mastered, if any.
    pub fn random_unmastered(&self, rng: &mut dyn RandomSource) -> Option<&TermRecord> {
        let open: Vec<&TermRecord> = self
            .items
            .iter()
            .filter(|record| self.mastery.score(record.term()) < MASTERY_SCORE)
            .collect();
        if open.is_empty() {
            return None;
        }
        Some(open[rng.pick_index(open.len())])
    }

    /// First record of every term other than `term`, one per distinct term.
    fn others(&self, term: &str) -> Vec<&TermRecord> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|record| !same_term(record, term))
            .filter(|record| seen.insert(record.term().to_lowercase()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::StdRandom;
    use pretty_assertions::assert_eq;

    fn record(term: &str) -> TermRecord {
        TermRecord::new(term, &format!("Definition of {term}"), ". ", None)
    }

    fn capitals() -> TermSet {
        TermSet::from_records(
            "capitals",
            ["Paris", "Berlin", "Rome", "Madrid", "Oslo"].map(record),
        )
    }

    #[test]
    fn add_seeds_score() {
        let mut set = TermSet::new("empty");
        assert!(set.is_empty());
        set.add(record("Paris"));
        assert_eq!(set.len(), 1);
        assert!(set.mastery().contains("Paris"));
        assert_eq!(set.mastery().score("Paris"), 0);
    }

    #[test]
    fn sets_do_not_share_containers() {
        let mut first = TermSet::new("first");
        first.add(record("Paris"));
        let second = TermSet::new("second");
        assert!(second.is_empty());
        assert!(second.mastery().is_empty());
    }

    #[test]
    fn union_appends_items_and_prefers_second_scores() {
        let mut left = TermSet::from_records("left", [record("Paris"), record("Berlin")]);
        left.mastery_mut().on_correct("Paris");
        left.mastery_mut().on_correct("Berlin");
        let mut right = TermSet::from_records("right", [record("Paris"), record("Rome")]);
        right.mastery_mut().on_correct("Rome");

        let union = left.union(&right);
        assert_eq!(union.name(), "union");
        let terms: Vec<_> = union.items().iter().map(TermRecord::term).collect();
        assert_eq!(terms, ["Paris", "Berlin", "Paris", "Rome"]);
        assert_eq!(union.mastery().score("Paris"), 0);
        assert_eq!(union.mastery().score("Berlin"), 1);
        assert_eq!(union.mastery().score("Rome"), 1);
    }

    #[test]
    fn distractors_exclude_correct_term() {
        let set = capitals();
        let mut rng = StdRandom::seeded(11);
        let correct = record("paris");
        for _ in 0..50 {
            let picked = set.distractors(&mut rng, &correct, 3).unwrap();
            assert_eq!(picked.len(), 3);
            assert!(picked.iter().all(|r| !same_term(r, "Paris")));
            let unique: HashSet<_> = picked.iter().map(|r| r.term()).collect();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn distractors_never_repeat_a_term() {
        let set = TermSet::from_records(
            "merged",
            ["Paris", "Berlin", "Rome", "Madrid", "madrid"].map(record),
        );
        let correct = record("Paris");
        for seed in 0..200 {
            let mut rng = StdRandom::seeded(seed);
            let picked = set.distractors(&mut rng, &correct, 3).unwrap();
            let unique: HashSet<_> = picked.iter().map(|r| r.term().to_lowercase()).collect();
            assert_eq!(unique.len(), 3, "seed {seed}");
        }
    }

    #[test]
    fn repeated_terms_do_not_count_as_distractors() {
        let set = TermSet::from_records(
            "merged",
            ["Paris", "Berlin", "Berlin", "Rome", "Rome"].map(record),
        );
        let mut rng = StdRandom::seeded(3);
        let result = set.distractors(&mut rng, &record("Paris"), 3);
        assert!(matches!(
            result,
            Err(LearnerError::NotEnoughTerms { available: 3, .. })
        ));
    }

    #[test]
    fn too_many_distractors_is_an_error() {
        let set = TermSet::from_records("small", [record("Paris"), record("Berlin")]);
        let mut rng = StdRandom::seeded(1);
        let result = set.distractors(&mut rng, &record("Paris"), 3);
        assert!(matches!(
            result,
            Err(LearnerError::NotEnoughTerms {
                needed: 4,
                available: 2,
                ..
            })
        ));
    }

    #[test]
    fn random_records_are_distinct() {
        let set = capitals();
        let mut rng = StdRandom::seeded(5);
        let picked = set.random_records(&mut rng, 5).unwrap();
        let unique: HashSet<_> = picked.iter().map(|r| r.term()).collect();
        assert_eq!(unique.len(), 5);
        assert!(set.random_records(&mut rng, 6).is_err());
    }

    #[test]
    fn mismatched_pair_has_different_terms() {
        let set = capitals();
        let mut rng = StdRandom::seeded(9);
        for _ in 0..50 {
            let (hint_from, term_from) = set.mismatched_pair(&mut rng).unwrap();
            assert!(!same_term(hint_from, term_from.term()));
        }
    }

    #[test]
    fn mismatched_pair_needs_two_terms() {
        let set = TermSet::from_records("twins", [record("Paris"), record("PARIS")]);
        let mut rng = StdRandom::seeded(9);
        assert!(set.mismatched_pair(&mut rng).is_err());
    }

    #[test]
    fn random_unmastered_skips_mastered_terms() {
        let mut set = capitals();
        for term in ["Paris", "Berlin", "Rome", "Madrid"] {
            for _ in 0..MASTERY_SCORE {
                set.mastery_mut().on_correct(term);
            }
        }
        let mut rng = StdRandom::seeded(2);
        for _ in 0..20 {
            assert_eq!(set.random_unmastered(&mut rng).unwrap().term(), "Oslo");
        }
        for _ in 0..MASTERY_SCORE {
            set.mastery_mut().on_correct("Oslo");
        }
        assert!(set.random_unmastered(&mut rng).is_none());
    }

    #[test]
    fn missed_count_resets() {
        let mut set = capitals();
        set.record_miss();
        set.record_miss();
        assert_eq!(set.missed_count(), 2);
        set.reset_missed();
        assert_eq!(set.missed_count(), 0);
    }
}
