use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::exercise::{check_capacity, Drill, MULTIPLE_CHOICE_OPTIONS};
use crate::interaction::Event;
use crate::types::{ExerciseKind, TestBlock};

/// Misses collected by one block of a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockResult {
    pub kind: ExerciseKind,
    pub questions: usize,
    pub missed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestReport {
    pub set_name: String,
    pub missed: usize,
    /// Sum of every configured count, skipped blocks included.
    pub total: usize,
    pub blocks: Vec<BlockResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Run the configured blocks in order and report the misses.
///
/// Unknown kinds are skipped. Every recognised block is checked against the
/// set before the first question is asked.
pub fn run_test(drill: &mut Drill<'_>, configuration: &[TestBlock]) -> Result<TestReport> {
    for block in configuration {
        if let Some(kind) = ExerciseKind::from_str(&block.kind) {
            check_capacity(drill.set(), kind, block.count)?;
        }
    }

    let started_at = Utc::now();
    let total: usize = configuration.iter().map(|block| block.count).sum();
    drill.set_mut().reset_missed();
    info!(
        set = drill.set().name(),
        blocks = configuration.len(),
        total,
        "test started"
    );

    let mut blocks = Vec::new();
    for block in configuration {
        let Some(kind) = ExerciseKind::from_str(&block.kind) else {
            debug!(kind = %block.kind, "skipping unknown exercise kind");
            continue;
        };
        let missed_before = drill.set().missed_count();

        drill.show(&Event::SectionHeader {
            title: kind.title().to_string(),
        })?;
        match kind {
            ExerciseKind::Connect => {
                if block.count > 0 {
                    drill.connect(block.count)?;
                }
            }
            single => {
                for number in 1..=block.count {
                    drill.show(&Event::QuestionHeader { number })?;
                    match single {
                        ExerciseKind::TrueFalse => {
                            drill.true_false()?;
                        }
                        ExerciseKind::MultipleChoice => {
                            drill.multiple_choice(MULTIPLE_CHOICE_OPTIONS, None)?;
                        }
                        _ => {
                            drill.write_answer(None)?;
                        }
                    }
                }
            }
        }

        blocks.push(BlockResult {
            kind,
            questions: block.count,
            missed: drill.set().missed_count() - missed_before,
        });
    }

    let missed = drill.set().missed_count();
    drill.show(&Event::TestResult { missed, total })?;
    info!(missed, total, "test finished");

    Ok(TestReport {
        set_name: drill.set().name().to_string(),
        missed,
        total,
        blocks,
        started_at,
        finished_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LearnerError;
    use crate::interaction::testing::Scripted;
    use crate::random::StdRandom;
    use crate::set::TermSet;
    use crate::types::TermRecord;
    use pretty_assertions::assert_eq;

    fn capitals() -> TermSet {
        TermSet::from_records(
            "capitals",
            ["Paris", "Berlin", "Rome", "Madrid", "Oslo"]
                .map(|term| TermRecord::new(term, &format!("City {term}"), ". ", None)),
        )
    }

    #[test]
    fn unknown_kinds_are_skipped_but_counted() {
        let mut set = capitals();
        let mut rng = StdRandom::seeded(7);
        let mut io = Scripted::new(&["zzz", "zzz"]);
        let configuration = [TestBlock::new("essay", 3), TestBlock::new("write", 2)];

        let report = run_test(&mut Drill::new(&mut set, &mut rng, &mut io), &configuration).unwrap();
        assert_eq!(report.missed, 2);
        assert_eq!(report.total, 5);
        assert_eq!(
            report.blocks,
            vec![BlockResult {
                kind: ExerciseKind::Write,
                questions: 2,
                missed: 2
            }]
        );
        assert_eq!(
            io.events.last(),
            Some(&Event::TestResult {
                missed: 2,
                total: 5
            })
        );
        let sections: Vec<_> = io
            .events
            .iter()
            .filter(|e| matches!(e, Event::SectionHeader { .. }))
            .collect();
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn connect_block_is_one_exercise() {
        let mut set = capitals();
        let mut rng = StdRandom::seeded(7);
        let mut io = Scripted::new(&[""]);
        let configuration = [TestBlock::new("connect", 4)];

        let report = run_test(&mut Drill::new(&mut set, &mut rng, &mut io), &configuration).unwrap();
        assert_eq!(report.missed, 4);
        assert_eq!(report.total, 4);
        assert!(!io
            .events
            .iter()
            .any(|e| matches!(e, Event::QuestionHeader { .. })));
        assert_eq!(
            io.events
                .iter()
                .filter(|e| matches!(e, Event::Connect { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn missed_count_resets_per_run() {
        let mut set = capitals();
        set.record_miss();
        let mut rng = StdRandom::seeded(7);
        let mut io = Scripted::new(&["Paris"]);
        let configuration = [TestBlock::new("write", 0)];

        let report = run_test(&mut Drill::new(&mut set, &mut rng, &mut io), &configuration).unwrap();
        assert_eq!(report.missed, 0);
        assert_eq!(report.total, 0);
        assert_eq!(io.remaining(), 1);
    }

    #[test]
    fn oversized_connect_fails_before_any_question() {
        let mut set = capitals();
        let mut rng = StdRandom::seeded(7);
        let mut io = Scripted::new(&[]);
        let configuration = [TestBlock::new("write", 1), TestBlock::new("connect", 8)];

        let result = run_test(&mut Drill::new(&mut set, &mut rng, &mut io), &configuration);
        assert!(matches!(
            result,
            Err(LearnerError::NotEnoughTerms {
                needed: 8,
                available: 5,
                ..
            })
        ));
        assert!(io.events.is_empty());
    }
}
