//! Core types for the drilling engine.

use serde::{Deserialize, Serialize};

use crate::error::{LearnerError, Result};
use crate::random::RandomSource;
use crate::set::DEFAULT_SIMILARITY_THRESHOLD;

/// Replaces the term wherever it appears inside its own definition.
pub const PLACEHOLDER: &str = "___";

/// One term with its censored definition split into hints.
#[derive(Debug, Clone, Serialize)]
pub struct TermRecord {
    term: String,
    definition: String,
    hints: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<String>,
}

impl TermRecord {
    /// Build a record, censoring `term` out of `definition` and splitting the
    /// result into hints on `hint_delimiter`.
    pub fn new(
        term: impl Into<String>,
        definition: &str,
        hint_delimiter: &str,
        year: Option<String>,
    ) -> Self {
        let term = term.into();
        let definition = censor(&term, definition);
        let hints = if hint_delimiter.is_empty() {
            vec![definition.clone()]
        } else {
            definition
                .split(hint_delimiter)
                .map(str::to_string)
                .collect()
        };

        Self {
            term,
            definition,
            hints,
            year,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    /// One hint chosen uniformly at random.
    pub fn random_hint(&self, rng: &mut dyn RandomSource) -> &str {
        &self.hints[rng.pick_index(self.hints.len())]
    }
}

fn censor(term: &str, definition: &str) -> String {
    if term.is_empty() {
        return definition.to_string();
    }
    definition.replace(term, PLACEHOLDER)
}

/// Case-insensitive comparison of a record's term with a raw string.
pub fn same_term(record: &TermRecord, other: &str) -> bool {
    record.term.to_lowercase() == other.to_lowercase()
}

/// Exercise modalities a test can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    TrueFalse,
    MultipleChoice,
    Write,
    Connect,
}

impl ExerciseKind {
    /// Get the configuration name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrueFalse => "true_false",
            Self::MultipleChoice => "multiple_choice",
            Self::Write => "write",
            Self::Connect => "connect",
        }
    }

    /// Parse from a configuration name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "true_false" => Some(Self::TrueFalse),
            "multiple_choice" => Some(Self::MultipleChoice),
            "write" => Some(Self::Write),
            "connect" => Some(Self::Connect),
            _ => None,
        }
    }

    /// Section heading shown before a block of this kind.
    pub fn title(&self) -> &'static str {
        match self {
            Self::TrueFalse => "True OR False?",
            Self::MultipleChoice => "Multiple Choice",
            Self::Write => "Correct Answer",
            Self::Connect => "Connect",
        }
    }
}

/// One `(kind, count)` entry of a test configuration.
///
/// `kind` stays a raw string so unknown kinds can be carried and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestBlock {
    pub kind: String,
    pub count: usize,
}

impl TestBlock {
    pub fn new(kind: impl Into<String>, count: usize) -> Self {
        Self {
            kind: kind.into(),
            count,
        }
    }
}

/// The test layout used when none is configured.
pub fn default_test_configuration() -> Vec<TestBlock> {
    vec![
        TestBlock::new("true_false", 4),
        TestBlock::new("multiple_choice", 4),
        TestBlock::new("connect", 8),
        TestBlock::new("write", 4),
    ]
}

/// Delimiters of the flat text source format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delimiters {
    pub card: String,
    pub field: String,
    pub hint: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            card: "\n".to_string(),
            field: " - ".to_string(),
            hint: ". ".to_string(),
        }
    }
}

impl Delimiters {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("card", &self.card),
            ("field", &self.field),
            ("hint", &self.hint),
        ] {
            if value.is_empty() {
                return Err(LearnerError::Config(format!(
                    "{name} delimiter must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Settings shared by every session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub delimiters: Delimiters,
    pub similarity_threshold: f64,
    pub round_length: usize,
    pub ask_years: bool,
    pub test: Vec<TestBlock>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            round_length: 7,
            ask_years: false,
            test: default_test_configuration(),
        }
    }
}

impl Settings {
    /// Reject values no session can run with.
    pub fn validate(&self) -> Result<()> {
        self.delimiters.validate()?;
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(LearnerError::Config(format!(
                "similarity threshold must be within 0..=1, got {}",
                self.similarity_threshold
            )));
        }
        if self.round_length == 0 {
            return Err(LearnerError::Config(
                "round length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
