//! Flat text codec for term sets.
//!
//! # Format
//! ```text
//! \\ lines starting with two backslashes are comments
//! Paris - Capital of France. Largest city of France
//! Waterloo - 1815 - Battle in which Napoleon was defeated
//! ```
//!
//! Cards are split on the card delimiter and fields on the field delimiter.
//! Two fields are `term - definition`, three are `term - year - definition`.
//! Cards with any other field count are skipped and reported.

use tracing::{debug, warn};

use crate::error::{LearnerError, Result};
use crate::set::TermSet;
use crate::types::{Delimiters, TermRecord};

/// Cards starting with this marker are ignored.
pub const COMMENT_MARKER: &str = "\\\\";

/// A card that could not be read as a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCard {
    /// Zero-based position among all cards in the source.
    pub index: usize,
    pub content: String,
    pub fields: usize,
}

#[derive(Debug, Clone)]
pub struct ParsedSet {
    pub set: TermSet,
    pub skipped: Vec<SkippedCard>,
}

/// Parse source text into a named set.
pub fn parse(content: &str, name: &str, delimiters: &Delimiters) -> Result<ParsedSet> {
    delimiters.validate()?;

    let mut set = TermSet::new(name);
    let mut skipped = Vec::new();

    for (index, card) in content.split(delimiters.card.as_str()).enumerate() {
        let card = card.strip_suffix('\r').unwrap_or(card);

        if card.starts_with(COMMENT_MARKER) {
            continue;
        }
        if card.trim().is_empty() {
            debug!(index, "skipping blank card");
            continue;
        }

        let fields: Vec<&str> = card.split(delimiters.field.as_str()).collect();
        match fields.as_slice() {
            [term, definition] => {
                set.add(TermRecord::new(*term, definition, &delimiters.hint, None));
            }
            [term, year, definition] => {
                set.add(TermRecord::new(
                    *term,
                    definition,
                    &delimiters.hint,
                    Some(year.to_string()),
                ));
            }
            _ => {
                warn!(index, fields = fields.len(), card, "no data found in card");
                skipped.push(SkippedCard {
                    index,
                    content: card.to_string(),
                    fields: fields.len(),
                });
            }
        }
    }

    debug!(
        name,
        records = set.len(),
        skipped = skipped.len(),
        "parsed set"
    );
    Ok(ParsedSet { set, skipped })
}

/// Render a set back into source text.
///
/// Definitions are written censored. Records with a year keep it as the
/// middle field. A term, year or definition containing the card or field
/// delimiter would not read back as the same record, so it is an error.
pub fn serialize(set: &TermSet, delimiters: &Delimiters) -> Result<String> {
    let field = delimiters.field.as_str();
    let mut cards = Vec::with_capacity(set.len());
    for record in set.items() {
        let fields = match record.year() {
            Some(year) => vec![record.term(), year, record.definition()],
            None => vec![record.term(), record.definition()],
        };
        if let Some(bad) = fields
            .iter()
            .find(|value| value.contains(field) || value.contains(delimiters.card.as_str()))
        {
            return Err(LearnerError::Config(format!(
                "cannot save {:?}: {bad:?} contains a delimiter",
                record.term()
            )));
        }
        cards.push(fields.join(field));
    }
    Ok(cards.join(delimiters.card.as_str()))
}
