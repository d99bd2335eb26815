use tracing::debug;

use crate::error::{LearnerError, Result};
use crate::interaction::{confirm, CardSide, Event, Interaction, Request};
use crate::set::TermSet;
use crate::types::TermRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashcardCommand {
    Next,
    Previous,
    Flip,
    Exit,
}

impl FlashcardCommand {
    /// `k` next, `l` previous, `f` flip, `e` exit.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "k" => Some(Self::Next),
            "l" => Some(Self::Previous),
            "f" => Some(Self::Flip),
            "e" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Position in an ordered, non-empty list of cards.
#[derive(Debug, Clone)]
pub struct FlashcardCursor<'a> {
    cards: &'a [TermRecord],
    position: usize,
    side: CardSide,
}

impl<'a> FlashcardCursor<'a> {
    pub fn new(cards: &'a [TermRecord]) -> Result<Self> {
        if cards.is_empty() {
            return Err(LearnerError::NotEnoughTerms {
                exercise: "flashcards",
                needed: 1,
                available: 0,
            });
        }
        Ok(Self {
            cards,
            position: 0,
            side: CardSide::Term,
        })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn side(&self) -> CardSide {
        self.side
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 == self.cards.len()
    }

    /// Move forward; `false` at the last card.
    pub fn forward(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.move_to(self.position + 1);
        true
    }

    /// Move back; `false` at the first card.
    pub fn back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.move_to(self.position - 1);
        true
    }

    pub fn restart(&mut self) {
        self.move_to(0);
    }

    pub fn flip(&mut self) {
        self.side = match self.side {
            CardSide::Term => CardSide::Definition,
            CardSide::Definition => CardSide::Term,
        };
    }

    /// The visible side of the current card, numbered from 1.
    pub fn card(&self) -> Event {
        let record = &self.cards[self.position];
        let text = match self.side {
            CardSide::Term => record.term(),
            CardSide::Definition => record.definition(),
        };
        Event::Card {
            position: self.position + 1,
            side: self.side,
            text: text.to_string(),
        }
    }

    fn move_to(&mut self, position: usize) {
        self.position = position;
        self.side = CardSide::Term;
    }
}

/// Browse the set's cards in order until the user exits. Not scored.
pub fn run_flashcards(set: &TermSet, io: &mut dyn Interaction) -> Result<()> {
    let mut cursor = FlashcardCursor::new(set.items())?;
    io.show(&cursor.card())?;

    loop {
        let input = io.ask(&Request::FlashcardCommand)?;
        let Some(command) = FlashcardCommand::parse(&input) else {
            debug!(input = %input, "unknown flashcard command");
            continue;
        };

        match command {
            FlashcardCommand::Exit => {
                io.show(&Event::Exiting)?;
                return Ok(());
            }
            FlashcardCommand::Flip => cursor.flip(),
            FlashcardCommand::Next => {
                if !cursor.forward() && confirm(io, &Request::StartOver)? {
                    cursor.restart();
                }
            }
            FlashcardCommand::Previous => {
                if !cursor.back() {
                    io.show(&Event::FirstCard)?;
                }
            }
        }
        io.show(&cursor.card())?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::testing::Scripted;
    use pretty_assertions::assert_eq;

    fn three_cards() -> TermSet {
        TermSet::from_records(
            "capitals",
            [
                TermRecord::new("Paris", "France", ". ", None),
                TermRecord::new("Berlin", "Germany", ". ", None),
                TermRecord::new("Rome", "Italy", ". ", None),
            ],
        )
    }

    fn card(position: usize, side: CardSide, text: &str) -> Event {
        Event::Card {
            position,
            side,
            text: text.to_string(),
        }
    }

    #[test]
    fn commands_parse_case_insensitively() {
        assert_eq!(FlashcardCommand::parse("K"), Some(FlashcardCommand::Next));
        assert_eq!(FlashcardCommand::parse(" l "), Some(FlashcardCommand::Previous));
        assert_eq!(FlashcardCommand::parse("f"), Some(FlashcardCommand::Flip));
        assert_eq!(FlashcardCommand::parse("E"), Some(FlashcardCommand::Exit));
        assert_eq!(FlashcardCommand::parse("next"), None);
    }

    #[test]
    fn navigation_resets_flip() {
        let set = three_cards();
        let mut cursor = FlashcardCursor::new(set.items()).unwrap();
        cursor.flip();
        assert_eq!(cursor.card(), card(1, CardSide::Definition, "France"));
        assert!(cursor.forward());
        assert_eq!(cursor.card(), card(2, CardSide::Term, "Berlin"));
        assert!(cursor.back());
        assert!(!cursor.back());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn empty_set_has_no_cursor() {
        assert!(FlashcardCursor::new(&[]).is_err());
    }

    #[test]
    fn start_over_wraps_to_first_card() {
        let set = three_cards();
        let mut io = Scripted::new(&["k", "k", "k", "y", "e"]);
        run_flashcards(&set, &mut io).unwrap();

        assert_eq!(
            io.events,
            vec![
                card(1, CardSide::Term, "Paris"),
                card(2, CardSide::Term, "Berlin"),
                card(3, CardSide::Term, "Rome"),
                card(1, CardSide::Term, "Paris"),
                Event::Exiting,
            ]
        );
        assert!(io.requests.contains(&Request::StartOver));
    }

    #[test]
    fn declining_start_over_stays_on_last_card() {
        let set = three_cards();
        let mut io = Scripted::new(&["l", "k", "k", "k", "nope", "f", "x", "e"]);
        run_flashcards(&set, &mut io).unwrap();

        assert_eq!(
            io.events,
            vec![
                card(1, CardSide::Term, "Paris"),
                Event::FirstCard,
                card(1, CardSide::Term, "Paris"),
                card(2, CardSide::Term, "Berlin"),
                card(3, CardSide::Term, "Rome"),
                card(3, CardSide::Term, "Rome"),
                card(3, CardSide::Definition, "Italy"),
                Event::Exiting,
            ]
        );
    }
}
