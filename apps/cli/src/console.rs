//! Line-oriented terminal shell for the engine.

use std::io::{self, BufRead, Write};

use learner_core::{CardSide, Event, Interaction, LearnerError, Request, Result};

const RULE_WIDTH: usize = 20;

/// Renders events as text and reads answers one line at a time.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn render(&mut self, event: &Event) -> io::Result<()> {
        let out = &mut self.output;
        match event {
            Event::SetLoaded(info) => {
                writeln!(out, "Set name: {}", info.name)?;
                writeln!(out, "{} terms in the set.", info.terms)?;
                writeln!(out, "Typo ratio is {}\n", info.similarity_threshold)
            }
            Event::SectionHeader { title } => {
                writeln!(out, "\n\n{title}\n")?;
                writeln!(out, "{}", "-".repeat(RULE_WIDTH))
            }
            Event::QuestionHeader { number } => writeln!(out, "##### {number}. #####"),
            Event::MultipleChoice { hint, options } => {
                writeln!(out, "{hint}\n")?;
                writeln!(out, "{}", options.join(" | "))
            }
            Event::WriteAnswer { hint } => writeln!(out, "{hint}\n"),
            Event::TrueFalse { hint, term } => writeln!(out, "{hint}\n{term}"),
            Event::Connect { hints, terms } => {
                for (index, hint) in hints.iter().enumerate() {
                    writeln!(out, "{}. {hint}", index + 1)?;
                }
                writeln!(out, "\n{}", terms.join(" | "))
            }
            Event::YearQuestion => Ok(()),
            Event::YearShown { year } => writeln!(out, "{year}"),
            Event::Correct => writeln!(out, "Correct!"),
            Event::Incorrect { expected } => writeln!(out, "False! Correct: {expected}"),
            Event::Overwritten => writeln!(out, "Overwriting..."),
            Event::TrueFalseIncorrect { expected } => {
                writeln!(out, "Incorrect! It was {expected}")
            }
            Event::SlotNotAnswered { slot, expected } => {
                writeln!(out, "{slot} was not answered. {slot} is {expected}")
            }
            Event::SlotIncorrect {
                slot,
                expected,
                given,
            } => writeln!(out, "Incorrect! {slot} is {expected}, not {given}"),
            Event::ConnectResult { incorrect: 0, .. } => writeln!(out, "All are Correct!"),
            Event::ConnectResult { incorrect, total } => {
                writeln!(out, "{incorrect} out of {total} were incorrect.")
            }
            Event::FormatError { message } => writeln!(
                out,
                "Format error! One or more answers are not pairs, the delimiter is wrong \
                 or pair order is reversed ({message}). Please enter the answer again."
            ),
            Event::RoundResult {
                scores,
                total,
                ceiling,
                ..
            } => {
                writeln!(out, "\nYour result:\n")?;
                for row in scores {
                    writeln!(out, "{:<15}{}", row.term, row.score)?;
                }
                writeln!(out, "Total: {total} out of {ceiling}\n")
            }
            Event::AllMastered => writeln!(out, "Congratulations! All Done!"),
            Event::TestResult { missed, total } => writeln!(
                out,
                "Well Done! You missed {missed} out of {total} questions."
            ),
            Event::Card {
                position,
                side: CardSide::Term,
                text,
            } => writeln!(out, "\nTerm #{position}\n{text}"),
            Event::Card {
                side: CardSide::Definition,
                text,
                ..
            } => writeln!(out, "{text}"),
            Event::FirstCard => writeln!(out, "This is the first term..."),
            Event::Exiting => writeln!(out, "\nExiting..."),
        }
    }
}

fn prompt(request: &Request) -> String {
    match request {
        Request::TermAnswer => "Enter the correct term: ".to_string(),
        Request::YearAnswer => "Enter the correct year: ".to_string(),
        Request::TrueFalse => "True or False? ".to_string(),
        Request::TrueFalseRetry => "Please enter true or false! ".to_string(),
        Request::ConnectPairs => {
            "\nEnter the correct pairs {nr} {term}, {nr} {term}, ...\n".to_string()
        }
        Request::ConfirmOverwrite => "There seems to be a typo, overwrite? ".to_string(),
        Request::ContinueRound { round } => {
            format!("You are done with round {round}! Continue? ")
        }
        Request::FlashcardCommand => "Next(K), Last(L), Flip(F), Exit(E)? ".to_string(),
        Request::StartOver => "This is the last term. Start over(Y)? ".to_string(),
        Request::Acknowledge => "Press enter to continue...\n".to_string(),
    }
}

impl<R: BufRead, W: Write> Interaction for Console<R, W> {
    fn show(&mut self, event: &Event) -> Result<()> {
        self.render(event)?;
        Ok(())
    }

    fn ask(&mut self, request: &Request) -> Result<String> {
        write!(self.output, "{}", prompt(request))?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(LearnerError::InputClosed);
        }
        let answer = line.trim_end_matches(['\n', '\r']).to_string();
        tracing::trace!(?request, answer = %answer, "read answer");
        Ok(answer)
    }
}
