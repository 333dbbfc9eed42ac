//! Terminal frontend: prompts, banners and result tables

use anyhow::Result;
use log::*;
use std::io::{BufRead, Write};

use crate::guessing_game::{GameResult, Verdict};
use crate::hint::Hint;
use crate::stats::Summary;
use crate::utils::{format_time, nth};
use crate::variant::{Event, Frontend, Prompt, VariantKind};

const RULE_WIDTH: usize = 40;

/// Line based frontend over any reader/writer pair (stdin/stdout in the binary)
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn banner(&mut self, title: &str) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "{:^width$}", title, width = RULE_WIDTH)?;
        writeln!(self.output, "{rule}")?;
        Ok(())
    }

    pub fn menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Select Game Mode:")?;
        writeln!(self.output, "1. Basic Number Guessing Game")?;
        writeln!(self.output, "2. Advanced Number Guessing Game")?;
        writeln!(self.output, "3. Exit")?;
        Ok(())
    }

    pub fn message(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn score(&mut self, kind: VariantKind, score: u32, games: u32) -> Result<()> {
        let mode = match kind {
            VariantKind::Basic => "Basic",
            VariantKind::Advanced => "Advanced",
        };
        writeln!(
            self.output,
            "{mode} score: {score} ({games} game{})",
            if games == 1 { "" } else { "s" }
        )?;
        Ok(())
    }

    pub fn summary(&mut self, summary: &Summary) -> Result<()> {
        self.banner("SAVED GAMES")?;
        writeln!(self.output, "Games played: {}", summary.games)?;
        writeln!(self.output, "Games won: {}", summary.wins)?;
        if let Some(fewest) = summary.fewest_attempts {
            writeln!(self.output, "Fewest attempts to win: {fewest}")?;
        }
        writeln!(
            self.output,
            "Average time: {}",
            format_time(summary.average_time)
        )?;
        Ok(())
    }

    fn results(&mut self, result: &GameResult) -> Result<()> {
        let taken = format_time(result.duration_seconds);
        writeln!(self.output)?;
        if result.won {
            writeln!(
                self.output,
                "Congratulations! You guessed the number in {} attempts!",
                result.attempts
            )?;
        } else {
            writeln!(self.output, "Game Over! The number was {}", result.secret)?;
        }
        writeln!(self.output, "Time taken: {taken}")?;
        if result.score_delta > 0 {
            writeln!(self.output, "Points earned: {}", result.score_delta)?;
        }

        writeln!(self.output)?;
        self.banner("GAME STATISTICS")?;
        writeln!(self.output, "Total attempts: {}", result.attempts)?;
        writeln!(self.output, "Secret number: {}", result.secret)?;
        writeln!(self.output, "Game history:")?;
        for (i, (guess, verdict)) in result.history.iter().enumerate() {
            writeln!(self.output, "  Attempt {}: {} - {}", i + 1, guess, verdict)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Frontend for Console<R, W> {
    fn read_line(&mut self, prompt: Prompt) -> Result<Option<String>> {
        match prompt {
            Prompt::Menu => write!(self.output, "Enter your choice: ")?,
            Prompt::Tier => {
                writeln!(self.output)?;
                writeln!(self.output, "Select difficulty level:")?;
                writeln!(self.output, "1. Easy (1-50, 8 attempts)")?;
                writeln!(self.output, "2. Medium (1-100, 6 attempts)")?;
                writeln!(self.output, "3. Hard (1-200, 4 attempts)")?;
                write!(self.output, "Enter your choice (1-3): ")?
            }
            Prompt::Guess { attempt, budget } => write!(
                self.output,
                "Attempt {attempt}/{budget}: Enter your guess: "
            )?,
            Prompt::PlayAgain => write!(self.output, "\nDo you want to play again? (y/n): ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input closed at {:?}", prompt);
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn show(&mut self, event: Event<'_>) -> Result<()> {
        match event {
            Event::Started { kind, tier, config } => {
                writeln!(self.output)?;
                match kind {
                    VariantKind::Basic => {
                        self.banner("BASIC NUMBER GUESSING GAME")?;
                        writeln!(self.output, "Try to guess the secret number!")?;
                    }
                    VariantKind::Advanced => {
                        self.banner("ADVANCED NUMBER GUESSING GAME")?;
                        if let Some(tier) = tier {
                            writeln!(
                                self.output,
                                "Difficulty: {}",
                                tier.name().to_uppercase()
                            )?;
                        }
                    }
                }
                writeln!(
                    self.output,
                    "\nI'm thinking of a number between {} and {}.",
                    config.range.min, config.range.max
                )?;
                writeln!(
                    self.output,
                    "You have {} attempts to guess it!\n",
                    config.attempt_budget
                )?;
            }
            Event::InvalidInput { error, range } => {
                info!("Rejected input: {}", error);
                writeln!(
                    self.output,
                    "Please enter a valid number between {} and {}",
                    range.min, range.max
                )?;
            }
            Event::Verdict {
                attempt,
                guess,
                verdict,
                remaining,
            } => {
                let outcome = match verdict {
                    Verdict::TooHigh => "was too high",
                    Verdict::TooLow => "was too low",
                    Verdict::Correct => "was correct!",
                };
                writeln!(
                    self.output,
                    "-> Your {} guess ({guess}) {outcome}",
                    nth(attempt)
                )?;
                if verdict != Verdict::Correct && remaining > 0 {
                    writeln!(self.output, "Attempts remaining: {remaining}")?;
                }
            }
            Event::Hint(hint) => match hint {
                Hint::Opening => writeln!(
                    self.output,
                    "Hint: Start with a number in the middle of the range!"
                )?,
                Hint::KeepTrying => writeln!(self.output, "Hint: Keep trying!")?,
                Hint::Narrowed(range) => writeln!(
                    self.output,
                    "Hint: Try between {} and {}",
                    range.min, range.max
                )?,
            },
            Event::Finished(result) => self.results(result)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guessing_game::{GameConfig, InvalidInput, Range};

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    fn output(console: Console<&[u8], Vec<u8>>) -> String {
        String::from_utf8(console.output).unwrap()
    }

    #[test]
    fn test_read_line_prompts_and_reads() {
        let mut console = console("42\n");
        let line = console
            .read_line(Prompt::Guess {
                attempt: 1,
                budget: 7,
            })
            .unwrap();
        assert_eq!(line.as_deref(), Some("42\n"));
        assert_eq!(output(console), "Attempt 1/7: Enter your guess: ");
    }

    #[test]
    fn test_read_line_at_eof() {
        let mut console = console("");
        assert_eq!(console.read_line(Prompt::Menu).unwrap(), None);
    }

    #[test]
    fn test_verdict_uses_ordinals() {
        let mut console = console("");
        console
            .show(Event::Verdict {
                attempt: 2,
                guess: 90,
                verdict: Verdict::TooHigh,
                remaining: 5,
            })
            .unwrap();
        let text = output(console);
        assert!(text.contains("Your second guess (90) was too high"));
        assert!(text.contains("Attempts remaining: 5"));
    }

    #[test]
    fn test_hint_shows_crossed_bounds_verbatim() {
        let mut console = console("");
        console
            .show(Event::Hint(Hint::Narrowed(Range::new(61, 49))))
            .unwrap();
        assert_eq!(output(console), "Hint: Try between 61 and 49\n");
    }

    #[test]
    fn test_invalid_input_message() {
        let mut console = console("");
        let error = InvalidInput::NotANumber("abc".into());
        console
            .show(Event::InvalidInput {
                error: &error,
                range: Range::new(1, 100),
            })
            .unwrap();
        assert_eq!(
            output(console),
            "Please enter a valid number between 1 and 100\n"
        );
    }

    #[test]
    fn test_started_and_finished() {
        let mut console = console("");
        console
            .show(Event::Started {
                kind: VariantKind::Basic,
                tier: None,
                config: GameConfig {
                    range: Range::new(1, 100),
                    attempt_budget: 7,
                },
            })
            .unwrap();
        let result = GameResult {
            won: false,
            attempts: 1,
            secret: 17,
            duration_seconds: 3.0,
            score_delta: 0,
            history: vec![(50, Verdict::TooHigh)],
        };
        console.show(Event::Finished(&result)).unwrap();

        let text = output(console);
        assert!(text.contains("between 1 and 100"));
        assert!(text.contains("You have 7 attempts"));
        assert!(text.contains("Game Over! The number was 17"));
        assert!(text.contains("Attempt 1: 50 - Too high!"));
    }
}
