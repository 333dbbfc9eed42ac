//! Verdicts and advisory hints

use log::*;

use crate::guessing_game::{Range, Verdict};

/// Advice shown between guesses in advanced mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// No guesses yet
    Opening,
    /// Last guess was already correct, nothing left to narrow
    KeepTrying,
    /// Where the secret must be, given the last guess. May be inverted.
    Narrowed(Range),
}

pub fn verdict(guess: i64, secret: i64) -> Verdict {
    guess.cmp(&secret).into()
}

/// Shrink `current` using the last guess and what it was told.
///
/// The bounds are reported as computed, even when they cross.
pub fn narrow(last_guess: i64, last_verdict: Verdict, current: Range) -> Range {
    let narrowed = match last_verdict {
        Verdict::TooLow => Range::new(last_guess + 1, current.max),
        Verdict::TooHigh => Range::new(current.min, last_guess - 1),
        Verdict::Correct => current,
    };
    if narrowed.is_inverted() {
        warn!("Advisory range crossed: {} -> {}", current, narrowed);
    }
    narrowed
}

/// Pick the hint for the most recent entry of `history`
pub fn advisory_hint(history: &[(i64, Verdict)], current: Range) -> Hint {
    match history.last() {
        None => Hint::Opening,
        Some(&(_, Verdict::Correct)) => Hint::KeepTrying,
        Some(&(guess, verdict)) => Hint::Narrowed(narrow(guess, verdict, current)),
    }
}
