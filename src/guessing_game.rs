//! Guessing game logic and state management

use core::cmp::Ordering;
use core::fmt;
use log::*;
use std::time::Instant;
use thiserror::Error;

use crate::hint;
use crate::secret::SecretSource;

/// Closed interval of guessable numbers.
///
/// Ranges handed to a [`Session`] always have `min <= max`. Advisory ranges
/// produced by [`hint::narrow`] may come out inverted and are kept as computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

impl Range {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// True when the bounds crossed, which only advisory ranges can do
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Directional feedback for a single guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    TooLow,
    TooHigh,
    Correct,
}

impl From<Ordering> for Verdict {
    /// Maps `guess.cmp(&secret)` onto a verdict
    fn from(cmp: Ordering) -> Self {
        match cmp {
            Ordering::Less => Verdict::TooLow,
            Ordering::Greater => Verdict::TooHigh,
            Ordering::Equal => Verdict::Correct,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::TooLow => write!(f, "Too low!"),
            Verdict::TooHigh => write!(f, "Too high!"),
            Verdict::Correct => write!(f, "Correct!"),
        }
    }
}

/// Rejected guess or menu token. Never consumes an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("not a number: `{0}`")]
    NotANumber(String),
    #[error("{value} is not between {} and {}", .range.min, .range.max)]
    OutOfRange { value: i64, range: Range },
}

/// Parse a raw line into a number inside `range` (both ends inclusive)
pub fn validate(raw: &str, range: Range) -> Result<i64, InvalidInput> {
    // Trim control codes (including null bytes) and/or whitespace
    let trimmed = raw.trim_matches(|c: char| c.is_ascii_control() || c.is_whitespace());
    let Ok(number) = trimmed.parse::<i64>() else {
        warn!("Not a number: `{raw}` (length {})", raw.len());
        return Err(InvalidInput::NotANumber(trimmed.to_string()));
    };

    if !range.contains(number) {
        warn!("Not in range {range} ({number})");
        return Err(InvalidInput::OutOfRange {
            value: number,
            range,
        });
    }

    debug!("Parsed input: {}", number);
    Ok(number)
}

/// Everything a session needs to know up front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub range: Range,
    pub attempt_budget: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("the game is already over")]
    Finished,
}

/// Outcome of one completed game
#[derive(Debug, Clone, PartialEq)]
pub struct GameResult {
    pub won: bool,
    pub attempts: u32,
    pub secret: i64,
    pub duration_seconds: f64,
    /// Filled in by the variant that scored the game
    pub score_delta: u32,
    pub history: Vec<(i64, Verdict)>,
}

/// Represents a single guessing game session
#[derive(Debug)]
pub struct Session {
    range: Range,
    secret: i64,
    attempt_budget: u32,
    history: Vec<(i64, Verdict)>,
    state: SessionState,
    start_time: Instant,
}

impl Session {
    /// Draw a secret and open a fresh session
    pub fn start(config: GameConfig, secrets: &mut impl SecretSource) -> Self {
        let secret = secrets.generate(config.range);
        debug_assert!(config.range.contains(secret));
        info!(
            "Starting new game in {} with {} attempts",
            config.range, config.attempt_budget
        );
        debug!("Secret for this game: {}", secret);
        Self {
            range: config.range,
            secret,
            attempt_budget: config.attempt_budget,
            history: Vec::with_capacity(config.attempt_budget as usize),
            state: SessionState::InProgress,
            start_time: Instant::now(),
        }
    }

    /// Make a guess and return its verdict
    pub fn record_guess(&mut self, guess: i64) -> Result<Verdict, SessionError> {
        if self.state != SessionState::InProgress {
            warn!("Attempted guess on completed game");
            return Err(SessionError::Finished);
        }

        let verdict = hint::verdict(guess, self.secret);
        self.history.push((guess, verdict));
        info!(
            "Guess #{}: {} (result: {:?})",
            self.attempts_used(),
            guess,
            verdict
        );

        if verdict == Verdict::Correct {
            self.state = SessionState::Won;
            info!("Game won in {} guesses", self.attempts_used());
        } else if self.attempts_used() >= self.attempt_budget {
            self.state = SessionState::Lost;
            info!("Game lost after {} guesses", self.attempts_used());
        }
        Ok(verdict)
    }

    /// True once every attempt is spent without a correct guess
    pub fn is_exhausted(&self) -> bool {
        self.attempts_used() >= self.attempt_budget
            && self.last_guess().map(|(_, v)| v) != Some(Verdict::Correct)
    }

    /// Close the session. Consuming `self` keeps the end time single.
    pub fn finish(self) -> GameResult {
        let duration_seconds = self.start_time.elapsed().as_secs_f64();
        let won = self.state == SessionState::Won;
        let attempts = self.attempts_used();
        info!(
            "Game finished (won: {}, attempts: {}, {:.2}s)",
            won, attempts, duration_seconds
        );
        GameResult {
            won,
            attempts,
            secret: self.secret,
            duration_seconds,
            score_delta: 0,
            history: self.history,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn attempt_budget(&self) -> u32 {
        self.attempt_budget
    }

    pub fn attempts_used(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn remaining(&self) -> u32 {
        self.attempt_budget.saturating_sub(self.attempts_used())
    }

    pub fn history(&self) -> &[(i64, Verdict)] {
        &self.history
    }

    pub fn last_guess(&self) -> Option<(i64, Verdict)> {
        self.history.last().copied()
    }

    /// Get the secret number (for display after the game)
    pub fn secret(&self) -> i64 {
        self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::Fixed;

    fn config(min: i64, max: i64, attempt_budget: u32) -> GameConfig {
        GameConfig {
            range: Range::new(min, max),
            attempt_budget,
        }
    }

    #[test]
    fn test_validate_valid() {
        assert_eq!(validate("50", Range::new(1, 100)), Ok(50));
        assert_eq!(validate("1", Range::new(1, 100)), Ok(1));
        assert_eq!(validate("100", Range::new(1, 100)), Ok(100));
    }

    #[test]
    fn test_validate_trims_whitespace() {
        assert_eq!(validate("  7 ", Range::new(1, 10)), Ok(7));
        assert_eq!(validate("7\r\n", Range::new(1, 10)), Ok(7));
        assert_eq!(validate("7\0", Range::new(1, 10)), Ok(7));
    }

    #[test]
    fn test_validate_not_a_number() {
        assert_eq!(
            validate("abc", Range::new(1, 100)),
            Err(InvalidInput::NotANumber("abc".into()))
        );
        assert!(matches!(
            validate("50.5", Range::new(1, 100)),
            Err(InvalidInput::NotANumber(_))
        ));
        assert!(validate("", Range::new(1, 100)).is_err());
    }

    #[test]
    fn test_validate_out_of_range() {
        assert_eq!(
            validate("150", Range::new(1, 100)),
            Err(InvalidInput::OutOfRange {
                value: 150,
                range: Range::new(1, 100)
            })
        );
        assert!(validate("0", Range::new(1, 100)).is_err());
        assert!(validate("-3", Range::new(1, 100)).is_err());
    }

    #[test]
    fn test_invalid_input_message() {
        let err = validate("150", Range::new(1, 100)).unwrap_err();
        assert_eq!(err.to_string(), "150 is not between 1 and 100");
    }

    #[test]
    fn test_session_start() {
        let session = Session::start(config(1, 100, 7), &mut Fixed(42));
        assert_eq!(session.secret(), 42);
        assert_eq!(session.attempts_used(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.state(), SessionState::InProgress);
        assert!(!session.is_exhausted());
    }

    #[test]
    fn test_basic_scenario_won() {
        let mut session = Session::start(config(1, 100, 7), &mut Fixed(42));
        let verdicts: Vec<Verdict> = [10, 90, 50, 40, 45, 42]
            .into_iter()
            .map(|g| session.record_guess(g).unwrap())
            .collect();

        use Verdict::*;
        assert_eq!(
            verdicts,
            vec![TooLow, TooHigh, TooHigh, TooLow, TooHigh, Correct]
        );
        assert_eq!(session.attempts_used(), 6);
        assert_eq!(session.state(), SessionState::Won);
        assert!(!session.is_exhausted());
        assert_eq!(session.history().len(), 6);
    }

    #[test]
    fn test_budget_exhaustion_lost() {
        let mut session = Session::start(config(1, 100, 2), &mut Fixed(1));
        assert_eq!(session.record_guess(50), Ok(Verdict::TooHigh));
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.record_guess(99), Ok(Verdict::TooHigh));
        assert_eq!(session.state(), SessionState::Lost);
        assert!(session.is_exhausted());
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_win_on_last_attempt_is_not_exhausted() {
        let mut session = Session::start(config(1, 100, 2), &mut Fixed(7));
        session.record_guess(3).unwrap();
        assert_eq!(session.record_guess(7), Ok(Verdict::Correct));
        assert_eq!(session.state(), SessionState::Won);
        assert!(!session.is_exhausted());
    }

    #[test]
    fn test_terminal_states_reject_guesses() {
        let mut won = Session::start(config(1, 10, 3), &mut Fixed(5));
        won.record_guess(5).unwrap();
        assert_eq!(won.record_guess(5), Err(SessionError::Finished));
        assert_eq!(won.attempts_used(), 1);

        let mut lost = Session::start(config(1, 10, 1), &mut Fixed(5));
        lost.record_guess(1).unwrap();
        assert_eq!(lost.record_guess(5), Err(SessionError::Finished));
        assert_eq!(lost.state(), SessionState::Lost);
        assert_eq!(lost.attempts_used(), 1);
    }

    #[test]
    fn test_secret_never_changes() {
        let mut session = Session::start(config(1, 100, 10), &mut Fixed(64));
        for guess in [1, 2, 3, 99, 98, 97, 50, 70, 60] {
            session.record_guess(guess).unwrap();
            assert_eq!(session.secret(), 64);
        }
    }

    #[test]
    fn test_finish_reports_attempts() {
        let mut session = Session::start(config(1, 100, 7), &mut Fixed(42));
        session.record_guess(10).unwrap();
        session.record_guess(42).unwrap();
        let used = session.attempts_used();
        let result = session.finish();
        assert!(result.won);
        assert_eq!(result.attempts, used);
        assert_eq!(result.secret, 42);
        assert_eq!(result.score_delta, 0);
        assert!(result.duration_seconds >= 0.0);
        assert_eq!(
            result.history,
            vec![(10, Verdict::TooLow), (42, Verdict::Correct)]
        );
    }

    #[test]
    fn test_finish_lost() {
        let mut session = Session::start(config(1, 100, 1), &mut Fixed(42));
        session.record_guess(1).unwrap();
        let result = session.finish();
        assert!(!result.won);
        assert_eq!(result.attempts, 1);
    }

    #[test]
    fn test_verdict_from_ordering() {
        assert_eq!(Verdict::from(3.cmp(&5)), Verdict::TooLow);
        assert_eq!(Verdict::from(5.cmp(&3)), Verdict::TooHigh);
        assert_eq!(Verdict::from(5.cmp(&5)), Verdict::Correct);
    }
}
