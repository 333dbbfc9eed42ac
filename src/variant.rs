//! Basic and advanced game modes, and the loop that drives a session

use anyhow::Result;
use log::*;

use crate::config::{
    DifficultyTier, BASIC_ATTEMPTS, BASIC_RANGE, BASIC_WIN_POINTS, HINT_EVERY, MIN_ADVANCED_BONUS,
    TIERS, TIER_RANGE,
};
use crate::guessing_game::{
    validate, GameConfig, GameResult, InvalidInput, Range, Session, SessionState, Verdict,
};
use crate::hint::{self, Hint};
use crate::secret::SecretSource;

/// Advanced mode difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub fn settings(self) -> &'static DifficultyTier {
        let settings = &TIERS[self as usize];
        debug_assert_eq!(settings.tier, self);
        settings
    }

    pub fn name(self) -> &'static str {
        self.settings().name
    }

    /// Menu number (1-based) to tier
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(Tier::Easy),
            2 => Some(Tier::Medium),
            3 => Some(Tier::Hard),
            _ => None,
        }
    }
}

/// Rules one game is played under. Advanced games always carry their tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Basic,
    Advanced(Tier),
}

impl Mode {
    pub fn tier(self) -> Option<Tier> {
        match self {
            Mode::Basic => None,
            Mode::Advanced(tier) => Some(tier),
        }
    }

    pub fn config(self) -> GameConfig {
        match self {
            Mode::Basic => GameConfig {
                range: BASIC_RANGE,
                attempt_budget: BASIC_ATTEMPTS,
            },
            Mode::Advanced(tier) => {
                let settings = tier.settings();
                GameConfig {
                    range: settings.range,
                    attempt_budget: settings.attempts,
                }
            }
        }
    }

    /// Points a finished game is worth
    pub fn score_for(self, result: &GameResult) -> u32 {
        if !result.won {
            return 0;
        }
        match self {
            Mode::Basic => BASIC_WIN_POINTS,
            Mode::Advanced(tier) => tier
                .settings()
                .base_bonus
                .saturating_sub(result.attempts)
                .max(MIN_ADVANCED_BONUS),
        }
    }
}

/// Ask for a tier until the answer names one. `None` means the input closed.
fn select_tier(frontend: &mut impl Frontend) -> Result<Option<Tier>> {
    loop {
        let Some(choice) = read_number(frontend, Prompt::Tier, TIER_RANGE)? else {
            return Ok(None);
        };
        match Tier::from_choice(choice) {
            Some(tier) => return Ok(Some(tier)),
            None => error!("Tier menu offers {} but no tier matches it", choice),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Basic,
    Advanced,
}

/// What the player is being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Menu,
    Tier,
    Guess { attempt: u32, budget: u32 },
    PlayAgain,
}

/// Everything the game reports back to the player
#[derive(Debug)]
pub enum Event<'a> {
    Started {
        kind: VariantKind,
        tier: Option<Tier>,
        config: GameConfig,
    },
    InvalidInput {
        error: &'a InvalidInput,
        range: Range,
    },
    Verdict {
        attempt: u32,
        guess: i64,
        verdict: Verdict,
        remaining: u32,
    },
    Hint(Hint),
    Finished(&'a GameResult),
}

/// Where input comes from and output goes to
pub trait Frontend {
    /// `None` once the input is closed
    fn read_line(&mut self, prompt: Prompt) -> Result<Option<String>>;

    fn show(&mut self, event: Event<'_>) -> Result<()>;
}

/// Keep asking until the answer is a number in `range`.
///
/// Rejections are reported and cost nothing. `None` means the input closed.
pub fn read_number(
    frontend: &mut impl Frontend,
    prompt: Prompt,
    range: Range,
) -> Result<Option<i64>> {
    loop {
        let Some(line) = frontend.read_line(prompt)? else {
            return Ok(None);
        };
        match validate(&line, range) {
            Ok(number) => return Ok(Some(number)),
            Err(error) => frontend.show(Event::InvalidInput {
                error: &error,
                range,
            })?,
        }
    }
}

/// A finished game and the difficulty it was played at
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedGame {
    pub tier: Option<Tier>,
    pub result: GameResult,
}

impl PlayedGame {
    pub fn difficulty(&self) -> &'static str {
        self.tier.map_or("basic", Tier::name)
    }
}

/// One game mode plus the score it has collected so far
#[derive(Debug)]
pub struct GameVariant {
    kind: VariantKind,
    score: u32,
    games_played: u32,
}

impl GameVariant {
    pub fn new(kind: VariantKind) -> Self {
        Self {
            kind,
            score: 0,
            games_played: 0,
        }
    }

    pub fn kind(&self) -> VariantKind {
        self.kind
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    fn gives_hints(&self) -> bool {
        self.kind == VariantKind::Advanced
    }

    /// Play one full game. `None` if the input closed before it finished.
    pub fn play(
        &mut self,
        secrets: &mut impl SecretSource,
        frontend: &mut impl Frontend,
    ) -> Result<Option<PlayedGame>> {
        let mode = match self.kind {
            VariantKind::Basic => Mode::Basic,
            VariantKind::Advanced => {
                let Some(tier) = select_tier(frontend)? else {
                    warn!("Input closed during tier selection");
                    return Ok(None);
                };
                Mode::Advanced(tier)
            }
        };
        let tier = mode.tier();
        let config = mode.config();
        info!("Playing {:?} game", mode);

        frontend.show(Event::Started {
            kind: self.kind,
            tier,
            config,
        })?;

        let mut session = Session::start(config, secrets);
        // Hints shrink this one, validation keeps using the session range
        let mut advisory = session.range();

        while session.state() == SessionState::InProgress {
            let used = session.attempts_used();
            if self.gives_hints() && used > 0 && used % HINT_EVERY == 0 {
                let hint = hint::advisory_hint(session.history(), advisory);
                if let Hint::Narrowed(range) = hint {
                    advisory = range;
                }
                debug!("Hint after {} attempts: {:?}", used, hint);
                frontend.show(Event::Hint(hint))?;
            }

            let prompt = Prompt::Guess {
                attempt: used + 1,
                budget: session.attempt_budget(),
            };
            let Some(guess) = read_number(frontend, prompt, session.range())? else {
                warn!("Input closed mid-game, abandoning it");
                return Ok(None);
            };

            let verdict = session.record_guess(guess)?;
            frontend.show(Event::Verdict {
                attempt: session.attempts_used(),
                guess,
                verdict,
                remaining: session.remaining(),
            })?;
        }

        if session.is_exhausted() {
            info!("Out of attempts, the number was {}", session.secret());
        }
        let mut result = session.finish();
        result.score_delta = mode.score_for(&result);
        self.score += result.score_delta;
        self.games_played += 1;
        info!(
            "Score +{} (total {} over {} games)",
            result.score_delta, self.score, self.games_played
        );

        frontend.show(Event::Finished(&result))?;
        Ok(Some(PlayedGame { tier, result }))
    }
}
