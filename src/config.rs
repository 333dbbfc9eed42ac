//! Configuration constants and environment variable handling

use crate::guessing_game::Range;
use crate::variant::Tier;

macro_rules! get_env_or_default {
    ($env:literal, $default:literal) => {
        match option_env!($env) {
            Some(val) => val,
            None => $default,
        }
    };
}

/// Where finished games are appended unless `--stats-file` says otherwise
pub const STATS_FILE: &str = get_env_or_default!("GUESS_STATS_FILE", "game_stats.txt");

pub const BASIC_RANGE: Range = Range::new(1, 100);
pub const BASIC_ATTEMPTS: u32 = 7;

/// Score added for a basic win
pub const BASIC_WIN_POINTS: u32 = 1;

/// Smallest bonus an advanced win is worth, however many attempts it took
pub const MIN_ADVANCED_BONUS: u32 = 5;

/// Advanced mode hints are shown before every guess following this many attempts
pub const HINT_EVERY: u32 = 2;

/// Static tier settings for advanced mode
pub struct DifficultyTier {
    pub tier: Tier,
    pub name: &'static str,
    pub range: Range,
    pub attempts: u32,
    pub base_bonus: u32,
}

pub const TIERS: [DifficultyTier; 3] = [
    DifficultyTier {
        tier: Tier::Easy,
        name: "easy",
        range: Range::new(1, 50),
        attempts: 8,
        base_bonus: 10,
    },
    DifficultyTier {
        tier: Tier::Medium,
        name: "medium",
        range: Range::new(1, 100),
        attempts: 6,
        base_bonus: 15,
    },
    DifficultyTier {
        tier: Tier::Hard,
        name: "hard",
        range: Range::new(1, 200),
        attempts: 4,
        base_bonus: 20,
    },
];

// Menu tokens are validated like guesses
pub const MENU_RANGE: Range = Range::new(1, 3);
pub const TIER_RANGE: Range = Range::new(1, TIERS.len() as i64);
