//! Number guessing game
//!
//! Basic mode: 1-100 in 7 attempts. Advanced mode: pick a difficulty and get a
//! narrowed hint every second attempt.

mod config;
mod console;
mod guessing_game;
mod hint;
mod secret;
mod stats;
mod utils;
mod variant;

use clap::Parser;
use log::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{MENU_RANGE, STATS_FILE};
use crate::console::Console;
use crate::secret::{SecretGenerator, SecretSource};
use crate::stats::StatRecord;
use crate::variant::{read_number, Frontend, GameVariant, Prompt, VariantKind};

#[derive(Parser, Debug)]
#[command(version, about = "Guess the secret number")]
struct Cli {
    /// Seed for the secret numbers, for replayable games
    #[arg(long)]
    seed: Option<u64>,

    /// File finished games are appended to
    #[arg(long, default_value = STATS_FILE)]
    stats_file: PathBuf,

    /// Do not record finished games
    #[arg(long)]
    no_stats: bool,

    /// Print a summary of the recorded games and exit
    #[arg(long, conflicts_with = "no_stats")]
    show_stats: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    info!("Starting with {:?}", cli);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    if cli.show_stats {
        return show_stats(&mut console, &cli.stats_file);
    }

    let mut secrets = match cli.seed {
        Some(seed) => SecretGenerator::seeded(seed),
        None => SecretGenerator::from_entropy(),
    };
    debug!("Replay this run with --seed {}", secrets.seed());

    console.banner("NUMBER GUESSING GAME")?;
    run(&mut console, &mut secrets, &cli)?;
    console.message("\nGoodbye!")?;
    Ok(())
}

/// Summarise the saved games. A missing or unreadable file counts as none.
fn show_stats<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    path: &Path,
) -> anyhow::Result<()> {
    let records = match stats::load(path) {
        Ok(records) => records,
        Err(e) => {
            error!("Error loading stats: {:#}", e);
            console.message(&format!("Error loading stats: {e:#}"))?;
            Vec::new()
        }
    };
    console.summary(&stats::summarize(&records))
}

/// Menu loop. Scores live as long as the process.
fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    secrets: &mut impl SecretSource,
    cli: &Cli,
) -> anyhow::Result<()> {
    let mut basic = GameVariant::new(VariantKind::Basic);
    let mut advanced = GameVariant::new(VariantKind::Advanced);

    loop {
        console.menu()?;
        let game = match read_number(console, Prompt::Menu, MENU_RANGE)? {
            Some(1) => &mut basic,
            Some(2) => &mut advanced,
            _ => {
                console.message("Thanks for playing!")?;
                return Ok(());
            }
        };

        let Some(played) = game.play(secrets, console)? else {
            return Ok(());
        };
        console.score(game.kind(), game.score(), game.games_played())?;

        if !cli.no_stats {
            // A failed write is reported, the session carries on
            if let Err(e) = stats::save(&cli.stats_file, &StatRecord::from_game(&played)) {
                error!("Error saving stats: {:#}", e);
                console.message(&format!("Error saving stats: {e:#}"))?;
            }
        }

        let again = console.read_line(Prompt::PlayAgain)?;
        if !again.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")) {
            return Ok(());
        }
    }
}
