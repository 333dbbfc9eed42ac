//! Flat text log of finished games
//!
//! Each game is one block of `Key: value` lines closed by a dashed delimiter:
//!
//! ```text
//! Game played at: 2024-05-01 18:22:05
//! Difficulty: medium
//! Attempts: 4
//! Time taken: 12.35s
//! Won: True
//! ------------------------------
//! ```

use anyhow::{anyhow, Context, Result};
use log::*;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::variant::PlayedGame;

const DELIMITER_WIDTH: usize = 30;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct StatRecord {
    pub timestamp: String,
    pub difficulty: String,
    pub attempts: u32,
    pub time_taken: f64,
    pub won: bool,
}

impl StatRecord {
    /// Stamp a finished game with the local time
    pub fn from_game(game: &PlayedGame) -> Self {
        Self {
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            difficulty: game.difficulty().to_string(),
            attempts: game.result.attempts,
            time_taken: game.result.duration_seconds,
            won: game.result.won,
        }
    }
}

pub fn write_record(w: &mut impl Write, record: &StatRecord) -> std::io::Result<()> {
    writeln!(w, "Game played at: {}", record.timestamp)?;
    writeln!(w, "Difficulty: {}", record.difficulty)?;
    writeln!(w, "Attempts: {}", record.attempts)?;
    writeln!(w, "Time taken: {:.2}s", record.time_taken)?;
    writeln!(w, "Won: {}", if record.won { "True" } else { "False" })?;
    writeln!(w, "{}", "-".repeat(DELIMITER_WIDTH))?;
    Ok(())
}

#[derive(Default)]
struct PartialRecord {
    timestamp: Option<String>,
    difficulty: Option<String>,
    attempts: Option<u32>,
    time_taken: Option<f64>,
    won: Option<bool>,
}

impl PartialRecord {
    fn complete(self) -> Option<StatRecord> {
        Some(StatRecord {
            timestamp: self.timestamp?,
            difficulty: self.difficulty?,
            attempts: self.attempts?,
            time_taken: self.time_taken?,
            won: self.won?,
        })
    }
}

/// Read back every block closed by a delimiter. A trailing unclosed block is ignored.
pub fn parse_records(r: impl BufRead) -> Result<Vec<StatRecord>> {
    let delimiter = "-".repeat(DELIMITER_WIDTH);
    let mut records = Vec::new();
    let mut current = PartialRecord::default();

    for (index, line) in r.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let lineno = index + 1;

        if line == delimiter {
            match std::mem::take(&mut current).complete() {
                Some(record) => records.push(record),
                None => warn!("Skipping incomplete stats record ending on line {lineno}"),
            }
            continue;
        }

        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };
        match key {
            "Game played at" => current.timestamp = Some(value.to_string()),
            "Difficulty" => current.difficulty = Some(value.to_string()),
            "Attempts" => {
                current.attempts = Some(
                    value
                        .parse()
                        .with_context(|| format!("bad attempts on line {lineno}"))?,
                )
            }
            "Time taken" => {
                current.time_taken = Some(
                    value
                        .trim_end_matches('s')
                        .parse()
                        .with_context(|| format!("bad time on line {lineno}"))?,
                )
            }
            "Won" => {
                current.won = Some(match value {
                    "True" => true,
                    "False" => false,
                    other => return Err(anyhow!("bad won flag `{other}` on line {lineno}")),
                })
            }
            _ => debug!("Ignoring unknown stats key `{key}` on line {lineno}"),
        }
    }

    Ok(records)
}

/// Append one record to the file at `path`, creating it if needed
pub fn save(path: &Path, record: &StatRecord) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    write_record(&mut file, record).with_context(|| format!("writing {}", path.display()))?;
    info!("Saved game stats to {}", path.display());
    Ok(())
}

pub fn load(path: &Path) -> Result<Vec<StatRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records = parse_records(BufReader::new(file))
        .with_context(|| format!("reading {}", path.display()))?;
    info!("Loaded {} stats records from {}", records.len(), path.display());
    Ok(records)
}

/// Totals over a set of saved games
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub games: usize,
    pub wins: usize,
    pub fewest_attempts: Option<u32>,
    pub average_time: f64,
}

pub fn summarize(records: &[StatRecord]) -> Summary {
    let games = records.len();
    let wins = records.iter().filter(|r| r.won).count();
    let fewest_attempts = records.iter().filter(|r| r.won).map(|r| r.attempts).min();
    let average_time = if games == 0 {
        0.0
    } else {
        records.iter().map(|r| r.time_taken).sum::<f64>() / games as f64
    };
    Summary {
        games,
        wins,
        fewest_attempts,
        average_time,
    }
}
