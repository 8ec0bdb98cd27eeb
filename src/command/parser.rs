//! Parse typed command lines into progression commands
//!
//! Grammar, one command per line, whitespace separated:
//!
//! ```text
//! levelup <character>
//! gain <character> <amount> [source...]
//! stat <character> <stat> <amount> [reason...]
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::{LoreError, LoreResult};
use crate::core::types::{CharacterId, StatType};

/// Source or reason recorded when the line gives none
pub const UNSPECIFIED: &str = "unspecified";

/// A request for one progression transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    LevelUp {
        character: CharacterId,
    },
    GainExperience {
        character: CharacterId,
        amount: u32,
        source: String,
    },
    IncreaseStat {
        character: CharacterId,
        stat: StatType,
        amount: u32,
        reason: String,
    },
}

impl Command {
    pub fn character(&self) -> &CharacterId {
        match self {
            Command::LevelUp { character }
            | Command::GainExperience { character, .. }
            | Command::IncreaseStat { character, .. } => character,
        }
    }
}

/// Parse one command line
pub fn parse_command(line: &str) -> LoreResult<Command> {
    let mut words = line.split_whitespace();
    let verb = words
        .next()
        .ok_or_else(|| LoreError::Parse("empty command".to_string()))?
        .to_lowercase();

    let command = match verb.as_str() {
        "levelup" | "level" => Command::LevelUp {
            character: parse_character(words.next(), &verb)?,
        },
        "gain" | "xp" => {
            let character = parse_character(words.next(), &verb)?;
            let amount = parse_amount(words.next(), &verb)?;
            Command::GainExperience {
                character,
                amount,
                source: rest(words),
            }
        }
        "stat" | "raise" => {
            let character = parse_character(words.next(), &verb)?;
            let stat: StatType = words
                .next()
                .ok_or_else(|| missing(&verb, "stat"))?
                .parse()?;
            let amount = parse_amount(words.next(), &verb)?;
            Command::IncreaseStat {
                character,
                stat,
                amount,
                reason: rest(words),
            }
        }
        other => return Err(LoreError::Parse(format!("unknown command '{}'", other))),
    };

    Ok(command)
}

fn missing(verb: &str, what: &str) -> LoreError {
    LoreError::Parse(format!("'{}' needs a {}", verb, what))
}

fn parse_character(word: Option<&str>, verb: &str) -> LoreResult<CharacterId> {
    CharacterId::new(word.ok_or_else(|| missing(verb, "character"))?)
}

fn parse_amount(word: Option<&str>, verb: &str) -> LoreResult<u32> {
    let word = word.ok_or_else(|| missing(verb, "amount"))?;
    word.parse()
        .map_err(|_| LoreError::Parse(format!("'{}' is not a valid amount", word)))
}

fn rest<'a>(words: impl Iterator<Item = &'a str>) -> String {
    let text = words.collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        text
    }
}
