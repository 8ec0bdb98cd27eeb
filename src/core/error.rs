use thiserror::Error;

use crate::core::types::{CharacterId, TimePoint};

/// Invariant violations and I/O failures.
///
/// Business-rule denials are not errors; see `simulation::Denial`.
#[derive(Error, Debug)]
pub enum LoreError {
    #[error("Duplicate axiom predicate: {0}")]
    DuplicateAxiom(String),

    #[error("Time moved backward: {from} -> {to}")]
    TimeRegression { from: TimePoint, to: TimePoint },

    #[error("Causal event has no reasons")]
    EmptyReasons,

    #[error("Causal event has no effects")]
    EmptyEffects,

    #[error("Character {character} is at {character_time}, world is at {world_time}")]
    TimeMismatch {
        character: CharacterId,
        character_time: TimePoint,
        world_time: TimePoint,
    },

    #[error("Level {0} is outside [1, 100]")]
    LevelOutOfRange(u32),

    #[error("Character {0} has level above 1 but no class")]
    ClassRequired(CharacterId),

    #[error("Character {0} is not part of this world")]
    UnknownCharacter(CharacterId),

    #[error("Duplicate character: {0}")]
    DuplicateCharacter(CharacterId),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Unknown character class: {0}")]
    UnknownClass(String),

    #[error("Unknown stat: {0}")]
    UnknownStat(String),

    #[error("Replay diverged: {0}")]
    ReplayDivergence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type LoreResult<T> = std::result::Result<T, LoreError>;
