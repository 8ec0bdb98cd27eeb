//! What a simulate call hands back

use serde::Serialize;
use thiserror::Error;

use crate::core::types::{CharacterClass, CharacterId, ExperiencePoints, Level, StatType};
use crate::events::CausalEvent;
use crate::state::WorldState;

/// Why a transition was refused.
///
/// Denials are expected domain outcomes, not errors: nothing was recorded
/// and the world did not advance.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Denial {
    #[error("Unknown character: {0}")]
    UnknownCharacter(CharacterId),

    #[error("Character {0} has no level")]
    MissingLevel(CharacterId),

    #[error("Character {0} has no experience record")]
    MissingExperience(CharacterId),

    #[error("Character {character} is at level {level}, the cap is {cap}")]
    LevelCapReached {
        character: CharacterId,
        level: Level,
        cap: Level,
    },

    #[error("Character {0} needs a class to rise past level 1")]
    ClassRequired(CharacterId),

    #[error("No axiom states the experience required for level {0}")]
    NoExperienceRule(Level),

    #[error("Character {character} has {have} experience, level {level} needs {required}")]
    InsufficientExperience {
        character: CharacterId,
        level: Level,
        have: ExperiencePoints,
        required: ExperiencePoints,
    },

    #[error("{stat} would become {candidate}, above its bound of {max}")]
    StatBoundExceeded {
        stat: StatType,
        candidate: u64,
        max: u32,
    },

    #[error("Character {character} has {have} experience, adding {amount} would overflow")]
    ExperienceOverflow {
        character: CharacterId,
        have: ExperiencePoints,
        amount: u32,
    },

    #[error("{stat} would become {candidate}, beyond the largest stat value")]
    StatOverflow { stat: StatType, candidate: u64 },

    #[error("A {class} may not use {stat}")]
    ClassCannotUseStat {
        class: CharacterClass,
        stat: StatType,
    },
}

/// A committed transition
#[derive(Debug, Clone, Serialize)]
pub struct TransitionResult {
    /// Events appended by this transition (exactly one for the built-ins)
    pub events: Vec<CausalEvent>,
    /// World snapshot after the transition
    pub world: WorldState,
    /// Observation log of each appended event
    pub observations: Vec<String>,
}

/// Result of a simulate call
#[derive(Debug, Clone)]
pub enum SimulationOutcome {
    /// The transition was committed
    Applied(TransitionResult),
    /// A business rule refused the transition; nothing changed
    Denied(Denial),
}

impl SimulationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SimulationOutcome::Applied(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, SimulationOutcome::Denied(_))
    }

    pub fn applied(&self) -> Option<&TransitionResult> {
        match self {
            SimulationOutcome::Applied(result) => Some(result),
            SimulationOutcome::Denied(_) => None,
        }
    }

    pub fn denial(&self) -> Option<&Denial> {
        match self {
            SimulationOutcome::Applied(_) => None,
            SimulationOutcome::Denied(denial) => Some(denial),
        }
    }

    pub fn into_result(self) -> Option<TransitionResult> {
        match self {
            SimulationOutcome::Applied(result) => Some(result),
            SimulationOutcome::Denied(_) => None,
        }
    }
}
