//! Command execution - runs parsed commands against a simulator

use serde::Serialize;

use crate::command::parser::Command;
use crate::core::error::LoreResult;
use crate::simulation::{SimulationOutcome, Simulator, TransitionResult};

/// Executes commands against the simulator
pub struct CommandExecutor;

impl CommandExecutor {
    /// Run one command.
    ///
    /// A denial is reported through `error` with `success == false`; only
    /// broken invariants come back as `Err`.
    pub fn execute(simulator: &mut Simulator, command: &Command) -> LoreResult<CommandResponse> {
        let outcome = match command {
            Command::LevelUp { character } => simulator.simulate_level_up(character)?,
            Command::GainExperience {
                character,
                amount,
                source,
            } => simulator.simulate_experience_gain(character, *amount, source)?,
            Command::IncreaseStat {
                character,
                stat,
                amount,
                reason,
            } => simulator.simulate_stat_increase(character, *stat, *amount, reason)?,
        };

        Ok(CommandResponse::from(outcome))
    }
}

/// Result of executing a command
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub result: Option<TransitionResult>,
    pub error: Option<String>,
}

impl From<SimulationOutcome> for CommandResponse {
    fn from(outcome: SimulationOutcome) -> Self {
        match outcome {
            SimulationOutcome::Applied(result) => Self {
                success: true,
                result: Some(result),
                error: None,
            },
            SimulationOutcome::Denied(denial) => Self {
                success: false,
                result: None,
                error: Some(denial.to_string()),
            },
        }
    }
}
