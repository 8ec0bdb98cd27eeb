//! Command pipeline
//!
//! Text line -> parse_command -> Command -> CommandExecutor -> CommandResponse

pub mod executor;
pub mod parser;

pub use executor::{CommandExecutor, CommandResponse};
pub use parser::{parse_command, Command};
