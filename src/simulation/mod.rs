//! Progression simulation: validated, event-sourced transitions

pub mod audit;
pub mod outcome;
pub mod replay;
pub mod simulator;

pub use audit::{audit_history, AuditViolation};
pub use outcome::{Denial, SimulationOutcome, TransitionResult};
pub use replay::replay_events;
pub use simulator::Simulator;
