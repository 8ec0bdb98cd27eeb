//! Lorecraft - axiom-governed character progression
//!
//! Progression state changes only through causal events validated against an
//! immutable axiom set. The whole history can be exported as logic clauses
//! for an external solver.

pub mod axioms;
pub mod command;
pub mod core;
pub mod events;
pub mod export;
pub mod simulation;
pub mod state;

pub use crate::axioms::{create_default_axioms, Axiom, AxiomKind, AxiomSet};
pub use crate::core::{LoreConfig, LoreError, LoreResult};
pub use crate::events::CausalEvent;
pub use crate::export::{ExportReport, SymbolicExporter};
pub use crate::simulation::{Denial, SimulationOutcome, Simulator, TransitionResult};
pub use crate::state::{CharacterSeed, CharacterState, WorldSeed, WorldState};
