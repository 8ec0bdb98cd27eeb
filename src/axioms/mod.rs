//! Lore axioms: the closed rule set governing progression

pub mod axiom;
pub mod defaults;
mod loader;
pub mod set;

pub use axiom::{Axiom, AxiomKind};
pub use defaults::create_default_axioms;
pub use loader::{load_axioms, parse_axioms_toml};
pub use set::AxiomSet;
