//! Symbolic export for an external logic solver

pub mod invariants;
pub mod symbolic;

pub use invariants::generate_invariants;
pub use symbolic::{ExportReport, ExportedFile, SymbolicExporter};
