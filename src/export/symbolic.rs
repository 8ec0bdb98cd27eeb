//! Writes the four clause files an external solver consumes

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::invariants::generate_invariants;
use crate::core::config::ExportConfig;
use crate::core::error::LoreResult;
use crate::simulation::Simulator;

/// One written file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub clauses: usize,
}

/// What an export call produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub axioms: ExportedFile,
    pub state: ExportedFile,
    pub events: ExportedFile,
    pub invariants: ExportedFile,
}

impl ExportReport {
    pub fn files(&self) -> [&ExportedFile; 4] {
        [&self.axioms, &self.state, &self.events, &self.invariants]
    }

    pub fn total_clauses(&self) -> usize {
        self.files().iter().map(|file| file.clauses).sum()
    }
}

/// Serialises a simulator's axioms, current world, event log and invariants
pub struct SymbolicExporter<'a> {
    simulator: &'a Simulator,
    names: ExportConfig,
}

impl<'a> SymbolicExporter<'a> {
    pub fn new(simulator: &'a Simulator) -> Self {
        Self {
            simulator,
            names: ExportConfig::default(),
        }
    }

    /// Use the file names from `config`; its directory is not consulted
    pub fn with_file_names(mut self, config: &ExportConfig) -> Self {
        self.names = config.clone();
        self
    }

    /// Axiom clauses in insertion order
    pub fn axioms_clauses(&self) -> Vec<String> {
        self.simulator
            .axioms()
            .iter()
            .map(|axiom| axiom.to_symbolic_text())
            .collect()
    }

    /// Facts of the current world snapshot
    pub fn state_clauses(&self) -> Vec<String> {
        self.simulator.current_state().to_symbolic_facts()
    }

    /// Facts of every retained event, in append order
    pub fn event_clauses(&self) -> Vec<String> {
        self.simulator
            .history()
            .iter()
            .flat_map(|event| event.to_symbolic_facts())
            .collect()
    }

    pub fn invariant_clauses(&self) -> Vec<String> {
        generate_invariants(self.simulator.axioms())
    }

    /// Write all four files into `dir`, creating it if needed
    pub fn export(&self, dir: &Path) -> LoreResult<ExportReport> {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }

        let report = ExportReport {
            axioms: write_clauses(dir, &self.names.axioms_file, &self.axioms_clauses())?,
            state: write_clauses(dir, &self.names.state_file, &self.state_clauses())?,
            events: write_clauses(dir, &self.names.events_file, &self.event_clauses())?,
            invariants: write_clauses(dir, &self.names.invariants_file, &self.invariant_clauses())?,
        };

        tracing::info!(
            "Exported {} clauses to {} (t{}, {} events)",
            report.total_clauses(),
            dir.display(),
            self.simulator.current_state().time_point(),
            self.simulator.history().len()
        );
        Ok(report)
    }
}

/// One clause per line; an empty list yields an empty file
fn render(clauses: &[String]) -> String {
    let mut text = String::new();
    for clause in clauses {
        text.push_str(clause);
        text.push('\n');
    }
    text
}

fn write_clauses(dir: &Path, name: &str, clauses: &[String]) -> LoreResult<ExportedFile> {
    let path = dir.join(name);
    fs::write(&path, render(clauses))?;
    tracing::debug!("Wrote {} clauses to {}", clauses.len(), path.display());
    Ok(ExportedFile {
        path,
        clauses: clauses.len(),
    })
}
