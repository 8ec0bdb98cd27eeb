//! Audit a snapshot chain against the axioms and the event log
//!
//! The checks mirror the generated invariant clauses, so a clean audit means
//! an exported history should satisfy the solver as well.

use serde::Serialize;
use std::fmt;

use crate::axioms::AxiomSet;
use crate::core::symbolic::term;
use crate::core::types::{CharacterId, TimePoint};
use crate::events::{CausalEvent, EventType};
use crate::state::{CharacterState, WorldState};

/// One broken invariant found in the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditViolation {
    pub time: TimePoint,
    pub character: Option<CharacterId>,
    pub message: String,
}

impl fmt::Display for AuditViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.character {
            Some(character) => write!(f, "t{} [{}]: {}", self.time, character, self.message),
            None => write!(f, "t{}: {}", self.time, self.message),
        }
    }
}

/// Audit `snapshots` (one per tick, genesis first) against `events`
pub fn audit_history(
    axioms: &AxiomSet,
    snapshots: &[&WorldState],
    events: &[CausalEvent],
) -> Vec<AuditViolation> {
    let mut violations = Vec::new();

    if snapshots.len() != events.len() + 1 {
        violations.push(AuditViolation {
            time: snapshots.last().map(|s| s.time_point()).unwrap_or_default(),
            character: None,
            message: format!(
                "{} snapshots for {} events",
                snapshots.len(),
                events.len()
            ),
        });
    }

    for (tick, world) in snapshots.iter().enumerate() {
        if world.time_point().value() != tick as u64 {
            violations.push(AuditViolation {
                time: world.time_point(),
                character: None,
                message: format!("snapshot #{} carries time point {}", tick, world.time_point()),
            });
        }
        for state in world.characters() {
            check_bounds(axioms, world.time_point(), state, &mut violations);
        }
    }

    for (event, pair) in events.iter().zip(snapshots.windows(2)) {
        check_transition(axioms, event, pair[0], pair[1], &mut violations);
    }

    violations
}

fn check_bounds(
    axioms: &AxiomSet,
    time: TimePoint,
    state: &CharacterState,
    violations: &mut Vec<AuditViolation>,
) {
    for (stat, value) in state.stats() {
        if let Some(max) = axioms.get_max_stat(*stat) {
            if value.value() > max {
                violations.push(AuditViolation {
                    time,
                    character: Some(state.id().clone()),
                    message: format!("{} = {} exceeds bound {}", stat, value, max),
                });
            }
        }
    }

    if let Some(class) = state.class() {
        for (forbidden_class, stat) in axioms.forbidden_combinations() {
            if forbidden_class == class && state.stat(stat).value() > 0 {
                violations.push(AuditViolation {
                    time,
                    character: Some(state.id().clone()),
                    message: format!("a {} holds forbidden {}", class, stat),
                });
            }
        }
    }
}

fn check_transition(
    axioms: &AxiomSet,
    event: &CausalEvent,
    prev: &WorldState,
    next: &WorldState,
    violations: &mut Vec<AuditViolation>,
) {
    let time = next.time_point();
    let mut report = |character: Option<&CharacterId>, message: String| {
        violations.push(AuditViolation {
            time,
            character: character.cloned(),
            message,
        });
    };

    if event.from_time() != prev.time_point() || event.to_time() != next.time_point() {
        report(
            Some(event.character()),
            format!(
                "event spans t{} -> t{} but snapshots are t{} -> t{}",
                event.from_time(),
                event.to_time(),
                prev.time_point(),
                next.time_point()
            ),
        );
    }

    let justified = |fact: String| event.effects().values().any(|effect| *effect == fact);

    for after in next.characters() {
        let id = after.id();
        let Some(before) = prev.character(id) else {
            report(Some(id), "appeared without an event".to_string());
            continue;
        };
        let is_actor = id == event.character();
        let who = id.symbol();
        let t = time.to_string();

        if before.class() != after.class() {
            report(Some(id), "class changed".to_string());
        }

        if before.level() != after.level() {
            let level = after.level().map(|l| l.to_string()).unwrap_or_default();
            if !is_actor || !justified(term("level", [who.clone(), level, t.clone()])) {
                report(Some(id), "level changed without a matching effect".to_string());
            }
        }

        if before.experience() != after.experience() {
            let xp = after.experience().unwrap_or_default();
            let reset_by_level_up =
                *event.event_type() == EventType::LevelUp && xp.value() == 0;
            let matched = justified(term("experience", [who.clone(), xp.to_string(), t.clone()]));
            if !is_actor || !(matched || reset_by_level_up) {
                report(Some(id), "experience changed without a matching effect".to_string());
            }
        }

        for (stat, value) in after.stats() {
            if before.stat(*stat) == *value {
                continue;
            }
            let fact = term(
                "stat_value",
                [who.clone(), stat.symbol().to_string(), value.to_string(), t.clone()],
            );
            if !is_actor || !justified(fact) {
                report(Some(id), format!("{} changed without a matching effect", stat));
            }
            if let Some(class) = after.class() {
                if value > &before.stat(*stat) && !axioms.can_use_stat(class, *stat) {
                    report(Some(id), format!("a {} accrued {}", class, stat));
                }
            }
        }
    }
}
