//! Solver-checkable invariants over exported state and events
//!
//! The clause list depends only on the axiom set, so it is identical on
//! every export of the same simulator.

use crate::axioms::axiom::forbidden_goals;
use crate::axioms::AxiomSet;
use crate::core::symbolic::{denial, rule};

/// Fixed invariants followed by one denial per forbidden combination
pub fn generate_invariants(axioms: &AxiomSet) -> Vec<String> {
    let mut clauses = vec![
        // Stat bounds
        denial(&goals(&["stat_value(C, S, V, T)", "max_stat(S, M)", "V > M"])),
        // Past level one a character needs a class
        denial(&goals(&["level(C, L, T)", "L > 1", "not has_class(C, _)"])),
        // Snapshots are lock-step
        denial(&goals(&["current_time(_, T)", "level(C, _, T0)", "T0 != T"])),
        denial(&goals(&["current_time(_, T)", "experience(C, _, T0)", "T0 != T"])),
        denial(&goals(&["current_time(_, T)", "stat_value(C, _, _, T0)", "T0 != T"])),
        // Events move time forward, one tick each
        denial(&goals(&["event(E)", "from_time(E, F)", "to_time(E, T)", "T <= F"])),
        denial(&goals(&[
            "event(E1)",
            "event(E2)",
            "E1 != E2",
            "to_time(E1, T)",
            "to_time(E2, T)",
        ])),
        // Every event carries a reason and an effect
        rule("has_reason(E)", &goals(&["reason(E, _)"])),
        denial(&goals(&["event(E)", "not has_reason(E)"])),
        rule("has_effect(E)", &goals(&["effect(E, _, _)"])),
        denial(&goals(&["event(E)", "not has_effect(E)"])),
        // A class only accrues stats it may use
        denial(&goals(&[
            "event(E)",
            "event_type(E, stat_increase)",
            "actor(E, C)",
            "has_class(C, K)",
            "effect(E, _, stat_value(C, S, _, _))",
            "not class_can_use(K, S)",
        ])),
        // Fact changes must match an event effect
        rule("justified(F)", &goals(&["effect(_, _, F)"])),
        rule(
            "justified(experience(C, 0, T))",
            &goals(&["event(E)", "event_type(E, level_up)", "actor(E, C)", "to_time(E, T)"]),
        ),
        denial(&goals(&[
            "event(E)",
            "event_type(E, level_up)",
            "actor(E, C)",
            "to_time(E, T)",
            "level(C, L, T)",
            "not justified(level(C, L, T))",
        ])),
        denial(&goals(&[
            "event(E)",
            "event_type(E, level_up)",
            "actor(E, C)",
            "to_time(E, T)",
            "experience(C, X, T)",
            "not justified(experience(C, X, T))",
        ])),
        denial(&goals(&[
            "event(E)",
            "event_type(E, experience_gain)",
            "actor(E, C)",
            "to_time(E, T)",
            "experience(C, X, T)",
            "not justified(experience(C, X, T))",
        ])),
        denial(&goals(&[
            "event(E)",
            "event_type(E, stat_increase)",
            "actor(E, C)",
            "to_time(E, T)",
            "effect(E, _, stat_value(C, S, _, T))",
            "stat_value(C, S, V, T)",
            "not justified(stat_value(C, S, V, T))",
        ])),
    ];

    for (class, stat) in axioms.forbidden_combinations() {
        clauses.push(denial(&forbidden_goals(class, stat)));
    }
    clauses
}

fn goals(list: &[&str]) -> Vec<String> {
    list.iter().map(|goal| goal.to_string()).collect()
}
