//! Clause formatting shared by every symbolic exporter
//!
//! Output is `name(arg1, arg2).` with lowercase predicate names and
//! comma-separated arguments. Denial clauses start with `:- `.

use std::fmt::Display;

/// Sanitise free text into a solver atom: lowercase ASCII, digits and `_`.
///
/// Anything else becomes `_`. Atoms must start with a letter, so text that
/// doesn't gets an `id_` prefix.
pub fn atom(text: &str) -> String {
    let mut out: String = text
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if !out.starts_with(|c: char| c.is_ascii_lowercase()) {
        out.insert_str(0, "id_");
    }
    out
}

/// A compound term without the trailing period
pub fn term<I, A>(name: &str, args: I) -> String
where
    I: IntoIterator<Item = A>,
    A: Display,
{
    let rendered: Vec<String> = args.into_iter().map(|a| a.to_string()).collect();
    format!("{}({})", name, rendered.join(", "))
}

/// A fact: a compound term terminated by a period
pub fn clause<I, A>(name: &str, args: I) -> String
where
    I: IntoIterator<Item = A>,
    A: Display,
{
    format!("{}.", term(name, args))
}

/// A denial clause: `:- goal1, goal2.`
pub fn denial(goals: &[String]) -> String {
    format!(":- {}.", goals.join(", "))
}

/// A derived rule: `head :- goal1, goal2.`
pub fn rule(head: &str, goals: &[String]) -> String {
    format!("{} :- {}.", head, goals.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_sanitises() {
        assert_eq!(atom("Aria"), "aria");
        assert_eq!(atom("Old Quest-Giver"), "old_quest_giver");
        assert_eq!(atom("42"), "id_42");
        assert_eq!(atom(""), "id_");
    }

    #[test]
    fn test_clause_format() {
        assert_eq!(clause("max_stat", ["strength", "100"]), "max_stat(strength, 100).");
        assert_eq!(clause("class", ["mage"]), "class(mage).");
        assert_eq!(term("level", ["aria", "2", "4"]), "level(aria, 2, 4)");
    }

    #[test]
    fn test_denial_and_rule() {
        let goals = vec!["a(X)".to_string(), "b(X)".to_string()];
        assert_eq!(denial(&goals), ":- a(X), b(X).");
        assert_eq!(rule("c(X)", &goals), "c(X) :- a(X), b(X).");
    }
}
