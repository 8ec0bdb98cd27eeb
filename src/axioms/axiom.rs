//! Axiom definitions
//!
//! The seven axiom kinds form a closed sum type. Each renders to exactly one
//! clause; adding a kind forces every match below to handle it.

use std::collections::BTreeMap;

use crate::core::symbolic::{clause, denial, rule, term};
use crate::core::types::{CharacterClass, ExperiencePoints, Level, RuleReference, StatType};

/// The rule carried by an axiom
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxiomKind {
    /// A class exists in the world
    ClassDefinition { class: CharacterClass },
    /// A stat exists in the world
    StatDefinition { stat: StatType },
    /// No value of `stat` may exceed `max`
    MaxStatBound { stat: StatType, max: u32 },
    /// Characters of `class` may raise `stat`
    ClassStatRelation { class: CharacterClass, stat: StatType },
    /// Characters of `class` may never hold a positive `stat`
    ForbiddenCombination { class: CharacterClass, stat: StatType },
    /// Reaching `level` requires `experience`
    RequiredExperience { level: Level, experience: ExperiencePoints },
    /// Levelling up is allowed below `max_level` once enough experience is held
    LevelUpRule { max_level: Level },
}

/// One immutable rule of the world's progression logic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axiom {
    pub kind: AxiomKind,
    pub description: String,
}

impl Axiom {
    pub fn new(kind: AxiomKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }

    pub fn class_definition(class: CharacterClass, description: impl Into<String>) -> Self {
        Self::new(AxiomKind::ClassDefinition { class }, description)
    }

    pub fn stat_definition(stat: StatType, description: impl Into<String>) -> Self {
        Self::new(AxiomKind::StatDefinition { stat }, description)
    }

    pub fn max_stat_bound(stat: StatType, max: u32, description: impl Into<String>) -> Self {
        Self::new(AxiomKind::MaxStatBound { stat, max }, description)
    }

    pub fn class_stat_relation(
        class: CharacterClass,
        stat: StatType,
        description: impl Into<String>,
    ) -> Self {
        Self::new(AxiomKind::ClassStatRelation { class, stat }, description)
    }

    pub fn forbidden_combination(
        class: CharacterClass,
        stat: StatType,
        description: impl Into<String>,
    ) -> Self {
        Self::new(AxiomKind::ForbiddenCombination { class, stat }, description)
    }

    pub fn required_experience(
        level: Level,
        experience: ExperiencePoints,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            AxiomKind::RequiredExperience { level, experience },
            description,
        )
    }

    pub fn level_up_rule(max_level: Level, description: impl Into<String>) -> Self {
        Self::new(AxiomKind::LevelUpRule { max_level }, description)
    }

    /// Head term identifying this axiom; unique within an axiom set
    pub fn predicate(&self) -> String {
        match &self.kind {
            AxiomKind::ClassDefinition { class } => term("class", [class.symbol()]),
            AxiomKind::StatDefinition { stat } => term("stat", [stat.symbol()]),
            AxiomKind::MaxStatBound { stat, max } => {
                term("max_stat", [stat.symbol().to_string(), max.to_string()])
            }
            AxiomKind::ClassStatRelation { class, stat } => {
                term("class_can_use", [class.symbol(), stat.symbol()])
            }
            AxiomKind::ForbiddenCombination { class, stat } => {
                term("forbidden", [class.symbol(), stat.symbol()])
            }
            AxiomKind::RequiredExperience { level, experience } => {
                term("required_xp", [level.value(), experience.value()])
            }
            AxiomKind::LevelUpRule { max_level } => term("level_up_rule", [max_level.value()]),
        }
    }

    /// Named parameters of the axiom, rendered as strings
    pub fn parameters(&self) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        match &self.kind {
            AxiomKind::ClassDefinition { class } => {
                params.insert("class", class.to_string());
            }
            AxiomKind::StatDefinition { stat } => {
                params.insert("stat", stat.to_string());
            }
            AxiomKind::MaxStatBound { stat, max } => {
                params.insert("stat", stat.to_string());
                params.insert("max", max.to_string());
            }
            AxiomKind::ClassStatRelation { class, stat }
            | AxiomKind::ForbiddenCombination { class, stat } => {
                params.insert("class", class.to_string());
                params.insert("stat", stat.to_string());
            }
            AxiomKind::RequiredExperience { level, experience } => {
                params.insert("level", level.to_string());
                params.insert("experience", experience.to_string());
            }
            AxiomKind::LevelUpRule { max_level } => {
                params.insert("max_level", max_level.to_string());
            }
        }
        params
    }

    /// Render as a single solver clause
    pub fn to_symbolic_text(&self) -> String {
        match &self.kind {
            AxiomKind::ClassDefinition { class } => clause("class", [class.symbol()]),
            AxiomKind::StatDefinition { stat } => clause("stat", [stat.symbol()]),
            AxiomKind::MaxStatBound { stat, max } => {
                clause("max_stat", [stat.symbol().to_string(), max.to_string()])
            }
            AxiomKind::ClassStatRelation { class, stat } => {
                clause("class_can_use", [class.symbol(), stat.symbol()])
            }
            AxiomKind::ForbiddenCombination { class, stat } => {
                denial(&forbidden_goals(*class, *stat))
            }
            AxiomKind::RequiredExperience { level, experience } => {
                clause("required_xp", [level.value(), experience.value()])
            }
            AxiomKind::LevelUpRule { max_level } => rule(
                "can_level_up(C, T)",
                &[
                    "level(C, L, T)".to_string(),
                    format!("L < {}", max_level.value()),
                    "experience(C, X, T)".to_string(),
                    "L1 is L + 1".to_string(),
                    "required_xp(L1, R)".to_string(),
                    "X >= R".to_string(),
                ],
            ),
        }
    }

    pub fn rule_reference(&self) -> RuleReference {
        RuleReference::new(self.predicate(), self.description.clone())
    }
}

/// Body of the denial clause for a forbidden class/stat pairing
pub(crate) fn forbidden_goals(class: CharacterClass, stat: StatType) -> Vec<String> {
    vec![
        term("has_class", ["C", class.symbol()]),
        term("stat_value", ["C", stat.symbol(), "V", "T"]),
        "V > 0".to_string(),
    ]
}
