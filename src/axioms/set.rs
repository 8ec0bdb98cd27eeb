//! Immutable axiom registry with derived lookup tables

use ahash::{AHashMap, AHashSet};
use std::collections::BTreeSet;

use super::axiom::{Axiom, AxiomKind};
use crate::core::error::{LoreError, LoreResult};
use crate::core::types::{CharacterClass, ExperiencePoints, Level, StatType};

/// The complete, duplicate-free rule set of one world.
///
/// Lookup tables are derived once in [`AxiomSet::new`] and only read
/// afterwards. When several axioms constrain the same thing, the most
/// restrictive wins: the lowest stat bound, the highest experience
/// requirement, the lowest level cap.
#[derive(Debug, Clone)]
pub struct AxiomSet {
    axioms: Vec<Axiom>,
    classes: BTreeSet<CharacterClass>,
    stats: BTreeSet<StatType>,
    max_stats: AHashMap<StatType, u32>,
    permitted_stats: AHashMap<CharacterClass, AHashSet<StatType>>,
    forbidden_stats: AHashMap<CharacterClass, AHashSet<StatType>>,
    required_xp: AHashMap<Level, ExperiencePoints>,
    level_cap: Level,
}

impl AxiomSet {
    /// Build the set, failing on a syntactically duplicate predicate
    pub fn new(axioms: Vec<Axiom>) -> LoreResult<Self> {
        let mut seen = AHashSet::with_capacity(axioms.len());
        for axiom in &axioms {
            let predicate = axiom.predicate();
            if !seen.insert(predicate.clone()) {
                return Err(LoreError::DuplicateAxiom(predicate));
            }
        }

        let mut classes = BTreeSet::new();
        let mut stats = BTreeSet::new();
        let mut max_stats: AHashMap<StatType, u32> = AHashMap::new();
        let mut permitted_stats: AHashMap<CharacterClass, AHashSet<StatType>> = AHashMap::new();
        let mut forbidden_stats: AHashMap<CharacterClass, AHashSet<StatType>> = AHashMap::new();
        let mut required_xp: AHashMap<Level, ExperiencePoints> = AHashMap::new();
        let mut level_cap = Level::MAX;

        for axiom in &axioms {
            match &axiom.kind {
                AxiomKind::ClassDefinition { class } => {
                    classes.insert(*class);
                }
                AxiomKind::StatDefinition { stat } => {
                    stats.insert(*stat);
                }
                AxiomKind::MaxStatBound { stat, max } => {
                    let bound = max_stats.entry(*stat).or_insert(*max);
                    *bound = (*bound).min(*max);
                }
                AxiomKind::ClassStatRelation { class, stat } => {
                    permitted_stats.entry(*class).or_default().insert(*stat);
                }
                AxiomKind::ForbiddenCombination { class, stat } => {
                    forbidden_stats.entry(*class).or_default().insert(*stat);
                }
                AxiomKind::RequiredExperience { level, experience } => {
                    let required = required_xp.entry(*level).or_insert(*experience);
                    *required = (*required).max(*experience);
                }
                AxiomKind::LevelUpRule { max_level } => {
                    level_cap = level_cap.min(*max_level);
                }
            }
        }

        tracing::debug!(
            "Built axiom set: {} axioms, {} classes, {} stats",
            axioms.len(),
            classes.len(),
            stats.len()
        );

        Ok(Self {
            axioms,
            classes,
            stats,
            max_stats,
            permitted_stats,
            forbidden_stats,
            required_xp,
            level_cap,
        })
    }

    /// Upper bound for a stat, if any axiom declares one
    pub fn get_max_stat(&self, stat: StatType) -> Option<u32> {
        self.max_stats.get(&stat).copied()
    }

    /// Experience needed to reach `level`
    pub fn get_required_xp(&self, level: Level) -> Option<ExperiencePoints> {
        self.required_xp.get(&level).copied()
    }

    /// True iff a class-stat relation permits the pairing and no
    /// forbidden-combination axiom denies it
    pub fn can_use_stat(&self, class: CharacterClass, stat: StatType) -> bool {
        let permitted = self
            .permitted_stats
            .get(&class)
            .map_or(false, |stats| stats.contains(&stat));
        let forbidden = self
            .forbidden_stats
            .get(&class)
            .map_or(false, |stats| stats.contains(&stat));
        permitted && !forbidden
    }

    pub fn level_cap(&self) -> Level {
        self.level_cap
    }

    pub fn known_classes(&self) -> &BTreeSet<CharacterClass> {
        &self.classes
    }

    pub fn known_stats(&self) -> &BTreeSet<StatType> {
        &self.stats
    }

    /// Forbidden pairs in insertion order
    pub fn forbidden_combinations(&self) -> impl Iterator<Item = (CharacterClass, StatType)> + '_ {
        self.axioms.iter().filter_map(|axiom| match axiom.kind {
            AxiomKind::ForbiddenCombination { class, stat } => Some((class, stat)),
            _ => None,
        })
    }

    /// The axiom that supplies the experience requirement for `level`
    pub fn required_xp_axiom(&self, level: Level) -> Option<&Axiom> {
        let required = self.get_required_xp(level)?;
        self.axioms.iter().find(|axiom| {
            axiom.kind
                == AxiomKind::RequiredExperience {
                    level,
                    experience: required,
                }
        })
    }

    /// The axiom that supplies the bound for `stat`
    pub fn max_stat_axiom(&self, stat: StatType) -> Option<&Axiom> {
        let max = self.get_max_stat(stat)?;
        self.axioms
            .iter()
            .find(|axiom| axiom.kind == AxiomKind::MaxStatBound { stat, max })
    }

    /// The relation axiom permitting `class` to use `stat`
    pub fn class_stat_axiom(&self, class: CharacterClass, stat: StatType) -> Option<&Axiom> {
        self.axioms
            .iter()
            .find(|axiom| axiom.kind == AxiomKind::ClassStatRelation { class, stat })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter()
    }

    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// One clause per axiom, in insertion order, newline terminated
    pub fn to_symbolic_text(&self) -> String {
        let mut text = String::new();
        for axiom in &self.axioms {
            text.push_str(&axiom.to_symbolic_text());
            text.push('\n');
        }
        text
    }
}
