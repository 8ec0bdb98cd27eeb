//! Immutable per-character snapshots

use serde::Serialize;
use std::collections::BTreeMap;

use super::seed::CharacterSeed;
use crate::core::error::{LoreError, LoreResult};
use crate::core::symbolic::clause;
use crate::core::types::{
    CharacterClass, CharacterId, ExperiencePoints, Level, StatType, StatValue, TimePoint,
};

/// Everything known about one character at one time point.
///
/// Only the simulator produces these; every transition returns a new
/// snapshot at `time_point.next()` and leaves the input untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterState {
    id: CharacterId,
    time_point: TimePoint,
    level: Option<Level>,
    class: Option<CharacterClass>,
    experience: Option<ExperiencePoints>,
    stats: BTreeMap<StatType, StatValue>,
}

impl CharacterState {
    pub(crate) fn genesis(seed: CharacterSeed) -> LoreResult<Self> {
        Self {
            id: seed.id,
            time_point: TimePoint::GENESIS,
            level: seed.level,
            class: seed.class,
            experience: seed.experience,
            stats: seed.stats,
        }
        .validated()
    }

    fn validated(self) -> LoreResult<Self> {
        if self.level.map_or(false, |l| l > Level::MIN) && self.class.is_none() {
            return Err(LoreError::ClassRequired(self.id));
        }
        Ok(self)
    }

    pub fn id(&self) -> &CharacterId {
        &self.id
    }

    pub fn time_point(&self) -> TimePoint {
        self.time_point
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn class(&self) -> Option<CharacterClass> {
        self.class
    }

    pub fn experience(&self) -> Option<ExperiencePoints> {
        self.experience
    }

    pub fn stats(&self) -> &BTreeMap<StatType, StatValue> {
        &self.stats
    }

    /// Current value of a stat; stats never set are zero
    pub fn stat(&self, stat: StatType) -> StatValue {
        self.stats.get(&stat).copied().unwrap_or_default()
    }

    pub fn can_level_up(&self, required_xp: ExperiencePoints) -> bool {
        self.experience.map_or(false, |xp| xp >= required_xp)
    }

    /// Same facts, carried forward to a later time point
    pub(crate) fn at(&self, time_point: TimePoint) -> LoreResult<Self> {
        if time_point < self.time_point {
            return Err(LoreError::TimeRegression {
                from: self.time_point,
                to: time_point,
            });
        }
        Ok(Self {
            time_point,
            ..self.clone()
        })
    }

    /// Next snapshot at `new_level` with experience spent
    pub(crate) fn with_level_up(&self, new_level: Level) -> LoreResult<Self> {
        Self {
            time_point: self.time_point.next(),
            level: Some(new_level),
            experience: Some(ExperiencePoints::ZERO),
            ..self.clone()
        }
        .validated()
    }

    pub(crate) fn with_stat_increase(&self, stat: StatType, amount: u32) -> Self {
        let mut stats = self.stats.clone();
        stats.insert(stat, self.stat(stat).increase(amount));
        Self {
            time_point: self.time_point.next(),
            stats,
            ..self.clone()
        }
    }

    /// Missing experience counts as zero before the gain
    pub(crate) fn with_experience_gain(&self, amount: u32) -> Self {
        Self {
            time_point: self.time_point.next(),
            experience: Some(self.experience.unwrap_or_default().add(amount)),
            ..self.clone()
        }
    }

    /// One fact per known attribute, stamped with this snapshot's time point
    pub fn to_symbolic_facts(&self) -> Vec<String> {
        let who = self.id.symbol();
        let t = self.time_point.to_string();
        let mut facts = vec![clause("character", [who.as_str()])];

        if let Some(level) = self.level {
            facts.push(clause("level", [who.clone(), level.to_string(), t.clone()]));
        }
        if let Some(class) = self.class {
            facts.push(clause("has_class", [who.as_str(), class.symbol()]));
        }
        if let Some(xp) = self.experience {
            facts.push(clause("experience", [who.clone(), xp.to_string(), t.clone()]));
        }
        for (stat, value) in &self.stats {
            facts.push(clause(
                "stat_value",
                [who.clone(), stat.symbol().to_string(), value.to_string(), t.clone()],
            ));
        }
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aria() -> CharacterState {
        let seed = CharacterSeed::new(CharacterId::new("aria").unwrap())
            .with_level(Level::MIN)
            .with_class(CharacterClass::Warrior)
            .with_experience(ExperiencePoints::new(40))
            .with_stat(StatType::Strength, 10);
        CharacterState::genesis(seed).unwrap()
    }

    #[test]
    fn test_class_required_above_level_one() {
        let seed = CharacterSeed::new(CharacterId::new("nameless").unwrap())
            .with_level(Level::new(3).unwrap());
        assert!(matches!(
            CharacterState::genesis(seed),
            Err(LoreError::ClassRequired(_))
        ));
    }

    #[test]
    fn test_can_level_up() {
        let state = aria();
        assert!(state.can_level_up(ExperiencePoints::new(40)));
        assert!(!state.can_level_up(ExperiencePoints::new(41)));

        let bare = CharacterState::genesis(CharacterSeed::new(CharacterId::new("x").unwrap())).unwrap();
        assert!(!bare.can_level_up(ExperiencePoints::ZERO));
    }

    #[test]
    fn test_transitions_are_pure() {
        let state = aria();
        let raised = state.with_stat_increase(StatType::Strength, 5);

        assert_eq!(state.stat(StatType::Strength).value(), 10);
        assert_eq!(state.time_point(), TimePoint::GENESIS);
        assert_eq!(raised.stat(StatType::Strength).value(), 15);
        assert_eq!(raised.time_point(), TimePoint::new(1));
        assert_eq!(raised.experience(), state.experience());
        assert_eq!(raised.class(), state.class());
    }

    #[test]
    fn test_level_up_resets_experience() {
        let state = aria();
        let next = state.with_level_up(Level::new(2).unwrap()).unwrap();
        assert_eq!(next.level().unwrap().value(), 2);
        assert_eq!(next.experience(), Some(ExperiencePoints::ZERO));
        assert_eq!(next.stats(), state.stats());
    }

    #[test]
    fn test_experience_gain_from_nothing() {
        let bare = CharacterState::genesis(CharacterSeed::new(CharacterId::new("x").unwrap())).unwrap();
        let next = bare.with_experience_gain(25);
        assert_eq!(next.experience(), Some(ExperiencePoints::new(25)));
    }

    #[test]
    fn test_carry_forward_rejects_regression() {
        let later = aria().at(TimePoint::new(5)).unwrap();
        assert!(matches!(
            later.at(TimePoint::new(2)),
            Err(LoreError::TimeRegression { .. })
        ));
    }

    #[test]
    fn test_symbolic_facts() {
        let facts = aria().to_symbolic_facts();
        assert_eq!(
            facts,
            vec![
                "character(aria).",
                "level(aria, 1, 0).",
                "has_class(aria, warrior).",
                "experience(aria, 40, 0).",
                "stat_value(aria, strength, 10, 0).",
            ]
        );
    }
}
