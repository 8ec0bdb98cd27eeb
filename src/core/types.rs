//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::core::error::{LoreError, LoreResult};
use crate::core::symbolic::atom;

/// Discrete simulation time (logical tick, not wall-clock)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePoint(u64);

impl TimePoint {
    pub const GENESIS: TimePoint = TimePoint(0);

    pub fn new(tick: u64) -> Self {
        Self(tick)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Character classes known to the lore
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
    Ranger,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 5] = [
        Self::Warrior,
        Self::Mage,
        Self::Rogue,
        Self::Cleric,
        Self::Ranger,
    ];

    /// Lowercase atom used in symbolic output
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Warrior => "warrior",
            Self::Mage => "mage",
            Self::Rogue => "rogue",
            Self::Cleric => "cleric",
            Self::Ranger => "ranger",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CharacterClass {
    type Err = LoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.symbol() == lowered)
            .ok_or_else(|| LoreError::UnknownClass(s.to_string()))
    }
}

/// Character stats known to the lore
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    Strength,
    Intellect,
    Agility,
    Vitality,
    Wisdom,
}

impl StatType {
    pub const ALL: [StatType; 5] = [
        Self::Strength,
        Self::Intellect,
        Self::Agility,
        Self::Vitality,
        Self::Wisdom,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Intellect => "intellect",
            Self::Agility => "agility",
            Self::Vitality => "vitality",
            Self::Wisdom => "wisdom",
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for StatType {
    type Err = LoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|stat| stat.symbol() == lowered)
            .ok_or_else(|| LoreError::UnknownStat(s.to_string()))
    }
}

/// Character level, always within [1, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Level(u32);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(100);

    pub fn new(value: u32) -> LoreResult<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LoreError::LevelOutOfRange(value))
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// The following level, or `None` at the absolute maximum
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1).ok()
    }
}

impl TryFrom<u32> for Level {
    type Error = LoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value of a single stat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatValue(u32);

impl StatValue {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn increase(self, amount: u32) -> Self {
        Self(self.0.saturating_add(amount))
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accumulated experience
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExperiencePoints(u32);

impl ExperiencePoints {
    pub const ZERO: ExperiencePoints = ExperiencePoints(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn add(self, amount: u32) -> Self {
        Self(self.0.saturating_add(amount))
    }
}

impl fmt::Display for ExperiencePoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// String identifiers handed over by the persistence layer.
///
/// Must be non-empty after trimming; rendered as a sanitised atom in
/// symbolic output.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> LoreResult<Self> {
                let id = id.into();
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(LoreError::InvalidIdentifier(id));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn symbol(&self) -> String {
                atom(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = LoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = LoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a character record
    CharacterId
);
string_id!(
    /// Identifier of a world record
    WorldId
);
string_id!(
    /// Identifier of the tenant owning a world
    TenantId
);

/// Unique identifier for causal events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn symbol(&self) -> String {
        format!("e_{}", self.0.simple())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Points at the axiom or condition that justified a change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleReference {
    /// Clause body of the rule, e.g. `required_xp(2, 100)`
    pub rule: String,
    pub description: String,
}

impl RuleReference {
    pub fn new(rule: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for RuleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.rule, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_point_next() {
        let t = TimePoint::GENESIS;
        assert_eq!(t.next(), TimePoint::new(1));
        assert!(t < t.next());
    }

    #[test]
    fn test_level_bounds() {
        assert!(Level::new(0).is_err());
        assert!(Level::new(101).is_err());
        assert_eq!(Level::new(1).unwrap(), Level::MIN);
        assert_eq!(Level::MAX.next(), None);
        assert_eq!(Level::MIN.next().unwrap().value(), 2);
    }

    #[test]
    fn test_level_deserialize_rejects_out_of_range() {
        let ok: Level = serde_json::from_str("42").unwrap();
        assert_eq!(ok.value(), 42);
        assert!(serde_json::from_str::<Level>("0").is_err());
    }

    #[test]
    fn test_values_return_new_instances() {
        let stat = StatValue::new(10);
        let raised = stat.increase(5);
        assert_eq!(stat.value(), 10);
        assert_eq!(raised.value(), 15);

        let xp = ExperiencePoints::ZERO.add(100);
        assert_eq!(xp.value(), 100);
        assert_eq!(StatValue::new(u32::MAX).increase(1).value(), u32::MAX);
    }

    #[test]
    fn test_class_and_stat_parse() {
        assert_eq!("Mage".parse::<CharacterClass>().unwrap(), CharacterClass::Mage);
        assert_eq!("agility".parse::<StatType>().unwrap(), StatType::Agility);
        assert!("bard".parse::<CharacterClass>().is_err());
        assert!("charisma".parse::<StatType>().is_err());
    }

    #[test]
    fn test_string_id_validation() {
        assert!(CharacterId::new("   ").is_err());
        let id = CharacterId::new(" Sir Bors ").unwrap();
        assert_eq!(id.as_str(), "Sir Bors");
        assert_eq!(id.symbol(), "sir_bors");
    }

    #[test]
    fn test_event_id_symbol_is_atom() {
        let id = EventId::new();
        let symbol = id.symbol();
        assert!(symbol.starts_with("e_"));
        assert_eq!(symbol.len(), 34);
        assert!(symbol.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }
}
