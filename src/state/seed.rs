//! Initial world records handed over by the persistence layer
//!
//! Seeds are plain data. The simulator turns them into the genesis
//! snapshot, which is the only way a `WorldState` comes into being.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::error::{LoreError, LoreResult};
use crate::core::types::{
    CharacterClass, CharacterId, ExperiencePoints, Level, StatType, StatValue, WorldId,
};

/// Stored record of one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSeed {
    pub id: CharacterId,
    pub level: Option<Level>,
    pub class: Option<CharacterClass>,
    pub experience: Option<ExperiencePoints>,
    pub stats: BTreeMap<StatType, StatValue>,
}

impl CharacterSeed {
    pub fn new(id: CharacterId) -> Self {
        Self {
            id,
            level: None,
            class: None,
            experience: None,
            stats: BTreeMap::new(),
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_class(mut self, class: CharacterClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_experience(mut self, experience: ExperiencePoints) -> Self {
        self.experience = Some(experience);
        self
    }

    pub fn with_stat(mut self, stat: StatType, value: u32) -> Self {
        self.stats.insert(stat, StatValue::new(value));
        self
    }
}

/// Stored record of a world and its characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSeed {
    pub world: WorldId,
    pub characters: Vec<CharacterSeed>,
}

impl WorldSeed {
    pub fn new(world: WorldId) -> Self {
        Self {
            world,
            characters: Vec::new(),
        }
    }

    pub fn with_character(mut self, character: CharacterSeed) -> Self {
        self.characters.push(character);
        self
    }
}

#[derive(Debug, Deserialize)]
struct WorldRecord {
    world: WorldId,
    #[serde(default)]
    characters: Vec<CharacterRecord>,
}

#[derive(Debug, Deserialize)]
struct CharacterRecord {
    id: CharacterId,
    level: Option<Level>,
    class: Option<String>,
    experience: Option<u32>,
    #[serde(default)]
    stats: BTreeMap<String, u32>,
}

impl CharacterRecord {
    fn into_seed(self) -> LoreResult<CharacterSeed> {
        let mut stats = BTreeMap::new();
        for (name, value) in self.stats {
            stats.insert(name.parse::<StatType>()?, StatValue::new(value));
        }
        Ok(CharacterSeed {
            id: self.id,
            level: self.level,
            class: self.class.map(|c| c.parse::<CharacterClass>()).transpose()?,
            experience: self.experience.map(ExperiencePoints::new),
            stats,
        })
    }
}

/// Parse a world seed from TOML text
pub fn parse_world_toml(content: &str) -> LoreResult<WorldSeed> {
    let record: WorldRecord = toml::from_str(content)?;
    let characters = record
        .characters
        .into_iter()
        .map(CharacterRecord::into_seed)
        .collect::<LoreResult<Vec<_>>>()?;
    Ok(WorldSeed {
        world: record.world,
        characters,
    })
}

/// Load a world seed from a TOML file
pub fn load_world(path: &Path) -> LoreResult<WorldSeed> {
    let content = std::fs::read_to_string(path)?;
    let seed = parse_world_toml(&content)
        .map_err(|e| LoreError::Parse(format!("{}: {}", path.display(), e)))?;
    tracing::info!(
        "Loaded world '{}' with {} characters from {}",
        seed.world,
        seed.characters.len(),
        path.display()
    );
    Ok(seed)
}
