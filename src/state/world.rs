//! Immutable whole-world snapshots

use ahash::AHashSet;
use serde::Serialize;
use std::collections::BTreeMap;

use super::character::CharacterState;
use super::seed::WorldSeed;
use crate::core::error::{LoreError, LoreResult};
use crate::core::symbolic::clause;
use crate::core::types::{CharacterId, TimePoint, WorldId};

/// Every character of one world at one time point.
///
/// All contained snapshots share the world's time point. Transitions move
/// the whole world forward in lock-step: the affected character gets its
/// new facts, every other character is carried forward unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldState {
    world: WorldId,
    time_point: TimePoint,
    characters: BTreeMap<CharacterId, CharacterState>,
}

impl WorldState {
    /// Build the time-zero snapshot from stored records
    pub(crate) fn genesis(seed: WorldSeed) -> LoreResult<Self> {
        let mut characters = BTreeMap::new();
        let mut symbols = AHashSet::new();

        for character in seed.characters {
            // Two ids sanitising to one atom would merge in the export
            if !symbols.insert(character.id.symbol()) {
                return Err(LoreError::DuplicateCharacter(character.id));
            }
            let state = CharacterState::genesis(character)?;
            characters.insert(state.id().clone(), state);
        }

        Self::new(seed.world, TimePoint::GENESIS, characters)
    }

    fn new(
        world: WorldId,
        time_point: TimePoint,
        characters: BTreeMap<CharacterId, CharacterState>,
    ) -> LoreResult<Self> {
        for state in characters.values() {
            if state.time_point() != time_point {
                return Err(LoreError::TimeMismatch {
                    character: state.id().clone(),
                    character_time: state.time_point(),
                    world_time: time_point,
                });
            }
        }
        Ok(Self {
            world,
            time_point,
            characters,
        })
    }

    pub fn world(&self) -> &WorldId {
        &self.world
    }

    pub fn time_point(&self) -> TimePoint {
        self.time_point
    }

    pub fn character(&self, id: &CharacterId) -> Option<&CharacterState> {
        self.characters.get(id)
    }

    pub fn characters(&self) -> impl Iterator<Item = &CharacterState> {
        self.characters.values()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Next world snapshot with `updated` spliced in.
    ///
    /// `updated` must already sit at the next time point.
    pub(crate) fn advance(&self, updated: CharacterState) -> LoreResult<Self> {
        let next = self.time_point.next();
        if !self.characters.contains_key(updated.id()) {
            return Err(LoreError::UnknownCharacter(updated.id().clone()));
        }

        let mut characters = BTreeMap::new();
        for (id, state) in &self.characters {
            if id != updated.id() {
                characters.insert(id.clone(), state.at(next)?);
            }
        }
        characters.insert(updated.id().clone(), updated);

        Self::new(self.world.clone(), next, characters)
    }

    /// World facts followed by every character's facts, in id order
    pub fn to_symbolic_facts(&self) -> Vec<String> {
        let world = self.world.symbol();
        let mut facts = vec![
            clause("world", [world.as_str()]),
            clause("current_time", [world.clone(), self.time_point.to_string()]),
        ];
        for state in self.characters.values() {
            facts.extend(state.to_symbolic_facts());
        }
        facts
    }
}
