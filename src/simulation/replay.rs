//! Rebuild world snapshots from the event log alone

use crate::core::error::{LoreError, LoreResult};
use crate::events::{CausalEvent, EventPayload};
use crate::state::WorldState;

/// Apply `events` in order on top of `start`.
///
/// Each event must begin at the tick the world is at; payloads are applied
/// through the same transition helpers the simulator uses.
pub fn replay_events(start: &WorldState, events: &[CausalEvent]) -> LoreResult<WorldState> {
    let mut world = start.clone();

    for event in events {
        if event.from_time() != world.time_point() {
            return Err(LoreError::ReplayDivergence(format!(
                "event {} starts at t{}, world is at t{}",
                event.id(),
                event.from_time(),
                world.time_point()
            )));
        }

        let state = world
            .character(event.character())
            .ok_or_else(|| LoreError::UnknownCharacter(event.character().clone()))?;

        let next_state = match event.payload() {
            EventPayload::LevelUp { to, .. } => state.with_level_up(*to)?,
            EventPayload::ExperienceGain { amount, .. } => state.with_experience_gain(*amount),
            EventPayload::StatIncrease { stat, from, to, .. } => {
                if state.stat(*stat) != *from {
                    return Err(LoreError::ReplayDivergence(format!(
                        "event {} expects {} = {}, found {}",
                        event.id(),
                        stat,
                        from,
                        state.stat(*stat)
                    )));
                }
                state.with_stat_increase(*stat, to.value().saturating_sub(from.value()))
            }
            EventPayload::Custom => state.at(event.to_time())?,
        };

        world = world.advance(next_state)?;
    }

    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axioms::create_default_axioms;
    use crate::core::types::{
        CharacterClass, CharacterId, ExperiencePoints, Level, StatType, TenantId, WorldId,
    };
    use crate::simulation::Simulator;
    use crate::state::{CharacterSeed, WorldSeed};

    fn simulator() -> Simulator {
        let seed = WorldSeed::new(WorldId::new("eldoria").unwrap()).with_character(
            CharacterSeed::new(CharacterId::new("aria").unwrap())
                .with_level(Level::MIN)
                .with_class(CharacterClass::Rogue)
                .with_experience(ExperiencePoints::ZERO),
        );
        Simulator::new(
            TenantId::new("default").unwrap(),
            create_default_axioms().unwrap(),
            seed,
        )
        .unwrap()
    }

    #[test]
    fn test_replay_empty_log_is_identity() {
        let sim = simulator();
        let replayed = replay_events(sim.genesis(), &[]).unwrap();
        assert_eq!(&replayed, sim.current_state());
    }

    #[test]
    fn test_replay_reaches_every_snapshot() {
        let mut sim = simulator();
        let aria = CharacterId::new("aria").unwrap();
        sim.simulate_stat_increase(&aria, StatType::Agility, 12, "climbing").unwrap();
        sim.simulate_experience_gain(&aria, 120, "heist").unwrap();
        sim.simulate_level_up(&aria).unwrap();

        for n in 0..=sim.history().len() {
            let replayed = replay_events(sim.genesis(), &sim.history()[..n]).unwrap();
            let expected = sim
                .snapshot_at(crate::core::types::TimePoint::new(n as u64))
                .unwrap();
            assert_eq!(&replayed, expected);
        }
    }

    #[test]
    fn test_replay_out_of_order_fails() {
        let mut sim = simulator();
        let aria = CharacterId::new("aria").unwrap();
        sim.simulate_experience_gain(&aria, 1, "a").unwrap();
        sim.simulate_experience_gain(&aria, 2, "b").unwrap();

        let reversed: Vec<_> = sim.history().iter().rev().cloned().collect();
        assert!(matches!(
            replay_events(sim.genesis(), &reversed),
            Err(LoreError::ReplayDivergence(_))
        ));
    }
}
