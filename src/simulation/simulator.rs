//! The progression simulator
//!
//! Holds the axiom set, the current world snapshot and the append-only
//! event log. Every public operation is one atomic step: either exactly one
//! event is appended and the world advances one tick, or nothing changes.

use super::audit::{audit_history, AuditViolation};
use super::outcome::{Denial, SimulationOutcome, TransitionResult};
use super::replay::replay_events;
use crate::axioms::AxiomSet;
use crate::core::error::{LoreError, LoreResult};
use crate::core::symbolic::term;
use crate::core::types::{CharacterId, RuleReference, StatType, TenantId, TimePoint};
use crate::events::{CausalEvent, EventContext};
use crate::state::{CharacterState, WorldSeed, WorldState};

/// Runs validated progression transitions against one world
#[derive(Debug, Clone)]
pub struct Simulator {
    tenant: TenantId,
    axioms: AxiomSet,
    current: WorldState,
    history: Vec<CausalEvent>,
    /// Superseded snapshots; index equals tick
    snapshots: Vec<WorldState>,
}

impl Simulator {
    /// Start a simulator at the genesis snapshot built from `seed`
    pub fn new(tenant: TenantId, axioms: AxiomSet, seed: WorldSeed) -> LoreResult<Self> {
        let current = WorldState::genesis(seed)?;
        tracing::info!(
            "Simulator ready: world '{}', {} characters, {} axioms",
            current.world(),
            current.len(),
            axioms.len()
        );
        Ok(Self {
            tenant,
            axioms,
            current,
            history: Vec::new(),
            snapshots: Vec::new(),
        })
    }

    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    pub fn axioms(&self) -> &AxiomSet {
        &self.axioms
    }

    pub fn current_state(&self) -> &WorldState {
        &self.current
    }

    pub fn character(&self, id: &CharacterId) -> Option<&CharacterState> {
        self.current.character(id)
    }

    /// Every event ever committed, in append order
    pub fn history(&self) -> &[CausalEvent] {
        &self.history
    }

    /// The world as it was at `time`, if that tick has been reached
    pub fn snapshot_at(&self, time: TimePoint) -> Option<&WorldState> {
        if time == self.current.time_point() {
            return Some(&self.current);
        }
        usize::try_from(time.value())
            .ok()
            .and_then(|idx| self.snapshots.get(idx))
    }

    /// The genesis snapshot
    pub fn genesis(&self) -> &WorldState {
        self.snapshots.first().unwrap_or(&self.current)
    }

    /// Level up when the character holds the experience its next level requires
    pub fn simulate_level_up(&mut self, id: &CharacterId) -> LoreResult<SimulationOutcome> {
        let Some(state) = self.current.character(id) else {
            return Ok(deny(Denial::UnknownCharacter(id.clone())));
        };
        let Some(level) = state.level() else {
            return Ok(deny(Denial::MissingLevel(id.clone())));
        };
        let Some(experience) = state.experience() else {
            return Ok(deny(Denial::MissingExperience(id.clone())));
        };

        let cap = self.axioms.level_cap();
        let next_level = match level.next() {
            Some(next) if level < cap => next,
            _ => {
                return Ok(deny(Denial::LevelCapReached {
                    character: id.clone(),
                    level,
                    cap,
                }))
            }
        };

        let Some(axiom) = self.axioms.required_xp_axiom(next_level) else {
            return Ok(deny(Denial::NoExperienceRule(next_level)));
        };
        let Some(required) = self.axioms.get_required_xp(next_level) else {
            return Ok(deny(Denial::NoExperienceRule(next_level)));
        };
        if !state.can_level_up(required) {
            return Ok(deny(Denial::InsufficientExperience {
                character: id.clone(),
                level: next_level,
                have: experience,
                required,
            }));
        }

        if state.class().is_none() {
            return Ok(deny(Denial::ClassRequired(id.clone())));
        }

        let next_state = state.with_level_up(next_level)?;
        let event = CausalEvent::level_up(
            self.context(id),
            level,
            next_level,
            required,
            axiom.rule_reference(),
        )?;
        self.commit(event, next_state)
    }

    /// Add experience; accrual is never gated by an axiom
    pub fn simulate_experience_gain(
        &mut self,
        id: &CharacterId,
        amount: u32,
        source: &str,
    ) -> LoreResult<SimulationOutcome> {
        let Some(state) = self.current.character(id) else {
            return Ok(deny(Denial::UnknownCharacter(id.clone())));
        };

        let have = state.experience().unwrap_or_default();
        if have.value().checked_add(amount).is_none() {
            return Ok(deny(Denial::ExperienceOverflow {
                character: id.clone(),
                have,
                amount,
            }));
        }

        let next_state = state.with_experience_gain(amount);
        let total = next_state.experience().unwrap_or_default();
        let event = CausalEvent::experience_gain(self.context(id), amount, source, total)?;
        self.commit(event, next_state)
    }

    /// Raise a stat, provided the class may use it and the bound holds
    pub fn simulate_stat_increase(
        &mut self,
        id: &CharacterId,
        stat: StatType,
        amount: u32,
        reason: &str,
    ) -> LoreResult<SimulationOutcome> {
        let Some(state) = self.current.character(id) else {
            return Ok(deny(Denial::UnknownCharacter(id.clone())));
        };

        if let Some(class) = state.class() {
            if !self.axioms.can_use_stat(class, stat) {
                return Ok(deny(Denial::ClassCannotUseStat { class, stat }));
            }
        }

        let current = state.stat(stat);
        let candidate = u64::from(current.value()) + u64::from(amount);
        if let Some(max) = self.axioms.get_max_stat(stat) {
            if candidate > u64::from(max) {
                return Ok(deny(Denial::StatBoundExceeded {
                    stat,
                    candidate,
                    max,
                }));
            }
        }

        if candidate > u64::from(u32::MAX) {
            return Ok(deny(Denial::StatOverflow { stat, candidate }));
        }

        let permission = self.stat_permission(state, stat);
        let next_state = state.with_stat_increase(stat, amount);
        let event = CausalEvent::stat_increase(
            self.context(id),
            stat,
            current,
            next_state.stat(stat),
            reason,
            permission,
        )?;
        self.commit(event, next_state)
    }

    /// Re-derive the current world from genesis using only the event log
    pub fn replay(&self) -> LoreResult<WorldState> {
        replay_events(self.genesis(), &self.history)
    }

    /// Replay the log and fail if it does not reproduce the current world
    pub fn verify_replay(&self) -> LoreResult<()> {
        let replayed = self.replay()?;
        if replayed != self.current {
            return Err(LoreError::ReplayDivergence(format!(
                "replayed world at t{} differs from current world at t{}",
                replayed.time_point(),
                self.current.time_point()
            )));
        }
        Ok(())
    }

    /// Check every retained snapshot and event against the axioms
    pub fn audit(&self) -> Vec<AuditViolation> {
        let snapshots: Vec<&WorldState> = self
            .snapshots
            .iter()
            .chain(std::iter::once(&self.current))
            .collect();
        audit_history(&self.axioms, &snapshots, &self.history)
    }

    fn context(&self, id: &CharacterId) -> EventContext {
        EventContext {
            tenant: self.tenant.clone(),
            world: self.current.world().clone(),
            character: id.clone(),
            from_time: self.current.time_point(),
            to_time: self.current.time_point().next(),
        }
    }

    /// The axiom that makes a stat increase lawful
    fn stat_permission(&self, state: &CharacterState, stat: StatType) -> RuleReference {
        let permitting = match state.class() {
            Some(class) => self.axioms.class_stat_axiom(class, stat),
            None => self.axioms.max_stat_axiom(stat),
        };
        match permitting {
            Some(axiom) => axiom.rule_reference(),
            None => RuleReference::new(
                term("unconstrained_stat", [stat.symbol()]),
                format!("No axiom bounds or restricts {}", stat),
            ),
        }
    }

    /// Append the event and swap in the next snapshot.
    ///
    /// Everything fallible happens before the first write.
    fn commit(
        &mut self,
        event: CausalEvent,
        next_state: CharacterState,
    ) -> LoreResult<SimulationOutcome> {
        let next_world = self.current.advance(next_state)?;
        if event.from_time() != self.current.time_point()
            || event.to_time() != next_world.time_point()
        {
            return Err(LoreError::TimeMismatch {
                character: event.character().clone(),
                character_time: event.to_time(),
                world_time: next_world.time_point(),
            });
        }

        let observations = vec![event.get_observation_log()];
        tracing::debug!(
            "t{} -> t{}: {} for {}",
            event.from_time(),
            event.to_time(),
            event.event_type().symbol(),
            event.character()
        );

        let previous = std::mem::replace(&mut self.current, next_world);
        self.snapshots.push(previous);
        self.history.push(event.clone());

        Ok(SimulationOutcome::Applied(TransitionResult {
            events: vec![event],
            world: self.current.clone(),
            observations,
        }))
    }
}

fn deny(denial: Denial) -> SimulationOutcome {
    tracing::debug!("Denied: {}", denial);
    SimulationOutcome::Denied(denial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axioms::{create_default_axioms, Axiom};
    use crate::core::types::{CharacterClass, ExperiencePoints, Level};
    use crate::events::EventType;
    use crate::state::CharacterSeed;
    use crate::core::types::WorldId;

    fn id(name: &str) -> CharacterId {
        CharacterId::new(name).unwrap()
    }

    fn simulator() -> Simulator {
        let seed = WorldSeed::new(WorldId::new("eldoria").unwrap())
            .with_character(
                CharacterSeed::new(id("aria"))
                    .with_level(Level::MIN)
                    .with_class(CharacterClass::Warrior)
                    .with_experience(ExperiencePoints::ZERO)
                    .with_stat(StatType::Strength, 10),
            )
            .with_character(
                CharacterSeed::new(id("brom"))
                    .with_level(Level::MIN)
                    .with_class(CharacterClass::Mage)
                    .with_experience(ExperiencePoints::ZERO)
                    .with_stat(StatType::Intellect, 20),
            )
            .with_character(CharacterSeed::new(id("drifter")));
        Simulator::new(
            TenantId::new("default").unwrap(),
            create_default_axioms().unwrap(),
            seed,
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_character_denied() {
        let mut sim = simulator();
        let outcome = sim.simulate_level_up(&id("ghost")).unwrap();
        assert_eq!(
            outcome.denial(),
            Some(&Denial::UnknownCharacter(id("ghost")))
        );
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_level_up_needs_level_and_experience() {
        let mut sim = simulator();
        let outcome = sim.simulate_level_up(&id("drifter")).unwrap();
        assert_eq!(outcome.denial(), Some(&Denial::MissingLevel(id("drifter"))));
    }

    #[test]
    fn test_level_up_consumes_requirement() {
        let mut sim = simulator();
        sim.simulate_experience_gain(&id("aria"), 130, "quest").unwrap();
        let outcome = sim.simulate_level_up(&id("aria")).unwrap();

        let result = outcome.applied().unwrap();
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].event_type(), &EventType::LevelUp);
        assert_eq!(result.events[0].reasons()[0].rule, "required_xp(2, 100)");

        let aria = sim.character(&id("aria")).unwrap();
        assert_eq!(aria.level().unwrap().value(), 2);
        assert_eq!(aria.experience(), Some(ExperiencePoints::ZERO));
    }

    #[test]
    fn test_level_cap_denied() {
        let axioms = crate::axioms::AxiomSet::new(vec![
            Axiom::class_definition(CharacterClass::Warrior, ""),
            Axiom::required_experience(Level::new(2).unwrap(), ExperiencePoints::new(10), ""),
            Axiom::level_up_rule(Level::MIN, "nobody advances"),
        ])
        .unwrap();
        let seed = WorldSeed::new(WorldId::new("w").unwrap()).with_character(
            CharacterSeed::new(id("aria"))
                .with_level(Level::MIN)
                .with_class(CharacterClass::Warrior)
                .with_experience(ExperiencePoints::new(50)),
        );
        let mut sim = Simulator::new(TenantId::new("t").unwrap(), axioms, seed).unwrap();

        let outcome = sim.simulate_level_up(&id("aria")).unwrap();
        assert!(matches!(
            outcome.denial(),
            Some(Denial::LevelCapReached { .. })
        ));
    }

    #[test]
    fn test_missing_experience_rule_denied() {
        let axioms = crate::axioms::AxiomSet::new(vec![Axiom::class_definition(
            CharacterClass::Warrior,
            "",
        )])
        .unwrap();
        let seed = WorldSeed::new(WorldId::new("w").unwrap()).with_character(
            CharacterSeed::new(id("aria"))
                .with_level(Level::MIN)
                .with_class(CharacterClass::Warrior)
                .with_experience(ExperiencePoints::new(5000)),
        );
        let mut sim = Simulator::new(TenantId::new("t").unwrap(), axioms, seed).unwrap();
        let outcome = sim.simulate_level_up(&id("aria")).unwrap();
        assert_eq!(
            outcome.denial(),
            Some(&Denial::NoExperienceRule(Level::new(2).unwrap()))
        );
    }

    #[test]
    fn test_other_characters_advance_in_lock_step() {
        let mut sim = simulator();
        sim.simulate_stat_increase(&id("aria"), StatType::Strength, 5, "drills")
            .unwrap();

        let world = sim.current_state();
        assert_eq!(world.time_point(), TimePoint::new(1));
        for character in world.characters() {
            assert_eq!(character.time_point(), TimePoint::new(1));
        }
        assert_eq!(
            sim.character(&id("brom")).unwrap().stat(StatType::Intellect).value(),
            20
        );
    }

    #[test]
    fn test_classless_character_uses_bound_as_permission() {
        let mut sim = simulator();
        let outcome = sim
            .simulate_stat_increase(&id("drifter"), StatType::Agility, 3, "wandering")
            .unwrap();
        let result = outcome.applied().unwrap();
        assert_eq!(result.events[0].reasons()[0].rule, "max_stat(agility, 100)");
    }

    #[test]
    fn test_snapshots_remain_reachable() {
        let mut sim = simulator();
        sim.simulate_experience_gain(&id("aria"), 10, "patrol").unwrap();
        sim.simulate_experience_gain(&id("aria"), 15, "patrol").unwrap();

        let genesis = sim.snapshot_at(TimePoint::GENESIS).unwrap();
        let first = sim.snapshot_at(TimePoint::new(1)).unwrap();
        assert_eq!(genesis.character(&id("aria")).unwrap().experience().unwrap().value(), 0);
        assert_eq!(first.character(&id("aria")).unwrap().experience().unwrap().value(), 10);
        assert_eq!(sim.snapshot_at(TimePoint::new(2)), Some(sim.current_state()));
        assert!(sim.snapshot_at(TimePoint::new(3)).is_none());
    }

    #[test]
    fn test_replay_matches_current() {
        let mut sim = simulator();
        sim.simulate_experience_gain(&id("aria"), 100, "quest").unwrap();
        sim.simulate_level_up(&id("aria")).unwrap();
        sim.simulate_stat_increase(&id("brom"), StatType::Intellect, 7, "study")
            .unwrap();

        assert!(sim.verify_replay().is_ok());
        assert!(sim.audit().is_empty());
    }

    #[test]
    fn test_classless_level_up_denied() {
        let seed = WorldSeed::new(WorldId::new("w").unwrap()).with_character(
            CharacterSeed::new(id("nomad"))
                .with_level(Level::MIN)
                .with_experience(ExperiencePoints::new(500)),
        );
        let mut sim = Simulator::new(
            TenantId::new("t").unwrap(),
            create_default_axioms().unwrap(),
            seed,
        )
        .unwrap();

        let outcome = sim.simulate_level_up(&id("nomad")).unwrap();
        assert_eq!(outcome.denial(), Some(&Denial::ClassRequired(id("nomad"))));
        assert!(sim.history().is_empty());
        assert_eq!(sim.current_state().time_point(), TimePoint::GENESIS);
    }

    #[test]
    fn test_overflowing_gains_denied() {
        let axioms = crate::axioms::AxiomSet::new(vec![Axiom::class_definition(
            CharacterClass::Warrior,
            "",
        )])
        .unwrap();
        let seed = WorldSeed::new(WorldId::new("w").unwrap()).with_character(
            CharacterSeed::new(id("nomad"))
                .with_experience(ExperiencePoints::new(u32::MAX - 1))
                .with_stat(StatType::Agility, u32::MAX - 1),
        );
        let mut sim = Simulator::new(TenantId::new("t").unwrap(), axioms, seed).unwrap();

        let outcome = sim.simulate_experience_gain(&id("nomad"), 10, "luck").unwrap();
        assert!(matches!(
            outcome.denial(),
            Some(Denial::ExperienceOverflow { amount: 10, .. })
        ));

        let outcome = sim
            .simulate_stat_increase(&id("nomad"), StatType::Agility, 10, "luck")
            .unwrap();
        assert_eq!(
            outcome.denial(),
            Some(&Denial::StatOverflow {
                stat: StatType::Agility,
                candidate: u64::from(u32::MAX) + 9,
            })
        );
        assert!(sim.history().is_empty());

        // Exactly reaching the maximum is still allowed
        let outcome = sim.simulate_experience_gain(&id("nomad"), 1, "luck").unwrap();
        assert!(outcome.is_applied());
    }
}
