//! Causal events: the only channel through which progression state changes
//!
//! An event names the character it acts on, the tick span it covers, the
//! rules that justified it and the facts it produced. Events are built once
//! and never edited.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::core::error::{LoreError, LoreResult};
use crate::core::symbolic::{atom, clause, term};
use crate::core::types::{
    CharacterId, EventId, ExperiencePoints, Level, RuleReference, StatType, StatValue, TenantId,
    TimePoint, WorldId,
};

/// Kind of transition an event records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    LevelUp,
    StatIncrease,
    ExperienceGain,
    /// Slot for event kinds outside the three built-ins
    Custom(String),
}

impl EventType {
    pub fn symbol(&self) -> String {
        match self {
            Self::LevelUp => "level_up".to_string(),
            Self::StatIncrease => "stat_increase".to_string(),
            Self::ExperienceGain => "experience_gain".to_string(),
            Self::Custom(name) => atom(name),
        }
    }
}

/// Structured form of the change, enough to replay it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EventPayload {
    LevelUp {
        from: Level,
        to: Level,
        experience_consumed: ExperiencePoints,
    },
    ExperienceGain {
        amount: u32,
        source: String,
        total: ExperiencePoints,
    },
    StatIncrease {
        stat: StatType,
        from: StatValue,
        to: StatValue,
        reason: String,
    },
    Custom,
}

/// Who and when an event is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub tenant: TenantId,
    pub world: WorldId,
    pub character: CharacterId,
    pub from_time: TimePoint,
    pub to_time: TimePoint,
}

/// Auditable record of one state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CausalEvent {
    id: EventId,
    tenant: TenantId,
    world: WorldId,
    character: CharacterId,
    event_type: EventType,
    from_time: TimePoint,
    to_time: TimePoint,
    description: String,
    reasons: Vec<RuleReference>,
    effects: BTreeMap<String, String>,
    payload: EventPayload,
}

impl CausalEvent {
    fn new(
        ctx: EventContext,
        event_type: EventType,
        description: String,
        reasons: Vec<RuleReference>,
        effects: BTreeMap<String, String>,
        payload: EventPayload,
    ) -> LoreResult<Self> {
        if ctx.to_time <= ctx.from_time {
            return Err(LoreError::TimeRegression {
                from: ctx.from_time,
                to: ctx.to_time,
            });
        }
        if reasons.is_empty() {
            return Err(LoreError::EmptyReasons);
        }
        if effects.is_empty() {
            return Err(LoreError::EmptyEffects);
        }

        Ok(Self {
            id: EventId::new(),
            tenant: ctx.tenant,
            world: ctx.world,
            character: ctx.character,
            event_type,
            from_time: ctx.from_time,
            to_time: ctx.to_time,
            description,
            reasons,
            effects,
            payload,
        })
    }

    /// Level increase justified by the experience requirement for `to`
    pub fn level_up(
        ctx: EventContext,
        from: Level,
        to: Level,
        experience_consumed: ExperiencePoints,
        requirement: RuleReference,
    ) -> LoreResult<Self> {
        let who = ctx.character.symbol();
        let effect = term("level", [who, to.to_string(), ctx.to_time.to_string()]);
        let description = format!(
            "{} rises from level {} to {}, spending {} experience",
            ctx.character, from, to, experience_consumed
        );
        Self::new(
            ctx,
            EventType::LevelUp,
            description,
            vec![requirement],
            BTreeMap::from([("new_level".to_string(), effect)]),
            EventPayload::LevelUp {
                from,
                to,
                experience_consumed,
            },
        )
    }

    /// Stat increase justified by `permission` (a class relation or bound axiom)
    pub fn stat_increase(
        ctx: EventContext,
        stat: StatType,
        from: StatValue,
        to: StatValue,
        reason: impl Into<String>,
        permission: RuleReference,
    ) -> LoreResult<Self> {
        let reason = reason.into();
        let who = ctx.character.symbol();
        let effect = term(
            "stat_value",
            [who, stat.symbol().to_string(), to.to_string(), ctx.to_time.to_string()],
        );
        let description = format!(
            "{} raises {} from {} to {} ({})",
            ctx.character, stat, from, to, reason
        );
        Self::new(
            ctx,
            EventType::StatIncrease,
            description,
            vec![permission],
            BTreeMap::from([("new_stat_value".to_string(), effect)]),
            EventPayload::StatIncrease {
                stat,
                from,
                to,
                reason,
            },
        )
    }

    /// Experience accrual; justified by its source, no axiom gates it
    pub fn experience_gain(
        ctx: EventContext,
        amount: u32,
        source: impl Into<String>,
        total: ExperiencePoints,
    ) -> LoreResult<Self> {
        let source = source.into();
        let who = ctx.character.symbol();
        let effect = term("experience", [who, total.to_string(), ctx.to_time.to_string()]);
        let reason = RuleReference::new(
            term("experience_source", [atom(&source), amount.to_string()]),
            format!("{} experience earned from {}", amount, source),
        );
        let description = format!(
            "{} gains {} experience from {} (total {})",
            ctx.character, amount, source, total
        );
        Self::new(
            ctx,
            EventType::ExperienceGain,
            description,
            vec![reason],
            BTreeMap::from([("new_experience".to_string(), effect)]),
            EventPayload::ExperienceGain {
                amount,
                source,
                total,
            },
        )
    }

    /// Event of a kind outside the built-ins; carries no replayable payload
    pub fn custom(
        ctx: EventContext,
        name: impl Into<String>,
        description: impl Into<String>,
        reasons: Vec<RuleReference>,
        effects: BTreeMap<String, String>,
    ) -> LoreResult<Self> {
        Self::new(
            ctx,
            EventType::Custom(name.into()),
            description.into(),
            reasons,
            effects,
            EventPayload::Custom,
        )
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    pub fn world(&self) -> &WorldId {
        &self.world
    }

    pub fn character(&self) -> &CharacterId {
        &self.character
    }

    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    pub fn from_time(&self) -> TimePoint {
        self.from_time
    }

    pub fn to_time(&self) -> TimePoint {
        self.to_time
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn reasons(&self) -> &[RuleReference] {
        &self.reasons
    }

    pub fn effects(&self) -> &BTreeMap<String, String> {
        &self.effects
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn to_symbolic_facts(&self) -> Vec<String> {
        let e = self.id.symbol();
        let mut facts = vec![
            clause("event", [e.as_str()]),
            clause("event_type", [e.clone(), self.event_type.symbol()]),
            clause("actor", [e.clone(), self.character.symbol()]),
            clause("from_time", [e.clone(), self.from_time.to_string()]),
            clause("to_time", [e.clone(), self.to_time.to_string()]),
        ];
        for reason in &self.reasons {
            facts.push(clause("reason", [e.as_str(), reason.rule.as_str()]));
        }
        for (name, predicate) in &self.effects {
            facts.push(clause("effect", [e.clone(), atom(name), predicate.clone()]));
        }
        facts
    }

    /// Human-readable rendering of causes and effects for auditing
    pub fn get_observation_log(&self) -> String {
        let mut log = String::new();
        let _ = writeln!(
            log,
            "[t{} -> t{}] {} {} (character {}, world {}, tenant {})",
            self.from_time,
            self.to_time,
            self.event_type.symbol(),
            self.id,
            self.character,
            self.world,
            self.tenant
        );
        let _ = writeln!(log, "  {}", self.description);
        let _ = writeln!(log, "  Because:");
        for reason in &self.reasons {
            let _ = writeln!(log, "    - {}: {}", reason.rule, reason.description);
        }
        let _ = writeln!(log, "  Effects:");
        for (name, predicate) in &self.effects {
            let _ = writeln!(log, "    - {}: {}", name, predicate);
        }
        log
    }
}
