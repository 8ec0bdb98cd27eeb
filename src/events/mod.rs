//! Causal event records

pub mod causal;

pub use causal::{CausalEvent, EventContext, EventPayload, EventType};
