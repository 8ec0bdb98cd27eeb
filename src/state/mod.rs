//! Time-indexed snapshots of characters and worlds

pub mod character;
pub mod seed;
pub mod world;

pub use character::CharacterState;
pub use seed::{load_world, parse_world_toml, CharacterSeed, WorldSeed};
pub use world::WorldState;
