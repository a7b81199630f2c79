pub mod config;
pub mod entity;
pub mod metrics;
pub mod region;
pub mod rng;
pub mod spatial;
pub mod species;
pub mod world;

pub use config::{ConfigError, SimConfig};
pub use entity::EntityId;
pub use metrics::{EntitySnapshot, PopulationCounts, RunSummary, TurnReport};
pub use species::Species;
pub use world::{RunError, World, WorldError};
