//! Tick-based Tombs of Amascut boss fight simulator
//!
//! Monte Carlo estimates of kill times and special attack usage for Akkha,
//! Ba-Ba and Zebak under different consumable and equipment loadouts.

pub mod accuracy;
pub mod boss;
pub mod combat_stats;
pub mod config;
pub mod entity;
pub mod error;
pub mod gear;
pub mod player;
pub mod resources;
pub mod simulation;
pub mod stats;
pub mod strategy;
pub mod tick;
pub mod weapon;

pub use boss::{BossFight, Encounter};
pub use config::{BossKind, LoadoutConfig};
pub use error::SimError;
pub use simulation::{run_and_aggregate, CombatSimulator, FastRng};
pub use stats::{AggregatedStats, SimResult, SpecTracker};
pub use tick::Tick;
