//! Combat simulation engine for STARFALL.
//!
//! Owns the hecs ECS world, runs the combat systems at a fixed tick rate,
//! and produces `CombatSnapshot`s for rendering and UI collaborators.

pub mod engine;
pub mod guidance;
pub mod munitions;
pub mod session;
pub mod sinks;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use starfall_core as core;
