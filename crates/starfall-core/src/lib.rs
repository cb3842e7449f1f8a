//! Core types and definitions for the STARFALL combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, configuration, snapshots, events, the damage
//! pipeline, and the reward/level tables. It has no dependency on any
//! rendering, audio or network runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod damage;
pub mod enums;
pub mod error;
pub mod events;
pub mod rewards;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
