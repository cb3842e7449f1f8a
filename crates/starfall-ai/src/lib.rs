//! NPC behavior for STARFALL.
//!
//! Implements the Patrol / Alert / Attack / Flee state machine, the
//! default patrol routine, and per-enemy-type behavior profiles.

pub mod fsm;
pub mod patrol;
pub mod profiles;

pub use starfall_core as core;

#[cfg(test)]
mod tests;
