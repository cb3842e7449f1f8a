//! Simulation engine: the combat core.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems in a fixed order, and produces `CombatSnapshot`s.
//! Completely headless and deterministic for a given seed and command
//! stream.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use starfall_core::commands::PlayerCommand;
use starfall_core::components::{AiController, CombatSession, PlayerShip, WeaponLoadout};
use starfall_core::config::CombatConfig;
use starfall_core::enums::{AmmoTier, EnemyKind};
use starfall_core::error::{CombatError, ConfigError, Result};
use starfall_core::events::Notice;
use starfall_core::state::CombatSnapshot;
use starfall_core::types::{EntityId, Position, SimTime};

use starfall_ai::fsm;
use starfall_ai::patrol::{OrbitPatrol, PatrolMotion};

use crate::munitions::MunitionStore;
use crate::session;
use crate::sinks::Collaborators;
use crate::systems;
use crate::systems::TickLog;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub combat: CombatConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            combat: CombatConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON document.
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.combat.validate()?;
        Ok(config)
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: CombatConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    munitions: MunitionStore,
    patrol: Box<dyn PatrolMotion>,
    collaborators: Collaborators,
    player: Option<Entity>,
    log: TickLog,
}

impl SimulationEngine {
    /// Create an engine that reports to the default collaborators.
    pub fn new(config: SimConfig) -> Self {
        Self::with_collaborators(config, Collaborators::default())
    }

    /// Create an engine wired to the given collaborators.
    pub fn with_collaborators(config: SimConfig, collaborators: Collaborators) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            config: config.combat,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            munitions: MunitionStore::new(),
            patrol: Box::new(OrbitPatrol::default()),
            collaborators,
            player: None,
            log: TickLog::default(),
        }
    }

    /// Replace the patrol routine used by every NPC.
    pub fn set_patrol(&mut self, patrol: Box<dyn PatrolMotion>) {
        self.patrol = patrol;
    }

    /// Spawn the player ship. A second call replaces the previous ship as
    /// the command recipient.
    pub fn spawn_player(&mut self, position: Position, loadout: WeaponLoadout) -> EntityId {
        let entity = world_setup::spawn_player(&mut self.world, position, loadout, &self.config);
        self.player = Some(entity);
        entity.into()
    }

    /// Spawn an NPC of `kind` at `position`.
    pub fn spawn_npc(&mut self, kind: EnemyKind, position: Position) -> EntityId {
        world_setup::spawn_npc(&mut self.world, kind, position, &self.config).into()
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Put an NPC on alert toward `position`, e.g. when an ally calls for
    /// help. Attacking or fleeing NPCs are left alone.
    pub fn raise_alert(&mut self, npc: EntityId, position: Position) -> Result<()> {
        let entity = self.resolve(npc)?;
        let mut controller = self
            .world
            .get::<&mut AiController>(entity)
            .map_err(|_| CombatError::UnknownEntity(npc))?;
        let AiController { config, brain, .. } = &mut *controller;
        fsm::raise_alert(brain, config, position);
        Ok(())
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> CombatSnapshot {
        self.process_commands();
        self.run_systems();
        self.time.advance();

        let log = self.log.take();
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.munitions, log)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the combat configuration in use.
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the munitions in flight.
    pub fn munitions(&self) -> &MunitionStore {
        &self.munitions
    }

    /// The player ship, if one was spawned.
    pub fn player(&self) -> Option<EntityId> {
        self.player.map(EntityId::from)
    }

    /// Mutable world access for tests that need to stage combat state.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let tick = self.time.tick;

        // 1. AI decisions and movement
        systems::ai::run(
            &mut self.world,
            &mut self.munitions,
            &*self.patrol,
            &mut self.rng,
            &mut self.log.events,
        );
        systems::movement::steer_player(&mut self.world);
        systems::movement::run(&mut self.world);

        // 2. Weapons
        systems::weapons::run(
            &mut self.world,
            &mut self.munitions,
            &self.config,
            &mut self.log.events,
            &mut *self.collaborators.notifications,
            &mut *self.collaborators.audio,
        );

        // 3. Munition flight
        systems::flight::run(&self.world, &mut self.munitions, &self.config);

        // 4. Resolution
        systems::resolution::run(
            &mut self.world,
            &mut self.munitions,
            &self.config,
            &mut self.collaborators,
            tick,
            &mut self.log,
        );

        // 5. Session transitions
        systems::target_loss::run(&mut self.world, &mut self.munitions, &mut self.log.events);

        // 6. Regeneration
        systems::regeneration::run(&mut self.world, &self.config);

        // 7. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.munitions, &mut self.despawn_buffer);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(command) {
                debug!(%err, "Command refused");
                self.collaborators.notifications.notify(&Notice::from(err));
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<()> {
        let Some(player) = self.player.filter(|p| session::is_live(&self.world, *p)) else {
            debug!(?command, "No live player ship, command dropped");
            return Ok(());
        };

        match command {
            PlayerCommand::MoveTo { x, y } => {
                if let Ok(mut ship) = self.world.get::<&mut PlayerShip>(player) {
                    ship.destination = Some(Position::new(x, y));
                }
            }
            PlayerCommand::SelectTarget { target } => {
                let target = self.resolve(target)?;
                session::select_target(
                    &mut self.world,
                    &mut self.munitions,
                    &mut self.log.events,
                    player,
                    target,
                )?;
            }
            PlayerCommand::ClearTarget => {
                session::clear_target(
                    &mut self.world,
                    &mut self.munitions,
                    &mut self.log.events,
                    player,
                );
            }
            PlayerCommand::StartCombat => {
                session::start_combat(&mut self.world, &mut self.log.events, player)?;
            }
            PlayerCommand::StopCombat => {
                session::stop_combat(
                    &mut self.world,
                    &mut self.munitions,
                    &mut self.log.events,
                    player,
                );
            }
            PlayerCommand::SelectAmmo { tier } => self.select_ammo(player, tier),
            PlayerCommand::LaunchMissile => {
                systems::weapons::launch_missile(
                    &mut self.world,
                    &mut self.munitions,
                    &self.config,
                    &mut self.log.events,
                    &mut *self.collaborators.audio,
                    player,
                )?;
            }
        }
        Ok(())
    }

    fn select_ammo(&mut self, player: Entity, tier: AmmoTier) {
        if let Ok(mut loadout) = self.world.get::<&mut WeaponLoadout>(player) {
            if loadout.ammo_tier == tier {
                return;
            }
            debug!(from = ?loadout.ammo_tier, to = ?tier, "Ammunition switched");
            loadout.ammo_tier = tier;
        }
        if let Ok(mut session) = self.world.get::<&mut CombatSession>(player) {
            session.ammo_warning_sent = false;
        }
    }

    /// Map an id to a world entity.
    fn resolve(&self, id: EntityId) -> Result<Entity> {
        id.entity()
            .filter(|e| self.world.contains(*e))
            .ok_or(CombatError::UnknownEntity(id))
    }
}
