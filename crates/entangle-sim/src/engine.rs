//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands
//! at tick boundaries, runs all systems in a fixed order, and produces
//! `WorldSnapshot`s. Completely headless, enabling deterministic tests:
//! a tick's outcome is a pure function of (state, queued commands,
//! control flags, dt, seed).

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use entangle_core::catalog;
use entangle_core::commands::{ControlState, PlayerCommand};
use entangle_core::constants::MAX_FRAME_DT;
use entangle_core::enums::{FireMode, GameState};
use entangle_core::events::GameEvent;
use entangle_core::state::WorldSnapshot;
use entangle_core::state_machine::StateMachine;
use entangle_core::stats::{Inventory, Loadout, PlayerStats};
use entangle_core::types::{Position, SimTime, Viewport};

use crate::progression;
use crate::session::{SessionStats, SpawnTimers};
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial arena dimensions; zero until the presentation layer
    /// reports real ones (spawns are deferred meanwhile).
    pub viewport: Viewport,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            viewport: Viewport::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    machine: StateMachine,
    mode: FireMode,
    viewport: Viewport,
    controls: ControlState,
    stats: PlayerStats,
    loadout: Loadout,
    inventory: Inventory,
    session: SessionStats,
    timers: SpawnTimers,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    next_spawn_id: u64,
    player: hecs::Entity,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let player = world_setup::spawn_player(&mut world, config.viewport);
        Self {
            world,
            time: SimTime::default(),
            machine: StateMachine::new(),
            mode: FireMode::default(),
            viewport: config.viewport,
            controls: ControlState::default(),
            stats: PlayerStats::default(),
            loadout: Loadout::default(),
            inventory: Inventory::default(),
            session: SessionStats::default(),
            timers: SpawnTimers::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            next_spawn_id: 0,
            player,
        }
    }

    /// Replace the level-triggered control flags for subsequent ticks.
    pub fn set_controls(&mut self, controls: ControlState) {
        self.controls = controls;
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick covering `dt` seconds (clamped
    /// to bound integration error on frame hitches) and return the
    /// resulting snapshot. Outside `Playing` the world is frozen and
    /// only commands are processed.
    pub fn tick(&mut self, dt: f64) -> WorldSnapshot {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        self.process_commands();

        if self.machine.is_playing() {
            self.time.advance(dt);
            self.run_systems(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            &self.time,
            self.machine.state(),
            self.mode,
            self.viewport,
            &self.stats,
            &self.loadout,
            &self.session,
            &self.inventory,
            events,
        )
    }

    /// Get the current game state.
    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    /// Get the current firing mode.
    pub fn mode(&self) -> FireMode {
        self.mode
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Invalid commands (unaffordable
    /// craft/upgrade, restart outside game-over) are rejected silently.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Shoot => {
                if self.machine.is_playing() {
                    systems::combat::player_shoot(
                        &mut self.world,
                        &self.time,
                        &self.controls,
                        &self.stats,
                        &self.loadout,
                        self.mode,
                        &mut self.rng,
                        &mut self.next_spawn_id,
                    );
                }
            }
            PlayerCommand::ToggleCrafting => self.machine.toggle(GameState::Crafting),
            PlayerCommand::ToggleShop => self.machine.toggle(GameState::Shop),
            PlayerCommand::ToggleLeaderboard => self.machine.toggle(GameState::Leaderboard),
            PlayerCommand::Escape => self.machine.escape(),
            PlayerCommand::SetMode { mode } => self.mode = mode,
            PlayerCommand::Restart => {
                if self.machine.restart() {
                    self.reset_session();
                }
            }
            PlayerCommand::SetViewport { width, height } => {
                self.viewport = Viewport::new(width.max(0.0), height.max(0.0));
                let start = world_setup::player_start_position(self.viewport);
                if let Ok(mut position) = self.world.get::<&mut Position>(self.player) {
                    *position = start;
                }
            }
            PlayerCommand::Craft { item } => {
                if progression::craft(
                    item,
                    &mut self.stats,
                    &mut self.loadout,
                    &mut self.inventory,
                )
                .is_ok()
                {
                    self.events.push(GameEvent::Crafted { item });
                }
            }
            PlayerCommand::UpgradeStat { stat } => {
                if let Ok(cost) =
                    progression::apply_upgrade(stat, &mut self.stats, &mut self.inventory)
                {
                    self.events.push(GameEvent::StatUpgraded { stat, cost });
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Continuous fire while the control is held (automatic weapons).
        systems::combat::auto_fire(
            &mut self.world,
            &self.time,
            &self.controls,
            &self.stats,
            &self.loadout,
            self.mode,
            &mut self.rng,
            &mut self.next_spawn_id,
        );

        // 2. Level progression.
        let level = SessionStats::level_for_elapsed(self.time.elapsed_secs);
        if level > self.session.level {
            self.session.level = level;
            self.timers.rescale(level);
            self.events.push(GameEvent::LevelUp { level });
        }

        // 3. Player movement.
        systems::player::run(
            &mut self.world,
            &self.controls,
            &self.stats,
            &self.loadout,
            self.viewport,
            dt,
        );

        // 4. Shield regeneration.
        let regen = catalog::shield_profile(self.loadout.shield).regen;
        self.stats.regen_shield(regen, dt);

        // 5. Bullet update and combat resolution.
        let level = self.session.level;
        systems::combat::resolve_bullets(
            &mut self.world,
            self.mode,
            self.viewport,
            dt,
            level,
            &mut self.rng,
            &mut self.session,
            &mut self.inventory,
            &mut self.events,
            &mut self.despawn_buffer,
            &mut self.next_spawn_id,
        );

        // 6. Target/pair motion.
        systems::motion::run(&mut self.world, self.viewport, dt);

        // 7. Obstacle update and player contact.
        let destroyed = systems::obstacles::run(
            &mut self.world,
            dt,
            &mut self.stats,
            &mut self.rng,
            &mut self.events,
            &mut self.next_spawn_id,
        );
        if destroyed {
            self.machine.game_over();
            self.events.push(GameEvent::GameOver {
                score: self.session.score,
                level: self.session.level,
            });
        }

        // 8. Pickup update and collection.
        systems::pickups::run(&mut self.world, dt, &mut self.inventory, &mut self.events);

        // 9. Cosmetic particles.
        systems::particles::run(&mut self.world, dt);

        // 10. Lifecycle sweeps.
        systems::cleanup::run(&mut self.world, self.viewport, &mut self.despawn_buffer);

        // 11. Time-driven spawning.
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.timers,
            &self.session,
            self.mode,
            self.viewport,
            &self.time,
            &mut self.next_spawn_id,
        );
    }

    /// Clear the session back to its initial world: all transient
    /// entities despawned, counters and clocks zeroed, hull and shield
    /// refilled. Equipment and inventory persist across resets.
    fn reset_session(&mut self) {
        self.despawn_buffer.clear();
        for (entity, _id) in self.world.query_mut::<&entangle_core::components::SpawnId>() {
            self.despawn_buffer.push(entity);
        }
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }

        self.time = SimTime::default();
        self.session = SessionStats::default();
        self.timers = SpawnTimers::default();
        self.stats.reset_for_new_session();

        let start = world_setup::player_start_position(self.viewport);
        if let Ok(mut position) = self.world.get::<&mut Position>(self.player) {
            *position = start;
        }
        if let Ok(mut player) =
            self.world.get::<&mut entangle_core::components::Player>(self.player)
        {
            player.last_shot_secs = None;
        }
    }

    // --- Test support -------------------------------------------------

    /// Spawn a target at an exact position (bypasses the spawner).
    #[cfg(test)]
    pub fn spawn_target_at(
        &mut self,
        position: Position,
        velocity: entangle_core::types::Velocity,
    ) -> hecs::Entity {
        use entangle_core::components::{SpawnId, Target};
        use entangle_core::constants::TARGET_RADIUS;
        let id = SpawnId(self.next_spawn_id);
        self.next_spawn_id += 1;
        self.world.spawn((
            Target {
                radius: TARGET_RADIUS,
                health: 1,
            },
            position,
            velocity,
            id,
        ))
    }

    /// Spawn an entangled pair with exact member positions.
    #[cfg(test)]
    pub fn spawn_pair_at(&mut self, a: Position, b: Position) -> hecs::Entity {
        use entangle_core::components::{EntangledPair, PairMember, SpawnId};
        use entangle_core::constants::TARGET_RADIUS;
        use entangle_core::types::Velocity;
        let id = SpawnId(self.next_spawn_id);
        self.next_spawn_id += 1;
        let member = |position: Position| PairMember {
            position,
            velocity: Velocity::default(),
            radius: TARGET_RADIUS,
            health: 1,
        };
        self.world.spawn((
            EntangledPair {
                a: member(a),
                b: member(b),
            },
            id,
        ))
    }

    /// Spawn an obstacle with exact kinematics and damage.
    #[cfg(test)]
    pub fn spawn_obstacle_at(
        &mut self,
        position: Position,
        velocity: entangle_core::types::Velocity,
        radius: f64,
        damage: f64,
    ) -> hecs::Entity {
        use entangle_core::components::{Obstacle, SpawnId};
        let id = SpawnId(self.next_spawn_id);
        self.next_spawn_id += 1;
        self.world
            .spawn((Obstacle { radius, damage }, position, velocity, id))
    }

    /// Spawn a pickup at an exact position with no scatter velocity.
    #[cfg(test)]
    pub fn spawn_pickup_at(
        &mut self,
        position: Position,
        kind: entangle_core::enums::Resource,
    ) -> hecs::Entity {
        use entangle_core::components::{Lifetime, Pickup, SpawnId};
        use entangle_core::constants::{PICKUP_LIFETIME_SECS, PICKUP_RADIUS};
        use entangle_core::types::Velocity;
        let id = SpawnId(self.next_spawn_id);
        self.next_spawn_id += 1;
        self.world.spawn((
            Pickup {
                kind,
                radius: PICKUP_RADIUS,
                collected: false,
            },
            position,
            Velocity::default(),
            Lifetime {
                remaining_secs: PICKUP_LIFETIME_SECS,
            },
            id,
        ))
    }

    #[cfg(test)]
    pub fn session(&self) -> &SessionStats {
        &self.session
    }

    #[cfg(test)]
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    #[cfg(test)]
    pub fn stats_mut(&mut self) -> &mut PlayerStats {
        &mut self.stats
    }

    #[cfg(test)]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    #[cfg(test)]
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    #[cfg(test)]
    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    #[cfg(test)]
    pub fn player_position(&self) -> Position {
        self.world
            .get::<&Position>(self.player)
            .map(|position| *position)
            .unwrap_or_default()
    }
}
