//! Game loop thread — runs the simulation engine at a nominal 60Hz and
//! streams snapshots to the shell.
//!
//! The engine is created inside the thread because it's cleaner for
//! ownership. Commands arrive via `mpsc`; each iteration measures the
//! real frame time and hands it to the engine as the tick's delta-time
//! (the engine clamps hitches itself).

use std::sync::mpsc;
use std::time::{Duration, Instant};

use entangle_core::constants::TICK_RATE;
use entangle_core::state::WorldSnapshot;
use entangle_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the shell to use. Snapshots are
/// delivered on `snapshot_tx`; the loop exits when either channel
/// disconnects or a `Shutdown` command arrives.
pub fn spawn_game_loop(
    config: SimConfig,
    snapshot_tx: mpsc::Sender<WorldSnapshot>,
) -> mpsc::Sender<GameLoopCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("entangle-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, snapshot_tx);
        })
        .expect("Failed to spawn game loop thread");

    cmd_tx
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    snapshot_tx: mpsc::Sender<WorldSnapshot>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    let mut last_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(command)) => engine.queue_command(command),
                Ok(GameLoopCommand::Controls(controls)) => engine.set_controls(controls),
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick with the measured frame time (the engine
        //    gates on game state and clamps the delta internally)
        let now = Instant::now();
        let dt = now.duration_since(last_tick_time).as_secs_f64();
        last_tick_time = now;
        let snapshot = engine.tick(dt);

        // 3. Stream the snapshot; a gone receiver ends the loop
        if snapshot_tx.send(snapshot).is_err() {
            return;
        }

        // 4. Sleep until the next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
