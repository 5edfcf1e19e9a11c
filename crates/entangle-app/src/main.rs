//! JSON-over-stdio shell: the seam between the headless simulation and
//! an external presentation layer.
//!
//! stdin:  one `ShellInput` JSON object per line (commands, control
//!         flags, name entry, quit).
//! stdout: one `WorldSnapshot` JSON object per tick, interleaved with
//!         `ShellNotice` lines for session-lifecycle results.
//! stderr: tracing output.

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;

use entangle_core::events::GameEvent;
use entangle_core::types::Viewport;
use entangle_sim::engine::SimConfig;

use entangle_app::game_loop;
use entangle_app::leaderboard::{FileScoreStore, LeaderboardClient, SubmitOutcome};
use entangle_app::profile;
use entangle_app::state::{GameLoopCommand, ShellInput, ShellNotice};

/// Delay between the game-over transition and the score submission.
const SUBMIT_DELAY: Duration = Duration::from_millis(500);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let data_dir = std::env::var("ENTANGLE_DATA_DIR").unwrap_or_else(|_| "entangle-data".into());
    let data_dir = std::path::PathBuf::from(data_dir);
    let seed = std::env::var("ENTANGLE_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let client = Arc::new(LeaderboardClient::new(FileScoreStore::new(&data_dir)));
    let mut player_name = profile::load_player_name(&data_dir);
    tracing::info!(seed, ?player_name, "starting entangle shell");

    let (snapshot_tx, snapshot_rx) = mpsc::channel();
    let cmd_tx = game_loop::spawn_game_loop(
        SimConfig {
            seed,
            viewport: Viewport::new(1280.0, 720.0),
        },
        snapshot_tx,
    );

    // stdin reader: parses protocol lines, forwards engine traffic
    // directly, and routes shell-level inputs back to this thread.
    let (shell_tx, shell_rx) = mpsc::channel::<ShellInput>();
    {
        let cmd_tx = cmd_tx.clone();
        thread::Builder::new()
            .name("entangle-stdin".into())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    let Ok(line) = line else { break };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<ShellInput>(&line) {
                        Ok(ShellInput::Command { command }) => {
                            if cmd_tx.send(GameLoopCommand::Player(command)).is_err() {
                                break;
                            }
                        }
                        Ok(ShellInput::Controls { controls }) => {
                            if cmd_tx.send(GameLoopCommand::Controls(controls)).is_err() {
                                break;
                            }
                        }
                        Ok(input) => {
                            if shell_tx.send(input).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "unparseable input line");
                        }
                    }
                }
                let _ = shell_tx.send(ShellInput::Quit);
            })
            .expect("Failed to spawn stdin thread");
    }

    // Submission results come back from detached worker threads.
    let (result_tx, result_rx) = mpsc::channel::<SubmitOutcome>();
    // A session that ended before a name was known.
    let mut pending_submission: Option<(u32, u32)> = None;

    let stdout = io::stdout();
    loop {
        let snapshot = match snapshot_rx.recv() {
            Ok(snapshot) => snapshot,
            Err(_) => break,
        };

        // Shell-level inputs.
        let mut quit = false;
        while let Ok(input) = shell_rx.try_recv() {
            match input {
                ShellInput::SetName { name } => match profile::save_player_name(&data_dir, &name)
                {
                    Ok(saved) => {
                        tracing::info!(name = %saved, "player name saved");
                        if let Some((score, level)) = pending_submission.take() {
                            submit_async(&client, &saved, score, level, &result_tx);
                        }
                        player_name = Some(saved);
                    }
                    Err(err) => tracing::warn!(error = %err, "rejected player name"),
                },
                ShellInput::Quit => quit = true,
                // Command/Controls never reach this channel.
                _ => {}
            }
        }
        if quit {
            break;
        }

        // Session lifecycle: submit the score when a session ends.
        for event in &snapshot.events {
            if let GameEvent::GameOver { score, level } = event {
                match &player_name {
                    Some(name) => submit_async(&client, name, *score, *level, &result_tx),
                    None => {
                        pending_submission = Some((*score, *level));
                        emit(&stdout, &ShellNotice::NameRequest);
                    }
                }
            }
        }

        while let Ok(outcome) = result_rx.try_recv() {
            emit(
                &stdout,
                &ShellNotice::ScoreSubmitted {
                    accepted: outcome.accepted,
                    rank: outcome.rank,
                },
            );
        }

        // The render stream itself.
        let Ok(json) = serde_json::to_string(&snapshot) else {
            continue;
        };
        if writeln!(stdout.lock(), "{json}").is_err() {
            // Renderer is gone.
            break;
        }
    }

    let _ = cmd_tx.send(GameLoopCommand::Shutdown);
}

/// Fire-and-forget score submission after the fixed delay. The call may
/// take unbounded time; it runs on its own thread and its result is
/// applied between ticks. In-flight submissions are never cancelled.
fn submit_async(
    client: &Arc<LeaderboardClient<FileScoreStore>>,
    name: &str,
    score: u32,
    level: u32,
    result_tx: &mpsc::Sender<SubmitOutcome>,
) {
    let client = Arc::clone(client);
    let name = name.to_string();
    let result_tx = result_tx.clone();
    thread::spawn(move || {
        thread::sleep(SUBMIT_DELAY);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let outcome = client.submit_score(&name, score, level, timestamp);
        tracing::info!(
            name = %name,
            score,
            level,
            accepted = outcome.accepted,
            rank = outcome.rank,
            "score submission finished"
        );
        let _ = result_tx.send(outcome);
    });
}

fn emit(stdout: &io::Stdout, notice: &ShellNotice) {
    if let Ok(json) = serde_json::to_string(notice) {
        let _ = writeln!(stdout.lock(), "{json}");
    }
}
