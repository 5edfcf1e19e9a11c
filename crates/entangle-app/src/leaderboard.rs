//! Leaderboard persistence collaborator.
//!
//! The simulation core never talks to storage directly; the shell calls
//! `LeaderboardClient` at session-lifecycle points. Submissions are
//! best-effort: a failing store is logged and the client falls back to
//! a local in-memory record of the best-known scores, so the game loop
//! never sees an error.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Leaderboard entries shown to the player.
pub const LEADERBOARD_SIZE: usize = 10;

/// Entries retained in the backing store (history beyond the top 10).
const STORE_CAPACITY: usize = 50;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
    /// Unix timestamp (seconds) of the submission.
    pub timestamp: u64,
}

/// Result of a submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// Whether the backing store accepted the submission. False means
    /// the score was only retained locally.
    pub accepted: bool,
    /// 1-indexed rank of the player's best entry after the submission.
    pub rank: usize,
}

/// Best score and level across all entries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TopScores {
    pub top_score: u32,
    pub top_level: u32,
}

/// Storage port for score persistence. Implementations may fail; the
/// client degrades gracefully.
pub trait ScoreStore: Send + Sync {
    fn submit(&self, entry: ScoreEntry) -> Result<SubmitOutcome, String>;
    fn fetch_leaderboard(&self) -> Result<Vec<ScoreEntry>, String>;
    fn fetch_top(&self) -> Result<TopScores, String>;
}

/// Sort score-descending, then level-descending.
fn sort_entries(entries: &mut [ScoreEntry]) {
    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.level.cmp(&a.level))
    });
}

/// Merge a submission into a list: one entry per name, keeping the
/// maximum score and maximum level seen for that name.
fn merge_entry(entries: &mut Vec<ScoreEntry>, entry: ScoreEntry) {
    match entries.iter_mut().find(|e| e.name == entry.name) {
        Some(existing) => {
            existing.score = existing.score.max(entry.score);
            existing.level = existing.level.max(entry.level);
            existing.timestamp = entry.timestamp;
        }
        None => entries.push(entry),
    }
    sort_entries(entries);
}

fn rank_of(entries: &[ScoreEntry], name: &str) -> usize {
    entries
        .iter()
        .position(|e| e.name == name)
        .map(|i| i + 1)
        .unwrap_or(entries.len())
}

/// JSON-file score store: one `leaderboard.json` under a data directory.
pub struct FileScoreStore {
    dir: PathBuf,
}

impl FileScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join("leaderboard.json")
    }

    fn read_entries(&self) -> Result<Vec<ScoreEntry>, String> {
        let path = self.path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read leaderboard file: {e}"))?;
        serde_json::from_str(&json).map_err(|e| format!("Failed to parse leaderboard: {e}"))
    }

    fn write_entries(&self, entries: &[ScoreEntry]) -> Result<(), String> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| format!("Failed to create data directory: {e}"))?;
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| format!("Failed to serialize leaderboard: {e}"))?;
        fs::write(self.path(), json).map_err(|e| format!("Failed to write leaderboard: {e}"))
    }
}

impl ScoreStore for FileScoreStore {
    fn submit(&self, entry: ScoreEntry) -> Result<SubmitOutcome, String> {
        let name = entry.name.clone();
        let mut entries = self.read_entries()?;
        merge_entry(&mut entries, entry);
        entries.truncate(STORE_CAPACITY);
        self.write_entries(&entries)?;
        Ok(SubmitOutcome {
            accepted: true,
            rank: rank_of(&entries, &name),
        })
    }

    fn fetch_leaderboard(&self) -> Result<Vec<ScoreEntry>, String> {
        let mut entries = self.read_entries()?;
        sort_entries(&mut entries);
        entries.truncate(LEADERBOARD_SIZE);
        Ok(entries)
    }

    fn fetch_top(&self) -> Result<TopScores, String> {
        let mut entries = self.read_entries()?;
        sort_entries(&mut entries);
        Ok(entries
            .first()
            .map(|e| TopScores {
                top_score: e.score,
                top_level: e.level,
            })
            .unwrap_or_default())
    }
}

/// Best-effort wrapper around a `ScoreStore` with a local fallback.
///
/// Store failures are logged and absorbed: submissions are retained in
/// an in-memory top-10 so the session lifecycle always gets an outcome,
/// and fetches fall back to the local records (or empty/zero values).
pub struct LeaderboardClient<S: ScoreStore> {
    store: S,
    fallback: Mutex<Vec<ScoreEntry>>,
}

impl<S: ScoreStore> LeaderboardClient<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            fallback: Mutex::new(Vec::new()),
        }
    }

    /// Submit a session's result. Never fails; on store errors the
    /// best-known record is kept locally and `accepted` is false.
    pub fn submit_score(&self, name: &str, score: u32, level: u32, timestamp: u64) -> SubmitOutcome {
        let entry = ScoreEntry {
            name: name.to_string(),
            score,
            level,
            timestamp,
        };
        match self.store.submit(entry.clone()) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(error = %err, "score submission failed, keeping local record");
                let mut fallback = self.fallback.lock().unwrap_or_else(|e| e.into_inner());
                merge_entry(&mut fallback, entry);
                fallback.truncate(LEADERBOARD_SIZE);
                SubmitOutcome {
                    accepted: false,
                    rank: rank_of(&fallback, name),
                }
            }
        }
    }

    /// Current top entries, from the store or the local fallback.
    pub fn leaderboard(&self) -> Vec<ScoreEntry> {
        match self.store.fetch_leaderboard() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(error = %err, "leaderboard fetch failed, serving local records");
                self.fallback
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .clone()
            }
        }
    }

    /// Best score/level for the HUD; zeros when nothing is available.
    pub fn top(&self) -> TopScores {
        match self.store.fetch_top() {
            Ok(top) => top,
            Err(err) => {
                tracing::warn!(error = %err, "top-score fetch failed");
                let fallback = self.fallback.lock().unwrap_or_else(|e| e.into_inner());
                fallback
                    .first()
                    .map(|e| TopScores {
                        top_score: e.score,
                        top_level: e.level,
                    })
                    .unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("entangle_test_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn submit_and_fetch_round_trip() {
        let dir = temp_dir("lb_round_trip");
        let store = FileScoreStore::new(&dir);

        let outcome = store
            .submit(ScoreEntry {
                name: "ada".into(),
                score: 120,
                level: 3,
                timestamp: 1000,
            })
            .unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.rank, 1);

        let entries = store.fetch_leaderboard().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "ada");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn resubmission_keeps_best_score_and_level() {
        let dir = temp_dir("lb_merge_max");
        let store = FileScoreStore::new(&dir);

        store
            .submit(ScoreEntry {
                name: "ada".into(),
                score: 120,
                level: 3,
                timestamp: 1000,
            })
            .unwrap();
        // Worse score but deeper level: both maxima are retained.
        store
            .submit(ScoreEntry {
                name: "ada".into(),
                score: 80,
                level: 5,
                timestamp: 2000,
            })
            .unwrap();

        let entries = store.fetch_leaderboard().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].score, 120);
        assert_eq!(entries[0].level, 5);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn ordering_is_score_then_level() {
        let dir = temp_dir("lb_ordering");
        let store = FileScoreStore::new(&dir);

        store
            .submit(ScoreEntry {
                name: "low".into(),
                score: 50,
                level: 9,
                timestamp: 1,
            })
            .unwrap();
        store
            .submit(ScoreEntry {
                name: "tie_shallow".into(),
                score: 100,
                level: 2,
                timestamp: 2,
            })
            .unwrap();
        let outcome = store
            .submit(ScoreEntry {
                name: "tie_deep".into(),
                score: 100,
                level: 4,
                timestamp: 3,
            })
            .unwrap();
        assert_eq!(outcome.rank, 1, "Level breaks the score tie");

        let entries = store.fetch_leaderboard().unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["tie_deep", "tie_shallow", "low"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn leaderboard_view_is_capped() {
        let dir = temp_dir("lb_cap");
        let store = FileScoreStore::new(&dir);

        for i in 0..15u32 {
            store
                .submit(ScoreEntry {
                    name: format!("p{i}"),
                    score: i * 10,
                    level: 1,
                    timestamp: i as u64,
                })
                .unwrap();
        }

        let entries = store.fetch_leaderboard().unwrap();
        assert_eq!(entries.len(), LEADERBOARD_SIZE);
        assert_eq!(entries[0].score, 140);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn fetch_top_on_empty_store() {
        let dir = temp_dir("lb_empty_top");
        let store = FileScoreStore::new(&dir);
        let top = store.fetch_top().unwrap();
        assert_eq!(top.top_score, 0);
        assert_eq!(top.top_level, 0);
    }

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn submit(&self, _entry: ScoreEntry) -> Result<SubmitOutcome, String> {
            Err("store unavailable".into())
        }
        fn fetch_leaderboard(&self) -> Result<Vec<ScoreEntry>, String> {
            Err("store unavailable".into())
        }
        fn fetch_top(&self) -> Result<TopScores, String> {
            Err("store unavailable".into())
        }
    }

    #[test]
    fn client_falls_back_when_store_unavailable() {
        let client = LeaderboardClient::new(FailingStore);

        let outcome = client.submit_score("ada", 120, 3, 1000);
        assert!(!outcome.accepted);
        assert_eq!(outcome.rank, 1);

        // Best-known records survive locally, merged per name.
        client.submit_score("ada", 80, 5, 2000);
        client.submit_score("bob", 200, 2, 3000);

        let entries = client.leaderboard();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "bob");
        assert_eq!(entries[1].score, 120);
        assert_eq!(entries[1].level, 5);

        let top = client.top();
        assert_eq!(top.top_score, 200);
    }

    #[test]
    fn client_uses_store_when_available() {
        let dir = temp_dir("lb_client_store");
        let client = LeaderboardClient::new(FileScoreStore::new(&dir));

        let outcome = client.submit_score("ada", 50, 1, 1000);
        assert!(outcome.accepted);
        assert_eq!(client.leaderboard().len(), 1);
        assert_eq!(client.top().top_score, 50);

        let _ = fs::remove_dir_all(&dir);
    }
}
