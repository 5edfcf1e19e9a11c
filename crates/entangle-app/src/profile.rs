//! Player profile storage: a persisted display name surviving session
//! restarts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Maximum stored name length.
pub const MAX_NAME_LEN: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Profile {
    name: String,
}

fn profile_path(dir: &Path) -> PathBuf {
    dir.join("profile.json")
}

/// Trim surrounding whitespace and cap the length.
pub fn sanitize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.chars().take(MAX_NAME_LEN).collect()
}

/// Load the persisted player name, if one exists and is non-empty.
pub fn load_player_name(dir: &Path) -> Option<String> {
    let json = fs::read_to_string(profile_path(dir)).ok()?;
    let profile: Profile = serde_json::from_str(&json).ok()?;
    let name = sanitize_name(&profile.name);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Persist the player name (sanitized). An empty name after
/// sanitization is rejected.
pub fn save_player_name(dir: &Path, raw: &str) -> Result<String, String> {
    let name = sanitize_name(raw);
    if name.is_empty() {
        return Err("Name is empty".into());
    }
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create data directory: {e}"))?;
    let json = serde_json::to_string_pretty(&Profile { name: name.clone() })
        .map_err(|e| format!("Failed to serialize profile: {e}"))?;
    fs::write(profile_path(dir), json).map_err(|e| format!("Failed to write profile: {e}"))?;
    Ok(name)
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
    fn sanitize_trims_and_caps() {
        assert_eq!(sanitize_name("  ada  "), "ada");
        assert_eq!(
            sanitize_name("a_very_long_player_name_indeed"),
            "a_very_long_player_n"
        );
        assert_eq!(sanitize_name("   "), "");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = temp_dir("profile_round_trip");
        assert!(load_player_name(&dir).is_none());

        let saved = save_player_name(&dir, "  ada ").unwrap();
        assert_eq!(saved, "ada");
        assert_eq!(load_player_name(&dir).as_deref(), Some("ada"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_name_rejected() {
        let dir = temp_dir("profile_empty");
        assert!(save_player_name(&dir, "   ").is_err());
        assert!(load_player_name(&dir).is_none());
    }
}
