//! JSON-backed preference store
//!
//! A flat string-keyed map persisted to disk, shared between the play and
//! settings modes and across concurrently running instances. Missing or
//! malformed values fall back to documented defaults instead of failing.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::skins::{FoodSkin, SnakeSkin};

/// Default timer period when no speed preference is stored
pub const DEFAULT_SPEED_MS: u64 = 100;

/// The persisted preference keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefKey {
    Speed,
    WallCollision,
    SnakeSkin,
    FoodSkin,
    HighScore,
}

impl PrefKey {
    pub const ALL: [PrefKey; 5] = [
        PrefKey::Speed,
        PrefKey::WallCollision,
        PrefKey::SnakeSkin,
        PrefKey::FoodSkin,
        PrefKey::HighScore,
    ];

    /// Key string as stored in the preference file
    pub fn as_str(self) -> &'static str {
        match self {
            PrefKey::Speed => "snakeSpeed",
            PrefKey::WallCollision => "wallCollision",
            PrefKey::SnakeSkin => "snakeSkin",
            PrefKey::FoodSkin => "foodSkin",
            PrefKey::HighScore => "snakeHighScore",
        }
    }
}

/// Durable key-value preferences with typed, defaulting accessors
pub struct PrefStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl PrefStore {
    /// Open a store backed by the given file. A missing file yields an
    /// empty store; every accessor then returns its default.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = read_map(&path)?;
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw string value, if the key has ever been written
    pub fn get(&self, key: PrefKey) -> Option<&str> {
        self.values.get(key.as_str()).map(String::as_str)
    }

    /// Write a value and persist the whole map to disk
    pub fn set(&mut self, key: PrefKey, value: impl Into<String>) -> Result<()> {
        self.values.insert(key.as_str().to_string(), value.into());
        self.save()
    }

    /// Re-read the backing file, returning the keys whose values changed.
    /// Used to pick up writes made by another instance.
    pub fn reload(&mut self) -> Result<Vec<PrefKey>> {
        let fresh = read_map(&self.path)?;
        let changed = PrefKey::ALL
            .into_iter()
            .filter(|key| self.values.get(key.as_str()) != fresh.get(key.as_str()))
            .collect();
        self.values = fresh;
        Ok(changed)
    }

    /// Timer period in milliseconds; default 100
    pub fn speed_ms(&self) -> u64 {
        self.get(PrefKey::Speed)
            .and_then(|value| value.parse().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_SPEED_MS)
    }

    /// Whether walls kill instead of wrapping; default false
    pub fn wall_collision(&self) -> bool {
        self.get(PrefKey::WallCollision) == Some("true")
    }

    pub fn snake_skin(&self) -> SnakeSkin {
        self.get(PrefKey::SnakeSkin)
            .and_then(SnakeSkin::from_name)
            .unwrap_or_default()
    }

    pub fn food_skin(&self) -> FoodSkin {
        self.get(PrefKey::FoodSkin)
            .and_then(FoodSkin::from_name)
            .unwrap_or_default()
    }

    pub fn high_score(&self) -> u32 {
        self.get(PrefKey::HighScore)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }

    /// Persist the score if it strictly beats the stored high score.
    /// Returns whether a new record was written.
    pub fn record_high_score(&mut self, score: u32) -> Result<bool> {
        if score > self.high_score() {
            self.set(PrefKey::HighScore, score.to_string())?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json =
            serde_json::to_string_pretty(&self.values).context("Failed to serialize preferences")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences to {:?}", self.path))?;

        Ok(())
    }
}

/// Read the preference map from disk. A missing or unparseable file is
/// treated as empty so that defaults apply.
fn read_map(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read preferences from {:?}", path))?;

    Ok(serde_json::from_str(&raw).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_in(dir: &TempDir) -> PrefStore {
        PrefStore::open(dir.path().join("prefs.json")).unwrap()
    }

    #[test]
    fn test_defaults_when_file_is_missing() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir);

        assert_eq!(store.speed_ms(), 100);
        assert!(!store.wall_collision());
        assert_eq!(store.snake_skin(), SnakeSkin::Green);
        assert_eq!(store.food_skin(), FoodSkin::Apple);
        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.set(PrefKey::Speed, "75").unwrap();
        store.set(PrefKey::WallCollision, "true").unwrap();
        store.set(PrefKey::SnakeSkin, "purple").unwrap();

        let reopened = open_in(&dir);

        assert_eq!(reopened.speed_ms(), 75);
        assert!(reopened.wall_collision());
        assert_eq!(reopened.snake_skin(), SnakeSkin::Purple);
    }

    #[test]
    fn test_malformed_values_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.set(PrefKey::Speed, "fast").unwrap();
        store.set(PrefKey::WallCollision, "yes").unwrap();
        store.set(PrefKey::SnakeSkin, "plaid").unwrap();
        store.set(PrefKey::FoodSkin, "durian").unwrap();
        store.set(PrefKey::HighScore, "lots").unwrap();

        assert_eq!(store.speed_ms(), 100);
        assert!(!store.wall_collision());
        assert_eq!(store.snake_skin(), SnakeSkin::Green);
        assert_eq!(store.food_skin(), FoodSkin::Apple);
        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn test_corrupt_file_is_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json at all").unwrap();

        let store = PrefStore::open(path).unwrap();

        assert_eq!(store.speed_ms(), 100);
        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn test_high_score_updates_only_on_strict_improvement() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);

        assert!(store.record_high_score(10).unwrap());
        assert_eq!(store.high_score(), 10);

        // Equal score must not overwrite
        assert!(!store.record_high_score(10).unwrap());
        assert_eq!(store.high_score(), 10);

        assert!(!store.record_high_score(5).unwrap());
        assert_eq!(store.high_score(), 10);

        assert!(store.record_high_score(11).unwrap());
        assert_eq!(store.high_score(), 11);
    }

    #[test]
    fn test_reload_reports_changed_keys() {
        let dir = TempDir::new().unwrap();
        let mut writer = open_in(&dir);
        let mut reader = open_in(&dir);
        writer.set(PrefKey::FoodSkin, "cherry").unwrap();
        reader.reload().unwrap();

        writer.set(PrefKey::SnakeSkin, "blue").unwrap();
        writer.set(PrefKey::Speed, "50").unwrap();

        let mut changed = reader.reload().unwrap();
        changed.sort_by_key(|key| key.as_str());

        assert_eq!(changed, vec![PrefKey::SnakeSkin, PrefKey::Speed]);
        assert_eq!(reader.snake_skin(), SnakeSkin::Blue);
        assert_eq!(reader.speed_ms(), 50);

        assert!(reader.reload().unwrap().is_empty());
    }
}
