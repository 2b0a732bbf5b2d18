//! Durable key-value storage and the typed adapter over it
//!
//! `KeyValueStore` is the raw string store (one JSON file on disk).
//! `Persistence` is the only thing that knows which key holds which record,
//! and recovers from unreadable records by falling back to defaults.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::constants::keys;
use crate::types::{Card, Mode};

/// String-keyed store of serialized records
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Key-value store backed by a single JSON object on disk
///
/// Every write rewrites the whole file synchronously; last write wins.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store, starting empty if the file is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(entries) => {
                    info!(path = %path.display(), keys = entries.len(), "Loaded key-value store");
                    entries
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Failed to parse key-value store, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No key-value store yet, starting empty");
                BTreeMap::new()
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to read key-value store, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create store directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize key-value store")?;
        fs::write(&self.path, json)
            .context(format!("Failed to write key-value store to {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// In-memory store for tests
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub entries: BTreeMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Typed load/save per entity over a `KeyValueStore`
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// One-time upgrades of older records; run before any load
    pub fn migrate_legacy(&mut self) {
        if let Some(legacy) = self.store.get(keys::LEGACY_CARDS)
            && !self.store.contains(keys::WEB_CARDS)
        {
            info!("Migrating legacy card list into web cards");
            if let Err(e) = self
                .store
                .set(keys::WEB_CARDS, legacy)
                .and_then(|_| self.store.remove(keys::LEGACY_CARDS))
            {
                error!(error = ?e, "Failed to migrate legacy card list");
            }
        }

        if self.store.contains(keys::LEGACY_SECTIONS) {
            debug!("Dropping obsolete sections record");
            if let Err(e) = self.store.remove(keys::LEGACY_SECTIONS) {
                warn!(error = ?e, "Failed to drop obsolete sections record");
            }
        }
    }

    pub fn load_cards(&self, mode: Mode) -> Vec<Card> {
        let key = cards_key(mode);
        let Some(raw) = self.store.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<Card>>(&raw) {
            Ok(cards) => {
                info!(mode = %mode, count = cards.len(), "Loaded cards");
                cards
            }
            Err(e) => {
                error!(mode = %mode, error = %e, "Failed to parse saved cards, starting empty");
                Vec::new()
            }
        }
    }

    pub fn save_cards(&mut self, mode: Mode, cards: &[Card]) -> Result<()> {
        self.save_json(cards_key(mode), cards)
            .context(format!("Failed to save {mode} cards"))
    }

    pub fn load_mode(&self) -> Mode {
        match self.store.get(keys::ACTIVE_MODE) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Unknown saved mode, falling back to web");
                Mode::default()
            }),
            None => Mode::default(),
        }
    }

    pub fn save_mode(&mut self, mode: Mode) -> Result<()> {
        self.store
            .set(keys::ACTIVE_MODE, mode.as_str().to_string())
            .context("Failed to save active mode")
    }

    /// Load settings overlaid on defaults, migrated and clamped
    pub fn load_settings(&mut self) -> Settings {
        let Some(raw) = self.store.get(keys::SETTINGS) else {
            return Settings::default();
        };
        let mut settings = match Settings::from_json(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                error!(error = ?e, "Failed to parse saved settings, using defaults");
                return Settings::default();
            }
        };
        if settings.migrate_legacy()
            && let Err(e) = self.save_settings(&settings)
        {
            warn!(error = ?e, "Failed to persist migrated settings");
        }
        settings.validate_and_clamp();
        settings
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        self.save_json(keys::SETTINGS, settings)
            .context("Failed to save settings")
    }

    fn save_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).context("Failed to serialize record")?;
        self.store.set(key, json)
    }
}

fn cards_key(mode: Mode) -> &'static str {
    match mode {
        Mode::Web => keys::WEB_CARDS,
        Mode::Folders => keys::FOLDER_CARDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, target: &str) -> Card {
        Card {
            id: id.to_string(),
            title: None,
            target: target.to_string(),
            image: None,
            theme_color: None,
        }
    }

    #[test]
    fn test_legacy_cards_migrated_when_no_web_cards() {
        let legacy = r#"[{"id":"1","title":null,"url":"https://a.example","image":null,"themeColor":null}]"#;
        let mut store = MemoryStore::default();
        store.entries.insert(keys::LEGACY_CARDS.to_string(), legacy.to_string());

        let mut persistence = Persistence::new(store);
        persistence.migrate_legacy();

        assert_eq!(persistence.store().get(keys::WEB_CARDS).as_deref(), Some(legacy));
        assert!(!persistence.store().contains(keys::LEGACY_CARDS));
        assert_eq!(persistence.load_cards(Mode::Web), vec![card("1", "https://a.example")]);
    }

    #[test]
    fn test_legacy_cards_left_alone_when_web_cards_exist() {
        let mut store = MemoryStore::default();
        store.entries.insert(keys::LEGACY_CARDS.to_string(), "[]".to_string());
        store.entries.insert(keys::WEB_CARDS.to_string(), r#"[{"id":"9","url":"x"}]"#.to_string());

        let mut persistence = Persistence::new(store);
        persistence.migrate_legacy();

        assert!(persistence.store().contains(keys::LEGACY_CARDS));
        assert_eq!(persistence.load_cards(Mode::Web).len(), 1);
    }

    #[test]
    fn test_obsolete_sections_dropped() {
        let mut store = MemoryStore::default();
        store.entries.insert(keys::LEGACY_SECTIONS.to_string(), "[]".to_string());
        let mut persistence = Persistence::new(store);
        persistence.migrate_legacy();
        assert!(!persistence.store().contains(keys::LEGACY_SECTIONS));
    }

    #[test]
    fn test_corrupt_cards_fall_back_to_empty() {
        let mut store = MemoryStore::default();
        store.entries.insert(keys::FOLDER_CARDS.to_string(), "{oops".to_string());
        let persistence = Persistence::new(store);
        assert!(persistence.load_cards(Mode::Folders).is_empty());
    }

    #[test]
    fn test_mode_roundtrip_and_fallback() {
        let mut persistence = Persistence::new(MemoryStore::default());
        assert_eq!(persistence.load_mode(), Mode::Web);

        persistence.save_mode(Mode::Folders).unwrap();
        assert_eq!(persistence.store().get(keys::ACTIVE_MODE).as_deref(), Some("folders"));
        assert_eq!(persistence.load_mode(), Mode::Folders);

        persistence.store.set(keys::ACTIVE_MODE, "sections".to_string()).unwrap();
        assert_eq!(persistence.load_mode(), Mode::Web);
    }

    #[test]
    fn test_settings_legacy_rename_is_persisted() {
        let mut store = MemoryStore::default();
        store.entries.insert(keys::SETTINGS.to_string(), r#"{"compactMode":true,"canvasOpacity":0.5}"#.to_string());
        let mut persistence = Persistence::new(store);

        let settings = persistence.load_settings();
        assert!(settings.stacked_mode);
        assert_eq!(settings.canvas_opacity, 0.5);

        let saved = persistence.store().get(keys::SETTINGS).unwrap();
        assert!(saved.contains("\"stackedMode\":true"));
        assert!(!saved.contains("compactMode"));
    }

    #[test]
    fn test_corrupt_settings_use_defaults() {
        let mut store = MemoryStore::default();
        store.entries.insert(keys::SETTINGS.to_string(), "{\"stackedMode\":".to_string());
        let mut persistence = Persistence::new(store);
        assert_eq!(persistence.load_settings(), Settings::default());
    }

    #[test]
    fn test_mistyped_setting_keeps_other_keys() {
        let mut store = MemoryStore::default();
        store.entries.insert(
            keys::SETTINGS.to_string(),
            r#"{"canvasOpacity":"0.5","autoTransparency":true}"#.to_string(),
        );
        let mut persistence = Persistence::new(store);

        let settings = persistence.load_settings();
        assert!(settings.auto_transparency);
        assert_eq!(settings.canvas_opacity, Settings::default().canvas_opacity);
    }

    #[test]
    fn test_json_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/store.json");

        let mut store = JsonFileStore::open(&path);
        store.set("alpha", "1".to_string()).unwrap();
        store.set("beta", "2".to_string()).unwrap();
        store.remove("alpha").unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("alpha"), None);
        assert_eq!(reopened.get("beta").as_deref(), Some("2"));
    }

    #[test]
    fn test_json_file_store_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all").unwrap();
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("anything"), None);
    }
}
