//! Layered numeric settings
//!
//! View styles and window sizes load from a global TOML file overlaid by a
//! local one, and can be adjusted from the command line with `key=value`
//! tokens. A `global_` key prefix persists the value globally, otherwise it
//! lands in the local file. Values are clamped to their documented ranges
//! rather than rejected.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Local settings file, resolved against the working directory.
pub const LOCAL_FILE: &str = ".gitwell.toml";

/// Recognized numeric options with their defaults.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Commits shown in the history window (1-10).
    pub history_length: u8,
    /// Files shown in the changes window (1-10).
    pub changes_length: u8,
    /// Commits shown in the post-commit view (1-10).
    pub final_length: u8,
    /// Heading layout (0 hides the view).
    pub heading_style: u8,
    /// History layout (0 hides, 1 two-line, 2 compact).
    pub history_style: u8,
    /// Changes layout (0 hides the view).
    pub changes_style: u8,
    /// Snapshot cache time-to-live in milliseconds.
    pub cache_ttl_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_length: 5,
            changes_length: 3,
            final_length: 1,
            heading_style: 1,
            history_style: 1,
            changes_style: 1,
            cache_ttl_ms: 5000,
        }
    }
}

impl Settings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// Sets one recognized option by name, clamping to its range. Returns
    /// false for unknown keys.
    fn set(&mut self, key: &str, value: i64) -> bool {
        match key {
            "history_length" => self.history_length = clamp_u8(value, 1, 10),
            "changes_length" => self.changes_length = clamp_u8(value, 1, 10),
            "final_length" => self.final_length = clamp_u8(value, 1, 10),
            "heading_style" => self.heading_style = clamp_u8(value, 0, 4),
            "history_style" => self.history_style = clamp_u8(value, 0, 4),
            "changes_style" => self.changes_style = clamp_u8(value, 0, 4),
            "cache_ttl_ms" => self.cache_ttl_ms = value.clamp(0, 60_000).unsigned_abs(),
            _ => return false,
        }
        true
    }
}

fn clamp_u8(value: i64, min: i64, max: i64) -> u8 {
    u8::try_from(value.clamp(min, max)).unwrap_or_default()
}

/// One settings file as written, with absent keys left absent so a partial
/// file overrides only the keys it names.
#[derive(Deserialize, Default, Clone, Copy, Debug)]
struct Layer {
    history_length: Option<u8>,
    changes_length: Option<u8>,
    final_length: Option<u8>,
    heading_style: Option<u8>,
    history_style: Option<u8>,
    changes_style: Option<u8>,
    cache_ttl_ms: Option<u64>,
}

impl Layer {
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(v) = self.history_length {
            settings.history_length = v;
        }
        if let Some(v) = self.changes_length {
            settings.changes_length = v;
        }
        if let Some(v) = self.final_length {
            settings.final_length = v;
        }
        if let Some(v) = self.heading_style {
            settings.heading_style = v;
        }
        if let Some(v) = self.history_style {
            settings.history_style = v;
        }
        if let Some(v) = self.changes_style {
            settings.changes_style = v;
        }
        if let Some(v) = self.cache_ttl_ms {
            settings.cache_ttl_ms = v;
        }
    }
}

/// Where settings live and how command-line tokens update them.
pub struct SettingsStore {
    local_path: PathBuf,
    global_path: Option<PathBuf>,
}

impl SettingsStore {
    /// Store rooted at the working directory, with the global file under the
    /// platform configuration directory.
    pub fn new(root: &Path) -> Self {
        Self {
            local_path: root.join(LOCAL_FILE),
            global_path: dirs::config_dir().map(|dir| dir.join("gitwell").join("config.toml")),
        }
    }

    /// Store with explicit file locations (used by tests).
    pub fn with_paths(local_path: PathBuf, global_path: Option<PathBuf>) -> Self {
        Self {
            local_path,
            global_path,
        }
    }

    /// Loads defaults overlaid by the global file, overlaid by the local
    /// file. Each layer overrides only the keys it names; missing or
    /// unreadable files fall back silently to the previous layer.
    pub fn load(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(global) = self.global_path.as_deref()
            && let Some(layer) = read_file(global)
        {
            debug!("Loaded global settings from {}", global.display());
            layer.apply_to(&mut settings);
        }
        if let Some(layer) = read_file(&self.local_path) {
            debug!("Loaded local settings from {}", self.local_path.display());
            layer.apply_to(&mut settings);
        }

        settings
    }

    /// Applies `key=value` tokens to `settings`, persisting each recognized
    /// one: a `global_` prefix writes the global file, anything else the
    /// local file. Malformed or unknown tokens are reported and skipped.
    pub fn apply_tokens(&self, settings: &mut Settings, tokens: &[String]) -> Result<()> {
        // The global layer is tracked separately so a later local token does
        // not leak its value into the global file.
        let mut global_settings = Settings::default();
        if let Some(layer) = self.global_path.as_deref().and_then(read_file) {
            layer.apply_to(&mut global_settings);
        }
        let mut local_dirty = false;
        let mut global_dirty = false;

        for token in tokens {
            let Some((key, raw_value)) = token.split_once('=') else {
                crate::ui::print_warning(&format!("Ignoring setting without '=': {token}"));
                continue;
            };
            let Ok(value) = raw_value.parse::<i64>() else {
                crate::ui::print_warning(&format!("Ignoring non-numeric value: {token}"));
                continue;
            };

            if let Some(global_key) = key.strip_prefix("global_") {
                if global_settings.set(global_key, value) {
                    settings.set(global_key, value);
                    global_dirty = true;
                } else {
                    crate::ui::print_warning(&format!("Unknown global setting: {global_key}"));
                }
            } else if settings.set(key, value) {
                local_dirty = true;
            } else {
                crate::ui::print_warning(&format!("Unknown setting: {key}"));
            }
        }

        if global_dirty && let Some(global) = self.global_path.as_deref() {
            write_file(global, &global_settings)?;
        }
        if local_dirty {
            write_file(&self.local_path, settings)?;
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Option<Layer> {
    let text = fs::read_to_string(path).ok()?;
    match toml::from_str(&text) {
        Ok(layer) => Some(layer),
        Err(e) => {
            warn!("Ignoring unparseable settings file {}: {e}", path.display());
            None
        }
    }
}

fn write_file(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Persisted settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SettingsStore {
        SettingsStore::with_paths(
            dir.path().join(LOCAL_FILE),
            Some(dir.path().join("global.toml")),
        )
    }

    #[test]
    fn defaults_match_the_documented_windows() {
        let settings = Settings::default();
        assert_eq!(settings.history_length, 5);
        assert_eq!(settings.changes_length, 3);
        assert_eq!(settings.final_length, 1);
        assert_eq!(settings.cache_ttl_ms, 5000);
    }

    #[test]
    fn values_are_clamped_to_their_ranges() {
        let mut settings = Settings::default();
        assert!(settings.set("history_length", 99));
        assert!(settings.set("changes_length", 0));
        assert!(settings.set("history_style", 9));

        assert_eq!(settings.history_length, 10);
        assert_eq!(settings.changes_length, 1);
        assert_eq!(settings.history_style, 4);
    }

    #[test]
    fn unknown_keys_are_rejected_without_panicking() {
        let mut settings = Settings::default();
        assert!(!settings.set("unheard_of", 3));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn tokens_persist_to_the_local_file() {
        let dir = TempDir::new().expect("temp dir");
        let store = store(&dir);
        let mut settings = store.load();

        store
            .apply_tokens(&mut settings, &["changes_length=7".to_string()])
            .expect("apply");

        assert_eq!(settings.changes_length, 7);
        assert_eq!(store.load().changes_length, 7);
        assert!(dir.path().join(LOCAL_FILE).exists());
        assert!(!dir.path().join("global.toml").exists());
    }

    #[test]
    fn global_prefix_persists_to_the_global_file() {
        let dir = TempDir::new().expect("temp dir");
        let store = store(&dir);
        let mut settings = store.load();

        store
            .apply_tokens(&mut settings, &["global_history_length=8".to_string()])
            .expect("apply");

        assert_eq!(settings.history_length, 8);
        assert!(dir.path().join("global.toml").exists());
        assert_eq!(store.load().history_length, 8);
    }

    #[test]
    fn partial_local_file_keeps_unnamed_global_values() {
        let dir = TempDir::new().expect("temp dir");
        let store = store(&dir);
        fs::write(dir.path().join("global.toml"), "history_length = 8\n").expect("write global");
        fs::write(dir.path().join(LOCAL_FILE), "changes_length = 7\n").expect("write local");

        let settings = store.load();

        assert_eq!(settings.history_length, 8);
        assert_eq!(settings.changes_length, 7);
        assert_eq!(settings.final_length, 1);
    }

    #[test]
    fn local_file_overrides_global() {
        let dir = TempDir::new().expect("temp dir");
        let store = store(&dir);
        let mut settings = store.load();

        store
            .apply_tokens(
                &mut settings,
                &[
                    "global_history_length=8".to_string(),
                    "history_length=2".to_string(),
                ],
            )
            .expect("apply");

        assert_eq!(store.load().history_length, 2);
    }

    #[test]
    fn malformed_tokens_are_skipped() {
        let dir = TempDir::new().expect("temp dir");
        let store = store(&dir);
        let mut settings = store.load();

        store
            .apply_tokens(
                &mut settings,
                &["nonsense".to_string(), "history_length=abc".to_string()],
            )
            .expect("apply");

        assert_eq!(settings, Settings::default());
        assert!(!dir.path().join(LOCAL_FILE).exists());
    }
}
