use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::recent::{RecentFiles, DEFAULT_MAX_RECENT};

pub const SETTINGS_PATH_ENV: &str = "SPRITE_EDITOR_SETTINGS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// `?`-delimited recently opened sprite paths, oldest first.
    pub recent_files: String,
    pub max_recent: usize,
    /// File written next to the sprite by "test sprite".
    pub test_file_name: String,
    /// Program that is handed the test file; the test file is only staged
    /// when this is unset.
    pub viewer_command: Option<String>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            recent_files: String::new(),
            max_recent: DEFAULT_MAX_RECENT,
            test_file_name: "test.spr".into(),
            viewer_command: None,
        }
    }
}

pub fn default_settings_path() -> PathBuf {
    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("sprite_editor")
        .join("settings.toml")
}

/// Loads settings from `path`, falling back to defaults for a missing or
/// unreadable file, then applies `SPRITE_EDITOR__*` env overrides.
pub fn load_settings(path: &Path) -> EditorSettings {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<EditorSettings>(&raw).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "ignoring malformed settings file");
            EditorSettings::default()
        }),
        Err(_) => EditorSettings::default(),
    };

    if let Ok(v) = std::env::var("SPRITE_EDITOR__TEST_FILE_NAME") {
        if !v.trim().is_empty() {
            settings.test_file_name = v;
        }
    }
    if let Ok(v) = std::env::var("SPRITE_EDITOR__VIEWER_COMMAND") {
        settings.viewer_command = Some(v).filter(|v| !v.trim().is_empty());
    }
    if let Ok(v) = std::env::var("SPRITE_EDITOR__MAX_RECENT") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_recent = parsed;
        }
    }
    settings.max_recent = settings.max_recent.max(1);

    settings
}

impl EditorSettings {
    pub fn recent(&self) -> RecentFiles {
        RecentFiles::decode(&self.recent_files, self.max_recent)
    }

    pub fn set_recent(&mut self, recent: &RecentFiles) {
        self.recent_files = recent.encode();
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create settings directory '{}'", parent.display())
            })?;
        }
        let raw = toml::to_string_pretty(self).context("failed to encode editor settings")?;
        fs::write(path, raw)
            .with_context(|| format!("failed to write settings file '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
