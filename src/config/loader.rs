//! Config file loading and persistence.
//!
//! Presets live in `link-indexer.toml` at the vault root. When no TOML file
//! exists, a legacy `data.json` from older releases (a single-preset flat
//! record, or its later `usedLinks` array form) is migrated on load; it is
//! rewritten as TOML on the next save.

use crate::config::{Preset, Settings};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_CANDIDATES: [&str; 2] = ["link-indexer.toml", ".link-indexer.toml"];
const LEGACY_FILE: &str = "data.json";

pub fn discover_config(vault_root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES.iter().map(|c| vault_root.join(c)).find(|p| p.exists())
}

/// Load settings for a vault. A malformed TOML file is a configuration
/// error; a malformed legacy file only logs a warning and yields defaults.
pub fn load_settings(vault_root: &Path) -> Result<Settings> {
    let settings = if let Some(config_file) = discover_config(vault_root) {
        let content = fs::read_to_string(&config_file)
            .with_context(|| format!("failed reading config file: {}", config_file.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("invalid config file: {}", config_file.display()))?
    } else {
        load_legacy(vault_root)
    };
    settings.validate()?;
    Ok(settings)
}

/// Persist settings as TOML, reusing a discovered config filename when one
/// exists so a `.link-indexer.toml` stays hidden.
pub fn save_settings(vault_root: &Path, settings: &Settings) -> Result<()> {
    settings.validate()?;
    let path = discover_config(vault_root).unwrap_or_else(|| vault_root.join(CONFIG_CANDIDATES[0]));
    let content = toml::to_string_pretty(settings).context("failed serializing settings")?;
    fs::write(&path, content)
        .with_context(|| format!("failed writing config file: {}", path.display()))?;
    Ok(())
}

/// Legacy flat settings: one implicit preset with camelCase fields. Fields
/// added after that format shipped fall back to their documented defaults.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LegacyFlat {
    name: Option<String>,
    path: Option<String>,
    include_embeds: bool,
    link_to_files: bool,
    nonexistent_only: bool,
    strict_line_breaks: bool,
    exclude_from_filenames: Vec<String>,
    exclude_from_globs: Vec<String>,
    exclude_to_filenames: Vec<String>,
    exclude_to_globs: Vec<String>,
}

impl Default for LegacyFlat {
    fn default() -> Self {
        Self {
            name: None,
            path: None,
            include_embeds: true,
            link_to_files: true,
            nonexistent_only: false,
            strict_line_breaks: true,
            exclude_from_filenames: Vec::new(),
            exclude_from_globs: Vec::new(),
            exclude_to_filenames: Vec::new(),
            exclude_to_globs: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyGrouped {
    used_links: Vec<LegacyFlat>,
}

impl LegacyFlat {
    fn into_preset(self) -> Preset {
        let name = self.name.unwrap_or_else(|| "default".to_string());
        let mut preset = Preset::with_name(name);
        if let Some(path) = self.path {
            preset.output_path = path;
        }
        preset.include_embeds = self.include_embeds;
        preset.link_to_files = self.link_to_files;
        preset.nonexistent_only = self.nonexistent_only;
        preset.strict_line_breaks = self.strict_line_breaks;
        preset.exclude_from_filenames = self.exclude_from_filenames;
        preset.exclude_from_globs = self.exclude_from_globs;
        preset.exclude_to_filenames = self.exclude_to_filenames;
        preset.exclude_to_globs = self.exclude_to_globs;
        preset
    }
}

fn load_legacy(vault_root: &Path) -> Settings {
    let legacy_file = vault_root.join(LEGACY_FILE);
    let Ok(content) = fs::read_to_string(&legacy_file) else {
        return Settings::default();
    };

    if let Ok(grouped) = serde_json::from_str::<LegacyGrouped>(&content) {
        return Settings {
            presets: grouped.used_links.into_iter().map(LegacyFlat::into_preset).collect(),
        };
    }
    match serde_json::from_str::<LegacyFlat>(&content) {
        Ok(flat) => Settings { presets: vec![flat.into_preset()] },
        Err(err) => {
            tracing::warn!("ignoring unreadable legacy settings {}: {}", legacy_file.display(), err);
            Settings::default()
        }
    }
}
