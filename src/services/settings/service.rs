use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::EngineSettings;

const SETTINGS_FILE: &str = "settings.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the per-user config directory, when one exists.
    pub fn with_default_path() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    /// `<config dir>/settings.toml` for this application
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "CalendarEngine", "CalendarEngine")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<EngineSettings> {
        Self::load_from(&self.path)
    }

    pub fn save(&self, settings: &EngineSettings) -> Result<()> {
        Self::save_to(&self.path, settings)
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<EngineSettings> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(EngineSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings = EngineSettings::from_toml(&content)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", path.display(), e))?;

        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Validate and write settings, creating parent directories as needed.
    pub fn save_to(path: &Path, settings: &EngineSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = settings.to_toml().context("Failed to serialize settings")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;

        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Load settings, falling back to defaults on any error.
    pub fn load_or_default(&self) -> EngineSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                EngineSettings::default()
            }
        }
    }
}
