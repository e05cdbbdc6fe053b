use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::global_constants;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "Dark"),
            ThemeMode::Light => write!(f, "Light"),
        }
    }
}

fn default_backend_base_url() -> String {
    global_constants::DEFAULT_BACKEND_BASE_URL.to_string()
}

fn default_upload_chunk_size_bytes() -> usize {
    global_constants::DEFAULT_UPLOAD_CHUNK_SIZE_BYTES
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploaderSettings {
    #[serde(default = "default_backend_base_url")]
    pub backend_base_url: String,
    #[serde(default = "default_upload_chunk_size_bytes")]
    pub upload_chunk_size_bytes: usize,
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

impl Default for UploaderSettings {
    fn default() -> Self {
        Self {
            backend_base_url: default_backend_base_url(),
            upload_chunk_size_bytes: default_upload_chunk_size_bytes(),
            theme_mode: ThemeMode::default(),
        }
    }
}

impl UploaderSettings {
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_file_path()?;
        let mut settings = Self::load_from(&settings_path)?;

        if let Ok(url) = std::env::var(global_constants::BACKEND_URL_ENV_VAR) {
            settings.apply_backend_override(&url);
        }

        Ok(settings)
    }

    pub fn load_from(settings_path: &Path) -> anyhow::Result<Self> {
        if !settings_path.exists() {
            log::info!("[SETTINGS] No settings file found, using defaults");
            let default_settings = Self::default();
            default_settings.save_to(settings_path)?;
            return Ok(default_settings);
        }

        let contents = std::fs::read_to_string(settings_path)
            .with_context(|| format!("Failed to read {}", settings_path.display()))?;
        let mut settings: UploaderSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings in {}", settings_path.display()))?;
        settings.upload_chunk_size_bytes = settings.upload_chunk_size_bytes.max(1);

        log::info!("[SETTINGS] Loaded settings from {:?}", settings_path);
        log::debug!("[SETTINGS] Backend URL: {}", settings.backend_base_url);

        Ok(settings)
    }

    pub fn save_to(&self, settings_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_path, contents)?;

        log::info!("[SETTINGS] Saved settings to {:?}", settings_path);
        Ok(())
    }

    pub fn apply_backend_override(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }

        log::info!(
            "[SETTINGS] {} overrides backend URL: {}",
            global_constants::BACKEND_URL_ENV_VAR,
            url
        );
        self.backend_base_url = url.to_string();
    }

    fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::SETTINGS_DIR_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}
