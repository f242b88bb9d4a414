// ============================================================
// Config Store
// ============================================================
// Persists the model hyperparameters as JSON so a model with
// the same architecture can be rebuilt later.
//
// File layout:
//   <dir>/
//     model_config.json  ← HybridClassifierConfig
//
// Only hyperparameters live here. Loaded configs are
// validated before they are returned.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::ml::model::HybridClassifierConfig;

pub const CONFIG_FILE: &str = "model_config.json";

/// Reads and writes `model_config.json` in one directory.
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create config directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Write `cfg` as pretty JSON and return the file path.
    pub fn save(&self, cfg: &HybridClassifierConfig) -> Result<PathBuf> {
        let path = self.config_path();
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::info!("Saved model config to '{}'", path.display());
        Ok(path)
    }

    pub fn load(&self) -> Result<HybridClassifierConfig> {
        Self::load_from(self.config_path())
    }

    /// Load and validate a config from an explicit file path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<HybridClassifierConfig> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

        let cfg: HybridClassifierConfig = serde_json::from_str(&json)
            .with_context(|| format!("Malformed config in '{}'", path.display()))?;
        cfg.validate()
            .with_context(|| format!("Invalid config in '{}'", path.display()))?;

        tracing::info!("Loaded model config from '{}' (input {})", path.display(), cfg.input_shape());
        Ok(cfg)
    }
}
