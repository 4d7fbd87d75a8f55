use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::manager::ManagerProfile;
use crate::util::xdg;

const CONFIG_FILE_NAME: &str = "pkgsconfig.json";

/// On-disk layout of the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    mgr: ManagerProfile,
}

/// Persists the chosen package manager profile between runs
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Config store at `<data dir>/pkgsconfig.json`
    pub fn new() -> Result<Self> {
        Ok(Self::at(xdg::data_dir()?.join(CONFIG_FILE_NAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved profile
    ///
    /// A missing, unreadable or malformed file is reported as `None`; the
    /// caller falls back to asking for a manager.
    pub fn load(&self) -> Option<ManagerProfile> {
        match self.read() {
            Ok(config) => {
                tracing::debug!(path = ?self.path, manager = %config.mgr.kind, "loaded config");
                Some(config.mgr)
            }
            Err(err) => {
                tracing::debug!(path = ?self.path, "config not found: {err:#}");
                None
            }
        }
    }

    fn read(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config file {:?}", self.path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))
    }

    /// Write `{"mgr": profile}`, replacing any existing file
    pub fn save(&self, profile: &ManagerProfile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let config = ConfigFile {
            mgr: profile.clone(),
        };
        let contents = serde_json::to_string(&config).context("Failed to serialize config")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write config file {:?}", self.path))?;

        tracing::debug!(path = ?self.path, manager = %profile.kind, "saved config");
        Ok(())
    }
}
