use crate::arch::Vocabulary;
use crate::constants;
use crate::service::UnknownPlatformPolicy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Architecture names to accept
    #[serde(default)]
    pub vocabulary: Vocabulary,

    /// How to treat platforms outside the vocabulary
    #[serde(default)]
    pub unknown_platforms: UnknownPlatformPolicy,

    /// Deadline for each registry request, in seconds
    pub timeout_secs: Option<u64>,

    /// Registries to contact over plain HTTP
    #[serde(default)]
    pub insecure_registries: Vec<String>,

    /// Pull secret to use when none is given on the command line
    pub auth_file: Option<PathBuf>,
}

impl Config {
    /// Load from `MULTIARCH_CONFIG`, or the user config dir, or defaults
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var(constants::config::ENV) {
            return Self::load_from(Path::new(&path));
        }
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir
                .join(constants::config::DIR)
                .join(constants::config::FILE);
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }
        Ok(Config::default())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
