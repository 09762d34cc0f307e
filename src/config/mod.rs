pub mod dataset;
pub mod generation;
pub mod paths;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub use dataset::{AssembleConfig, SplitConfig};
pub use generation::{GenerationConfig, DEFAULT_PROMPT};
pub use paths::PathConfig;

/// Top-level configuration shared by all subcommands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathConfig,
    pub assemble: AssembleConfig,
    pub split: SplitConfig,
    pub generation: GenerationConfig,
}

impl Config {
    /// Load a JSON config file. Sections or keys left out keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.split.validate()?;
        self.generation.validate()
    }

    pub fn to_dict(&self) -> anyhow::Result<HashMap<String, serde_json::Value>> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }

    pub fn from_dict(data: HashMap<String, serde_json::Value>) -> anyhow::Result<Self> {
        let json = serde_json::to_string(&data)?;
        Ok(serde_json::from_str(&json)?)
    }
}
