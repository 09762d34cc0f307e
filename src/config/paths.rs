use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File locations used by the three subcommands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub spreadsheet: String,
    pub base_dataset: String,
    pub merged_dataset: String,
    pub validation_dataset: String,
    pub model_dir: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            spreadsheet: "HIT_SFT.xlsx".to_string(),
            base_dataset: "Alpaca_GPT4.json".to_string(),
            merged_dataset: "miniCPM_HIT_SFT.json".to_string(),
            validation_dataset: "eval_miniCPM_HIT_SFT.json".to_string(),
            model_dir: "./results".to_string(),
        }
    }
}

impl PathConfig {
    pub fn spreadsheet_file(&self) -> PathBuf {
        PathBuf::from(&self.spreadsheet)
    }

    pub fn base_file(&self) -> PathBuf {
        PathBuf::from(&self.base_dataset)
    }

    pub fn merged_file(&self) -> PathBuf {
        PathBuf::from(&self.merged_dataset)
    }

    pub fn validation_file(&self) -> PathBuf {
        PathBuf::from(&self.validation_dataset)
    }
}
