use serde::{Deserialize, Serialize};

use crate::data::DatasetError;

/// Spreadsheet-to-dataset conversion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssembleConfig {
    /// Leading spreadsheet rows dropped before mapping (the header row by default)
    pub skip_rows: usize,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self { skip_rows: 1 }
    }
}

/// Validation split settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// The validation set holds `len / denominator` records
    pub denominator: usize,
    /// Fixed RNG seed; `None` draws from the thread RNG
    pub seed: Option<u64>,
    /// Where to write the records left out of the validation set, if anywhere
    pub remainder_output: Option<String>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            denominator: 5,
            seed: None,
            remainder_output: None,
        }
    }
}

impl SplitConfig {
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.denominator == 0 {
            return Err(DatasetError::ZeroDenominator);
        }
        Ok(())
    }
}
