use serde::{Deserialize, Serialize};

pub const DEFAULT_PROMPT: &str = "请简要介绍哈尔滨工业大学的历史。";

/// Smoke-test generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub prompt: String,
    /// Upper bound on prompt plus generated tokens
    pub max_length: usize,
    /// `None` or 0.0 selects greedy decoding
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub seed: u64,
    /// One of "f32", "f16", "bf16"
    pub dtype: String,
    pub force_cpu: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            max_length: 150,
            temperature: None,
            top_p: None,
            seed: 299792458,
            dtype: "f32".to_string(),
            force_cpu: false,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_length == 0 {
            anyhow::bail!("max_length must be > 0");
        }
        if let Some(t) = self.temperature {
            if t < 0.0 {
                anyhow::bail!("temperature must be non-negative, got {}", t);
            }
        }
        if let Some(p) = self.top_p {
            if !(0.0..=1.0).contains(&p) {
                anyhow::bail!("top_p must be in range [0.0, 1.0], got {}", p);
            }
            // top_p is ignored by greedy decoding
            if self.temperature.map_or(true, |t| t == 0.0) {
                anyhow::bail!("top_p = {} requires a temperature above 0", p);
            }
        }
        Ok(())
    }
}
