//! Model loading from a HuggingFace-style directory of safetensors shards

use anyhow::Context;
use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::llama::{Cache, Config, Llama, LlamaConfig, LlamaEosToks};
use serde::Deserialize;
use std::path::PathBuf;

use super::generate::LlamaRunner;

pub const CONFIG_FILE: &str = "config.json";
pub const SINGLE_WEIGHTS_FILE: &str = "model.safetensors";

const LLAMA_MODEL_TYPE: &str = "llama";
const LLAMA_ARCHITECTURE: &str = "LlamaForCausalLM";

/// Architecture tags HF writes next to the hyperparameters
#[derive(Debug, Default, Deserialize)]
struct ModelArch {
    model_type: Option<String>,
    architectures: Option<Vec<String>>,
}

impl ModelArch {
    fn is_llama(&self) -> bool {
        let type_ok = self
            .model_type
            .as_deref()
            .map_or(true, |t| t == LLAMA_MODEL_TYPE);
        let arch_ok = self
            .architectures
            .as_ref()
            .map_or(true, |archs| archs.iter().any(|a| a == LLAMA_ARCHITECTURE));
        type_ok && arch_ok
    }
}

pub struct ModelLoader {
    model_dir: PathBuf,
}

impl ModelLoader {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
        }
    }

    fn check_dir(&self) -> anyhow::Result<()> {
        if !self.model_dir.is_dir() {
            anyhow::bail!("Model path does not exist: {}", self.model_dir.display());
        }
        Ok(())
    }

    /// Parse `config.json` as a Llama-family configuration.
    pub fn config(&self) -> anyhow::Result<LlamaConfig> {
        self.check_dir()?;
        let path = self.model_dir.join(CONFIG_FILE);
        let content = std::fs::read(&path)
            .with_context(|| format!("Failed to read model config {}", path.display()))?;

        let arch: ModelArch = serde_json::from_slice(&content)
            .with_context(|| format!("Unsupported model config {}", path.display()))?;
        if !arch.is_llama() {
            anyhow::bail!(
                "Unsupported model architecture in {}: model_type={}, architectures={:?}; only {} ({}) is supported",
                path.display(),
                arch.model_type.as_deref().unwrap_or("-"),
                arch.architectures.unwrap_or_default(),
                LLAMA_MODEL_TYPE,
                LLAMA_ARCHITECTURE
            );
        }

        serde_json::from_slice(&content)
            .with_context(|| format!("Unsupported model config {}", path.display()))
    }

    /// `model.safetensors` if present, otherwise every `*.safetensors` shard in name order.
    pub fn safetensors_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        self.check_dir()?;
        let single = self.model_dir.join(SINGLE_WEIGHTS_FILE);
        if single.is_file() {
            return Ok(vec![single]);
        }

        let mut shard_files: Vec<PathBuf> = std::fs::read_dir(&self.model_dir)
            .with_context(|| format!("Failed to list {}", self.model_dir.display()))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("safetensors"))
            .collect();
        shard_files.sort();

        if shard_files.is_empty() {
            anyhow::bail!(
                "No .safetensors files found in directory: {}",
                self.model_dir.display()
            );
        }
        Ok(shard_files)
    }

    /// Build the causal LM with a fresh KV cache.
    ///
    /// Returns the runner together with the resolved config, which carries the EOS ids.
    pub fn load(&self, device: &Device, dtype: DType) -> anyhow::Result<(LlamaRunner, Config)> {
        let files = self.safetensors_files()?;
        let config = self.config()?.into_config(false);
        tracing::info!(
            model_dir = %self.model_dir.display(),
            shards = files.len(),
            ?dtype,
            ?device,
            "loading model weights"
        );

        // SAFETY: the shards are treated as read-only for the lifetime of the mapping.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&files, dtype, device)? };
        let model = Llama::load(vb, &config).with_context(|| {
            format!(
                "Weights in {} do not match config.json",
                self.model_dir.display()
            )
        })?;
        let cache = Cache::new(true, dtype, &config, device)?;

        Ok((LlamaRunner::new(model, cache), config))
    }
}

/// End-of-sequence ids declared by the model config.
pub fn eos_ids(config: &Config) -> Vec<u32> {
    match &config.eos_token_id {
        Some(LlamaEosToks::Single(id)) => vec![*id],
        Some(LlamaEosToks::Multiple(ids)) => ids.clone(),
        None => Vec::new(),
    }
}

pub fn parse_dtype(name: &str) -> anyhow::Result<DType> {
    match name.to_ascii_lowercase().as_str() {
        "f32" | "float32" => Ok(DType::F32),
        "f16" | "float16" => Ok(DType::F16),
        "bf16" | "bfloat16" => Ok(DType::BF16),
        other => anyhow::bail!("Unsupported dtype '{}': expected f32, f16 or bf16", other),
    }
}
