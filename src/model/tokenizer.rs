//! Tokenizer integration using HuggingFace tokenizers

use std::path::Path;
use tokenizers::Tokenizer;

pub const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerWrapper {
    tokenizer: Tokenizer,
}

impl TokenizerWrapper {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            anyhow::anyhow!("Failed to load tokenizer from {}: {}", path.display(), e)
        })?;
        Ok(Self { tokenizer })
    }

    /// Load `tokenizer.json` from a model directory.
    pub fn from_model_dir(model_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::from_file(model_dir.as_ref().join(TOKENIZER_FILE))
    }

    pub fn encode(&self, text: &str, add_special_tokens: bool) -> anyhow::Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, add_special_tokens)
            .map_err(|e| anyhow::anyhow!("Tokenization error: {}", e))?;
        Ok(encoding.get_ids().to_vec())
    }

    pub fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> anyhow::Result<String> {
        self.tokenizer
            .decode(ids, skip_special_tokens)
            .map_err(|e| anyhow::anyhow!("Decode error: {}", e))
    }

    pub fn token_id(&self, token: &str) -> Option<u32> {
        self.tokenizer.token_to_id(token)
    }

    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }
}
