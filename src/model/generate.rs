//! Bounded-length autoregressive generation

use candle_core::{DType, Device, Tensor};
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::llama::{Cache, Llama};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::GenerationConfig;

/// A causal language model that yields next-token logits.
pub trait CausalModel {
    /// Run `input_ids` (`[1, seq_len]`) starting at absolute position `index_pos`
    /// and return the logits of the last position (`[1, vocab]`).
    fn forward(&mut self, input_ids: &Tensor, index_pos: usize) -> anyhow::Result<Tensor>;
}

/// Llama weights plus their KV cache
pub struct LlamaRunner {
    model: Llama,
    cache: Cache,
}

impl LlamaRunner {
    pub fn new(model: Llama, cache: Cache) -> Self {
        Self { model, cache }
    }
}

impl CausalModel for LlamaRunner {
    fn forward(&mut self, input_ids: &Tensor, index_pos: usize) -> anyhow::Result<Tensor> {
        Ok(self.model.forward(input_ids, index_pos, &mut self.cache)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Bound on the whole sequence, prompt included
    pub max_length: usize,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub seed: u64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for GenerationParams {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            max_length: config.max_length,
            temperature: config.temperature,
            top_p: config.top_p,
            seed: config.seed,
        }
    }
}

/// Extend `prompt_ids` until the sequence reaches `max_length` or an EOS id is produced.
///
/// Returns the full sequence: the prompt followed by the generated tokens.
pub fn generate<M: CausalModel + ?Sized>(
    model: &mut M,
    prompt_ids: &[u32],
    eos_ids: &[u32],
    params: &GenerationParams,
    device: &Device,
) -> anyhow::Result<Vec<u32>> {
    if prompt_ids.is_empty() {
        anyhow::bail!("prompt encoded to zero tokens");
    }

    let mut tokens = prompt_ids.to_vec();
    let max_new_tokens = params.max_length.saturating_sub(tokens.len());
    if max_new_tokens == 0 {
        tracing::warn!(
            prompt_tokens = tokens.len(),
            max_length = params.max_length,
            "prompt already fills max_length, nothing generated"
        );
        return Ok(tokens);
    }

    let mut processor = LogitsProcessor::new(params.seed, params.temperature, params.top_p);

    let pb = ProgressBar::new(max_new_tokens as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tokens {msg}")?
            .progress_chars("=>-"),
    );

    let mut index_pos = 0;
    for step in 0..max_new_tokens {
        // Full prompt on the first step, then one token at a time against the cache
        let context_size = if step == 0 { tokens.len() } else { 1 };
        let context = &tokens[tokens.len() - context_size..];
        let input = Tensor::new(context, device)?.unsqueeze(0)?;

        let logits = model.forward(&input, index_pos)?;
        let logits = logits.squeeze(0)?.to_dtype(DType::F32)?;
        index_pos += context.len();

        let next_token = processor.sample(&logits)?;
        tokens.push(next_token);
        pb.inc(1);

        if eos_ids.contains(&next_token) {
            tracing::debug!(step, token = next_token, "hit end of sequence");
            break;
        }
    }
    pb.finish_and_clear();

    tracing::info!(
        prompt_tokens = prompt_ids.len(),
        generated = tokens.len() - prompt_ids.len(),
        "generation finished"
    );
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emits a fixed token sequence regardless of input.
    struct Scripted {
        vocab: usize,
        script: Vec<u32>,
        calls: Vec<(usize, usize)>,
    }

    impl CausalModel for Scripted {
        fn forward(&mut self, input_ids: &Tensor, index_pos: usize) -> anyhow::Result<Tensor> {
            let step = self.calls.len();
            self.calls.push((input_ids.dim(1)?, index_pos));
            let mut logits = vec![0f32; self.vocab];
            logits[self.script[step] as usize] = 10.0;
            Ok(Tensor::new(logits.as_slice(), &Device::Cpu)?.unsqueeze(0)?)
        }
    }

    fn params(max_length: usize) -> GenerationParams {
        GenerationParams {
            max_length,
            ..Default::default()
        }
    }

    #[test]
    fn test_stops_at_max_length() {
        let mut model = Scripted {
            vocab: 8,
            script: vec![5, 6, 7, 5, 6],
            calls: Vec::new(),
        };
        let out = generate(&mut model, &[1, 2, 3], &[0], &params(6), &Device::Cpu).unwrap();
        assert_eq!(out, vec![1, 2, 3, 5, 6, 7]);
        // prompt in one pass, then single tokens at increasing positions
        assert_eq!(model.calls, vec![(3, 0), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_stops_at_eos() {
        let mut model = Scripted {
            vocab: 8,
            script: vec![4, 2, 7],
            calls: Vec::new(),
        };
        let out = generate(&mut model, &[1], &[2], &params(50), &Device::Cpu).unwrap();
        assert_eq!(out, vec![1, 4, 2]);
    }

    #[test]
    fn test_long_prompt_is_returned_unchanged() {
        let mut model = Scripted {
            vocab: 4,
            script: vec![],
            calls: Vec::new(),
        };
        let out = generate(&mut model, &[1, 2, 3], &[], &params(3), &Device::Cpu).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
        assert!(model.calls.is_empty());
    }

    #[test]
    fn test_empty_prompt_is_rejected() {
        let mut model = Scripted {
            vocab: 4,
            script: vec![1],
            calls: Vec::new(),
        };
        assert!(generate(&mut model, &[], &[], &params(10), &Device::Cpu).is_err());
    }
}
