//! Single-shot inference check for a trained model directory

use candle_core::Device;

use crate::config::GenerationConfig;
use crate::model::{
    eos_ids, generate, parse_dtype, resolve_model_dir_with_error, CausalModel, GenerationParams,
    ModelLoader, TokenizerWrapper,
};

/// Encode `prompt`, generate, and decode the whole sequence without special tokens.
pub fn answer<M: CausalModel + ?Sized>(
    model: &mut M,
    tokenizer: &TokenizerWrapper,
    prompt: &str,
    eos: &[u32],
    params: &GenerationParams,
    device: &Device,
) -> anyhow::Result<String> {
    let input_ids = tokenizer.encode(prompt, true)?;
    tracing::debug!(tokens = input_ids.len(), "encoded prompt");

    let output_ids = generate(model, &input_ids, eos, params, device)?;
    tokenizer.decode(&output_ids, true)
}

/// Load the model at `model` (a directory or a cached hub id), answer the
/// configured prompt once and print the result.
pub fn run_smoke_test(model: &str, config: &GenerationConfig) -> anyhow::Result<String> {
    config.validate()?;
    let model_dir = resolve_model_dir_with_error(model)?;

    let device = if config.force_cpu {
        Device::Cpu
    } else {
        Device::cuda_if_available(0)?
    };
    let dtype = parse_dtype(&config.dtype)?;

    let loader = ModelLoader::new(&model_dir);
    let (mut runner, model_config) = loader.load(&device, dtype)?;
    let tokenizer = TokenizerWrapper::from_model_dir(&model_dir)?;

    let text = answer(
        &mut runner,
        &tokenizer,
        &config.prompt,
        &eos_ids(&model_config),
        &GenerationParams::from(config),
        &device,
    )?;

    println!("{}", text);
    Ok(text)
}
