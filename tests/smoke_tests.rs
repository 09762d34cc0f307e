use anyhow::Result;
use candle_core::{Device, Tensor};
use sft_lab::config::GenerationConfig;
use sft_lab::model::{CausalModel, GenerationParams, TokenizerWrapper};
use sft_lab::smoke::{answer, run_smoke_test};
use tempfile::TempDir;

const TOKENIZER_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [
    {"id": 1, "content": "<s>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 2, "content": "</s>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
  ],
  "normalizer": null,
  "pre_tokenizer": {"type": "Whitespace"},
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": {"<unk>": 0, "<s>": 1, "</s>": 2, "tell": 3, "history": 4, "harbin": 5, "1920": 6},
    "unk_token": "<unk>"
  }
}"#;

/// Replays a fixed list of next tokens.
struct Replay {
    vocab: usize,
    tokens: std::vec::IntoIter<u32>,
}

impl CausalModel for Replay {
    fn forward(&mut self, _input_ids: &Tensor, _index_pos: usize) -> Result<Tensor> {
        let next = self.tokens.next().unwrap_or(2);
        let mut logits = vec![-1f32; self.vocab];
        logits[next as usize] = 1.0;
        Ok(Tensor::new(logits.as_slice(), &Device::Cpu)?.unsqueeze(0)?)
    }
}

fn tokenizer(dir: &TempDir) -> TokenizerWrapper {
    std::fs::write(dir.path().join("tokenizer.json"), TOKENIZER_JSON).unwrap();
    TokenizerWrapper::from_model_dir(dir.path()).unwrap()
}

#[test]
fn test_answer_includes_prompt_and_drops_special_tokens() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let tokenizer = tokenizer(&temp_dir);
    let mut model = Replay {
        vocab: tokenizer.vocab_size(),
        tokens: vec![1, 5, 6, 2, 4].into_iter(),
    };

    let text = answer(
        &mut model,
        &tokenizer,
        "tell history",
        &[2],
        &GenerationParams::default(),
        &Device::Cpu,
    )?;

    assert_eq!(text, "tell history harbin 1920");
    assert!(!text.contains("</s>"));
    assert!(!text.contains("<s>"));
    Ok(())
}

#[test]
fn test_answer_respects_total_length() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let tokenizer = tokenizer(&temp_dir);
    let mut model = Replay {
        vocab: tokenizer.vocab_size(),
        tokens: vec![5, 6, 5, 6].into_iter(),
    };
    let params = GenerationParams {
        max_length: 3,
        ..Default::default()
    };

    let text = answer(&mut model, &tokenizer, "tell history", &[2], &params, &Device::Cpu)?;
    assert_eq!(text, "tell history harbin");
    Ok(())
}

#[test]
fn test_token_lookup() {
    let temp_dir = TempDir::new().unwrap();
    let tokenizer = tokenizer(&temp_dir);
    assert_eq!(tokenizer.token_id("</s>"), Some(2));
    assert_eq!(tokenizer.encode("harbin 1920", false).unwrap(), vec![5, 6]);
    assert_eq!(tokenizer.token_id("missing"), None);
}

#[test]
fn test_missing_model_dir_is_fatal() {
    let config = GenerationConfig {
        force_cpu: true,
        ..Default::default()
    };
    let err = run_smoke_test("definitely/not/a/model", &config).unwrap_err();
    assert!(err.to_string().contains("does not exist"), "{}", err);
}

#[test]
fn test_missing_weights_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    tokenizer(&temp_dir);
    std::fs::write(
        temp_dir.path().join("config.json"),
        r#"{"hidden_size": 8, "intermediate_size": 16, "vocab_size": 7,
            "num_hidden_layers": 1, "num_attention_heads": 2, "rms_norm_eps": 1e-6}"#,
    )
    .unwrap();

    let config = GenerationConfig {
        force_cpu: true,
        ..Default::default()
    };
    let err = run_smoke_test(&temp_dir.path().to_string_lossy(), &config).unwrap_err();
    assert!(err.to_string().contains("safetensors"), "{}", err);
}
