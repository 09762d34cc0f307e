//! Model directory resolution
//!
//! A model is given either as a local directory or as a HuggingFace id
//! (`org/name`) that has already been downloaded to the hub cache.

use anyhow::Context;
use std::path::{Path, PathBuf};

/// Hub cache root: `$HF_HOME/hub`, else `~/.cache/huggingface/hub`.
pub fn hub_cache_dir() -> Option<PathBuf> {
    if let Ok(hf_home) = std::env::var("HF_HOME") {
        return Some(PathBuf::from(hf_home).join("hub"));
    }
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".cache/huggingface/hub"))
}

/// Newest snapshot directory of `model_id` under `cache_root`.
pub fn cached_snapshot(cache_root: &Path, model_id: &str) -> Option<PathBuf> {
    if !model_id.contains('/') {
        return None;
    }
    let snapshots_dir = cache_root
        .join(format!("models--{}", model_id.replace('/', "--")))
        .join("snapshots");

    let mut snapshots: Vec<_> = std::fs::read_dir(&snapshots_dir)
        .ok()?
        .flatten()
        .filter(|e| e.file_type().ok().is_some_and(|ft| ft.is_dir()))
        .collect();

    // Newest first
    snapshots.sort_by(|a, b| {
        let a_time = a.metadata().ok().and_then(|m| m.modified().ok());
        let b_time = b.metadata().ok().and_then(|m| m.modified().ok());
        b_time.cmp(&a_time)
    });
    snapshots.first().map(|e| e.path())
}

/// A local directory as-is, otherwise the cached snapshot of a hub id.
pub fn resolve_model_dir(model: &str) -> Option<PathBuf> {
    let path = Path::new(model);
    if path.exists() {
        return Some(path.to_path_buf());
    }
    cached_snapshot(&hub_cache_dir()?, model)
}

pub fn resolve_model_dir_with_error(model: &str) -> anyhow::Result<PathBuf> {
    resolve_model_dir(model).with_context(|| {
        format!(
            "Model path does not exist: {}. Pass a local directory or download it first using: huggingface-cli download {}",
            model, model
        )
    })
}
