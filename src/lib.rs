//! Supervised fine-tuning data preparation and model smoke-testing
//!
//! ## Main Components
//!
//! - `data`: spreadsheet conversion, JSON dataset persistence, validation sampling
//! - `model`: tokenizer, safetensors loading and bounded generation
//! - `smoke`: one-prompt inference check for a trained model directory
//! - `config`: file paths and tunables shared by the CLI subcommands

pub mod config;
pub mod data;
pub mod model;
pub mod smoke;

pub use config::Config;
pub use data::{assemble, split_file, DatasetError, Record};
pub use smoke::run_smoke_test;

/// Library errors
pub use anyhow::{Error, Result};
