pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sft-lab")]
#[command(about = "SFT dataset preparation and model smoke-testing", long_about = None)]
struct Cli {
    /// JSON config file; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append spreadsheet rows to an existing JSON dataset
    Assemble {
        /// Spreadsheet with instruction/input/output in its first three columns
        #[arg(long)]
        spreadsheet: Option<String>,
        /// Existing dataset to extend (missing file counts as empty)
        #[arg(long)]
        base: Option<String>,
        /// Where to write the merged dataset
        #[arg(long)]
        output: Option<String>,
        /// Leading rows to drop before mapping
        #[arg(long)]
        skip_rows: Option<usize>,
    },
    /// Sample a random validation subset from a dataset
    Split {
        /// Dataset to sample from
        #[arg(long)]
        input: Option<String>,
        /// Where to write the validation subset
        #[arg(long)]
        output: Option<String>,
        /// Validation set holds len / denominator records
        #[arg(long)]
        denominator: Option<usize>,
        /// Fix the RNG seed for a reproducible split
        #[arg(long)]
        seed: Option<u64>,
        /// Also write the unselected records here
        #[arg(long)]
        remainder_output: Option<String>,
    },
    /// Generate one answer from a trained model directory
    SmokeTest {
        /// Directory with config.json, tokenizer.json and safetensors weights
        #[arg(long)]
        model_dir: Option<String>,
        /// Prompt to answer
        #[arg(long)]
        prompt: Option<String>,
        /// Maximum total tokens, prompt included
        #[arg(long)]
        max_length: Option<usize>,
        /// Sampling temperature (omit for greedy decoding)
        #[arg(long)]
        temperature: Option<f64>,
        /// Nucleus sampling threshold
        #[arg(long)]
        top_p: Option<f64>,
        /// Sampling seed
        #[arg(long)]
        seed: Option<u64>,
        /// Weight dtype: f32, f16 or bf16
        #[arg(long)]
        dtype: Option<String>,
        /// Run on CPU even if CUDA is available
        #[arg(long)]
        cpu: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Assemble {
            spreadsheet,
            base,
            output,
            skip_rows,
        } => {
            override_with(&mut config.paths.spreadsheet, spreadsheet);
            override_with(&mut config.paths.base_dataset, base);
            override_with(&mut config.paths.merged_dataset, output);
            override_with(&mut config.assemble.skip_rows, skip_rows);
            commands::assemble(&config)
        }
        Commands::Split {
            input,
            output,
            denominator,
            seed,
            remainder_output,
        } => {
            override_with(&mut config.paths.merged_dataset, input);
            override_with(&mut config.paths.validation_dataset, output);
            override_with(&mut config.split.denominator, denominator);
            if seed.is_some() {
                config.split.seed = seed;
            }
            if remainder_output.is_some() {
                config.split.remainder_output = remainder_output;
            }
            commands::split(&config)
        }
        Commands::SmokeTest {
            model_dir,
            prompt,
            max_length,
            temperature,
            top_p,
            seed,
            dtype,
            cpu,
        } => {
            override_with(&mut config.paths.model_dir, model_dir);
            override_with(&mut config.generation.prompt, prompt);
            override_with(&mut config.generation.max_length, max_length);
            override_with(&mut config.generation.seed, seed);
            override_with(&mut config.generation.dtype, dtype);
            if temperature.is_some() {
                config.generation.temperature = temperature;
            }
            if top_p.is_some() {
                config.generation.top_p = top_p;
            }
            config.generation.force_cpu |= cpu;
            commands::smoke_test(&config)
        }
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
