//! CLI command implementations

use anyhow::Result;
use std::path::Path;
use sft_lab::config::Config;
use sft_lab::data;

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            Config::from_file(path)
        }
        None => Ok(Config::default()),
    }
}

pub fn assemble(config: &Config) -> Result<()> {
    config.validate()?;
    let report = data::assemble(
        config.paths.spreadsheet_file(),
        config.paths.base_file(),
        config.paths.merged_file(),
        config.assemble.skip_rows,
    )?;

    println!(
        "Appended {} records to {} existing ({} total) and saved them to '{}'",
        report.added,
        report.existing,
        report.total,
        report.output.display()
    );
    Ok(())
}

pub fn split(config: &Config) -> Result<()> {
    let report = data::split_file(
        config.paths.merged_file(),
        config.paths.validation_file(),
        &config.split,
    )?;

    if let Some(path) = &report.remainder_output {
        println!(
            "Kept {} remaining records in '{}'",
            report.total - report.selected,
            path.display()
        );
    }
    Ok(())
}

pub fn smoke_test(config: &Config) -> Result<()> {
    tracing::info!(model = %config.paths.model_dir, "running smoke test");
    sft_lab::run_smoke_test(&config.paths.model_dir, &config.generation)?;
    Ok(())
}
