//! Random validation split

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

use super::{load_dataset, save_dataset, DatasetError, Record};
use crate::config::SplitConfig;

/// Validation and leftover records produced by [`split_validation`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Split {
    /// Sampled records, in random order
    pub validation: Vec<Record>,
    /// Records not sampled, in their original order
    pub remainder: Vec<Record>,
}

/// Outcome of a [`split_file`] run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub total: usize,
    pub selected: usize,
    pub output: PathBuf,
    pub remainder_output: Option<PathBuf>,
}

/// Validation set size for `n` records: `floor(n / denominator)`.
pub fn validation_size(n: usize, denominator: usize) -> Result<usize, DatasetError> {
    if denominator == 0 {
        return Err(DatasetError::ZeroDenominator);
    }
    Ok(n / denominator)
}

/// `amount` distinct indices below `length`, drawn uniformly without replacement.
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, length: usize, amount: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, length, amount.min(length)).into_vec()
}

/// Move `floor(len / denominator)` randomly chosen records into the validation set.
pub fn split_validation<R: Rng + ?Sized>(
    records: Vec<Record>,
    denominator: usize,
    rng: &mut R,
) -> Result<Split, DatasetError> {
    let amount = validation_size(records.len(), denominator)?;
    let indices = sample_indices(rng, records.len(), amount);

    let mut chosen = vec![false; records.len()];
    for &idx in &indices {
        chosen[idx] = true;
    }
    let validation = indices.iter().map(|&idx| records[idx].clone()).collect();
    let remainder = records
        .into_iter()
        .zip(chosen)
        .filter_map(|(record, picked)| (!picked).then_some(record))
        .collect();

    Ok(Split {
        validation,
        remainder,
    })
}

/// Sample a validation file out of the dataset at `input` and write it to `output`.
///
/// Prints one status line to stdout. The input file is left untouched.
pub fn split_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &SplitConfig,
) -> anyhow::Result<SplitReport> {
    let (input, output) = (input.as_ref(), output.as_ref());
    options.validate()?;

    let records = load_dataset(input)?;
    let total = records.len();

    let split = match options.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            split_validation(records, options.denominator, &mut rng)?
        }
        None => split_validation(records, options.denominator, &mut rand::thread_rng())?,
    };
    tracing::info!(
        total,
        selected = split.validation.len(),
        seed = ?options.seed,
        "sampled validation records"
    );

    save_dataset(&split.validation, output)?;

    let remainder_output = match &options.remainder_output {
        Some(path) => {
            save_dataset(&split.remainder, path)?;
            tracing::info!(path = %path, records = split.remainder.len(), "wrote remainder");
            Some(PathBuf::from(path))
        }
        None => None,
    };

    println!(
        "Selected {} records and saved them to '{}'",
        split.validation.len(),
        output.display()
    );

    Ok(SplitReport {
        total,
        selected: split.validation.len(),
        output: output.to_path_buf(),
        remainder_output,
    })
}
