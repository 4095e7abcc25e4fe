//! Synthetic `WorkMode` column
//!
//! The source dataset has no work-mode attribute, so one is drawn per row
//! from a distribution conditioned on the row's attrition label. The draw is
//! seeded, so a given dataset and seed always produce the same column.
//!
//! The column is derived from the label itself and therefore leaks target
//! information into the features.

use anyhow::{Context, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed used when none is given on the command line
pub const DEFAULT_SEED: u64 = 42;

/// Work-mode labels in draw order
pub const WORK_MODES: [&str; 3] = ["On-site", "Hybrid", "Remote"];

/// Draw probabilities for rows labelled as leavers
pub const LEAVER_WEIGHTS: [f64; 3] = [0.6, 0.3, 0.1];

/// Draw probabilities for rows labelled as stayers
pub const STAYER_WEIGHTS: [f64; 3] = [0.2, 0.4, 0.4];

/// Draw one work mode per label, in row order
pub fn derive_work_mode(labels: &[u8], seed: u64) -> Result<Vec<&'static str>> {
    let mut rng = StdRng::seed_from_u64(seed);

    let leaver = WeightedIndex::new(LEAVER_WEIGHTS).context("Invalid leaver work-mode weights")?;
    let stayer = WeightedIndex::new(STAYER_WEIGHTS).context("Invalid stayer work-mode weights")?;

    let modes = labels
        .iter()
        .map(|&label| {
            let idx = if label == 1 {
                leaver.sample(&mut rng)
            } else {
                stayer.sample(&mut rng)
            };
            WORK_MODES[idx]
        })
        .collect();

    Ok(modes)
}
