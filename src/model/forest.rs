//! Random forest classifier
//!
//! Bootstrap-aggregated CART trees with per-split feature subsampling.
//! Trees are fit in parallel with rayon. Every tree draws from its own RNG
//! seeded with `seed + tree_index`, so the fitted forest does not depend on
//! thread scheduling.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::tree::{DecisionTree, Sample, TreeConfig};
use super::Classifier;

/// Number of candidate features considered at each split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// `floor(sqrt(n_features))`
    #[default]
    Sqrt,
    /// Every feature at every split
    All,
    /// A fixed count, clamped to `1..=n_features`
    Fixed(usize),
}

impl MaxFeatures {
    pub fn resolve(self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Fixed(k) => k,
        };
        k.clamp(1, n_features.max(1))
    }
}

/// Hyperparameters of a forest fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
    /// Draw a bootstrap sample per tree; otherwise every tree sees every row
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// A fitted random forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    n_features: usize,
    trees: Vec<DecisionTree>,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    /// Fit a forest on rows of equal width and 0/1 labels
    pub fn fit<R>(rows: &[R], target: &[u8], config: &ForestConfig) -> Result<Self>
    where
        R: AsRef<[f64]> + Sync,
    {
        if rows.is_empty() {
            anyhow::bail!("Cannot fit a forest on an empty dataset");
        }
        if rows.len() != target.len() {
            anyhow::bail!(
                "Feature rows ({}) and target values ({}) differ in length",
                rows.len(),
                target.len()
            );
        }
        if config.n_trees == 0 {
            anyhow::bail!("Forest needs at least one tree");
        }
        if let Some(bad) = target.iter().find(|&&y| y > 1) {
            anyhow::bail!("Target must be binary 0/1, found {}", bad);
        }

        let n_features = rows[0].as_ref().len();
        if let Some(i) = rows.iter().position(|r| r.as_ref().len() != n_features) {
            anyhow::bail!(
                "Row {} has {} features, expected {}",
                i,
                rows[i].as_ref().len(),
                n_features
            );
        }

        let tree_config = TreeConfig {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split.max(2),
            min_samples_leaf: config.min_samples_leaf.max(1),
            max_features: config.max_features.resolve(n_features),
        };

        let trees: Vec<DecisionTree> = (0..config.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
                let samples = if config.bootstrap {
                    bootstrap_samples(rows.len(), &mut rng)
                } else {
                    (0..rows.len()).map(|row| Sample { row, weight: 1.0 }).collect()
                };
                DecisionTree::fit(rows, target, samples, n_features, &tree_config, &mut rng)
            })
            .collect();

        let feature_importances = average_importances(&trees, n_features);

        Ok(Self {
            config: config.clone(),
            n_features,
            trees,
            feature_importances,
        })
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

impl Classifier for RandomForest {
    fn predict_proba(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict_proba(row)).sum();
        sum / self.trees.len() as f64
    }

    fn feature_importances(&self) -> Vec<f64> {
        self.feature_importances.clone()
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}

/// Draw `n` rows with replacement, folded into per-row weights
fn bootstrap_samples(n: usize, rng: &mut StdRng) -> Vec<Sample> {
    let mut counts = vec![0u32; n];
    for _ in 0..n {
        counts[rng.gen_range(0..n)] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .filter(|(_, c)| *c > 0)
        .map(|(row, c)| Sample {
            row,
            weight: c as f64,
        })
        .collect()
}

/// Mean of per-tree normalised importances, renormalised to sum to 1
fn average_importances(trees: &[DecisionTree], n_features: usize) -> Vec<f64> {
    let mut sum = vec![0.0; n_features];
    for tree in trees {
        for (acc, v) in sum.iter_mut().zip(tree.feature_importances()) {
            *acc += v;
        }
    }
    let total: f64 = sum.iter().sum();
    if total > 0.0 {
        sum.iter().map(|v| v / total).collect()
    } else {
        sum
    }
}
