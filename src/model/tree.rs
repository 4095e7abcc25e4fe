//! CART decision tree with Gini impurity
//!
//! Samples carry a weight (the bootstrap multiplicity), so a row drawn three
//! times counts three times in every impurity computation without being
//! copied.

use rand::rngs::StdRng;
use rand::seq::index::sample;
use serde::{Deserialize, Serialize};

/// Index of a node inside a tree's node arena
pub type NodeIndex = usize;

/// A node of a fitted tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        /// Weighted fraction of class-1 samples that reached this leaf
        probability: f64,
    },
    Split {
        feature: usize,
        /// Rows with `value <= threshold` go left
        threshold: f64,
        left: NodeIndex,
        right: NodeIndex,
    },
}

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth, `None` for unbounded
    pub max_depth: Option<usize>,
    /// Minimum raw sample count needed to attempt a split
    pub min_samples_split: usize,
    /// Minimum raw sample count on each side of a split
    pub min_samples_leaf: usize,
    /// Number of candidate features drawn at every split
    pub max_features: usize,
}

/// A training sample: row index and weight
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sample {
    pub row: usize,
    pub weight: f64,
}

/// A fitted decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    /// Unnormalised weighted impurity decrease per feature
    impurity_decrease: Vec<f64>,
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Gini impurity of a binary node from weighted class counts
pub fn gini_impurity(events: f64, non_events: f64) -> f64 {
    let total = events + non_events;
    if total == 0.0 {
        return 0.0;
    }
    let p = events / total;
    2.0 * p * (1.0 - p)
}

/// Find the threshold on one feature that maximizes Gini reduction
///
/// # Arguments
/// * `sorted_pairs` - Slice of (value, target, weight) tuples, sorted by value
/// * `min_samples` - Minimum samples (raw count) required on each side of the split
///
/// # Returns
/// Option of (threshold, information_gain) or None if no valid split found
fn find_best_threshold(sorted_pairs: &[(f64, u8, f64)], min_samples: usize) -> Option<(f64, f64)> {
    let n = sorted_pairs.len();
    if n < 2 * min_samples.max(1) {
        return None;
    }

    let total_events: f64 = sorted_pairs.iter().filter(|(_, t, _)| *t == 1).map(|(_, _, w)| w).sum();
    let total_non_events: f64 = sorted_pairs.iter().filter(|(_, t, _)| *t == 0).map(|(_, _, w)| w).sum();
    let total_weight = total_events + total_non_events;
    if total_weight == 0.0 {
        return None;
    }

    let parent_gini = gini_impurity(total_events, total_non_events);

    let mut best_gain = 0.0;
    let mut best = None;

    let mut left_events = 0.0f64;
    let mut left_non_events = 0.0f64;

    for i in 0..n - 1 {
        let (value, target, weight) = sorted_pairs[i];
        if target == 1 {
            left_events += weight;
        } else {
            left_non_events += weight;
        }

        let left_count = i + 1;
        let right_count = n - left_count;
        if left_count < min_samples || right_count < min_samples {
            continue;
        }

        // Never split between equal values
        let next_value = sorted_pairs[i + 1].0;
        if next_value - value <= f64::EPSILON * value.abs().max(1.0) {
            continue;
        }

        let right_events = total_events - left_events;
        let right_non_events = total_non_events - left_non_events;

        let left_prop = (left_events + left_non_events) / total_weight;
        let right_prop = (right_events + right_non_events) / total_weight;

        let weighted_child_gini = left_prop * gini_impurity(left_events, left_non_events)
            + right_prop * gini_impurity(right_events, right_non_events);

        let gain = parent_gini - weighted_child_gini;

        if gain > best_gain {
            best_gain = gain;
            let midpoint = value + (next_value - value) / 2.0;
            let threshold = if midpoint >= next_value { value } else { midpoint };
            best = Some(threshold);
        }
    }

    best.map(|t| (t, best_gain))
}

impl DecisionTree {
    /// Grow a tree on the given weighted samples
    pub(crate) fn fit<R: AsRef<[f64]>>(
        rows: &[R],
        target: &[u8],
        samples: Vec<Sample>,
        n_features: usize,
        config: &TreeConfig,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            impurity_decrease: vec![0.0; n_features],
        };
        let mut grower = Grower {
            rows,
            target,
            n_features,
            config,
            rng,
        };
        grower.grow(&mut tree, samples, 0);
        tree
    }

    /// Probability of class 1 for one row
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { probability } => return *probability,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Per-feature impurity decrease, normalised to sum to 1
    ///
    /// A tree that never split returns all zeros.
    pub fn feature_importances(&self) -> Vec<f64> {
        let total: f64 = self.impurity_decrease.iter().sum();
        if total > 0.0 {
            self.impurity_decrease.iter().map(|v| v / total).collect()
        } else {
            vec![0.0; self.impurity_decrease.len()]
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: NodeIndex) -> usize {
            match &nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }
}

struct Grower<'a, R> {
    rows: &'a [R],
    target: &'a [u8],
    n_features: usize,
    config: &'a TreeConfig,
    rng: &'a mut StdRng,
}

impl<R: AsRef<[f64]>> Grower<'_, R> {
    fn grow(&mut self, tree: &mut DecisionTree, samples: Vec<Sample>, depth: usize) -> NodeIndex {
        let (events, non_events) = samples.iter().fold((0.0, 0.0), |(e, ne), s| {
            if self.target[s.row] == 1 {
                (e + s.weight, ne)
            } else {
                (e, ne + s.weight)
            }
        });
        let total = events + non_events;
        let probability = if total > 0.0 { events / total } else { 0.0 };

        let depth_ok = self.config.max_depth.map_or(true, |max| depth < max);
        let can_split = depth_ok
            && samples.len() >= self.config.min_samples_split
            && gini_impurity(events, non_events) > 0.0;

        let split = if can_split { self.best_split(&samples) } else { None };

        let Some(split) = split else {
            tree.nodes.push(Node::Leaf { probability });
            return tree.nodes.len() - 1;
        };

        tree.impurity_decrease[split.feature] += total * split.gain;

        let (left, right): (Vec<Sample>, Vec<Sample>) = samples
            .into_iter()
            .partition(|s| self.rows[s.row].as_ref()[split.feature] <= split.threshold);

        // Reserve the slot, then patch in the children once they exist.
        let idx = tree.nodes.len();
        tree.nodes.push(Node::Leaf { probability });
        let left_idx = self.grow(tree, left, depth + 1);
        let right_idx = self.grow(tree, right, depth + 1);
        tree.nodes[idx] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: left_idx,
            right: right_idx,
        };
        idx
    }

    fn best_split(&mut self, samples: &[Sample]) -> Option<SplitCandidate> {
        let k = self.config.max_features.clamp(1, self.n_features);
        let candidates = sample(&mut *self.rng, self.n_features, k);

        let mut best: Option<SplitCandidate> = None;
        let mut pairs: Vec<(f64, u8, f64)> = Vec::with_capacity(samples.len());

        for feature in candidates.iter() {
            pairs.clear();
            pairs.extend(samples.iter().map(|s| {
                (
                    self.rows[s.row].as_ref()[feature],
                    self.target[s.row],
                    s.weight,
                )
            }));
            pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

            if let Some((threshold, gain)) = find_best_threshold(&pairs, self.config.min_samples_leaf) {
                if best.map_or(true, |b| gain > b.gain) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        gain,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn config() -> TreeConfig {
        TreeConfig {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: 2,
        }
    }

    fn unit_samples(n: usize) -> Vec<Sample> {
        (0..n).map(|row| Sample { row, weight: 1.0 }).collect()
    }

    #[test]
    fn test_gini_impurity() {
        assert_eq!(gini_impurity(0.0, 0.0), 0.0);
        assert_eq!(gini_impurity(5.0, 0.0), 0.0);
        assert!((gini_impurity(5.0, 5.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_best_threshold_separates_classes() {
        let pairs = vec![
            (1.0, 0u8, 1.0),
            (2.0, 0, 1.0),
            (3.0, 0, 1.0),
            (7.0, 1, 1.0),
            (8.0, 1, 1.0),
        ];
        let (threshold, gain) = find_best_threshold(&pairs, 1).unwrap();
        assert_eq!(threshold, 5.0);
        assert!(gain > 0.45);
    }

    #[test]
    fn test_no_split_on_constant_feature() {
        let pairs = vec![(1.0, 0u8, 1.0), (1.0, 1, 1.0), (1.0, 0, 1.0)];
        assert!(find_best_threshold(&pairs, 1).is_none());
    }

    #[test]
    fn test_tree_fits_separable_data() {
        let rows = vec![[0.0, 5.0], [1.0, 3.0], [2.0, 9.0], [10.0, 4.0], [11.0, 1.0], [12.0, 7.0]];
        let target = vec![0u8, 0, 0, 1, 1, 1];
        let mut rng = StdRng::seed_from_u64(1);
        let tree = DecisionTree::fit(&rows, &target, unit_samples(6), 2, &config(), &mut rng);

        for (row, y) in rows.iter().zip(&target) {
            assert_eq!(tree.predict_proba(row), *y as f64);
        }
        let imp = tree.feature_importances();
        assert!((imp.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(imp[0] > 0.0);
    }

    #[test]
    fn test_max_depth_zero_is_single_leaf() {
        let rows = vec![[0.0], [1.0], [2.0], [3.0]];
        let target = vec![0u8, 0, 1, 1];
        let cfg = TreeConfig {
            max_depth: Some(0),
            max_features: 1,
            ..config()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let tree = DecisionTree::fit(&rows, &target, unit_samples(4), 1, &cfg, &mut rng);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.predict_proba(&[0.0]), 0.5);
        assert_eq!(tree.feature_importances(), vec![0.0]);
    }

    #[test]
    fn test_weights_shift_leaf_probability() {
        let rows = vec![[0.0], [0.0]];
        let target = vec![0u8, 1];
        let samples = vec![Sample { row: 0, weight: 1.0 }, Sample { row: 1, weight: 3.0 }];
        let mut rng = StdRng::seed_from_u64(1);
        let cfg = TreeConfig { max_features: 1, ..config() };
        let tree = DecisionTree::fit(&rows, &target, samples, 1, &cfg, &mut rng);
        assert_eq!(tree.predict_proba(&[0.0]), 0.75);
    }
}
