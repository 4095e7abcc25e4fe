//! Classification metrics and train/holdout splitting

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use super::Classifier;

/// Binary confusion matrix with class 1 as positive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(predicted: &[u8], actual: &[u8]) -> Self {
        let mut m = Self::default();
        for (&p, &a) in predicted.iter().zip(actual) {
            match (p, a) {
                (1, 1) => m.true_positive += 1,
                (1, _) => m.false_positive += 1,
                (_, 1) => m.false_negative += 1,
                _ => m.true_negative += 1,
            }
        }
        m
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }
}

/// Summary scores of a classifier on a labelled set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion: ConfusionMatrix,
}

impl ClassificationMetrics {
    pub fn from_confusion(confusion: ConfusionMatrix) -> Self {
        let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };

        let accuracy = ratio(
            confusion.true_positive + confusion.true_negative,
            confusion.total(),
        );
        let precision = ratio(
            confusion.true_positive,
            confusion.true_positive + confusion.false_positive,
        );
        let recall = ratio(
            confusion.true_positive,
            confusion.true_positive + confusion.false_negative,
        );
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Self {
            accuracy,
            precision,
            recall,
            f1,
            confusion,
        }
    }
}

/// Score a classifier on rows with known labels
pub fn evaluate<C, R>(classifier: &C, rows: &[R], target: &[u8]) -> ClassificationMetrics
where
    C: Classifier + ?Sized,
    R: AsRef<[f64]>,
{
    let predicted: Vec<u8> = rows.iter().map(|r| classifier.predict(r.as_ref())).collect();
    ClassificationMetrics::from_confusion(ConfusionMatrix::from_predictions(&predicted, target))
}

/// Split row indices into (train, holdout) with a seeded shuffle.
///
/// The holdout gets `round(n * fraction)` rows; a fraction of zero puts
/// every row in the training set.
pub fn train_test_split(n: usize, fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    if fraction <= 0.0 || n == 0 {
        return (indices, Vec::new());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n as f64) * fraction).round() as usize;
    let n_test = n_test.min(n.saturating_sub(1));
    let train = indices.split_off(n_test);
    (train, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusion_counts() {
        let predicted = [1, 1, 0, 0, 1];
        let actual = [1, 0, 0, 1, 1];
        let m = ConfusionMatrix::from_predictions(&predicted, &actual);
        assert_eq!(m.true_positive, 2);
        assert_eq!(m.false_positive, 1);
        assert_eq!(m.true_negative, 1);
        assert_eq!(m.false_negative, 1);
    }

    #[test]
    fn test_metrics_from_confusion() {
        let m = ClassificationMetrics::from_confusion(ConfusionMatrix {
            true_positive: 2,
            false_positive: 1,
            true_negative: 1,
            false_negative: 1,
        });
        assert!((m.accuracy - 0.6).abs() < 1e-12);
        assert!((m.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.f1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_metrics_without_positives() {
        let m = ClassificationMetrics::from_confusion(ConfusionMatrix {
            true_negative: 4,
            ..Default::default()
        });
        assert_eq!(m.accuracy, 1.0);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.f1, 0.0);
    }

    #[test]
    fn test_split_sizes_and_disjoint() {
        let (train, test) = train_test_split(100, 0.2, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_zero_fraction() {
        let (train, test) = train_test_split(10, 0.0, 42);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }

    #[test]
    fn test_split_keeps_one_training_row() {
        let (train, test) = train_test_split(3, 0.99, 1);
        assert_eq!(train.len(), 1);
        assert_eq!(test.len(), 2);
    }
}
