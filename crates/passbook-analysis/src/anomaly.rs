//! Amount outlier detection.
//!
//! Each call standardizes the batch amounts and fits a fresh isolation
//! forest over that single feature. Points whose anomaly score lies above the
//! `(1 - outlier_fraction)` percentile of the batch scores are flagged. The
//! forest is seeded from [`AnomalyConfig::seed`], so the same batch always
//! yields the same anomalies.

use passbook_core::{AnomalyConfig, AnomalyRecord, TransactionRecord};

const EULER_GAMMA: f64 = 0.577_215_664_9;

#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    config: AnomalyConfig,
}

impl AnomalyDetector {
    pub fn new(config: &AnomalyConfig) -> Self {
        Self { config: config.clone() }
    }

    /// Outliers among `transactions`, in input order. Batches below
    /// `min_batch` are never scored.
    pub fn detect(&self, transactions: &[TransactionRecord]) -> Vec<AnomalyRecord> {
        if transactions.len() < self.config.min_batch.max(1) {
            tracing::debug!(count = transactions.len(), "batch too small for anomaly detection");
            return Vec::new();
        }

        let amounts: Vec<f64> = transactions.iter().map(|tx| tx.amount.to_f64()).collect();
        let flags = self.flag_outliers(&amounts);

        let anomalies: Vec<AnomalyRecord> = transactions
            .iter()
            .zip(flags)
            .filter(|(_, flagged)| *flagged)
            .map(|(tx, _)| AnomalyRecord::unusual_amount(tx))
            .collect();

        tracing::info!(
            transactions = transactions.len(),
            anomalies = anomalies.len(),
            "anomaly detection complete"
        );
        anomalies
    }

    /// Outlier flag per value.
    pub fn flag_outliers(&self, values: &[f64]) -> Vec<bool> {
        if values.is_empty() {
            return Vec::new();
        }
        let scores = self.scores(values);
        let threshold = percentile(&scores, 100.0 * (1.0 - self.config.outlier_fraction));
        tracing::debug!(threshold, "outlier score threshold");
        scores.iter().map(|s| *s > threshold).collect()
    }

    /// Isolation score in `(0, 1]` per value; higher is more anomalous.
    pub fn scores(&self, values: &[f64]) -> Vec<f64> {
        let standardized = standardize(values);
        let mut rng = SplitMix64::new(self.config.seed);
        let forest = IsolationForest::fit(&standardized, self.config.trees, self.config.max_samples, &mut rng);
        standardized.iter().map(|x| forest.score(*x)).collect()
    }
}

/// Zero mean, unit (population) variance. A constant column maps to zeros.
fn standardize(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = if variance > 0.0 { variance.sqrt() } else { 1.0 };
    values.iter().map(|v| (v - mean) / std).collect()
}

/// Linear-interpolated percentile, `q` in `[0, 100]`.
fn percentile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// Average path length of an unsuccessful search in a binary search tree of
/// `n` points.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

enum Node {
    Leaf { size: usize },
    Split { threshold: f64, left: Box<Node>, right: Box<Node> },
}

impl Node {
    fn build(points: &mut [f64], depth: usize, limit: usize, rng: &mut SplitMix64) -> Node {
        if depth >= limit || points.len() <= 1 {
            return Node::Leaf { size: points.len() };
        }
        let (min, max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        if max <= min {
            return Node::Leaf { size: points.len() };
        }

        let threshold = min + rng.next_f64() * (max - min);
        let mut split = 0;
        for i in 0..points.len() {
            if points[i] < threshold {
                points.swap(i, split);
                split += 1;
            }
        }
        let (left, right) = points.split_at_mut(split);
        Node::Split {
            threshold,
            left: Box::new(Node::build(left, depth + 1, limit, rng)),
            right: Box::new(Node::build(right, depth + 1, limit, rng)),
        }
    }

    fn path_length(&self, x: f64, depth: usize) -> f64 {
        match self {
            Node::Leaf { size } => depth as f64 + average_path_length(*size),
            Node::Split { threshold, left, right } => {
                if x < *threshold {
                    left.path_length(x, depth + 1)
                } else {
                    right.path_length(x, depth + 1)
                }
            }
        }
    }
}

struct IsolationForest {
    trees: Vec<Node>,
    sample_size: usize,
}

impl IsolationForest {
    fn fit(values: &[f64], trees: usize, max_samples: usize, rng: &mut SplitMix64) -> Self {
        let sample_size = max_samples.min(values.len()).max(1);
        let limit = (sample_size as f64).log2().ceil().max(1.0) as usize;

        let trees = (0..trees.max(1))
            .map(|_| {
                let mut sample = values.to_vec();
                // Partial Fisher-Yates: the first `sample_size` slots become the subsample.
                for i in 0..sample_size {
                    let j = i + rng.below(sample.len() - i);
                    sample.swap(i, j);
                }
                sample.truncate(sample_size);
                Node::build(&mut sample, 0, limit, rng)
            })
            .collect();
        Self { trees, sample_size }
    }

    fn score(&self, x: f64) -> f64 {
        let mean_depth =
            self.trees.iter().map(|t| t.path_length(x, 0)).sum::<f64>() / self.trees.len() as f64;
        let c = average_path_length(self.sample_size);
        if c > 0.0 {
            2f64.powf(-mean_depth / c)
        } else {
            1.0
        }
    }
}

/// Small deterministic generator (SplitMix64).
struct SplitMix64(u64);

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `0..n`; `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}
