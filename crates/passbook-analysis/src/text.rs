//! Bag-of-words TF-IDF vectorization.
//!
//! Smoothed IDF (`ln((1 + n) / (1 + df)) + 1`), raw term counts and L2
//! normalization. Vocabulary indices follow alphabetical order so a fitted
//! vectorizer is fully determined by its training documents.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;

fn re_token() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("invalid regex"))
}

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "at", "by", "for", "from", "in", "of", "on", "or", "the", "to", "with",
];

/// Lowercased word tokens of two or more characters, stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    re_token()
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Sparse vector as `(feature index, weight)` pairs sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector(pub Vec<(usize, f64)>);

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.0
            .iter()
            .map(|(i, w)| dense.get(*i).copied().unwrap_or(0.0) * w)
            .sum()
    }

    pub fn norm(&self) -> f64 {
        self.0.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features, vocabulary: BTreeMap::new(), idf: Vec::new() }
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Learns vocabulary and IDF weights. Keeps at most `max_features` terms,
    /// preferring the most frequent across the corpus.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> &mut Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = Vec::new();
            for t in tokens {
                *term_freq.entry(t.as_str()).or_insert(0) += 1;
                if !seen.contains(&t.as_str()) {
                    seen.push(t.as_str());
                    *doc_freq.entry(t.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut kept: Vec<&str> = ranked.into_iter().map(|(t, _)| t).collect();
        kept.sort_unstable();

        let n = documents.len() as f64;
        self.idf = kept
            .iter()
            .map(|t| {
                let df = doc_freq.get(t).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.vocabulary = kept.iter().enumerate().map(|(i, t)| (t.to_string(), i)).collect();
        self
    }

    /// TF-IDF vector of `text`. Unknown terms are ignored, so text sharing no
    /// vocabulary with the training corpus maps to the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut v = SparseVector(counts.into_iter().map(|(i, tf)| (i, tf * self.idf[i])).collect());
        let norm = v.norm();
        if norm > 0.0 {
            for (_, w) in &mut v.0 {
                *w /= norm;
            }
        }
        v
    }
}
