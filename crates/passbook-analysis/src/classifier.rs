use passbook_core::Category;
use thiserror::Error;

use crate::text::SparseVector;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("Classifier has not been trained")]
    NotTrained,
    #[error("Description shares no terms with the training vocabulary")]
    NoKnownTerms,
}

/// Linear multi-class model: one weight vector per category, the L2-normalized
/// mean TF-IDF vector of that category's training examples. The predicted
/// category has the largest dot product with the input (cosine similarity for
/// unit inputs); ties go to the category declared first.
///
/// A description naming merchants from two categories ("POS Purchase
/// NETFLIX.COM") can still score toward the category with more matching terms,
/// so model and keyword lookup agree reliably only on plain merchant names.
#[derive(Debug, Clone, Default)]
pub struct CentroidClassifier {
    weights: Vec<(Category, Vec<f64>)>,
}

impl CentroidClassifier {
    pub fn fit(examples: &[(SparseVector, Category)], dimensions: usize) -> Self {
        let weights = Category::ALL
            .into_iter()
            .filter_map(|category| {
                let members: Vec<&SparseVector> = examples
                    .iter()
                    .filter(|(_, c)| *c == category)
                    .map(|(v, _)| v)
                    .collect();
                if members.is_empty() {
                    return None;
                }
                let mut centroid = vec![0.0; dimensions];
                for v in &members {
                    for (i, w) in &v.0 {
                        if let Some(slot) = centroid.get_mut(*i) {
                            *slot += w;
                        }
                    }
                }
                let norm = centroid.iter().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    centroid.iter_mut().for_each(|w| *w /= norm);
                }
                Some((category, centroid))
            })
            .collect();
        Self { weights }
    }

    pub fn is_trained(&self) -> bool {
        !self.weights.is_empty()
    }

    /// Score per trained category, in declaration order.
    pub fn decision_function(&self, x: &SparseVector) -> Vec<(Category, f64)> {
        self.weights.iter().map(|(c, w)| (*c, x.dot_dense(w))).collect()
    }

    pub fn predict(&self, x: &SparseVector) -> Result<Category, ClassifyError> {
        if !self.is_trained() {
            return Err(ClassifyError::NotTrained);
        }
        if x.is_zero() {
            return Err(ClassifyError::NoKnownTerms);
        }
        let mut best: Option<(Category, f64)> = None;
        for (category, score) in self.decision_function(x) {
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((category, score));
            }
        }
        best.map(|(c, _)| c).ok_or(ClassifyError::NotTrained)
    }
}
