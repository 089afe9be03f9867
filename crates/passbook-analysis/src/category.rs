use passbook_core::{CategorizedTransaction, Category, CategoryBreakdown, Direction, TransactionRecord};

use crate::classifier::{CentroidClassifier, ClassifyError};
use crate::lexicon::{training_corpus, CATEGORY_KEYWORDS};
use crate::text::TfidfVectorizer;

/// Assigns spending categories to debit descriptions.
///
/// The text model is trained once, at construction, from the static keyword
/// lexicon. The engine is read-only afterwards and can be shared across
/// analyses behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CategoryEngine {
    vectorizer: TfidfVectorizer,
    model: CentroidClassifier,
}

impl Default for CategoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryEngine {
    pub fn new() -> Self {
        let corpus = training_corpus();
        let documents: Vec<&str> = corpus.iter().map(|(d, _)| d.as_str()).collect();

        let mut vectorizer = TfidfVectorizer::default();
        vectorizer.fit(&documents);

        let examples: Vec<_> = corpus
            .iter()
            .map(|(doc, category)| (vectorizer.transform(doc), *category))
            .collect();
        let model = CentroidClassifier::fit(&examples, vectorizer.vocabulary_len());

        tracing::debug!(
            examples = examples.len(),
            vocabulary = vectorizer.vocabulary_len(),
            "trained category model"
        );
        Self { vectorizer, model }
    }

    /// Model prediction, falling back to keyword matching when the model
    /// cannot decide.
    pub fn classify(&self, description: &str) -> Category {
        match self.predict(description) {
            Ok(category) => category,
            Err(e) => {
                let category = self.keyword_classify(description);
                tracing::debug!(description, error = %e, %category, "keyword fallback");
                category
            }
        }
    }

    pub fn predict(&self, description: &str) -> Result<Category, ClassifyError> {
        if !self.vectorizer.is_fitted() {
            return Err(ClassifyError::NotTrained);
        }
        self.model.predict(&self.vectorizer.transform(description))
    }

    /// First category, in declaration order, with a keyword contained in the
    /// description. `Other` when none match.
    pub fn keyword_classify(&self, description: &str) -> Category {
        let text = description.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }

    /// Debit totals per category. Credits never contribute.
    pub fn category_breakdown(&self, transactions: &[TransactionRecord]) -> CategoryBreakdown {
        let mut breakdown = CategoryBreakdown::new();
        let mut credits = 0usize;
        let mut debits = 0usize;

        for tx in transactions {
            match tx.direction {
                Direction::Debit => {
                    debits += 1;
                    let category = self.classify(&tx.description);
                    tracing::debug!(description = %tx.description, amount = %tx.amount, %category, "categorized");
                    breakdown.add(category, tx.amount);
                }
                Direction::Credit => credits += 1,
            }
        }

        tracing::info!(credits, debits, "category breakdown complete");
        breakdown
    }

    /// Pairs every record with its category; credits get `None`.
    pub fn annotate(&self, transactions: &[TransactionRecord]) -> Vec<CategorizedTransaction> {
        transactions
            .iter()
            .map(|tx| CategorizedTransaction {
                record: tx.clone(),
                category: tx.is_debit().then(|| self.classify(&tx.description)),
            })
            .collect()
    }
}
