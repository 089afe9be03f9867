//! Static keyword lexicon and the synthetic training corpus derived from it.

use passbook_core::Category;

/// Lowercase keyword phrases per category, in declaration order. Each phrase
/// belongs to exactly one category. `Other` has no keywords; it is the
/// fallback target.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::FoodAndDining, &[
        "restaurant", "cafe", "food", "dining", "meal", "lunch", "dinner",
        "breakfast", "pizza", "burger", "coffee", "starbucks", "mcdonalds",
        "kfc", "subway", "dominos", "foodpanda", "uber eats", "zomato",
        "bistro", "porcelain", "third culture",
    ]),
    (Category::Transportation, &[
        "uber", "lyft", "taxi", "cab", "transport", "fuel", "gas",
        "petrol", "diesel", "parking", "metro", "bus", "train", "airline",
        "flight", "car", "vehicle", "maintenance", "repair", "atm cash",
    ]),
    (Category::Shopping, &[
        "amazon", "walmart", "target", "shop", "store", "mall", "retail",
        "clothing", "shoes", "electronics", "apparel", "fashion", "online",
        "ecommerce", "purchase", "buy", "order", "pos", "slack", "upwork",
        "fiverr", "instaprint", "inka", "paysa", "maria.b.design", "royal tag",
    ]),
    (Category::BillsAndUtilities, &[
        "electricity", "water", "internet", "phone", "mobile",
        "utility", "bill", "payment", "service", "subscription",
        "premium", "membership", "charges taxes",
        "bank charges", "fed", "telenor", "batch transfer", "salary transfer",
    ]),
    (Category::Entertainment, &[
        "movie", "cinema", "theater", "concert", "show", "game", "gaming",
        "netflix", "spotify", "youtube", "disney", "hulu", "amazon prime",
        "entertainment", "leisure", "recreation",
    ]),
    (Category::Healthcare, &[
        "hospital", "clinic", "doctor", "pharmacy", "medicine", "medical",
        "health", "dental", "vision", "insurance", "treatment", "therapy",
        "prescription", "drug",
    ]),
];

/// Generic phrases labeled `Other` in the training corpus.
pub const OTHER_SAMPLES: &[&str] = &[
    "ATM withdrawal", "Bank transfer", "Deposit", "Interest payment",
    "Service charge", "Fee", "Unknown transaction",
];

pub fn keywords(category: Category) -> &'static [&'static str] {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, k)| *k)
        .unwrap_or(&[])
}

/// One labeled sentence per (category, keyword) pair plus the `Other` samples.
pub fn training_corpus() -> Vec<(String, Category)> {
    let mut corpus: Vec<(String, Category)> = CATEGORY_KEYWORDS
        .iter()
        .flat_map(|(category, keywords)| {
            keywords
                .iter()
                .map(move |k| (format!("Sample transaction with {k}"), *category))
        })
        .collect();
    corpus.extend(OTHER_SAMPLES.iter().map(|s| (s.to_string(), Category::Other)));
    corpus
}
