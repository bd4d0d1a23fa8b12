use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::application::SuggestionIndex;
use crate::domain::{DomainError, Suggestion};

/// [`SuggestionIndex`] over a fixed list of records, matched by case-insensitive
/// substring on the title. Hits keep insertion order.
pub struct InMemorySuggestionIndex {
    records: Vec<Suggestion>,
    max_hits: usize,
}

impl InMemorySuggestionIndex {
    pub fn new(records: Vec<Suggestion>) -> Self {
        Self {
            records,
            max_hits: 5,
        }
    }

    pub fn with_max_hits(mut self, max_hits: usize) -> Self {
        self.max_hits = max_hits.max(1);
        self
    }

    /// A handful of ecommerce transformations for offline demos.
    pub fn with_demo_records() -> Self {
        Self::new(vec![
            Suggestion::new(
                "demo-remove-sku",
                "Remove SKU field",
                "function removeSku(record) {\n  const { sku, ...rest } = record;\n  return rest;\n}",
            ),
            Suggestion::new(
                "demo-discount",
                "Add discount percentage attribute",
                "function addDiscount(record) {\n  const discount = record.compare_at_price\n    ? Math.round((1 - record.price / record.compare_at_price) * 100)\n    : 0;\n  return { ...record, discount_percentage: discount };\n}",
            ),
            Suggestion::new(
                "demo-lowercase-brand",
                "Lowercase brand name",
                "function lowercaseBrand(record) {\n  return { ...record, brand: String(record.brand || '').toLowerCase() };\n}",
            ),
            Suggestion::new(
                "demo-in-stock",
                "Flag in-stock products",
                "function flagInStock(record) {\n  return { ...record, in_stock: (record.inventory || 0) > 0 };\n}",
            ),
        ])
    }

    /// Load records from a JSON array of hits (`objectID`, `title`, `code`, ...).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let records: Vec<Suggestion> = serde_json::from_str(&raw).map_err(|e| {
            DomainError::invalid_input(format!(
                "{} is not a JSON array of records: {e}",
                path.as_ref().display()
            ))
        })?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl SuggestionIndex for InMemorySuggestionIndex {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, DomainError> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();

        let hits: Vec<Suggestion> = self
            .records
            .iter()
            .filter(|record| {
                let title = record.title().to_lowercase();
                terms.iter().all(|term| title.contains(term.as_str()))
            })
            .take(self.max_hits)
            .cloned()
            .collect();

        debug!("InMemorySuggestionIndex: {} hits for {:?}", hits.len(), query);
        Ok(hits)
    }

    fn index_name(&self) -> &str {
        "in-memory"
    }
}
