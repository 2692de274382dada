//! The read-only nutrition reference corpus and the lookups built on it.

pub mod filter;
pub mod resolver;
pub mod search;

use std::path::Path;

use crate::error::Result;
use crate::models::FoodRecord;
use crate::persistence;

pub use filter::{FoodCategory, ReferenceSet, sample_reference_set};
pub use resolver::resolve;
pub use search::search_local;

/// Immutable collection of reference foods, loaded once and shared.
///
/// Records keep their file order; resolution tiers break ties by it.
/// Near-duplicate names are kept as-is.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    foods: Vec<FoodRecord>,
}

impl Corpus {
    pub fn new(foods: Vec<FoodRecord>) -> Self {
        Self { foods }
    }

    /// Load a corpus from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(persistence::load_corpus(path)?))
    }

    pub fn records(&self) -> &[FoodRecord] {
        &self.foods
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodRecord> {
        self.foods.iter()
    }

    /// Count of records in the corpus.
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

impl From<Vec<FoodRecord>> for Corpus {
    fn from(foods: Vec<FoodRecord>) -> Self {
        Self::new(foods)
    }
}

impl FromIterator<FoodRecord> for Corpus {
    fn from_iter<I: IntoIterator<Item = FoodRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_duplicates_and_order() {
        let corpus: Corpus = vec![
            FoodRecord::new("Tahu Goreng", 115.0, 9.7, 2.5, 8.5),
            FoodRecord::new("tahu goreng", 120.0, 10.0, 2.0, 9.0),
            FoodRecord::new("Apel", 58.0, 0.3, 14.9, 0.4),
        ]
        .into();

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.records()[1].calories, 120.0);
        assert_eq!(corpus.iter().last().map(|f| f.name.as_str()), Some("Apel"));
    }
}
