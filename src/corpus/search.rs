use strsim::jaro_winkler;

use crate::corpus::Corpus;
use crate::models::{FoodCandidate, FoodRecord};

/// Maximum local search results returned.
pub const SEARCH_RESULT_LIMIT: usize = 25;

/// Case-insensitive substring search over the corpus.
///
/// Matches are ranked by Jaro-Winkler similarity to the query so that
/// "Tempe" lists "Tempe" before "Keripik Tempe Pedas"; equal scores keep
/// corpus order.
pub fn search_local(corpus: &Corpus, query: &str) -> Vec<FoodCandidate> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(&FoodRecord, f64)> = corpus
        .iter()
        .filter_map(|f| {
            let key = f.key();
            key.contains(&query).then(|| (f, jaro_winkler(&key, &query)))
        })
        .collect();

    matches.sort_by(|a, b| b.1.total_cmp(&a.1));

    matches
        .into_iter()
        .take(SEARCH_RESULT_LIMIT)
        .map(|(f, _)| FoodCandidate::from(f))
        .collect()
}
