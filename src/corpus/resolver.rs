use crate::corpus::Corpus;
use crate::models::FoodRecord;

/// Tokens of this length or shorter are ignored by the token tier.
const MIN_TOKEN_CHARS: usize = 3;

/// Find the corpus record that best stands in for a free-text food name.
///
/// Tiers are tried in order and each returns its first hit in corpus order:
/// 1. exact (case-insensitive, trimmed) name match
/// 2. record name contains the query, or the query contains the record name
/// 3. record name contains any query token longer than three characters
///
/// `None` means no authoritative data is available; it is not an error.
pub fn resolve<'a>(name: &str, corpus: &'a Corpus) -> Option<&'a FoodRecord> {
    let query = name.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    let normalized: Vec<(String, &FoodRecord)> =
        corpus.iter().map(|f| (f.key(), f)).collect();

    if let Some((_, food)) = normalized.iter().find(|(key, _)| *key == query) {
        return Some(*food);
    }

    if let Some((_, food)) = normalized
        .iter()
        .find(|(key, _)| !key.is_empty() && (key.contains(&query) || query.contains(key.as_str())))
    {
        return Some(*food);
    }

    let tokens: Vec<&str> = query
        .split_whitespace()
        .filter(|t| t.chars().count() > MIN_TOKEN_CHARS)
        .collect();
    if tokens.is_empty() {
        return None;
    }

    normalized
        .iter()
        .find(|(key, _)| tokens.iter().any(|t| key.contains(t)))
        .map(|(_, food)| *food)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(names: &[&str]) -> Corpus {
        names
            .iter()
            .map(|n| FoodRecord::new(*n, 100.0, 1.0, 1.0, 1.0))
            .collect()
    }

    #[test]
    fn test_exact_match_beats_substring() {
        let corpus = corpus(&["Ayam Bakar Ayam Goreng Spesial", "Ayam Goreng"]);
        let found = resolve("ayam goreng", &corpus).unwrap();
        assert_eq!(found.name, "Ayam Goreng");
    }

    #[test]
    fn test_query_is_normalised() {
        let corpus = corpus(&["Nasi Putih"]);
        assert_eq!(resolve("  NASI PUTIH ", &corpus).unwrap().name, "Nasi Putih");
    }

    #[test]
    fn test_record_contains_query() {
        let corpus = corpus(&["Tempe Bacem", "Tempe Goreng Tepung"]);
        assert_eq!(resolve("goreng", &corpus).unwrap().name, "Tempe Goreng Tepung");
    }

    #[test]
    fn test_query_contains_record() {
        let corpus = corpus(&["Pepes Ikan", "Tahu"]);
        assert_eq!(resolve("Tahu Goreng Crispy", &corpus).unwrap().name, "Tahu");
    }

    #[test]
    fn test_token_tier_takes_first_hit_in_corpus_order() {
        let corpus = corpus(&["Sayur Asem", "Ikan Kembung Bakar", "Kembung Goreng"]);
        // Neither substring direction matches; the first record holding any long token wins.
        assert_eq!(resolve("pindang kembung", &corpus).unwrap().name, "Ikan Kembung Bakar");
    }

    #[test]
    fn test_short_tokens_are_ignored() {
        let corpus = corpus(&["Mie Ayam"]);
        // "mie" is too short to count and "kuah" appears nowhere.
        assert!(resolve("mie kuah", &corpus).is_none());
    }

    #[test]
    fn test_miss_and_empty_query() {
        let corpus = corpus(&["Nasi Putih"]);
        assert!(resolve("pizza margherita", &corpus).is_none());
        assert!(resolve("   ", &corpus).is_none());
        assert!(resolve("nasi", &Corpus::default()).is_none());
    }
}
