//! Free-text food identification through the text-generation service.

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::{PlanError, Result};
use crate::llm::{JsonShape, TextGenerator, extract_json, prompts};
use crate::models::FoodCandidate;

/// Most candidates returned for one query.
pub const MAX_CANDIDATES: usize = 8;

/// Ask the service for foods matching `query`, per 100g.
///
/// Never fails: a blank query, a transport error or an unparseable reply
/// all give an empty list.
#[instrument(skip(service), fields(service = service.name()))]
pub async fn identify(service: &dyn TextGenerator, query: &str) -> Vec<FoodCandidate> {
    if query.trim().is_empty() {
        debug!("blank query, nothing to identify");
        return Vec::new();
    }

    match try_identify(service, query).await {
        Ok(candidates) => {
            info!(count = candidates.len(), "identified foods");
            candidates
        }
        Err(e) => {
            warn!(error = %e, "food identification failed");
            Vec::new()
        }
    }
}

async fn try_identify(service: &dyn TextGenerator, query: &str) -> Result<Vec<FoodCandidate>> {
    let request = prompts::identify_request(query);
    let completion = service.complete(&request).await?;
    parse_candidates(&completion)
}

/// Decode candidates from a completion holding a JSON array.
///
/// Elements without a name or with an undecodable shape are skipped.
pub fn parse_candidates(text: &str) -> Result<Vec<FoodCandidate>> {
    let Value::Array(elements) = extract_json(text, JsonShape::Array)? else {
        return Err(PlanError::MalformedResponse("expected a JSON array".to_string()));
    };

    Ok(elements
        .into_iter()
        .filter_map(|element| serde_json::from_value::<FoodCandidate>(element).ok())
        .filter(|candidate| !candidate.name.trim().is_empty())
        .take(MAX_CANDIDATES)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_candidates_from_prose() {
        let text = r#"Sure! Here you go:
[
  {"name": "Soto Ayam", "calories": 130, "protein": 9.5, "carbs": 8, "fat": 6.2, "serving": "100g"},
  {"name": "Soto Betawi", "calories": "165", "protein": 8, "carbs": 6, "fat": 12}
]"#;
        let candidates = parse_candidates(text).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "Soto Ayam");
        assert_eq!(candidates[1].calories, 165.0);
        assert_eq!(candidates[1].serving, "100g");
    }

    #[test]
    fn test_parse_candidates_skips_bad_elements_and_truncates() {
        let mut elements: Vec<String> = (0..10)
            .map(|i| format!(r#"{{"name": "Food {}", "calories": 100}}"#, i))
            .collect();
        elements.insert(0, r#"{"calories": 50}"#.to_string());
        elements.insert(1, r#""just a string""#.to_string());
        elements.insert(2, r#"{"name": "  "}"#.to_string());
        let text = format!("[{}]", elements.join(","));

        let candidates = parse_candidates(&text).unwrap();
        assert_eq!(candidates.len(), MAX_CANDIDATES);
        assert_eq!(candidates[0].name, "Food 0");
    }

    #[test]
    fn test_parse_candidates_rejects_objects() {
        assert!(parse_candidates(r#"{"name": "Soto"}"#).is_err());
        assert!(parse_candidates("no idea").is_err());
    }
}
