//! Loosely-typed plan decoded from text-generation output.
//!
//! Nothing about the payload is trusted: every field is optional, numbers may
//! arrive as strings (`"150g"`), and a slot that is not an array decodes as
//! empty. Defaults are applied later, at reconciliation.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{PlanError, Result};
use crate::models::Slot;

/// One meal item as proposed by the external service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CandidateItem {
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: Option<String>,

    #[serde(
        default,
        alias = "portionGram",
        alias = "portion_g",
        deserialize_with = "lenient_number"
    )]
    pub portion_gram: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub calories: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub protein: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub carbs: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub fat: Option<f64>,
}

/// The four plan slots as proposed by the external service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CandidatePlan {
    #[serde(default, deserialize_with = "lenient_items")]
    pub breakfast: Vec<CandidateItem>,

    #[serde(default, deserialize_with = "lenient_items")]
    pub lunch: Vec<CandidateItem>,

    #[serde(default, deserialize_with = "lenient_items")]
    pub dinner: Vec<CandidateItem>,

    #[serde(default, alias = "snacks", deserialize_with = "lenient_items")]
    pub snack: Vec<CandidateItem>,
}

impl CandidatePlan {
    /// Decode an extracted JSON value. Only a top-level object is accepted.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(PlanError::MalformedResponse(
                "expected a JSON object with meal slots".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| PlanError::MalformedResponse(e.to_string()))
    }

    pub fn slot(&self, slot: Slot) -> &[CandidateItem] {
        match slot {
            Slot::Breakfast => &self.breakfast,
            Slot::Lunch => &self.lunch,
            Slot::Dinner => &self.dinner,
            Slot::Snack => &self.snack,
        }
    }

    pub fn item_count(&self) -> usize {
        Slot::ALL.iter().map(|s| self.slot(*s).len()).sum()
    }
}

/// Parse a number that may be encoded as a JSON number or a string such as
/// `"150"`, `"150g"` or `"165 kcal"`. Anything else decodes as `None`.
pub fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim().replace(',', ".");
    let end = trimmed
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

fn lenient_name<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let name = match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Ok(None),
    };
    Ok(if name.is_empty() { None } else { Some(name) })
}

fn lenient_items<'de, D>(deserializer: D) -> std::result::Result<Vec<CandidateItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_well_formed_plan() {
        let value = json!({
            "breakfast": [{"name": "Nasi Merah", "portion_gram": 150, "calories": 165, "protein": 3, "carbs": 35, "fat": 1}],
            "lunch": [],
            "dinner": [],
            "snack": [{"name": "Pisang", "portion_gram": 100}]
        });
        let plan = CandidatePlan::from_value(value).unwrap();

        assert_eq!(plan.breakfast.len(), 1);
        assert_eq!(plan.breakfast[0].portion_gram, Some(150.0));
        assert_eq!(plan.snack[0].calories, None);
        assert_eq!(plan.item_count(), 2);
    }

    #[test]
    fn test_non_array_slots_are_empty() {
        let value = json!({"breakfast": "nasi", "lunch": null, "dinner": {"name": "x"}});
        let plan = CandidatePlan::from_value(value).unwrap();
        assert_eq!(plan.item_count(), 0);
    }

    #[test]
    fn test_non_object_items_are_skipped() {
        let value = json!({"lunch": ["Ayam Bakar", 42, {"name": "Tumis Kangkung"}]});
        let plan = CandidatePlan::from_value(value).unwrap();
        assert_eq!(plan.lunch.len(), 1);
        assert_eq!(plan.lunch[0].name.as_deref(), Some("Tumis Kangkung"));
    }

    #[test]
    fn test_string_numbers_and_aliases() {
        let value = json!({"snacks": [{"name": " Apel ", "portionGram": "120g", "calories": "62 kcal", "protein": true}]});
        let plan = CandidatePlan::from_value(value).unwrap();
        let item = &plan.snack[0];

        assert_eq!(item.name.as_deref(), Some("Apel"));
        assert_eq!(item.portion_gram, Some(120.0));
        assert_eq!(item.calories, Some(62.0));
        assert_eq!(item.protein, None);
    }

    #[test]
    fn test_rejects_non_object_payload() {
        let err = CandidatePlan::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, PlanError::MalformedResponse(_)));
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("150g"), Some(150.0));
        assert_eq!(leading_number(" 0,5 "), Some(0.5));
        assert_eq!(leading_number("-3"), Some(-3.0));
        assert_eq!(leading_number("abc"), None);
        assert_eq!(leading_number(""), None);
    }
}
