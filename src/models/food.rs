use serde::{Deserialize, Serialize};

use crate::models::candidate::lenient_number;

/// A reference food record from the nutrition corpus.
///
/// All macro values are per 100g. The corpus file spells protein and
/// carbohydrate as `proteins` / `carbohydrate`; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    pub name: String,

    #[serde(default)]
    pub calories: f64,

    #[serde(rename = "proteins", alias = "protein", default)]
    pub protein: f64,

    #[serde(rename = "carbohydrate", alias = "carbs", default)]
    pub carbs: f64,

    #[serde(default)]
    pub fat: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FoodRecord {
    pub fn new(name: impl Into<String>, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            calories,
            protein,
            carbs,
            fat,
            image: None,
        }
    }

    /// Canonical key for lookups (lowercase, trimmed name).
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{}: {} kcal, P:{} C:{} F:{} (per 100g)",
            self.name, self.calories, self.protein, self.carbs, self.fat
        )
    }
}

/// A candidate food returned by search or identification, per 100g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodCandidate {
    pub name: String,

    #[serde(default, deserialize_with = "lenient_or_zero")]
    pub calories: f64,

    #[serde(default, deserialize_with = "lenient_or_zero")]
    pub protein: f64,

    #[serde(default, deserialize_with = "lenient_or_zero")]
    pub carbs: f64,

    #[serde(default, deserialize_with = "lenient_or_zero")]
    pub fat: f64,

    #[serde(default = "default_serving")]
    pub serving: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

pub const LOCAL_SERVING_LABEL: &str = "100g (Database)";

fn default_serving() -> String {
    "100g".to_string()
}

fn lenient_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0.0).max(0.0))
}

impl From<&FoodRecord> for FoodCandidate {
    fn from(record: &FoodRecord) -> Self {
        Self {
            name: record.name.clone(),
            calories: record.calories,
            protein: record.protein,
            carbs: record.carbs,
            fat: record.fat,
            serving: LOCAL_SERVING_LABEL.to_string(),
            image: record.image.clone(),
        }
    }
}
