use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::{FoodRecord, MealPlan};

/// Load corpus records from a JSON array file.
///
/// Records are kept in file order and are not deduplicated: near-duplicate
/// names are normal in the reference data.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<FoodRecord>> {
    let content = fs::read_to_string(path)?;
    let foods: Vec<FoodRecord> = serde_json::from_str(&content)?;
    Ok(foods)
}

/// Save a meal plan as pretty JSON with the four slot keys.
pub fn save_plan<P: AsRef<Path>>(path: P, plan: &MealPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Serialize)]
struct PlanRow<'a> {
    slot: &'a str,
    name: &'a str,
    portion: &'a str,
    calories: u32,
    protein: u32,
    carbs: u32,
    fat: u32,
}

/// Export a meal plan as CSV, one row per item.
pub fn export_plan_csv<P: AsRef<Path>>(path: P, plan: &MealPlan) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (slot, item) in plan.items() {
        writer.serialize(PlanRow {
            slot: slot.key(),
            name: &item.name,
            portion: &item.portion,
            calories: item.calories,
            protein: item.protein,
            carbs: item.carbs,
            fat: item.fat,
        })?;
    }
    writer.flush()?;
    Ok(())
}
