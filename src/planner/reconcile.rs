use tracing::{debug, info, warn};

use crate::corpus::{Corpus, resolve};
use crate::models::{CandidateItem, CandidatePlan, MealItem, MealPlan, Slot};
use crate::planner::constants::{CALORIE_TOLERANCE, DEFAULT_PORTION_GRAMS};

/// Turn a loosely-typed candidate plan into a well-formed `MealPlan`.
///
/// Supplied values are trusted. Corpus data is only consulted when protein
/// or carbs is missing; it then replaces protein, carbs and fat, and replaces
/// calories only if those were missing too. Items without a name are
/// dropped. The total is logged against `target` but never corrected.
pub fn reconcile(candidate: &CandidatePlan, corpus: &Corpus, target: f64) -> MealPlan {
    let mut plan = MealPlan::default();

    for slot in Slot::ALL {
        let items: Vec<MealItem> = candidate
            .slot(slot)
            .iter()
            .filter_map(|item| reconcile_item(item, corpus))
            .collect();
        plan.set_slot(slot, items);
    }

    let total = plan.total_calories() as f64;
    let deviation = total - target;
    if deviation.abs() > CALORIE_TOLERANCE {
        warn!(total, target, deviation, "reconciled plan outside calorie tolerance");
    } else {
        info!(total, target, deviation, "reconciled plan");
    }

    plan
}

/// Reconcile a single item, or `None` when it has no usable name.
pub fn reconcile_item(item: &CandidateItem, corpus: &Corpus) -> Option<MealItem> {
    let name = item.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;

    let portion_gram = item
        .portion_gram
        .filter(|g| g.is_finite() && *g > 0.0)
        .unwrap_or(DEFAULT_PORTION_GRAMS);
    let multiplier = portion_gram / 100.0;

    let mut calories = item.calories.unwrap_or(0.0);
    let mut protein = item.protein.unwrap_or(0.0);
    let mut carbs = item.carbs.unwrap_or(0.0);
    let mut fat = item.fat.unwrap_or(0.0);
    let mut image = None;

    // Either one missing triggers the backfill, which then overwrites both.
    if protein == 0.0 || carbs == 0.0 {
        match resolve(name, corpus) {
            Some(record) => {
                debug!(item = name, matched = %record.debug_string(), "backfilling macros from corpus");
                protein = record.protein * multiplier;
                carbs = record.carbs * multiplier;
                fat = record.fat * multiplier;
                if calories == 0.0 {
                    calories = record.calories * multiplier;
                }
                image = record.image.clone().filter(|i| !i.is_empty());
            }
            None => debug!(item = name, "no corpus match for backfill"),
        }
    }

    Some(MealItem::from_raw(
        name,
        portion_gram,
        calories,
        protein,
        carbs,
        fat,
        image,
    ))
}
