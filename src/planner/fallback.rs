use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::corpus::Corpus;
use crate::models::{CalorieBudget, FoodRecord, MealItem, MealPlan, Slot};
use crate::planner::constants::{
    MAX_PORTION_GRAMS, MIN_PORTION_GRAMS, OFFLINE_DENYLIST, OFFLINE_MAX_CALORIES,
    OFFLINE_MIN_CALORIES, PICK_WINDOW, RESIDUAL_STOP_KCAL, is_denied,
};

/// Build a plan from the local corpus alone.
///
/// Never fails. Each slot gets its share of `target` and picks up to its
/// item count from a freshly shuffled pool, sizing every portion to the
/// calories still unspent. A slot whose pool is empty stays empty. The
/// day total never exceeds `target`.
pub fn plan_offline<R>(corpus: &Corpus, rng: &mut R, target: f64) -> MealPlan
where
    R: Rng + ?Sized,
{
    let budget = CalorieBudget::new(target);
    let eligible: Vec<&FoodRecord> = corpus
        .iter()
        .filter(|f| {
            f.calories > OFFLINE_MIN_CALORIES
                && f.calories < OFFLINE_MAX_CALORIES
                && !is_denied(&f.name, OFFLINE_DENYLIST)
        })
        .collect();

    let mut plan = MealPlan::default();
    let mut day_remaining = budget.target;

    for slot in Slot::ALL {
        let mut pool = eligible.clone();
        pool.shuffle(rng);
        let window = &pool[..pool.len().min(PICK_WINDOW)];

        // Sub-budgets are rounded independently, so cap each by what the day
        // has left.
        let slot_budget = (budget.for_slot(slot) as f64).min(day_remaining);
        let items = fill_slot(window, rng, slot.item_count(), slot_budget);
        day_remaining -= items.iter().map(|i| i.calories as f64).sum::<f64>();

        debug!(%slot, items = items.len(), budget = slot_budget, "filled offline slot");
        plan.set_slot(slot, items);
    }

    info!(
        total = plan.total_calories(),
        target = budget.target,
        items = plan.item_count(),
        "built offline plan"
    );
    plan
}

fn fill_slot<R>(window: &[&FoodRecord], rng: &mut R, count: usize, budget: f64) -> Vec<MealItem>
where
    R: Rng + ?Sized,
{
    let mut items = Vec::with_capacity(count);
    let mut remaining = budget;

    for picked in 0..count {
        if remaining <= RESIDUAL_STOP_KCAL {
            break;
        }
        let Some(food) = window.choose(rng).copied() else {
            break;
        };

        let desired = (remaining / (count - picked) as f64).round();
        let mut item = realise(food, portion_for(desired, food.calories));

        // The clamp can overshoot; shrink to fit or close the slot.
        if item.calories as f64 > remaining {
            let fitted = (remaining * 100.0 / food.calories).floor() as u32;
            if fitted < MIN_PORTION_GRAMS {
                break;
            }
            item = realise(food, fitted.min(MAX_PORTION_GRAMS));
            if item.calories as f64 > remaining {
                break;
            }
        }

        remaining -= item.calories as f64;
        items.push(item);
    }

    items
}

fn realise(food: &FoodRecord, portion: u32) -> MealItem {
    let multiplier = portion as f64 / 100.0;
    MealItem::from_raw(
        food.name.clone(),
        portion as f64,
        food.calories * multiplier,
        food.protein * multiplier,
        food.carbs * multiplier,
        food.fat * multiplier,
        food.image.clone().filter(|i| !i.is_empty()),
    )
}

/// Grams needed for `desired` kcal, clamped to the allowed portion range.
fn portion_for(desired: f64, calories_per_100g: f64) -> u32 {
    let grams = (desired / calories_per_100g * 100.0).round();
    if !grams.is_finite() {
        return MIN_PORTION_GRAMS;
    }
    (grams.max(0.0) as u32).clamp(MIN_PORTION_GRAMS, MAX_PORTION_GRAMS)
}
