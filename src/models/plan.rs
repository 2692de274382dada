use std::fmt;

use serde::{Deserialize, Serialize};

use crate::planner::constants::{
    BREAKFAST_SHARE, DINNER_SHARE, LUNCH_SHARE, MAIN_MEAL_ITEMS, SNACK_ITEMS, SNACK_SHARE,
};

/// One of the four fixed meal slots of a day plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Breakfast, Slot::Lunch, Slot::Dinner, Slot::Snack];

    /// Fraction of the daily target allocated to this slot.
    pub fn share(self) -> f64 {
        match self {
            Slot::Breakfast => BREAKFAST_SHARE,
            Slot::Lunch => LUNCH_SHARE,
            Slot::Dinner => DINNER_SHARE,
            Slot::Snack => SNACK_SHARE,
        }
    }

    /// Number of items the offline planner picks for this slot.
    pub fn item_count(self) -> usize {
        match self {
            Slot::Snack => SNACK_ITEMS,
            _ => MAIN_MEAL_ITEMS,
        }
    }

    /// JSON key of the slot.
    pub fn key(self) -> &'static str {
        match self {
            Slot::Breakfast => "breakfast",
            Slot::Lunch => "lunch",
            Slot::Dinner => "dinner",
            Slot::Snack => "snack",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Slot::Breakfast => "Breakfast",
            Slot::Lunch => "Lunch",
            Slot::Dinner => "Dinner",
            Slot::Snack => "Snack",
        };
        f.write_str(label)
    }
}

/// A single item of a meal plan. Macros are absolute for the realised
/// portion, not per 100g.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealItem {
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    /// Human-readable portion, e.g. `"150g"`.
    pub portion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MealItem {
    /// Build an item from raw values, rounding each macro to the nearest
    /// non-negative integer.
    pub fn from_raw(
        name: impl Into<String>,
        portion_gram: f64,
        calories: f64,
        protein: f64,
        carbs: f64,
        fat: f64,
        image: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            calories: round_macro(calories),
            protein: round_macro(protein),
            carbs: round_macro(carbs),
            fat: round_macro(fat),
            portion: portion_label(portion_gram),
            image,
        }
    }

    /// Portion in grams, parsed back from the label.
    pub fn portion_grams(&self) -> Option<f64> {
        self.portion.trim().trim_end_matches('g').trim().parse().ok()
    }
}

/// Round half away from zero, clamping negatives and non-finite values to 0.
pub fn round_macro(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// `"150g"` for whole grams, `"150.5g"` otherwise.
pub fn portion_label(grams: f64) -> String {
    format!("{}g", grams)
}

/// Aggregated macros over a set of items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MacroTotals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// A day plan with exactly four slots. All keys are always serialised, even
/// when a slot is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    #[serde(default)]
    pub breakfast: Vec<MealItem>,
    #[serde(default)]
    pub lunch: Vec<MealItem>,
    #[serde(default)]
    pub dinner: Vec<MealItem>,
    #[serde(default)]
    pub snack: Vec<MealItem>,
}

impl MealPlan {
    pub fn slot(&self, slot: Slot) -> &[MealItem] {
        match slot {
            Slot::Breakfast => &self.breakfast,
            Slot::Lunch => &self.lunch,
            Slot::Dinner => &self.dinner,
            Slot::Snack => &self.snack,
        }
    }

    pub fn set_slot(&mut self, slot: Slot, items: Vec<MealItem>) {
        match slot {
            Slot::Breakfast => self.breakfast = items,
            Slot::Lunch => self.lunch = items,
            Slot::Dinner => self.dinner = items,
            Slot::Snack => self.snack = items,
        }
    }

    /// Iterate all items with their slot, in slot order.
    pub fn items(&self) -> impl Iterator<Item = (Slot, &MealItem)> {
        Slot::ALL
            .into_iter()
            .flat_map(move |slot| self.slot(slot).iter().map(move |item| (slot, item)))
    }

    pub fn total_calories(&self) -> u32 {
        self.items().map(|(_, item)| item.calories).sum()
    }

    pub fn slot_calories(&self, slot: Slot) -> u32 {
        self.slot(slot).iter().map(|item| item.calories).sum()
    }

    pub fn totals(&self) -> MacroTotals {
        self.items().fold(MacroTotals::default(), |acc, (_, item)| MacroTotals {
            calories: acc.calories + item.calories,
            protein: acc.protein + item.protein,
            carbs: acc.carbs + item.carbs,
            fat: acc.fat + item.fat,
        })
    }

    pub fn item_count(&self) -> usize {
        Slot::ALL.iter().map(|s| self.slot(*s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}
