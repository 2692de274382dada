// ─────────────────────────────────────────────────────────────────────────────
// Daily split across slots (identical for every goal)
// ─────────────────────────────────────────────────────────────────────────────

pub const BREAKFAST_SHARE: f64 = 0.25;
pub const LUNCH_SHARE: f64 = 0.35;
pub const DINNER_SHARE: f64 = 0.30;
pub const SNACK_SHARE: f64 = 0.10;

/// Items picked per main meal by the offline planner.
pub const MAIN_MEAL_ITEMS: usize = 3;

/// Items picked for the snack slot by the offline planner.
pub const SNACK_ITEMS: usize = 1;

// ─────────────────────────────────────────────────────────────────────────────
// Reconciliation
// ─────────────────────────────────────────────────────────────────────────────

/// Portion assumed when the external plan omits it (grams).
pub const DEFAULT_PORTION_GRAMS: f64 = 150.0;

/// Acceptable deviation between a plan total and its target (kcal).
/// Instructed to the external service, reported but not enforced.
pub const CALORIE_TOLERANCE: f64 = 100.0;

// ─────────────────────────────────────────────────────────────────────────────
// Offline planner
// ─────────────────────────────────────────────────────────────────────────────

/// Eligible foods lie strictly between these bounds (kcal per 100g).
pub const OFFLINE_MIN_CALORIES: f64 = 50.0;
pub const OFFLINE_MAX_CALORIES: f64 = 400.0;

/// A slot stops picking once its remaining budget is at or below this.
pub const RESIDUAL_STOP_KCAL: f64 = 50.0;

/// Picks are drawn from this many records at the head of the shuffled pool.
pub const PICK_WINDOW: usize = 50;

/// Portion clamp (grams).
pub const MIN_PORTION_GRAMS: u32 = 50;
pub const MAX_PORTION_GRAMS: u32 = 300;

// ─────────────────────────────────────────────────────────────────────────────
// Denylists (lowercase substrings)
// ─────────────────────────────────────────────────────────────────────────────

/// Raw or outlier entries kept out of the prompt reference table.
pub const REFERENCE_DENYLIST: &[&str] = &["anak sapi", "daging gemuk", "mentah"];

/// Raw or outlier entries kept out of the offline planner pool.
pub const OFFLINE_DENYLIST: &[&str] = &["anak sapi", "mentah"];

pub fn is_denied(name: &str, denylist: &[&str]) -> bool {
    let lower = name.to_lowercase();
    denylist.iter().any(|term| lower.contains(term))
}
