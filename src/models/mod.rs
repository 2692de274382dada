pub mod candidate;
pub mod food;
pub mod goal;
pub mod plan;

pub use candidate::{CandidateItem, CandidatePlan};
pub use food::{FoodCandidate, FoodRecord};
pub use goal::{CalorieBudget, Gender, GoalProfile};
pub use plan::{MacroTotals, MealItem, MealPlan, Slot};
