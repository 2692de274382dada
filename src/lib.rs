pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod generator;
pub mod identify;
pub mod interface;
pub mod llm;
pub mod logging;
pub mod metabolic;
pub mod models;
pub mod persistence;
pub mod planner;

pub use corpus::Corpus;
pub use error::{PlanError, Result};
pub use generator::{GeneratedPlan, MealPlanGenerator, PlanSource};
pub use models::{CalorieBudget, FoodCandidate, FoodRecord, GoalProfile, MealItem, MealPlan, Slot};
