use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::Slot;

/// Dietary goal of a generated plan.
///
/// The slot split is identical for every goal; the goal only changes how
/// the plan is described to the text-generation service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum GoalProfile {
    #[serde(rename = "low-cal", alias = "lose")]
    #[value(name = "low-cal", alias = "lose")]
    LowCal,

    #[serde(rename = "standard", alias = "maintain")]
    #[value(name = "standard", alias = "maintain")]
    #[default]
    Standard,

    #[serde(rename = "bulking", alias = "gain")]
    #[value(name = "bulking", alias = "gain")]
    Bulking,
}

impl GoalProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalProfile::LowCal => "low-cal",
            GoalProfile::Standard => "standard",
            GoalProfile::Bulking => "bulking",
        }
    }

    /// Goal description embedded in generation prompts.
    pub fn description(self) -> &'static str {
        match self {
            GoalProfile::LowCal => "LOW-CALORIE DIET - a calorie deficit for weight loss",
            GoalProfile::Standard => "MAINTENANCE - keep body weight stable",
            GoalProfile::Bulking => "CALORIE SURPLUS - to build muscle mass",
        }
    }
}

impl fmt::Display for GoalProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalProfile {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low-cal" | "lowcal" | "lose" | "weight-loss" => Ok(GoalProfile::LowCal),
            "standard" | "maintain" | "maintenance" => Ok(GoalProfile::Standard),
            "bulking" | "gain" | "weight-gain" | "build" | "muscle-gain" => Ok(GoalProfile::Bulking),
            other => Err(PlanError::InvalidInput(format!("unknown goal: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("male"),
            Gender::Female => f.write_str("female"),
        }
    }
}

/// A daily calorie target and its per-slot sub-budgets.
///
/// Each sub-budget is rounded independently, so their sum may drift from
/// the target by a calorie or two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalorieBudget {
    pub target: f64,
    pub breakfast: u32,
    pub lunch: u32,
    pub dinner: u32,
    pub snack: u32,
}

impl CalorieBudget {
    pub fn new(target: f64) -> Self {
        let target = if target.is_finite() { target.max(0.0) } else { 0.0 };
        let sub = |slot: Slot| (target * slot.share()).round() as u32;
        Self {
            target,
            breakfast: sub(Slot::Breakfast),
            lunch: sub(Slot::Lunch),
            dinner: sub(Slot::Dinner),
            snack: sub(Slot::Snack),
        }
    }

    pub fn for_slot(&self, slot: Slot) -> u32 {
        match slot {
            Slot::Breakfast => self.breakfast,
            Slot::Lunch => self.lunch,
            Slot::Dinner => self.dinner,
            Slot::Snack => self.snack,
        }
    }

    /// Target rounded to whole calories, for display and prompts.
    pub fn target_kcal(&self) -> u32 {
        self.target.round() as u32
    }
}
