//! Body metrics and daily calorie targets.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::{Gender, GoalProfile};

/// Weight assumed for macro targets when none is known.
pub const DEFAULT_WEIGHT_KG: f64 = 55.0;

pub const DEFICIT_KCAL: f64 = 500.0;
pub const SURPLUS_KCAL: f64 = 500.0;
pub const LEAN_SURPLUS_KCAL: f64 = 300.0;

pub const MIN_DAILY_KCAL_MALE: f64 = 1500.0;
pub const MIN_DAILY_KCAL_FEMALE: f64 = 1200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Unknown,
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BmiCategory::Unknown => "Unknown",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::Light => "Light (exercise 1-3 days/week)",
            ActivityLevel::Moderate => "Moderate (exercise 3-5 days/week)",
            ActivityLevel::Active => "Active (exercise 6-7 days/week)",
            ActivityLevel::VeryActive => "Very active (hard exercise or physical job)",
        }
    }
}

/// Body-composition goal of a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BodyGoal {
    Lose,
    Maintain,
    Gain,
    Build,
}

impl BodyGoal {
    pub const ALL: [BodyGoal; 4] = [BodyGoal::Lose, BodyGoal::Maintain, BodyGoal::Gain, BodyGoal::Build];

    pub fn adjustment(self) -> f64 {
        match self {
            BodyGoal::Lose => -DEFICIT_KCAL,
            BodyGoal::Maintain => 0.0,
            BodyGoal::Gain => SURPLUS_KCAL,
            BodyGoal::Build => LEAN_SURPLUS_KCAL,
        }
    }

    /// Protein and fat grams per kg of body weight.
    pub fn macro_ratios(self) -> (f64, f64) {
        match self {
            BodyGoal::Lose => (2.1, 0.8),
            BodyGoal::Gain | BodyGoal::Build => (1.9, 1.0),
            BodyGoal::Maintain => (1.4, 1.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BodyGoal::Lose => "Lose weight",
            BodyGoal::Maintain => "Maintain weight",
            BodyGoal::Gain => "Gain weight",
            BodyGoal::Build => "Build muscle",
        }
    }
}

impl From<BodyGoal> for GoalProfile {
    fn from(goal: BodyGoal) -> Self {
        match goal {
            BodyGoal::Lose => GoalProfile::LowCal,
            BodyGoal::Maintain => GoalProfile::Standard,
            BodyGoal::Gain | BodyGoal::Build => GoalProfile::Bulking,
        }
    }
}

/// Inputs for the daily calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: Gender,
    pub activity: ActivityLevel,
    pub goal: BodyGoal,
}

/// Daily macro targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacroTargets {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// Body mass index to one decimal, or 0 when either input is missing.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    (weight_kg / (height_m * height_m) * 10.0).round() / 10.0
}

pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi <= 0.0 || !bmi.is_finite() {
        BmiCategory::Unknown
    } else if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Basal metabolic rate (Mifflin-St Jeor), kcal/day.
pub fn bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Broca ideal weight in kg, rounded.
pub fn ideal_weight(height_cm: f64, gender: Gender) -> f64 {
    let base = height_cm - 100.0;
    let reduction = match gender {
        Gender::Male => 0.10,
        Gender::Female => 0.15,
    };
    (base - base * reduction).round()
}

/// Total daily energy expenditure, rounded.
pub fn tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    (bmr * activity.multiplier()).round()
}

/// Daily calorie target for a profile, never below the per-gender floor.
pub fn daily_calories(profile: &BodyProfile) -> f64 {
    let expenditure = tdee(
        bmr(profile.weight_kg, profile.height_cm, profile.age, profile.gender),
        profile.activity,
    );
    let floor = match profile.gender {
        Gender::Male => MIN_DAILY_KCAL_MALE,
        Gender::Female => MIN_DAILY_KCAL_FEMALE,
    };
    (expenditure + profile.goal.adjustment()).max(floor).round()
}

/// Protein and fat from body weight, carbs from the calories left over.
pub fn macro_targets(calories: f64, goal: BodyGoal, weight_kg: Option<f64>) -> MacroTargets {
    let weight = weight_kg.filter(|w| *w > 0.0).unwrap_or(DEFAULT_WEIGHT_KG);
    let (protein_per_kg, fat_per_kg) = goal.macro_ratios();

    let protein = (weight * protein_per_kg).round();
    let fat = (weight * fat_per_kg).round();
    let carbs = ((calories - protein * 4.0 - fat * 9.0) / 4.0).round().max(0.0);

    MacroTargets {
        protein: protein as u32,
        carbs: carbs as u32,
        fat: fat as u32,
    }
}

/// Recommended daily calorie band for a gender and goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalorieRange {
    pub min: u32,
    pub max: u32,
}

impl CalorieRange {
    pub fn for_profile(gender: Gender, goal: GoalProfile) -> Self {
        let (min, max) = match (gender, goal) {
            (Gender::Male, GoalProfile::LowCal) => (1500, 1900),
            (Gender::Male, GoalProfile::Standard) => (2200, 2700),
            (Gender::Male, GoalProfile::Bulking) => (2700, 3300),
            (Gender::Female, GoalProfile::LowCal) => (1200, 1600),
            (Gender::Female, GoalProfile::Standard) => (1800, 2200),
            (Gender::Female, GoalProfile::Bulking) => (2200, 2800),
        };
        Self { min, max }
    }

    pub fn midpoint(&self) -> u32 {
        (self.min + self.max) / 2
    }

    pub fn contains(&self, calories: f64) -> bool {
        calories >= self.min as f64 && calories <= self.max as f64
    }
}

/// Default daily target when the caller gives none.
pub fn target_for(gender: Gender, goal: GoalProfile) -> f64 {
    CalorieRange::for_profile(gender, goal).midpoint() as f64
}
