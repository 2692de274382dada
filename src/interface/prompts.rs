use dialoguer::{Confirm, Input, Select};

use crate::error::{PlanError, Result};
use crate::metabolic::{ActivityLevel, BodyGoal, BodyProfile};
use crate::models::Gender;

/// Parse a strictly positive number typed by the user.
pub fn parse_positive(input: &str, what: &str) -> Result<f64> {
    let value: f64 = input
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("Invalid number for {}", what)))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(PlanError::InvalidInput(format!("{} must be greater than 0", what)));
    }
    Ok(value)
}

fn prompt_number(prompt: &str, default: &str, what: &str) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    parse_positive(&input, what)
}

pub fn prompt_weight() -> Result<f64> {
    prompt_number("Body weight (kg)", "60", "weight")
}

pub fn prompt_height() -> Result<f64> {
    prompt_number("Height (cm)", "165", "height")
}

pub fn prompt_age() -> Result<u32> {
    let age = prompt_number("Age (years)", "25", "age")?;
    Ok(age.round() as u32)
}

pub fn prompt_gender() -> Result<Gender> {
    let selection = Select::new()
        .with_prompt("Gender")
        .items(&["Male", "Female"])
        .default(0)
        .interact()?;

    Ok(if selection == 1 { Gender::Female } else { Gender::Male })
}

pub fn prompt_activity() -> Result<ActivityLevel> {
    let options: Vec<&str> = ActivityLevel::ALL.iter().map(|a| a.label()).collect();
    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(ActivityLevel::ALL.get(selection).copied().unwrap_or_default())
}

pub fn prompt_goal() -> Result<BodyGoal> {
    let options: Vec<&str> = BodyGoal::ALL.iter().map(|g| g.label()).collect();
    let selection = Select::new()
        .with_prompt("Goal")
        .items(&options)
        .default(1)
        .interact()?;

    Ok(BodyGoal::ALL.get(selection).copied().unwrap_or(BodyGoal::Maintain))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect everything needed to compute a daily calorie target.
pub fn collect_body_profile() -> Result<BodyProfile> {
    let weight_kg = prompt_weight()?;
    let height_cm = prompt_height()?;
    let age = prompt_age()?;
    let gender = prompt_gender()?;
    let activity = prompt_activity()?;
    let goal = prompt_goal()?;

    Ok(BodyProfile {
        weight_kg,
        height_cm,
        age,
        gender,
        activity,
        goal,
    })
}
