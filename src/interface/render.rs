use std::fmt::Write as _;

use crate::generator::PlanSource;
use crate::metabolic::{BmiCategory, MacroTargets};
use crate::models::{CalorieBudget, FoodCandidate, MealPlan, Slot};

/// Format a meal plan as an aligned table, slot by slot, with totals.
pub fn format_meal_plan(plan: &MealPlan, budget: &CalorieBudget) -> String {
    let mut out = String::new();

    if plan.is_empty() {
        out.push_str("No meal plan generated (no eligible foods or zero calorie budget).\n");
        return out;
    }

    let width = plan
        .items()
        .map(|(_, item)| item.name.chars().count())
        .max()
        .unwrap_or(10);

    let _ = writeln!(out, "=== Meal Plan ({} kcal) ===", budget.target_kcal());
    for slot in Slot::ALL {
        let items = plan.slot(slot);
        let _ = writeln!(
            out,
            "\n{} - {} / {} kcal",
            slot,
            plan.slot_calories(slot),
            budget.for_slot(slot)
        );
        if items.is_empty() {
            out.push_str("  (empty)\n");
            continue;
        }
        for item in items {
            let _ = writeln!(
                out,
                "  {:<width$}  {:>5}  {:>4} kcal | P {:>3}g  C {:>3}g  F {:>3}g",
                item.name,
                item.portion,
                item.calories,
                item.protein,
                item.carbs,
                item.fat,
                width = width
            );
        }
    }

    let totals = plan.totals();
    let deviation = totals.calories as i64 - budget.target_kcal() as i64;
    out.push_str("\n--- Summary ---\n");
    let _ = writeln!(out, "Total items: {}", plan.item_count());
    let _ = writeln!(out, "Total calories: {} ({:+} vs target)", totals.calories, deviation);
    let _ = writeln!(
        out,
        "Protein {}g | Carbs {}g | Fat {}g",
        totals.protein, totals.carbs, totals.fat
    );
    out
}

pub fn display_meal_plan(plan: &MealPlan, budget: &CalorieBudget, source: PlanSource) {
    println!();
    print!("{}", format_meal_plan(plan, budget));
    match source {
        PlanSource::External => println!("Source: AI-generated, macros checked against the database"),
        PlanSource::Offline => println!("Source: offline planner (local database only)"),
    }
    println!();
}

/// Format candidate foods, per 100g.
pub fn format_candidates(candidates: &[FoodCandidate], title: &str) -> String {
    let mut out = String::new();
    if candidates.is_empty() {
        let _ = writeln!(out, "{}: (none)", title);
        return out;
    }

    let _ = writeln!(out, "=== {} ({} items) ===", title, candidates.len());
    for (i, food) in candidates.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} - {:.0} kcal, P {:.1}g, C {:.1}g, F {:.1}g [{}]",
            i + 1,
            food.name,
            food.calories,
            food.protein,
            food.carbs,
            food.fat,
            food.serving
        );
    }
    out
}

pub fn display_candidates(candidates: &[FoodCandidate], title: &str) {
    println!();
    print!("{}", format_candidates(candidates, title));
    println!();
}

/// Body metrics shown by the profile command.
#[derive(Debug, Clone, Copy)]
pub struct MetricsReport {
    pub bmi: f64,
    pub category: BmiCategory,
    pub bmr: f64,
    pub tdee: f64,
    pub ideal_weight: f64,
    pub daily_calories: f64,
    pub macros: MacroTargets,
}

pub fn display_metrics(report: &MetricsReport) {
    println!();
    println!("=== Body Metrics ===");
    println!("BMI:            {:.1} ({})", report.bmi, report.category);
    println!("BMR:            {:.0} kcal", report.bmr);
    println!("TDEE:           {:.0} kcal", report.tdee);
    println!("Ideal weight:   {:.0} kg", report.ideal_weight);
    println!("Daily target:   {:.0} kcal", report.daily_calories);
    println!(
        "Macro targets:  P {}g | C {}g | F {}g",
        report.macros.protein, report.macros.carbs, report.macros.fat
    );
    println!();
}
