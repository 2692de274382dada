use std::fmt::Write;

use crate::corpus::ReferenceSet;
use crate::llm::{ChatMessage, CompletionRequest};
use crate::models::{CalorieBudget, GoalProfile, Slot};
use crate::planner::constants::CALORIE_TOLERANCE;

pub const PLAN_TEMPERATURE: f32 = 0.7;
pub const PLAN_MAX_TOKENS: u32 = 2500;

pub const IDENTIFY_TEMPERATURE: f32 = 0.3;
pub const IDENTIFY_MAX_TOKENS: u32 = 1000;

/// Build the full-day plan request.
///
/// The system message carries the budget, the output format and the
/// reference table; the user message restates the hard constraints.
pub fn plan_request(
    budget: &CalorieBudget,
    goal: GoalProfile,
    reference: &ReferenceSet<'_>,
) -> CompletionRequest {
    let target = budget.target_kcal();
    let tolerance = CALORIE_TOLERANCE as u32;

    let mut system = String::new();
    let _ = writeln!(
        system,
        "You are a professional nutritionist. Create a one-day meal plan totalling EXACTLY {} kcal.",
        target
    );
    let _ = writeln!(system, "Goal: {}.", goal.description());
    system.push('\n');

    system.push_str("CALORIE SPLIT PER MEAL:\n");
    for slot in Slot::ALL {
        let _ = writeln!(
            system,
            "- {}: {} kcal ({:.0}%)",
            slot,
            budget.for_slot(slot),
            slot.share() * 100.0
        );
    }
    system.push('\n');

    system.push_str("OUTPUT FORMAT:\n");
    system.push_str(
        "Reply with ONE JSON object and nothing else. It must have exactly four keys: \
         \"breakfast\", \"lunch\", \"dinner\", \"snack\". Each key holds an array of items.\n",
    );
    system.push_str(
        "Each item: {\"name\": string, \"portion_gram\": number, \"calories\": number, \
         \"protein\": number, \"carbs\": number, \"fat\": number}.\n",
    );
    system.push_str(
        "Values are for the given portion: calories = calories_per_100g x portion_gram / 100, \
         and the same for protein, carbs and fat.\n\n",
    );

    system.push_str("REFERENCE FOODS (values per 100g):\n");
    system.push_str(&reference.render());

    system.push_str("RULES:\n");
    system.push_str(
        "1. Breakfast, lunch and dinner each contain at least one carbohydrate, one protein \
         and one vegetable item.\n",
    );
    system.push_str("2. Never repeat a food name across meals.\n");
    let _ = writeln!(
        system,
        "3. The sum of all item calories must be {} kcal, within +/-{} kcal.",
        target, tolerance
    );
    system.push_str("4. Prefer foods from the reference list and use their exact names.\n");

    let user = format!(
        "Create a {} kcal meal plan for goal '{}'. Breakfast {} kcal, lunch {} kcal, \
         dinner {} kcal, snack {} kcal. Every main meal needs a carbohydrate, a protein and a \
         vegetable, with no repeated foods. Return only the JSON object.",
        target,
        goal,
        budget.breakfast,
        budget.lunch,
        budget.dinner,
        budget.snack
    );

    CompletionRequest::new(vec![ChatMessage::system(system), ChatMessage::user(user)])
        .with_temperature(PLAN_TEMPERATURE)
        .with_max_tokens(PLAN_MAX_TOKENS)
}

/// Build the single-purpose food identification request.
pub fn identify_request(query: &str) -> CompletionRequest {
    let system = "You are a nutrition database. Given a food description, list 5 to 8 \
                  plausible matching foods with nutrition values per 100g. Reply with ONE JSON \
                  array and nothing else. Each element: {\"name\": string, \"calories\": number, \
                  \"protein\": number, \"carbs\": number, \"fat\": number, \"serving\": \"100g\"}.";

    let user = format!("Food: {}", query.trim());

    CompletionRequest::new(vec![ChatMessage::system(system), ChatMessage::user(user)])
        .with_temperature(IDENTIFY_TEMPERATURE)
        .with_max_tokens(IDENTIFY_MAX_TOKENS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Corpus, sample_reference_set};
    use crate::llm::ChatRole;
    use crate::models::FoodRecord;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_plan_request_embeds_budget_and_reference() {
        let corpus: Corpus = vec![FoodRecord::new("Nasi Putih", 175.0, 3.0, 40.0, 0.3)].into();
        let reference = sample_reference_set(&corpus, &mut StdRng::seed_from_u64(3));
        let budget = CalorieBudget::new(2000.0);

        let request = plan_request(&budget, GoalProfile::LowCal, &reference);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert_eq!(request.messages[1].role, ChatRole::User);
        assert_eq!(request.temperature, PLAN_TEMPERATURE);
        assert_eq!(request.max_tokens, PLAN_MAX_TOKENS);

        let system = &request.messages[0].content;
        assert!(system.contains("2000 kcal"));
        assert!(system.contains("Breakfast: 500 kcal (25%)"));
        assert!(system.contains("Lunch: 700 kcal (35%)"));
        assert!(system.contains("Dinner: 600 kcal (30%)"));
        assert!(system.contains("Snack: 200 kcal (10%)"));
        assert!(system.contains("\"breakfast\", \"lunch\", \"dinner\", \"snack\""));
        assert!(system.contains("Nasi Putih: 175 kcal"));
        assert!(system.contains("+/-100 kcal"));
        assert!(system.contains(GoalProfile::LowCal.description()));
    }

    #[test]
    fn test_identify_request() {
        let request = identify_request("  soto ayam ");
        assert_eq!(request.messages[1].content, "Food: soto ayam");
        assert!(request.messages[0].content.contains("JSON array"));
        assert_eq!(request.temperature, IDENTIFY_TEMPERATURE);
        assert_eq!(request.max_tokens, IDENTIFY_MAX_TOKENS);
    }
}
