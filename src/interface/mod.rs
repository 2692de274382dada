pub mod prompts;
pub mod render;

pub use prompts::{collect_body_profile, parse_positive, prompt_yes_no};
pub use render::{
    MetricsReport, display_candidates, display_meal_plan, display_metrics, format_candidates,
    format_meal_plan,
};
