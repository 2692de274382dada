use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use nutri_plan_rs::cli::{Cli, Command, PlanArgs};
use nutri_plan_rs::corpus::Corpus;
use nutri_plan_rs::error::{PlanError, Result};
use nutri_plan_rs::generator::MealPlanGenerator;
use nutri_plan_rs::interface::{
    MetricsReport, collect_body_profile, display_candidates, display_meal_plan, display_metrics,
    prompt_yes_no,
};
use nutri_plan_rs::llm::ChatClient;
use nutri_plan_rs::metabolic::{self, CalorieRange, target_for};
use nutri_plan_rs::models::{CalorieBudget, GoalProfile};
use nutri_plan_rs::persistence::{export_plan_csv, save_plan};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.logging_config().init()?;

    let corpus = load_corpus(&cli.foods)?;
    let generator = build_generator(&cli, corpus)?;

    match cli.command.unwrap_or_default() {
        Command::Plan(args) => cmd_plan(&generator, &args).await,
        Command::Identify { query } => cmd_identify(&generator, &query).await,
        Command::Search { query } => cmd_search(&generator, &query).await,
        Command::Profile => cmd_profile(&generator).await,
    }
}

fn load_corpus(path: &Path) -> Result<Arc<Corpus>> {
    if !path.exists() {
        return Err(PlanError::InvalidInput(format!(
            "Nutrition corpus not found: {} (use --foods to point at it)",
            path.display()
        )));
    }

    let corpus = Corpus::from_path(path)?;
    info!(records = corpus.len(), path = %path.display(), "loaded nutrition corpus");
    Ok(Arc::new(corpus))
}

fn build_generator(cli: &Cli, corpus: Arc<Corpus>) -> Result<MealPlanGenerator> {
    let config = cli.service_config();
    let mut generator = MealPlanGenerator::new(corpus).with_timeout(config.timeout());

    if let Some(seed) = cli.seed {
        generator = generator.with_random(StdRng::seed_from_u64(seed));
    }

    if cli.offline {
        info!("offline mode, text-generation service disabled");
    } else if config.api_key().is_none() {
        warn!("no API key configured, plans will come from the offline planner");
    } else {
        let client = ChatClient::new(&config)?;
        info!(model = client.model(), "using text-generation service");
        generator = generator.with_service(Arc::new(client));
    }

    Ok(generator)
}

/// Generate, display and optionally persist a plan.
async fn cmd_plan(generator: &MealPlanGenerator, args: &PlanArgs) -> Result<()> {
    let target = match args.calories {
        Some(calories) if calories.is_finite() && calories > 0.0 => {
            let range = CalorieRange::for_profile(args.gender, args.goal);
            if !range.contains(calories) {
                warn!(
                    calories,
                    min = range.min,
                    max = range.max,
                    "target outside the usual range for this profile"
                );
                println!(
                    "Note: {:.0} kcal is outside the usual {}-{} kcal range for {} ({}).",
                    calories, range.min, range.max, args.goal, args.gender
                );
            }
            calories
        }
        Some(calories) => {
            return Err(PlanError::InvalidInput(format!(
                "Calorie target must be greater than 0, got {}",
                calories
            )));
        }
        None => target_for(args.gender, args.goal),
    };

    generate_and_show(generator, target, args.goal, args.output.as_deref(), args.csv.as_deref()).await
}

async fn generate_and_show(
    generator: &MealPlanGenerator,
    target: f64,
    goal: GoalProfile,
    output: Option<&Path>,
    csv: Option<&Path>,
) -> Result<()> {
    println!("Planning {:.0} kcal ({})...", target, goal);

    let generated = generator.generate_plan_with_source(target, goal).await;
    display_meal_plan(&generated.plan, &CalorieBudget::new(target), generated.source);

    if let Some(path) = output {
        save_plan(path, &generated.plan)?;
        println!("Plan saved to {}", path.display());
    }
    if let Some(path) = csv {
        export_plan_csv(path, &generated.plan)?;
        println!("Plan exported to {}", path.display());
    }

    Ok(())
}

async fn cmd_identify(generator: &MealPlanGenerator, query: &str) -> Result<()> {
    if !generator.is_online() {
        println!("Food identification needs the text-generation service (set GROQ_API_KEY).");
        return Ok(());
    }

    let candidates = generator.identify_food(query).await;
    display_candidates(&candidates, &format!("Foods matching '{}'", query));
    Ok(())
}

async fn cmd_search(generator: &MealPlanGenerator, query: &str) -> Result<()> {
    let candidates = generator.search_food(query).await;
    display_candidates(&candidates, &format!("Search results for '{}'", query));
    Ok(())
}

/// Collect a body profile, report metrics and offer a plan for its target.
async fn cmd_profile(generator: &MealPlanGenerator) -> Result<()> {
    let profile = collect_body_profile()?;

    let bmi = metabolic::bmi(profile.weight_kg, profile.height_cm);
    let bmr = metabolic::bmr(profile.weight_kg, profile.height_cm, profile.age, profile.gender);
    let daily_calories = metabolic::daily_calories(&profile);

    display_metrics(&MetricsReport {
        bmi,
        category: metabolic::bmi_category(bmi),
        bmr,
        tdee: metabolic::tdee(bmr, profile.activity),
        ideal_weight: metabolic::ideal_weight(profile.height_cm, profile.gender),
        daily_calories,
        macros: metabolic::macro_targets(daily_calories, profile.goal, Some(profile.weight_kg)),
    });

    if prompt_yes_no("Generate a meal plan for this target?", true)? {
        generate_and_show(generator, daily_calories, GoalProfile::from(profile.goal), None, None).await?;
    }

    Ok(())
}
