use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, ServiceConfig};
use crate::logging::{LogFormat, LoggingConfig};
use crate::models::{Gender, GoalProfile};

/// nutri-plan: daily meal plans on a calorie budget, AI-assisted with an
/// offline fallback.
#[derive(Parser, Debug)]
#[command(name = "nutri-plan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the nutrition corpus JSON file.
    #[arg(short, long, global = true, default_value = "nutrition.json")]
    pub foods: PathBuf,

    #[command(flatten)]
    pub service: ServiceArgs,

    /// Reproducible food sampling.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Skip the text-generation service and plan from the corpus only.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Default log level when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Shorthand for `--log-format json`.
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// OpenAI-compatible chat completions endpoint.
    #[arg(long, global = true, env = "NUTRI_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, global = true, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true, env = "NUTRI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Seconds before a generation request is abandoned.
    #[arg(long, global = true, env = "NUTRI_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a one-day meal plan.
    Plan(PlanArgs),

    /// Identify foods from free text using the text-generation service.
    Identify {
        /// Food description, e.g. "nasi padang rendang".
        query: String,
    },

    /// Search the local corpus, falling back to identification.
    Search {
        query: String,
    },

    /// Compute body metrics and a calorie target interactively.
    Profile,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Daily calorie target. Defaults to the midpoint for gender and goal.
    #[arg(short, long)]
    pub calories: Option<f64>,

    #[arg(short, long, value_enum, default_value_t = GoalProfile::Standard)]
    pub goal: GoalProfile,

    #[arg(long, value_enum, default_value_t = Gender::Male)]
    pub gender: Gender,

    /// Write the plan as JSON.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the plan as CSV.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan(PlanArgs::default())
    }
}

impl Cli {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            api_url: self.service.api_url.clone(),
            api_key: self.service.api_key.clone(),
            model: self.service.model.clone(),
            timeout_secs: self.service.timeout_secs,
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: if self.log_json { LogFormat::Json } else { self.log_format },
        }
    }
}
