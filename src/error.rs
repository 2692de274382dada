use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    /// Transport failure, timeout, non-success status or empty completion.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The completion text held no JSON payload of the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No API key configured for the text-generation service")]
    MissingApiKey,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for PlanError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlanError::ExternalService(format!("request timed out: {}", err))
        } else {
            PlanError::ExternalService(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
