use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntryLabError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML Parsing Error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Trial not found: {0}")]
    TrialNotFound(String),

    #[error("Malformed trial '{id}': {reason}")]
    Parse { id: String, reason: String },

    #[error("Invalid character for layout geometry: {0:?}")]
    InvalidCharacter(char),

    #[error("Challenge '{prompt}' has non-positive duration: {duration:?}")]
    InvalidDuration {
        prompt: String,
        duration: Option<f64>,
    },

    #[error("Challenge has an empty prompt; accuracy is undefined")]
    EmptyPrompt,

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type EntryResult<T> = Result<T, EntryLabError>;
