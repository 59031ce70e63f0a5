use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpticsError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown scintillation species: {0}")]
    UnknownSpecies(String),

    #[error("Unknown material property: {0}")]
    UnknownProperty(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type OpticsResult<T> = Result<T, OpticsError>;
