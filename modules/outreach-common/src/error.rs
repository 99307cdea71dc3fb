use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutreachError {
    #[error("Missing credential: {0} environment variable is required")]
    MissingCredential(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
