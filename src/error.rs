use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Completion service error: {0}")]
    #[diagnostic(code(autocal::completion))]
    Completion(String),

    #[error("Invalid model output: {0}")]
    #[diagnostic(code(autocal::model_output))]
    ModelOutput(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(autocal::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(autocal::config))]
    Config(String),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(autocal::http))]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(autocal::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(autocal::other))]
    Other(String),
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create completion service errors
pub fn completion_error(message: &str) -> Error {
    Error::Completion(message.to_string())
}

/// Helper to create model output errors
pub fn model_output_error(message: &str) -> Error {
    Error::ModelOutput(message.to_string())
}
