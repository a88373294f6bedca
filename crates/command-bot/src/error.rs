//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Discord error: {0}")]
    Chat(#[from] discord_client::ChatError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;

/// Failures of the `eval` command, reported back to the invoking channel.
#[derive(Error, Debug)]
pub enum EvalError {
    /// The expression does not parse.
    #[error("Error evaluating:\n```\n{0}\n```")]
    Evaluation(meval::Error),

    /// The expression parsed but could not be computed.
    #[error("Error running:\n```\n{0}\n```")]
    Runtime(meval::Error),
}
