use std::path::PathBuf;

use deboard_gateway::{GatewayError, TokenStoreError};
use deboard_wizard::WizardError;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Env(#[from] deboard_env::EnvError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Token(#[from] TokenStoreError),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Results(#[from] deboard_results::ResultsError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("{0}")]
    Auth(String),

    /// Submission rejected; the message has already been shown
    #[error("{0}")]
    Submission(String),

    #[error("Invalid {what}: {value}")]
    InvalidArgument { what: &'static str, value: String },
}
