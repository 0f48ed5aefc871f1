//! Agent run errors.
//!
//! None of these are retried: a failed run is reported to the caller as-is.

use thiserror::Error;

/// Why an agent run stopped.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A discovery, module or action request could not be completed.
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// A fetched document did not match the UAP document shape.
    #[error("Invalid document at {url}: {message}")]
    InvalidDocument { url: String, message: String },

    /// No advertised action matches the goal.
    #[error("No action matches goal '{goal}' (available actions: {})", .available.join(", "))]
    SchemaMismatch { goal: String, available: Vec<String> },

    /// The selected action needs a value the goal does not provide.
    #[error("Action '{action}' requires parameter '{param}' which could not be derived from the goal")]
    MissingParameter { action: String, param: String },

    /// The selected action must be confirmed by the user first.
    #[error("Action '{action}' requires user confirmation (rerun with --yes)")]
    ConfirmationRequired { action: String },

    /// The downstream action answered with a failure status.
    #[error("Action '{action}' failed with HTTP {status}: {body}")]
    RemoteAction {
        action: String,
        status: u16,
        body: String,
    },
}

impl AgentError {
    /// Short category name used in logs and the CLI report.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "NetworkError",
            Self::InvalidDocument { .. } => "InvalidDocument",
            Self::SchemaMismatch { .. } => "SchemaMismatch",
            Self::MissingParameter { .. } => "MissingParameter",
            Self::ConfirmationRequired { .. } => "ConfirmationRequired",
            Self::RemoteAction { .. } => "RemoteActionError",
        }
    }
}
