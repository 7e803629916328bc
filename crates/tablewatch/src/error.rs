//! CLI error types with miette diagnostics.
//!
//! Maps api and config errors into user-facing diagnostics with help text
//! and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tablewatch::validation))]
    Validation { field: String, reason: String },

    // ── Service ──────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(tablewatch::api),
        help(
            "The reservation service could not be queried.\n\
             Check your network connection, base URL, and API key."
        )
    )]
    Api(#[from] tablewatch_api::Error),

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(tablewatch::config))]
    Config(#[from] tablewatch_config::ConfigError),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => exit_code::USAGE,
            Self::Api(err) => {
                if err.is_auth() {
                    exit_code::AUTH
                } else if err.is_transport() {
                    exit_code::CONNECTION
                } else if matches!(err, tablewatch_api::Error::Validation { .. }) {
                    exit_code::USAGE
                } else {
                    exit_code::GENERAL
                }
            }
            Self::Config(err) => match err {
                tablewatch_config::ConfigError::Validation { .. } => exit_code::USAGE,
                _ => exit_code::GENERAL,
            },
        }
    }
}

/// Re-wrap an api-side input rejection as a first-class validation error
/// so it reads like a usage problem rather than a service failure.
pub fn validation(err: tablewatch_api::Error) -> CliError {
    match err {
        tablewatch_api::Error::Validation { field, reason } => CliError::Validation {
            field: field.to_owned(),
            reason,
        },
        other => CliError::Api(other),
    }
}
