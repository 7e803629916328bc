use thiserror::Error;

/// Top-level error type for the `tablewatch-api` crate.
///
/// Covers transport failures, non-success responses from the reservation
/// service, and payloads the client cannot make sense of. The availability
/// sweep catches these at the venue boundary; callers of the raw endpoint
/// methods see them directly.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Service ─────────────────────────────────────────────────────
    /// Non-success status from the reservation service.
    #[error("Reservation API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A date or timestamp string from the service did not parse.
    #[error("Unparseable upstream date/time: {value:?}")]
    InvalidTimestamp { value: String },

    // ── Input ───────────────────────────────────────────────────────
    /// Caller-supplied input rejected before any request was issued.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl Error {
    /// Returns `true` if this error came from the transport layer rather
    /// than from the service or its payloads.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the service rejected the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}
