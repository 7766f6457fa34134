//! Error taxonomy for the discovery engine.
//!
//! Expected absence of data is never an error: operations report it as `None`
//! or an empty list. The variants here either describe a single failed
//! candidate (which callers inside the crate skip) or a contract violation
//! surfaced to the caller.

/// All errors the discovery engine can produce.
#[derive(thiserror::Error, Debug)]
pub enum ScoutError {
    /// Network failure, connection refusal, or a non-HTML response.
    #[error("transient fetch failure for {url}: {reason}")]
    TransientFetch { url: String, reason: String },

    /// The server answered, but with a status outside 2xx/3xx.
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// A render or search call exceeded its time budget.
    #[error("timed out after {timeout_ms}ms: {url}")]
    Timeout { url: String, timeout_ms: u64 },

    /// Markup parsed to (almost) no usable text.
    #[error("malformed content at {url}: only {chars} chars of text")]
    MalformedContent { url: String, chars: usize },

    /// A reference dataset or config file is missing or corrupt.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Caller passed an input that violates the operation's contract.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Topic string outside the closed topic set.
    #[error("unknown topic: {0}")]
    InvalidTopic(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScoutError {
    /// Whether this failure only skips the current candidate.
    ///
    /// Transient and malformed-content failures advance the retrieval state
    /// machine; everything else is reported to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScoutError::TransientFetch { .. }
                | ScoutError::HttpStatus { .. }
                | ScoutError::Timeout { .. }
                | ScoutError::MalformedContent { .. }
        )
    }

    pub(crate) fn transient(url: &str, reason: impl std::fmt::Display) -> Self {
        ScoutError::TransientFetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ScoutResult<T> = Result<T, ScoutError>;
