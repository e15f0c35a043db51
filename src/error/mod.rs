//! Error types for Buddy.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all Buddy operations.
#[derive(Error, Debug)]
pub enum BuddyError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Completion failed: {0}")]
    Completion(#[source] CompletionError),

    #[error("Summarization failed: {0}")]
    Summarization(#[source] CompletionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuddyError {
    /// The underlying client failure, if this error came from the completion service.
    pub fn completion_error(&self) -> Option<&CompletionError> {
        match self {
            Self::Completion(e) | Self::Summarization(e) => Some(e),
            _ => None,
        }
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self {
            Self::Completion(e) | Self::Summarization(e) => e.recovery_suggestion(),
            Self::Configuration(_) | Self::Validation(_) => RecoverySuggestion::CheckConfiguration,
            Self::Io(_) => RecoverySuggestion::None,
        }
    }
}

/// Any failure reported by a completion client.
///
/// Callers treat all variants uniformly; the split only exists so the CLI can
/// print a useful hint.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) => ErrorCategory::Network,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::MalformedResponse(_) => ErrorCategory::Serialization,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
        }
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::RateLimit | ErrorCategory::Server => RecoverySuggestion::TryAgainLater,
            ErrorCategory::Network => RecoverySuggestion::CheckNetwork,
            ErrorCategory::Timeout => RecoverySuggestion::IncreaseTimeout,
            ErrorCategory::Api | ErrorCategory::Serialization => RecoverySuggestion::CheckConfiguration,
        }
    }
}

impl From<CompletionError> for BuddyError {
    fn from(err: CompletionError) -> Self {
        Self::Completion(err)
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BuddyError>;
