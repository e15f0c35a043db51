//! Error classification and recovery hints.

use strum::Display;

/// Broad error category for completion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Serialization,
}

/// Suggested next step for the person at the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    CheckCredentials,
    CheckConfiguration,
    CheckNetwork,
    IncreaseTimeout,
    TryAgainLater,
    None,
}

impl RecoverySuggestion {
    /// One-line hint, or `None` when there is nothing useful to say.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CheckCredentials => Some("check that OPENAI_API_KEY is set and valid"),
            Self::CheckConfiguration => Some("check the model name, base URL and prompt file"),
            Self::CheckNetwork => Some("check your network connection and OPENAI_BASE_URL"),
            Self::IncreaseTimeout => Some("raise BUDDY_TIMEOUT_SECS or request_timeout_secs"),
            Self::TryAgainLater => Some("the service is busy; try again in a moment"),
            Self::None => None,
        }
    }
}
