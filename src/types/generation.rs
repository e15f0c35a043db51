//! Generation settings.

use bon::Builder;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Settings controlling a single completion request.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, PartialEq)]
pub struct CompletionSettings {
    #[builder(into, default = DEFAULT_MODEL.to_string())]
    pub model: String,
    #[builder(default = 0.0)]
    pub temperature: f64,
    pub max_tokens: Option<u32>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
