//! Natural-language progress summaries.
//!
//! The dashboard only sees [`InsightService`]. Implementations own their
//! failure handling: `summarize` always yields displayable text and falls
//! back to [`FALLBACK_INSIGHT`] when the remote model cannot be reached.

use std::rc::Rc;

use async_trait::async_trait;
use tracing::info;

use crate::core::model::AppState;

mod gemini;
pub use gemini::{build_prompt, extract_text, GeminiInsight, InsightError};

pub const FALLBACK_INSIGHT: &str =
    "Analyzing biometric data flow... System optimal. Keep pushing your physical limits.";

/// Environment variable holding the text-generation API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Optional override for the model name.
pub const MODEL_ENV: &str = "GEMINI_MODEL";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[async_trait(?Send)]
pub trait InsightService {
    /// A short narrative about recent progress. Never fails.
    async fn summarize(&self, state: &AppState) -> String;
}

/// Offline stand-in used when no API key is configured.
#[derive(Debug, Clone, Default)]
pub struct StaticInsight;

#[async_trait(?Send)]
impl InsightService for StaticInsight {
    async fn summarize(&self, _state: &AppState) -> String {
        FALLBACK_INSIGHT.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl InsightConfig {
    /// Resolve the key from the runtime environment first (desktop), then
    /// from the build environment (the only option in the browser).
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .or_else(|| option_env!("GEMINI_API_KEY").map(str::to_string))
            .filter(|key| !key.trim().is_empty());
        let model = std::env::var(MODEL_ENV)
            .ok()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            api_key,
            model,
            ..Self::default()
        }
    }

    pub fn into_service(self) -> Rc<dyn InsightService> {
        match self.api_key {
            Some(key) => {
                info!(model = %self.model, "remote insights enabled");
                Rc::new(
                    GeminiInsight::new(key)
                        .with_model(self.model)
                        .with_base_url(self.base_url),
                )
            }
            None => {
                info!("no {API_KEY_ENV} configured; insights use the offline narrative");
                Rc::new(StaticInsight)
            }
        }
    }
}
