//! Remote insights through the `generateContent` text-generation API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use super::{InsightService, DEFAULT_BASE_URL, DEFAULT_MODEL, FALLBACK_INSIGHT};
use crate::core::model::AppState;

const SYSTEM_INSTRUCTION: &str = "You are a high-performance fitness analyst. Your tone is professional, futuristic, and encouraging. Use tech-inspired metaphors.";
const PROMPT_PREAMBLE: &str = "Analyze these body measurement trends and goals. Provide a concise, high-tech, motivational insight (max 3 sentences).";
const TEMPERATURE: f32 = 0.7;
const API_KEY_HEADER: &str = "x-goog-api-key";
/// Number of trailing entries sent with the prompt.
const PROMPT_ENTRIES: usize = 5;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl From<reqwest::Error> for InsightError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

impl Content {
    fn text(role: Option<&str>, text: String) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: Some(text) }],
        }
    }
}

/// Prompt text: the instruction followed by the last five entries and the
/// goal table, both as JSON.
pub fn build_prompt(state: &AppState) -> Result<String, serde_json::Error> {
    let start = state.entries.len().saturating_sub(PROMPT_ENTRIES);
    let recent = serde_json::to_string(&state.entries[start..])?;
    let goals = serde_json::to_string(&state.goals)?;
    Ok(format!(
        "{PROMPT_PREAMBLE}\n\nRecent entries: {recent}\n\nGoals: {goals}"
    ))
}

/// Pull the generated text out of a response body.
pub fn extract_text(body: &str) -> Result<String, InsightError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|err| InsightError::MalformedResponse(err.to_string()))?;

    if let Some(api_error) = response.error {
        return Err(InsightError::MalformedResponse(api_error.message));
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(InsightError::MalformedResponse("no text in first candidate".into()));
    }
    Ok(text.to_string())
}

pub struct GeminiInsight {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiInsight {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    #[instrument(skip(self, state), fields(model = %self.model, entries = state.entries.len()))]
    pub async fn request(&self, state: &AppState) -> Result<String, InsightError> {
        if self.api_key.trim().is_empty() {
            return Err(InsightError::MissingApiKey);
        }

        let prompt = build_prompt(state)
            .map_err(|err| InsightError::MalformedResponse(err.to_string()))?;
        let body = GenerateRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: Content::text(None, SYSTEM_INSTRUCTION.to_string()),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        debug!("requesting insight");
        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "insight API error");
            return Err(InsightError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        extract_text(&text)
    }
}

#[async_trait(?Send)]
impl InsightService for GeminiInsight {
    async fn summarize(&self, state: &AppState) -> String {
        match self.request(state).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "insight unavailable; using fallback narrative");
                FALLBACK_INSIGHT.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::seed_state;

    #[test]
    fn prompt_carries_last_five_entries_and_goals() {
        let state = seed_state();
        let prompt = build_prompt(&state).unwrap();

        assert!(prompt.starts_with(PROMPT_PREAMBLE));
        for entry in &state.entries[..8] {
            assert!(!prompt.contains(&entry.id));
        }
        for entry in &state.entries[8..] {
            assert!(prompt.contains(&entry.id));
        }
        assert!(prompt.contains("\"part\":\"Body Fat %\""));
    }

    #[test]
    fn prompt_handles_short_history() {
        let prompt = build_prompt(&AppState::default()).unwrap();
        assert!(prompt.contains("Recent entries: []"));
        assert!(prompt.contains("Goals: []"));
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Core systems "},{"text":"nominal."}]}},{"content":{"parts":[{"text":"ignored"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Core systems nominal.");
    }

    #[test]
    fn empty_candidates_are_malformed() {
        assert!(matches!(
            extract_text(r#"{"candidates":[]}"#),
            Err(InsightError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_text("not json"),
            Err(InsightError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_text(r#"{"error":{"message":"quota"}}"#),
            Err(InsightError::MalformedResponse(msg)) if msg == "quota"
        ));
    }

    #[test]
    fn url_embeds_model_but_not_key() {
        let service = GeminiInsight::new("k123")
            .with_model("m1")
            .with_base_url("http://localhost:1234/v1/");
        assert_eq!(
            service.url(),
            "http://localhost:1234/v1/models/m1:generateContent"
        );
    }

    #[test]
    fn request_body_uses_expected_field_names() {
        let body = GenerateRequest {
            contents: vec![Content::text(Some("user"), "hi".into())],
            system_instruction: Content::text(None, SYSTEM_INSTRUCTION.into()),
            generation_config: GenerationConfig { temperature: TEMPERATURE },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert!(json["system_instruction"].get("role").is_none());
        assert!((json["generation_config"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn blank_key_falls_back_without_network() {
        let service = GeminiInsight::new("   ");
        assert!(matches!(
            service.request(&seed_state()).await,
            Err(InsightError::MissingApiKey)
        ));
        assert_eq!(service.summarize(&seed_state()).await, FALLBACK_INSIGHT);
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back() {
        let service = GeminiInsight::new("test-key").with_base_url("http://127.0.0.1:9/v1beta");
        assert_eq!(service.summarize(&seed_state()).await, FALLBACK_INSIGHT);
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_the_key() {
        let service =
            GeminiInsight::new("SECRET-KEY-123").with_base_url("http://127.0.0.1:9/v1beta");
        let err = service.request(&seed_state()).await.unwrap_err();
        assert!(matches!(err, InsightError::Transport(_)));
        let text = err.to_string();
        assert!(!text.contains("SECRET-KEY-123"), "{text}");
    }
}
