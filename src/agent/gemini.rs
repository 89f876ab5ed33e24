//! Hosted Gemini client.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::prompt::build_prompt;
use super::{AgentError, QueryAgent};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Query agent backed by the Gemini `generateContent` API.
///
/// One request per question, deterministic temperature, no retry.
pub struct GeminiAgent {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiAgent {
    /// Build a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AgentError::Network(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Build a client from `GOOGLE_API_KEY` or `GEMINI_API_KEY`.
    ///
    /// A missing key is a fatal configuration error, raised before any
    /// interaction is possible.
    pub fn from_env() -> Result<Self, AgentError> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .map_err(|_| AgentError::MissingApiKey)?;
        Self::new(api_key)
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl QueryAgent for GeminiAgent {
    async fn ask(&self, question: &str, context: &str) -> Result<String, AgentError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(context, question) }]
            }],
            "generationConfig": { "temperature": 0.0 }
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        let decoded: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| AgentError::Parse(e.to_string()))?;
        let answer = decoded.answer_text();
        if answer.is_empty() {
            return Err(AgentError::EmptyResponse);
        }
        Ok(answer)
    }
}

fn api_error(status: u16, body: &str) -> AgentError {
    let detail: Option<ApiErrorBody> = serde_json::from_str(body).ok();
    let (message, api_status) = match detail.and_then(|d| d.error) {
        Some(e) => (
            e.message.unwrap_or_else(|| body.to_string()),
            e.status.unwrap_or_default(),
        ),
        None => (body.to_string(), String::new()),
    };
    if status == 429 || api_status == "RESOURCE_EXHAUSTED" {
        return AgentError::QuotaExhausted;
    }
    AgentError::Api { status, message }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    fn answer_text(&self) -> String {
        self.candidates
            .iter()
            .flatten()
            .take(1)
            .flat_map(|c| c.content.iter())
            .flat_map(|content| content.parts.iter().flatten())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
    status: Option<String>,
}
