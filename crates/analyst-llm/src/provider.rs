//! Completion service abstraction and the OpenAI Responses API client.
//!
//! Uses blocking HTTP via `ureq`: one request per call, no retry, no streaming.
//! Every failure is folded into the closed [`AnalystError`] taxonomy.

use crate::secret::{Credential, SecretStore, fetch_credential};
use analyst_core::config::{AnalystConfig, CompletionConfig};
use analyst_core::error::{AnalystError, Result};
use analyst_core::prompt::Prompt;
use serde_json::Value;

/// A successful, non-empty model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    text: String,
    /// Input tokens used (from API response, if reported).
    pub input_tokens: Option<u64>,
    /// Output tokens used (from API response, if reported).
    pub output_tokens: Option<u64>,
}

impl AnalysisResult {
    /// Fails with `EmptyResponse` when `text` is empty or whitespace-only.
    pub fn new(
        text: impl Into<String>,
        input_tokens: Option<u64>,
        output_tokens: Option<u64>,
    ) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AnalystError::EmptyResponse);
        }
        Ok(Self {
            text,
            input_tokens,
            output_tokens,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Abstraction over remote completion services.
pub trait CompletionService: Send {
    /// Send the prompt and return the model's text.
    fn complete(&self, prompt: &Prompt) -> Result<AnalysisResult>;

    /// The model name (for display/logging).
    fn model_name(&self) -> &str;
}

/// Client for the OpenAI Responses API (`POST /v1/responses`).
pub struct CompletionClient {
    credential: Credential,
    model: String,
    base_url: String,
    agent: ureq::Agent,
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("credential", &self.credential)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CompletionClient {
    pub fn new(credential: Credential, config: &CompletionConfig) -> Result<Self> {
        if config.model.trim().is_empty() {
            return Err(AnalystError::Configuration(
                "no model identifier configured".to_string(),
            ));
        }
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .http_status_as_error(false)
                .timeout_global(config.timeout_secs.map(std::time::Duration::from_secs))
                .build(),
        );
        Ok(Self {
            credential,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            agent,
        })
    }

    /// Fetch the credential from `store` and build a client from the loaded config.
    pub fn from_secret_store(store: &dyn SecretStore, config: &AnalystConfig) -> Result<Self> {
        let credential = fetch_credential(store, &config.secret.service, &config.secret.account)?;
        Self::new(credential, &config.completion)
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/responses", self.base_url.trim_end_matches('/'))
    }

    /// Send the prompt. Exactly one outbound request per call.
    pub fn send(&self, prompt: &Prompt) -> Result<AnalysisResult> {
        let url = self.endpoint();
        let body = serde_json::json!({
            "model": self.model,
            "input": prompt.as_str(),
        });
        tracing::debug!(%url, model = %self.model, chars = prompt.char_len(), "sending prompt");

        let mut response = self
            .agent
            .post(&url)
            .header(
                "Authorization",
                &format!("Bearer {}", self.credential.expose()),
            )
            .header("content-type", "application/json")
            .send_json(&body)
            .map_err(|e| AnalystError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let raw = response
            .body_mut()
            .read_to_string()
            .map_err(|e| AnalystError::Transport(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(classify_failure(status, &raw));
        }

        let json: Value = serde_json::from_str(&raw)
            .map_err(|e| AnalystError::Transport(format!("malformed response body: {e}")))?;

        let input_tokens = json
            .get("usage")
            .and_then(|u| u.get("input_tokens"))
            .and_then(|t| t.as_u64());
        let output_tokens = json
            .get("usage")
            .and_then(|u| u.get("output_tokens"))
            .and_then(|t| t.as_u64());
        tracing::info!(?input_tokens, ?output_tokens, model = %self.model, "completion finished");

        AnalysisResult::new(extract_output_text(&json), input_tokens, output_tokens)
    }
}

impl CompletionService for CompletionClient {
    fn complete(&self, prompt: &Prompt) -> Result<AnalysisResult> {
        self.send(prompt)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Map a non-2xx status to an error kind: 401 → Auth, 429 → RateLimit, else Transport.
pub fn classify_failure(status: u16, body: &str) -> AnalystError {
    let message = match error_message(body) {
        Some(msg) => format!("{status}: {msg}"),
        None => format!("{status}: {}", status_reason(status)),
    };
    match status {
        401 => AnalystError::Auth(message),
        429 => AnalystError::RateLimit(message),
        _ => AnalystError::Transport(message),
    }
}

/// `error.message` from an API error body, if the body is JSON and carries one.
fn error_message(body: &str) -> Option<String> {
    let json: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => {
            if !body.trim().is_empty() {
                tracing::warn!("error response body is not JSON");
            }
            return None;
        }
    };
    json.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

fn status_reason(status: u16) -> &'static str {
    match status {
        400 => "bad request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "not found",
        429 => "too many requests",
        500..=599 => "server error",
        _ => "unexpected status",
    }
}

/// Aggregate the response text the way the SDK's `output_text` convenience does.
///
/// Prefers a top-level `output_text` string; otherwise concatenates every
/// `output_text` content part of every `message` output item, in order.
pub fn extract_output_text(json: &Value) -> String {
    if let Some(text) = json.get("output_text").and_then(|t| t.as_str()) {
        return text.to_string();
    }

    json.get("output")
        .and_then(|o| o.as_array())
        .into_iter()
        .flatten()
        .filter(|item| item.get("type").and_then(|t| t.as_str()) == Some("message"))
        .filter_map(|item| item.get("content").and_then(|c| c.as_array()))
        .flatten()
        .filter(|part| part.get("type").and_then(|t| t.as_str()) == Some("output_text"))
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect()
}
