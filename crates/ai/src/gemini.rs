// Gemini client for question answering
//
// Sends one generateContent request per question and returns the candidate
// text. Blocking; callers on an async runtime must run it off the executor.

use serde::{Deserialize, Serialize};

use crate::completion::{CompletionError, CompletionRequest, CompletionService, Speaker};
use crate::config::ModelConfig;
use crate::prompt;

// ============================================================================
// Gemini API types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// [`CompletionService`] backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    config: ModelConfig,
}

impl core::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, config: ModelConfig) -> Self {
        Self {
            api_key: api_key.into(),
            config,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn transport_error(&self, err: reqwest::Error) -> CompletionError {
        if err.is_timeout() {
            CompletionError::Timeout(self.config.timeout)
        } else {
            CompletionError::Unavailable(err.to_string())
        }
    }
}

impl CompletionService for GeminiClient {
    fn submit(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        // A fresh client per call: nothing is pooled or cached between questions.
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| CompletionError::Unavailable(e.to_string()))?;

        let body = build_request_body(request, self.config.temperature);

        tracing::debug!(model = %self.config.model, "sending generateContent request");

        let response = client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(CompletionError::Unavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                extract_error_message(&text)
            )));
        }

        parse_response(&text)
    }
}

fn build_request_body(request: &CompletionRequest, temperature: f32) -> GenerateContentRequest {
    let mut contents: Vec<Content> = request
        .history
        .iter()
        .map(|turn| {
            let role = match turn.role {
                Speaker::User => "user",
                Speaker::Assistant => "model",
            };
            Content::text(Some(role), turn.content.clone())
        })
        .collect();

    contents.push(Content::text(
        Some("user"),
        prompt::user_prompt(&request.context, &request.question),
    ));

    GenerateContentRequest {
        system_instruction: Content::text(None, request.system_instruction.clone()),
        contents,
        generation_config: GenerationConfig { temperature },
    }
}

fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<GeminiError>(body) {
        Ok(e) => e.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Concatenate the text parts of the first candidate.
fn parse_response(body: &str) -> Result<String, CompletionError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::InvalidResponse(format!("malformed JSON: {e}")))?;

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::InvalidResponse("no candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(CompletionError::InvalidResponse(format!(
            "candidate has no text (finish reason: {reason})"
        )));
    }

    Ok(text)
}
