//! Gemini `generateContent` client — single-shot JSON calls via the Google AI
//! API. `responseMimeType: "application/json"` enforces valid JSON, so no
//! fence stripping is needed on the way out.

use serde_json::Value;

use super::FlowError;
use crate::config::AppConfig;

pub const GEMINI_MAX_TOKENS: u32 = 1024;
const GEMINI_TEMPERATURE: f64 = 0.1;

/// Image attached to a request as `inlineData`, still base64-encoded.
#[derive(Debug)]
pub struct InlineImage<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
}

/// Process-wide model client: built once at startup, reused for every flow
/// invocation, no teardown. Holds no per-call state.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One POST to `models/<model>:generateContent`. Returns the text of the
    /// first candidate, or a flow error on transport failure, non-2xx status,
    /// or an empty candidate list.
    pub async fn generate(
        &self,
        system: &str,
        prompt: &str,
        image: Option<InlineImage<'_>>,
    ) -> Result<String, FlowError> {
        let mut parts = vec![serde_json::json!({ "text": prompt })];
        if let Some(image) = image {
            parts.push(serde_json::json!({
                "inlineData": {
                    "mimeType": image.mime_type,
                    "data": image.data,
                }
            }));
        }

        // API key goes in the URL query param, not a header.
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let start = std::time::Instant::now();
        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "contents": [
                    {
                        "role": "user",
                        "parts": parts,
                    }
                ],
                "systemInstruction": {
                    "parts": [
                        {
                            "text": system,
                        }
                    ]
                },
                "generationConfig": {
                    "maxOutputTokens": GEMINI_MAX_TOKENS,
                    "temperature": GEMINI_TEMPERATURE,
                    "responseMimeType": "application/json",
                }
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("[LLM] Gemini API returned {}: {}", status, body);
            return Err(FlowError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        log::info!("[LLM] generateContent: {}ms", start.elapsed().as_millis());

        extract_candidate_text(&body).ok_or(FlowError::EmptyResponse)
    }
}

/// Extract text content from a `generateContent` response.
///
/// Gemini format: candidates[0].content.parts[0].text
fn extract_candidate_text(body: &Value) -> Option<String> {
    body.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_text() {
        let body = serde_json::json!({
            "candidates": [
                {
                    "content": {
                        "parts": [ { "text": "{\"species\": \"Tomato\"}" } ]
                    }
                }
            ]
        });
        assert_eq!(
            extract_candidate_text(&body).as_deref(),
            Some("{\"species\": \"Tomato\"}")
        );
    }

    #[test]
    fn missing_candidates_yield_none() {
        assert_eq!(extract_candidate_text(&serde_json::json!({})), None);
        let empty = serde_json::json!({ "candidates": [] });
        assert_eq!(extract_candidate_text(&empty), None);
    }
}
