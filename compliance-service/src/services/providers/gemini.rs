//! Gemini AI provider implementation.
//!
//! Implements the compliance review using Google's Gemini generateContent
//! API with inline document parts.

use super::{ProviderError, ReviewProvider};
use crate::services::content::InlineDocument;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound on one remote call. No retries on expiry.
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

/// Gemini review provider. Constructed once at startup and shared across
/// requests.
pub struct GeminiReviewProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiReviewProvider {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            GEMINI_API_BASE, self.config.model, method, self.config.api_key
        )
    }
}

/// Assemble one user turn: inline documents first, framing prompt last.
fn build_request(
    system_instruction: &str,
    documents: &[InlineDocument],
    prompt: &str,
) -> GenerateContentRequest {
    let mut parts: Vec<ContentPart> = documents
        .iter()
        .map(|doc| ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: doc.mime_type.clone(),
                data: doc.data.clone(),
            },
        })
        .collect();
    parts.push(ContentPart::Text {
        text: prompt.to_string(),
    });

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        system_instruction: Some(Content {
            role: None,
            parts: vec![ContentPart::Text {
                text: system_instruction.to_string(),
            }],
        }),
    }
}

#[async_trait]
impl ReviewProvider for GeminiReviewProvider {
    async fn review(
        &self,
        system_instruction: &str,
        documents: &[InlineDocument],
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let request = build_request(system_instruction, documents, prompt);
        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            doc_count = documents.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let usage = api_response.usage_metadata.unwrap_or_default();
        tracing::debug!(
            input_tokens = usage.prompt_token_count.unwrap_or(0),
            output_tokens = usage.candidates_token_count.unwrap_or(0),
            "Gemini call completed"
        );

        let text = api_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| match p {
                ContentPart::Text { text } => Some(text.clone()),
                _ => None,
            });

        match text {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ProviderError::EmptyResponse),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        // Listing models verifies the API key works.
        let url = format!("{}/models?key={}", GEMINI_API_BASE, self.config.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Content,
    #[serde(default)]
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_wire_fields() {
        let docs = vec![InlineDocument {
            mime_type: "application/pdf".to_string(),
            data: "QUJD".to_string(),
        }];
        let request = build_request("grade strictly", &docs, "compare the documents");
        let value = serde_json::to_value(&request).unwrap();

        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(parts[0]["inlineData"]["data"], "QUJD");
        assert_eq!(parts[1]["text"], "compare the documents");
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "grade strictly"
        );
    }

    #[test]
    fn documents_precede_framing_prompt() {
        let docs = vec![
            InlineDocument {
                mime_type: "application/pdf".to_string(),
                data: "cmZx".to_string(),
            },
            InlineDocument {
                mime_type: "application/pdf".to_string(),
                data: "cHJvcG9zYWw=".to_string(),
            },
        ];
        let request = build_request("instruction", &docs, "analyze");
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].parts.len(), 3);
        assert!(matches!(
            request.contents[0].parts[2],
            ContentPart::Text { .. }
        ));
    }

    #[test]
    fn parses_generate_content_response() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "## Compliance Score: 85" }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 40 }
        });

        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| match p {
                ContentPart::Text { text } => Some(text.clone()),
                _ => None,
            });
        assert_eq!(text.as_deref(), Some("## Compliance Score: 85"));
    }
}
