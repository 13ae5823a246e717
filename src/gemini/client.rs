//! HTTP client for the Gemini `generateContent` endpoint

use super::traits::GenerativeImageApi;
use super::types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::config::TuiConfig;
use crate::image::ImageEditError;
use async_trait::async_trait;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the remote image editing model
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
        }
    }

    pub fn from_config(config: &TuiConfig) -> Self {
        Self::new(config.api_endpoint(), config.model(), config.resolved_api_key())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl GenerativeImageApi for GeminiClient {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ImageEditError> {
        let api_key = self.api_key.as_deref().ok_or(ImageEditError::MissingApiKey)?;

        tracing::debug!("POST {}", self.url());
        let response = self
            .http
            .post(self.url())
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(service_error(status.as_u16(), &body));
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }
}

/// Map a non-success response body to a service error, preferring the
/// message from the JSON error envelope
fn service_error(status: u16, body: &str) -> ImageEditError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => ImageEditError::Service {
            status: if envelope.error.code == 0 {
                status
            } else {
                envelope.error.code
            },
            message: envelope.error.message,
        },
        Err(_) => ImageEditError::Service {
            status,
            message: body.trim().to_string(),
        },
    }
}
