//! Live clients for the OpenAI-compatible completion and image endpoints.
//!
//! Transport, authentication and response decoding live here; the rest of
//! the pipeline only sees the [`CompletionClient`] and [`ImageClient`]
//! traits. Service errors are surfaced with the response status and body so
//! callers can log an actionable message.

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::config::{GeneratorConfig, ImageConfig};
use crate::contract::{CompletionClient, ServiceError};
use crate::image::ImageClient;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";

/// Chat-completions client with fixed sampling parameters.
pub struct OpenAiCompletionClient {
    http: reqwest::Client,
    config: GeneratorConfig,
}

impl OpenAiCompletionClient {
    pub fn new(config: GeneratorConfig) -> Self {
        OpenAiCompletionClient {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        info!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Requesting completion"
        );
        let body = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });
        let response = self
            .http
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let payload: serde_json::Value = if status.is_success() {
            response.json().await?
        } else {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            error!(status = %status, "Completion API returned error. Response body: {text}");
            return Err(format!("completion API error: status {status}: {text}").into());
        };
        let summary = payload
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                error!(payload = %payload, "Completion response missing message content");
                "completion response missing choices[0].message.content".to_string()
            })?;
        info!(summary_len = summary.trim().len(), "Completion received");
        Ok(summary.trim().to_owned())
    }
}

/// Image-generation client: requests one image and downloads its URL.
pub struct OpenAiImageClient {
    http: reqwest::Client,
    config: ImageConfig,
}

impl OpenAiImageClient {
    pub fn new(config: ImageConfig) -> Self {
        OpenAiImageClient {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ImageClient for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ServiceError> {
        info!(model = %self.config.model, size = %self.config.size, "Requesting image generation");
        let body = json!({
            "model": self.config.model,
            "prompt": prompt,
            "size": self.config.size,
            "quality": self.config.quality,
            "n": 1,
        });
        let response = self
            .http
            .post(IMAGES_URL)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            error!(status = %status, "Image API returned error. Response body: {text}");
            return Err(format!("image API error: status {status}: {text}").into());
        }
        let payload: serde_json::Value = response.json().await?;
        let image_url = payload
            .get("data")
            .and_then(|d| d.get(0))
            .and_then(|d| d.get("url"))
            .and_then(|u| u.as_str())
            .ok_or_else(|| {
                error!(payload = %payload, "Image response missing url");
                "image response missing data[0].url".to_string()
            })?;
        info!(url = image_url, "Downloading generated image");
        let image = self.http.get(image_url).send().await?;
        let status = image.status();
        if !status.is_success() {
            error!(status = %status, url = image_url, "Image download failed");
            return Err(format!("image download failed: status {status}").into());
        }
        let bytes = image.bytes().await?;
        info!(size = bytes.len(), "Image downloaded");
        Ok(bytes.to_vec())
    }
}
