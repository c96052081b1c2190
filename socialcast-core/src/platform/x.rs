//! X (Twitter) platform variant, posting via the v2 API with OAuth 1.0a
//! user-context signing.

use std::path::Path;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::config::XCredentials;
use crate::contract::{Platform, PostResult, ServiceError};
use crate::oauth1;

const TWEETS_URL: &str = "https://api.x.com/2/tweets";
const ME_URL: &str = "https://api.x.com/2/users/me";

/// Live posting variant for X. Credentials are validated eagerly by
/// [`XCredentials::from_env`] before this variant is constructed.
pub struct XPlatform {
    credentials: XCredentials,
    http: reqwest::Client,
}

impl XPlatform {
    pub const KEY: &'static str = "X";

    pub fn new(credentials: XCredentials) -> Self {
        XPlatform {
            credentials,
            http: reqwest::Client::new(),
        }
    }

    async fn create_post(&self, content: &str) -> Result<(String, String), ServiceError> {
        let auth = oauth1::authorization_header("POST", TWEETS_URL, &self.credentials, &[]);
        let response = self
            .http
            .post(TWEETS_URL)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&json!({ "text": content }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            return Err(format!("X API error: status {status}: {text}").into());
        }
        let payload: serde_json::Value = response.json().await?;
        let post_id = payload
            .get("data")
            .and_then(|d| d.get("id"))
            .and_then(|id| id.as_str())
            .ok_or_else(|| "X API response missing data.id".to_string())?
            .to_owned();

        let username = self.fetch_username().await?;
        let url = format!("https://x.com/{username}/status/{post_id}");
        Ok((post_id, url))
    }

    async fn fetch_username(&self) -> Result<String, ServiceError> {
        let auth = oauth1::authorization_header("GET", ME_URL, &self.credentials, &[]);
        let response = self
            .http
            .get(ME_URL)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            return Err(format!("X API error fetching user: status {status}: {text}").into());
        }
        let payload: serde_json::Value = response.json().await?;
        payload
            .get("data")
            .and_then(|d| d.get("username"))
            .and_then(|u| u.as_str())
            .map(str::to_owned)
            .ok_or_else(|| "X API response missing data.username".into())
    }
}

#[async_trait]
impl Platform for XPlatform {
    fn key(&self) -> &str {
        Self::KEY
    }

    async fn post_content(
        &self,
        content: &str,
        page_name: &str,
        _platform_folder: Option<&Path>,
    ) -> PostResult {
        match self.create_post(content).await {
            Ok((post_id, url)) => {
                info!(page_name, post_id = %post_id, url = %url, "Posted to X");
                PostResult::success(Self::KEY, page_name, content, post_id, url)
            }
            Err(e) => {
                error!(page_name, error = %e, "Failed to post to X");
                PostResult::failure(Self::KEY, page_name, content, format!("X API Error: {e}"))
            }
        }
    }
}
