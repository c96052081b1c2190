//! # contract: trait seams for the generation and posting pipelines
//!
//! This module defines the traits that decouple the pipelines from their
//! external collaborators (completion service, image service, social
//! networks) and the shared [`PostResult`] record every platform variant
//! produces.
//!
//! ## Interface & Extensibility
//! - Implement [`CompletionClient`] for a new text-generation backend.
//! - Implement [`MediaHook`] for a new per-version media side effect.
//! - Implement [`Platform`] for a new posting target; the contract is that
//!   `post_content` never fails past its boundary; every underlying error
//!   is converted into an error-status [`PostResult`].
//!
//! ## Mocking & Testing
//! - The service traits are annotated for `mockall` so consumers can
//!   generate deterministic mocks in unit and integration tests.

use std::path::Path;

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Error type for external service calls (simple boxed error for now).
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a single publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Success,
    Error,
}

/// Record of one publish attempt, serialized into the run-level JSON array
/// and the per-platform-folder result file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResult {
    pub platform: String,
    pub page_name: String,
    pub id: String,
    pub text: String,
    pub created_at: String,
    pub status: PostStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PostResult {
    /// Build a success record with the platform-specific post id and the
    /// canonical URL of the published artifact.
    pub fn success(
        platform: &str,
        page_name: &str,
        text: &str,
        id: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        PostResult {
            platform: platform.to_owned(),
            page_name: page_name.to_owned(),
            id: id.into(),
            text: text.to_owned(),
            created_at: timestamp(),
            status: PostStatus::Success,
            url: Some(url.into()),
            error: None,
        }
    }

    /// Build an error record carrying a human-readable message.
    pub fn failure(platform: &str, page_name: &str, text: &str, error: impl Into<String>) -> Self {
        PostResult {
            platform: platform.to_owned(),
            page_name: page_name.to_owned(),
            id: String::new(),
            text: text.to_owned(),
            created_at: timestamp(),
            status: PostStatus::Error,
            url: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PostStatus::Success
    }
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Trait for the external language-model completion service.
///
/// The implementor owns transport, authentication and response decoding;
/// callers only see the resolved prompt going in and the trimmed completion
/// text coming out. Errors are returned unmodified; the pipeline decides
/// how to isolate them per platform.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a completion for the resolved prompt.
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

/// Trait for the best-effort per-version media side effect.
///
/// Invoked by the version store after `content.txt` is persisted. A hook
/// failure is captured and logged by the caller and never propagated: text
/// content must persist even if media generation fails.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait MediaHook: Send + Sync {
    /// Attach generated media to the given version directory.
    async fn attach_media(&self, version_dir: &Path) -> Result<(), ServiceError>;
}

/// Hook that skips media generation entirely.
pub struct NoMediaHook;

#[async_trait]
impl MediaHook for NoMediaHook {
    async fn attach_media(&self, version_dir: &Path) -> Result<(), ServiceError> {
        tracing::debug!(version_dir = %version_dir.display(), "Media generation disabled, skipping");
        Ok(())
    }
}

/// Uniform posting capability, implemented per target network.
///
/// Implementors must not raise past this boundary: any underlying failure
/// (auth, rate limit, network, I/O) is caught and converted into an
/// error-status [`PostResult`] with a human-readable message.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Stable string key identifying this platform (e.g. "X").
    fn key(&self) -> &str;

    /// Publish `content` for `page_name`. When available, `platform_folder`
    /// points at the folder the content was read from, so variants that
    /// support media can pick up sibling files.
    async fn post_content(
        &self,
        content: &str,
        page_name: &str,
        platform_folder: Option<&Path>,
    ) -> PostResult;
}
