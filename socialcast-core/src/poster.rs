//! Poster: walks a page's platform folders, posts each via the matching
//! platform variant, records results.
//!
//! Strictly sequential: one post at a time, with a fixed awaited delay
//! between posting operations to respect third-party rate limits. Results
//! are persisted incrementally per platform folder and flushed as a
//! run-level JSON array at the end, so an interrupted run leaves the
//! per-folder results of everything already attempted on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::config::PosterConfig;
use crate::contract::{Platform, PostResult, PostStatus};
use crate::platform::PlatformRegistry;
use crate::store::CONTENT_FILE;

/// Per-platform-folder result file, a single PostResult object,
/// overwritten each run.
pub const PLATFORM_RESULT_FILE: &str = "posting_results.json";

#[derive(Debug)]
pub enum PosterError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for PosterError {
    fn from(e: std::io::Error) -> Self {
        PosterError::Io(e)
    }
}

impl From<serde_json::Error> for PosterError {
    fn from(e: serde_json::Error) -> Self {
        PosterError::Json(e)
    }
}

impl std::fmt::Display for PosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PosterError::Io(e) => write!(f, "poster I/O error: {e}"),
            PosterError::Json(e) => write!(f, "failed to serialize posting results: {e}"),
        }
    }
}

impl std::error::Error for PosterError {}

/// Owns the result list for the duration of one invocation.
pub struct Poster {
    registry: PlatformRegistry,
    config: PosterConfig,
    results: Vec<PostResult>,
}

impl Poster {
    pub fn new(registry: PlatformRegistry, config: PosterConfig) -> Self {
        Poster {
            registry,
            config,
            results: Vec::new(),
        }
    }

    pub fn results(&self) -> &[PostResult] {
        &self.results
    }

    /// Post content from a page folder. The folder's immediate
    /// subdirectories are platform folders, each expected to hold a
    /// `content.txt`. Folders without content or with an unregistered name
    /// are skipped with a logged reason, not an error. Every discovered,
    /// valid platform folder is attempted exactly once; one platform's
    /// failure never aborts the rest.
    pub async fn post_from_folder(&mut self, folder: &Path) -> Result<&[PostResult], PosterError> {
        let page_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(page_name = %page_name, folder = %folder.display(), "Posting page folder");

        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let platform_folder = entry.path();
            let platform_name = entry.file_name().to_string_lossy().into_owned();

            let content_file = platform_folder.join(CONTENT_FILE);
            if !content_file.exists() {
                warn!(
                    page_name = %page_name,
                    platform = %platform_name,
                    "Content file not found, skipping platform folder"
                );
                continue;
            }
            let Some(platform) = self.registry.get(&platform_name) else {
                warn!(
                    platform = %platform_name,
                    "Platform is not supported, skipping folder"
                );
                continue;
            };

            let result =
                post_one(platform, &content_file, &platform_folder, &page_name).await;
            self.record(result, Some(&platform_folder))?;
            tokio::time::sleep(self.config.post_delay).await;
        }

        self.save_results()?;
        Ok(&self.results)
    }

    /// Post a specific list of content files. Each path must end in
    /// `content.txt`; its parent directory names the platform and its
    /// grandparent the page. Paths that do not match are skipped with a
    /// logged reason.
    pub async fn post_files(&mut self, files: &[PathBuf]) -> Result<&[PostResult], PosterError> {
        for content_file in files {
            if content_file.file_name().and_then(|n| n.to_str()) != Some(CONTENT_FILE) {
                warn!(file = %content_file.display(), "Not a content file, skipping");
                continue;
            }
            let Some(platform_folder) = content_file.parent() else {
                warn!(file = %content_file.display(), "Content file has no platform folder, skipping");
                continue;
            };
            let platform_name = platform_folder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let page_name = platform_folder
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let Some(platform) = self.registry.get(&platform_name) else {
                warn!(platform = %platform_name, "Platform is not supported, skipping file");
                continue;
            };

            let result = post_one(platform, content_file, platform_folder, &page_name).await;
            self.record(result, Some(platform_folder))?;
            tokio::time::sleep(self.config.post_delay).await;
        }

        self.save_results()?;
        Ok(&self.results)
    }

    /// Append a result to the run list and persist it immediately into the
    /// platform folder it came from.
    fn record(
        &mut self,
        result: PostResult,
        platform_folder: Option<&Path>,
    ) -> Result<(), PosterError> {
        match result.status {
            PostStatus::Success => info!(
                platform = %result.platform,
                page_name = %result.page_name,
                url = result.url.as_deref().unwrap_or(""),
                "Posted successfully"
            ),
            PostStatus::Error => error!(
                platform = %result.platform,
                page_name = %result.page_name,
                error = result.error.as_deref().unwrap_or(""),
                "Posting failed"
            ),
        }
        if let Some(folder) = platform_folder {
            let path = folder.join(PLATFORM_RESULT_FILE);
            fs::write(&path, serde_json::to_string_pretty(&result)?)?;
        }
        self.results.push(result);
        Ok(())
    }

    /// Flush the full run's results to the run-level JSON array,
    /// overwriting any previous run's file.
    pub fn save_results(&self) -> Result<(), PosterError> {
        let json = serde_json::to_string_pretty(&self.results)?;
        fs::write(&self.config.output_path, json)?;
        info!(
            path = %self.config.output_path.display(),
            count = self.results.len(),
            "Saved run results"
        );
        Ok(())
    }
}

/// Read one content file and post it. A read failure becomes an
/// error-status result, matching the platform contract of never raising.
async fn post_one(
    platform: &dyn Platform,
    content_file: &Path,
    platform_folder: &Path,
    page_name: &str,
) -> PostResult {
    info!(
        page_name,
        platform = platform.key(),
        "Publishing content"
    );
    let content = match fs::read_to_string(content_file) {
        Ok(raw) => raw.trim().to_owned(),
        Err(e) => {
            return PostResult::failure(
                platform.key(),
                page_name,
                "",
                format!("failed to read {}: {e}", content_file.display()),
            );
        }
    };
    platform
        .post_content(&content, page_name, Some(platform_folder))
        .await
}
