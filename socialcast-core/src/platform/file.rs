//! File platform variant: a local sink for testing and dry runs.
//!
//! Writes the content, plus a listing of any sibling media files in the
//! platform folder, to a uniquely timestamped file under the configured
//! output directory.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info};

use crate::contract::{Platform, PostResult, ServiceError};
use crate::poster::PLATFORM_RESULT_FILE;
use crate::store::CONTENT_FILE;

const MEDIA_EXTENSIONS: [&str; 11] = [
    "jpg", "jpeg", "png", "gif", "mp4", "mov", "avi", "pdf", "doc", "docx", "txt",
];

/// File-sink posting variant.
pub struct FilePlatform {
    key: String,
    output_dir: PathBuf,
}

impl FilePlatform {
    pub const KEY: &'static str = "File";

    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        FilePlatform {
            key: Self::KEY.to_owned(),
            output_dir: output_dir.into(),
        }
    }

    /// Serve a different platform key with this sink (dry-run mode).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    fn write_post(
        &self,
        content: &str,
        page_name: &str,
        platform_folder: Option<&Path>,
    ) -> Result<(String, PathBuf), ServiceError> {
        fs::create_dir_all(&self.output_dir)?;
        // The second-resolution timestamp alone can collide within a run;
        // a short random suffix keeps the filename unique.
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let token = uuid::Uuid::new_v4().simple().to_string();
        let filename = format!("{page_name}_{timestamp}_{}.txt", &token[..8]);
        let output_path = self.output_dir.join(&filename);

        let mut body = content.to_owned();
        if let Some(folder) = platform_folder {
            let media_files = find_media_files(folder)?;
            if !media_files.is_empty() {
                body.push_str("\n\n--- Media Files ---\n");
                for media_file in &media_files {
                    body.push_str(&format!("\n- {media_file}"));
                }
            }
        }
        fs::write(&output_path, body)?;
        Ok((filename, output_path))
    }
}

/// List media files (images, videos, documents) in the platform folder,
/// skipping the content and result files themselves.
fn find_media_files(folder: &Path) -> Result<Vec<String>, ServiceError> {
    let mut media = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == CONTENT_FILE || name == PLATFORM_RESULT_FILE {
            continue;
        }
        let extension = name.rsplit('.').next().unwrap_or("").to_lowercase();
        if MEDIA_EXTENSIONS.contains(&extension.as_str()) {
            media.push(name);
        }
    }
    media.sort();
    Ok(media)
}

#[async_trait]
impl Platform for FilePlatform {
    fn key(&self) -> &str {
        &self.key
    }

    async fn post_content(
        &self,
        content: &str,
        page_name: &str,
        platform_folder: Option<&Path>,
    ) -> PostResult {
        match self.write_post(content, page_name, platform_folder) {
            Ok((filename, output_path)) => {
                info!(page_name, path = %output_path.display(), "Posted to file");
                let url = format!("file://{}", output_path.display());
                PostResult::success(&self.key, page_name, content, filename, url)
            }
            Err(e) => {
                error!(page_name, error = %e, "Failed to write post to file");
                PostResult::failure(&self.key, page_name, content, e.to_string())
            }
        }
    }
}
