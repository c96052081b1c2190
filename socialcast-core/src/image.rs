//! Image Hook: best-effort media generation for a freshly written version.
//!
//! The hook reads the version's `content.txt`, resolves an image prompt
//! (template `<prompts_dir>/image.txt` or a default), records it in
//! `media_prompt.txt`, rotates any previous `media/` contents into
//! `media_history/<timestamp>/`, and saves the generated image as
//! `media/image_<timestamp>.png`. Failures are returned to the version
//! store, which logs them without failing the text save.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use mockall::automock;
use tracing::{debug, info};

use crate::contract::{MediaHook, ServiceError};
use crate::prompt::CONTENT_PLACEHOLDER;
use crate::store::CONTENT_FILE;

/// Filename recording the prompt used for media generation.
pub const MEDIA_PROMPT_FILE: &str = "media_prompt.txt";
/// Directory holding the current version media.
pub const MEDIA_DIR: &str = "media";
/// Directory holding rotated-out media from earlier hook runs.
pub const MEDIA_HISTORY_DIR: &str = "media_history";

/// Trait for the raw image-generation call: prompt in, image bytes out.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ImageClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ServiceError>;
}

/// [`MediaHook`] that generates one image per version via an [`ImageClient`].
pub struct GeneratedImageHook<C: ImageClient> {
    client: C,
    prompts_dir: std::path::PathBuf,
}

impl<C: ImageClient> GeneratedImageHook<C> {
    pub fn new(client: C, prompts_dir: impl Into<std::path::PathBuf>) -> Self {
        GeneratedImageHook {
            client,
            prompts_dir: prompts_dir.into(),
        }
    }

    fn resolve_image_prompt(&self, content: &str) -> Result<String, std::io::Error> {
        let template_path = self.prompts_dir.join("image.txt");
        if template_path.exists() {
            let template = fs::read_to_string(&template_path)?;
            Ok(template.replace(CONTENT_PLACEHOLDER, content))
        } else {
            Ok(format!(
                "An illustration, without any text, for the following social media post:\n\n{content}"
            ))
        }
    }
}

#[async_trait]
impl<C: ImageClient> MediaHook for GeneratedImageHook<C> {
    async fn attach_media(&self, version_dir: &Path) -> Result<(), ServiceError> {
        let content = fs::read_to_string(version_dir.join(CONTENT_FILE))?;
        let prompt = self.resolve_image_prompt(&content)?;
        fs::write(version_dir.join(MEDIA_PROMPT_FILE), &prompt)?;

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let media_dir = version_dir.join(MEDIA_DIR);
        rotate_media(&media_dir, &version_dir.join(MEDIA_HISTORY_DIR), &timestamp)?;
        fs::create_dir_all(&media_dir)?;

        let bytes = self.client.generate(&prompt).await?;
        let image_path = media_dir.join(format!("image_{timestamp}.png"));
        fs::write(&image_path, bytes)?;
        info!(path = %image_path.display(), "Saved generated image");
        Ok(())
    }
}

/// Move an existing non-empty media directory aside before regenerating.
fn rotate_media(media_dir: &Path, history_dir: &Path, timestamp: &str) -> std::io::Result<()> {
    if !media_dir.exists() || fs::read_dir(media_dir)?.next().is_none() {
        return Ok(());
    }
    let slot = history_dir.join(timestamp);
    fs::create_dir_all(history_dir)?;
    fs::rename(media_dir, &slot)?;
    debug!(from = %media_dir.display(), to = %slot.display(), "Rotated previous media into history");
    Ok(())
}
