//! High-level pipeline: extract a page, generate platform-tailored
//! summaries, persist each as a new version.
//!
//! For each requested platform the pipeline resolves a prompt, calls the
//! completion service and saves the result through the version store
//! (which triggers the media hook). A failure for one platform is recorded
//! in the report and does not stop the remaining platforms; an extraction
//! failure is fatal for the whole page. No partial version content is
//! written on a generation failure: the store is only reached with a
//! complete summary.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::contract::{CompletionClient, MediaHook};
use crate::extract::{extract_page, ExtractError};
use crate::prompt::resolve_prompt;
use crate::store::VersionStore;

/// Report of one page's generation run, one entry per requested platform.
#[derive(Debug)]
pub struct GenerationReport {
    pub page_name: String,
    pub entries: Vec<GenerationEntry>,
}

#[derive(Debug)]
pub struct GenerationEntry {
    pub platform: String,
    pub outcome: GenerationOutcome,
}

#[derive(Debug)]
pub enum GenerationOutcome {
    /// Content was generated and persisted at this path.
    Saved(PathBuf),
    /// Generation failed for this platform; the message describes why.
    Failed(String),
}

/// Orchestrates extract → prompt → complete → store for one page.
pub struct GenerationPipeline {
    prompts_dir: PathBuf,
    store: VersionStore,
    completion: Box<dyn CompletionClient>,
    hook: Box<dyn MediaHook>,
}

impl GenerationPipeline {
    pub fn new(
        prompts_dir: impl Into<PathBuf>,
        store: VersionStore,
        completion: Box<dyn CompletionClient>,
        hook: Box<dyn MediaHook>,
    ) -> Self {
        GenerationPipeline {
            prompts_dir: prompts_dir.into(),
            store,
            completion,
            hook,
        }
    }

    /// Generate and save content for each platform. Platforms are
    /// processed independently: a service failure for one is recorded and
    /// the loop continues.
    pub async fn process_page(
        &self,
        page_path: &Path,
        platforms: &[String],
        strip_date_prefix: bool,
    ) -> Result<GenerationReport, ExtractError> {
        let page = extract_page(page_path, strip_date_prefix)?;
        info!(
            page_name = %page.page_name,
            platforms = platforms.len(),
            "Starting content generation for page"
        );

        let mut entries = Vec::new();
        for platform in platforms {
            let outcome = self.generate_one(&page.page_name, platform, &page.body).await;
            match &outcome {
                GenerationOutcome::Saved(path) => info!(
                    platform = %platform,
                    path = %path.display(),
                    "Generated content saved"
                ),
                GenerationOutcome::Failed(reason) => error!(
                    platform = %platform,
                    reason = %reason,
                    "Generation failed for platform, continuing with the rest"
                ),
            }
            entries.push(GenerationEntry {
                platform: platform.clone(),
                outcome,
            });
        }

        Ok(GenerationReport {
            page_name: page.page_name,
            entries,
        })
    }

    async fn generate_one(
        &self,
        page_name: &str,
        platform: &str,
        body: &str,
    ) -> GenerationOutcome {
        let prompt = match resolve_prompt(&self.prompts_dir, platform, body) {
            Ok(prompt) => prompt,
            Err(e) => return GenerationOutcome::Failed(format!("prompt resolution failed: {e}")),
        };
        let summary = match self.completion.complete(&prompt).await {
            Ok(summary) => summary,
            Err(e) => return GenerationOutcome::Failed(format!("completion failed: {e}")),
        };
        match self
            .store
            .save_version(page_name, platform, &summary, self.hook.as_ref())
            .await
        {
            Ok(path) => GenerationOutcome::Saved(path),
            Err(e) => GenerationOutcome::Failed(format!("save failed: {e}")),
        }
    }
}
