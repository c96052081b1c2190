//! CLI interface for socialcast: command parsing, config assembly from
//! the environment, and orchestration.
//!
//! All core business logic (extraction, generation, versioned storage,
//! platform posting) lives in the [`socialcast-core`] crate. This module is
//! strictly CLI glue: it populates the explicit config structs once at
//! process entry and wires the pipeline components together. Core
//! components never read the environment themselves.
//!
//! The async entrypoint [`run`] is separate from `main` so integration
//! tests can invoke it programmatically.
//!
//! [`socialcast-core`]: ../../socialcast-core/

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use socialcast_core::config::{
    GeneratorConfig, ImageConfig, PosterConfig, StoreConfig, XCredentials,
};
use socialcast_core::contract::{MediaHook, NoMediaHook};
use socialcast_core::generate::{GenerationOutcome, GenerationPipeline};
use socialcast_core::image::GeneratedImageHook;
use socialcast_core::openai::{OpenAiCompletionClient, OpenAiImageClient};
use socialcast_core::platform::{PlatformRegistry, DEFAULT_GENERATION_PLATFORMS};
use socialcast_core::poster::Poster;
use socialcast_core::store::VersionStore;

/// CLI for socialcast: generate and publish social media content.
#[derive(Parser)]
#[clap(
    name = "socialcast",
    version,
    about = "Generate versioned social media summaries from site pages and publish them"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate social media content for a source page, one new version
    /// per target platform
    Generate {
        /// Path to the source page (markdown with optional front matter)
        page: PathBuf,
        /// Comma-separated target platforms (default: the live networks)
        #[clap(long, value_delimiter = ',')]
        platforms: Option<Vec<String>>,
        /// Strip a leading YYYY-MM-DD- date prefix from the page name
        #[clap(long)]
        strip_date_prefix: bool,
        /// Skip image generation for the new versions
        #[clap(long)]
        skip_images: bool,
        /// Root directory of the version tree
        #[clap(long, default_value = "social_media")]
        root: PathBuf,
        /// Directory holding per-platform prompt templates
        #[clap(long, default_value = "prompts")]
        prompts_dir: PathBuf,
    },
    /// Post previously generated content from a page folder
    Post {
        /// Page folder whose immediate subdirectories are platform folders
        folder: PathBuf,
        /// Run-level result file, overwritten each run
        #[clap(long, default_value = "posting_results.json")]
        output: PathBuf,
        /// Comma-separated specific content files to post instead of
        /// walking the folder
        #[clap(long, value_delimiter = ',')]
        files: Option<Vec<PathBuf>>,
        /// Seconds to wait between posting operations
        #[clap(long, default_value_t = 5)]
        delay: u64,
        /// Replace every live platform with a local file sink
        #[clap(long)]
        dry_run: bool,
        /// Output directory for the file sink
        #[clap(long, default_value = "output/file_posts")]
        file_output_dir: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            page,
            platforms,
            strip_date_prefix,
            skip_images,
            root,
            prompts_dir,
        } => {
            let store_config = StoreConfig { root, prompts_dir };
            generate(page, platforms, strip_date_prefix, skip_images, store_config).await
        }
        Commands::Post {
            folder,
            output,
            files,
            delay,
            dry_run,
            file_output_dir,
        } => {
            let poster_config = PosterConfig {
                output_path: output,
                post_delay: Duration::from_secs(delay),
            };
            post(folder, files, dry_run, file_output_dir, poster_config).await
        }
    }
}

async fn generate(
    page: PathBuf,
    platforms: Option<Vec<String>>,
    strip_date_prefix: bool,
    skip_images: bool,
    store_config: StoreConfig,
) -> Result<()> {
    let generator_config = GeneratorConfig::from_env()?;
    let hook: Box<dyn MediaHook> = if skip_images {
        Box::new(NoMediaHook)
    } else {
        let image_config = ImageConfig::from_env()?;
        Box::new(GeneratedImageHook::new(
            OpenAiImageClient::new(image_config),
            store_config.prompts_dir.clone(),
        ))
    };
    let pipeline = GenerationPipeline::new(
        store_config.prompts_dir,
        VersionStore::new(store_config.root),
        Box::new(OpenAiCompletionClient::new(generator_config)),
        hook,
    );

    let platforms = platforms.unwrap_or_else(|| {
        DEFAULT_GENERATION_PLATFORMS
            .iter()
            .map(|p| p.to_string())
            .collect()
    });
    tracing::info!(command = "generate", page = %page.display(), ?platforms, "Starting content generation");

    let report = pipeline
        .process_page(&page, &platforms, strip_date_prefix)
        .await?;

    let mut saved = 0;
    for entry in &report.entries {
        match &entry.outcome {
            GenerationOutcome::Saved(path) => {
                saved += 1;
                tracing::info!(platform = %entry.platform, path = %path.display(), "Content saved");
            }
            GenerationOutcome::Failed(reason) => {
                tracing::error!(platform = %entry.platform, reason = %reason, "Content generation failed");
            }
        }
    }
    if saved == 0 && !report.entries.is_empty() {
        anyhow::bail!(
            "content generation failed for every platform of page '{}'",
            report.page_name
        );
    }
    Ok(())
}

async fn post(
    folder: PathBuf,
    files: Option<Vec<PathBuf>>,
    dry_run: bool,
    file_output_dir: PathBuf,
    poster_config: PosterConfig,
) -> Result<()> {
    let registry = if dry_run {
        tracing::info!("Dry run: routing every platform to the file sink");
        PlatformRegistry::dry_run(file_output_dir)
    } else {
        let credentials = XCredentials::from_env()?;
        PlatformRegistry::standard(credentials, file_output_dir)
    };

    let mut poster = Poster::new(registry, poster_config);
    let results = match files {
        Some(files) => poster.post_files(&files).await?,
        None => poster.post_from_folder(&folder).await?,
    };

    let posted = results.iter().filter(|r| r.is_success()).count();
    let failed = results.len() - posted;
    tracing::info!(command = "post", posted, failed, "Posting run complete");
    Ok(())
}
