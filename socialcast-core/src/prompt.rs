//! Prompt Resolver: builds the generation prompt for a target platform.
//!
//! A template file `<prompts_dir>/<platform>.txt` takes precedence; its
//! `{content}` placeholder is substituted with the page body. A template
//! without the placeholder is used verbatim. Without a template file, a
//! generic default prompt embeds the platform name and body.

use std::fs;
use std::path::Path;

use tracing::debug;

/// Placeholder substituted with the page body in template files.
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// Resolve the prompt for `platform` over `content`.
pub fn resolve_prompt(
    prompts_dir: &Path,
    platform: &str,
    content: &str,
) -> Result<String, std::io::Error> {
    let template_path = prompts_dir.join(format!("{platform}.txt"));
    if template_path.exists() {
        let template = fs::read_to_string(&template_path)?;
        debug!(
            platform,
            template = %template_path.display(),
            "Resolved prompt from template file"
        );
        Ok(template.replace(CONTENT_PLACEHOLDER, content))
    } else {
        debug!(platform, "No template file, using default prompt");
        Ok(default_prompt(platform, content))
    }
}

fn default_prompt(platform: &str, content: &str) -> String {
    format!(
        "Summarize the following blog post into an engaging {platform} post.\n\
         \n\
         Blog Post:\n\
         {content}\n\
         \n\
         {platform} post:\n"
    )
}
