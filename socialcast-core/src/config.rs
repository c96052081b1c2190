//! Explicit configuration structs for every pipeline component.
//!
//! Components never perform ad-hoc environment lookups; the `from_env`
//! constructors here are called exactly once at process entry (by the CLI)
//! and the resulting structs are passed into each component's constructor.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info};

/// Environment variable holding the completion/image service API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variables holding the X posting credentials.
pub const X_CREDENTIAL_VARS: [&str; 4] = [
    "X_API_KEY",
    "X_API_SECRET",
    "X_ACCESS_TOKEN",
    "X_ACCESS_SECRET",
];

/// Configuration failure: required environment variables are absent.
/// Fatal, raised before any work begins for the affected component.
#[derive(Debug)]
pub enum ConfigError {
    MissingEnv(&'static str),
    MissingCredentials(Vec<&'static str>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingEnv(var) => {
                write!(f, "{var} environment variable is not set")
            }
            ConfigError::MissingCredentials(vars) => {
                write!(f, "Missing credentials: {}", vars.join(", "))
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Sampling parameters for the completion service.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GeneratorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        GeneratorConfig {
            api_key: api_key.into(),
            model: "gpt-4o".to_owned(),
            max_tokens: 400,
            temperature: 0.7,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = require_env(API_KEY_VAR)?;
        info!(model = "gpt-4o", "Initialized generator config from environment");
        Ok(Self::new(api_key))
    }
}

/// Parameters for the image generation service.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub api_key: String,
    pub model: String,
    pub size: String,
    pub quality: String,
}

impl ImageConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        ImageConfig {
            api_key: api_key.into(),
            model: "dall-e-3".to_owned(),
            size: "1024x1024".to_owned(),
            quality: "standard".to_owned(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = require_env(API_KEY_VAR)?;
        info!(model = "dall-e-3", "Initialized image config from environment");
        Ok(Self::new(api_key))
    }
}

/// Where generated content versions and prompt templates live.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root of the version tree: `<root>/<page_name>/<platform>/v<N>/`.
    pub root: PathBuf,
    /// Directory holding per-platform prompt template files.
    pub prompts_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            root: PathBuf::from("social_media"),
            prompts_dir: PathBuf::from("prompts"),
        }
    }
}

/// Poster run parameters.
#[derive(Debug, Clone)]
pub struct PosterConfig {
    /// Run-level result file, overwritten each run.
    pub output_path: PathBuf,
    /// Fixed wait between posting operations, to respect third-party rate
    /// limits. A deliberate blocking wait, not a scheduled task.
    pub post_delay: Duration,
}

impl Default for PosterConfig {
    fn default() -> Self {
        PosterConfig {
            output_path: PathBuf::from("posting_results.json"),
            post_delay: Duration::from_secs(5),
        }
    }
}

/// OAuth 1.0a user-context credentials for the X API.
///
/// Checked eagerly: `from_env` fails fast, listing every missing variable,
/// before any posting attempt.
#[derive(Debug, Clone)]
pub struct XCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl XCredentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: Vec<Option<String>> = X_CREDENTIAL_VARS
            .iter()
            .map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
            .collect();
        let missing: Vec<&'static str> = X_CREDENTIAL_VARS
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(var, _)| *var)
            .collect();
        if !missing.is_empty() {
            error!(missing = ?missing, "X credentials missing in environment");
            return Err(ConfigError::MissingCredentials(missing));
        }
        let mut values = values.into_iter().flatten();
        info!("Initialized X credentials from environment");
        Ok(XCredentials {
            api_key: values.next().unwrap_or_default(),
            api_secret: values.next().unwrap_or_default(),
            access_token: values.next().unwrap_or_default(),
            access_secret: values.next().unwrap_or_default(),
        })
    }
}

fn require_env(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => {
            error!(var, "Required environment variable missing");
            Err(ConfigError::MissingEnv(var))
        }
    }
}
