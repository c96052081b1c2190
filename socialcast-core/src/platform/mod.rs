//! Platform variants and the registry dispatching to them.
//!
//! Adding a platform means implementing [`Platform`](crate::contract::Platform)
//! for the new variant and registering it at process start; the dispatch
//! logic never changes.

mod file;
mod x;

pub use file::FilePlatform;
pub use x::XPlatform;

use std::collections::BTreeMap;

use tracing::info;

use crate::config::XCredentials;
use crate::contract::Platform;

/// Default target set for content generation: the live networks we write
/// copy for. The file sink is a posting/testing vehicle, not a copy target.
pub const DEFAULT_GENERATION_PLATFORMS: [&str; 1] = [XPlatform::KEY];

/// Name → variant mapping, assembled once at process start.
pub struct PlatformRegistry {
    platforms: BTreeMap<String, Box<dyn Platform>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        PlatformRegistry {
            platforms: BTreeMap::new(),
        }
    }

    /// The standard posting registry: the live X variant plus the local
    /// file sink.
    pub fn standard(credentials: XCredentials, file_output_dir: impl Into<std::path::PathBuf>) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(XPlatform::new(credentials)));
        registry.register(Box::new(FilePlatform::new(file_output_dir)));
        registry
    }

    /// A dry-run registry: every live platform key is served by a file
    /// sink, so platform folders match identically without any network
    /// credentials.
    pub fn dry_run(file_output_dir: impl Into<std::path::PathBuf>) -> Self {
        let output_dir = file_output_dir.into();
        let mut registry = Self::new();
        for key in DEFAULT_GENERATION_PLATFORMS {
            registry.register(Box::new(
                FilePlatform::new(output_dir.clone()).with_key(key),
            ));
        }
        registry.register(Box::new(FilePlatform::new(output_dir)));
        registry
    }

    pub fn register(&mut self, platform: Box<dyn Platform>) {
        info!(platform = platform.key(), "Registered platform");
        self.platforms.insert(platform.key().to_owned(), platform);
    }

    pub fn get(&self, key: &str) -> Option<&dyn Platform> {
        self.platforms.get(key).map(|p| p.as_ref())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.platforms.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}
