//! Version Store: persists each generated summary under an
//! auto-incrementing version directory per (page, platform).
//!
//! Layout: `<root>/<page_name>/<platform>/v<N>/content.txt`, with optional
//! media files next to it once the media hook has run. Versions are
//! immutable once created: regenerating produces a new version, never an
//! overwrite. Concurrent invocations over the same page/platform directory
//! are not coordinated; callers must run the store sequentially.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::contract::MediaHook;

/// Filename of the generated text inside a version directory.
pub const CONTENT_FILE: &str = "content.txt";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    /// A version directory's `content.txt` already exists; versions are
    /// append-only and a second write is not a supported operation.
    VersionSealed(PathBuf),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "version store I/O error: {e}"),
            StoreError::VersionSealed(path) => {
                write!(f, "refusing to overwrite existing version content at {}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Owns the on-disk version directories under a configured root.
pub struct VersionStore {
    root: PathBuf,
}

impl VersionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        VersionStore { root: root.into() }
    }

    /// Directory holding all versions for a (page, platform) pair.
    pub fn platform_dir(&self, page_name: &str, platform: &str) -> PathBuf {
        self.root.join(page_name).join(platform)
    }

    /// Highest existing version number for a (page, platform) pair, or
    /// `None` if no well-formed `v<integer>` directory exists yet.
    /// Malformed names are ignored.
    pub fn latest_version(&self, page_name: &str, platform: &str) -> std::io::Result<Option<u32>> {
        let dir = self.platform_dir(page_name, platform);
        if !dir.exists() {
            return Ok(None);
        }
        let mut latest = None;
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(number) = parse_version_name(&name.to_string_lossy()) else {
                debug!(name = %name.to_string_lossy(), "Ignoring malformed version directory name");
                continue;
            };
            latest = Some(latest.map_or(number, |l: u32| l.max(number)));
        }
        Ok(latest)
    }

    /// Create and return the next version directory for a (page, platform)
    /// pair: `v<max + 1>`, or `v1` if none exist. Gaps from manual deletion
    /// do not get reused.
    pub fn next_version_dir(&self, page_name: &str, platform: &str) -> std::io::Result<PathBuf> {
        let next = self.latest_version(page_name, platform)?.unwrap_or(0) + 1;
        let dir = self.platform_dir(page_name, platform).join(format!("v{next}"));
        fs::create_dir_all(&dir)?;
        info!(version = next, dir = %dir.display(), "Created new version directory");
        Ok(dir)
    }

    /// Write `content.txt` into a freshly created version directory.
    /// Exactly one write per version: an existing content file is an error.
    pub fn write_content(&self, version_dir: &Path, text: &str) -> Result<PathBuf, StoreError> {
        let path = version_dir.join(CONTENT_FILE);
        if path.exists() {
            error!(path = %path.display(), "Version already has content");
            return Err(StoreError::VersionSealed(path));
        }
        fs::write(&path, text)?;
        debug!(path = %path.display(), bytes = text.len(), "Wrote version content");
        Ok(path)
    }

    /// Read a version's content back, byte-identical to what was written.
    pub fn read_content(&self, version_dir: &Path) -> std::io::Result<String> {
        fs::read_to_string(version_dir.join(CONTENT_FILE))
    }

    /// Persist a new version of generated text and trigger the media hook
    /// for it. A hook failure is logged and does not fail the save: the
    /// text content persists even if media generation fails.
    pub async fn save_version(
        &self,
        page_name: &str,
        platform: &str,
        text: &str,
        hook: &dyn MediaHook,
    ) -> Result<PathBuf, StoreError> {
        let version_dir = self.next_version_dir(page_name, platform)?;
        let content_path = self.write_content(&version_dir, text)?;
        match hook.attach_media(&version_dir).await {
            Ok(()) => {
                info!(
                    page_name,
                    platform,
                    version_dir = %version_dir.display(),
                    "Media hook completed for new version"
                );
            }
            Err(e) => {
                warn!(
                    error = %e,
                    page_name,
                    platform,
                    version_dir = %version_dir.display(),
                    "Media hook failed, keeping text content"
                );
            }
        }
        Ok(content_path)
    }
}

fn parse_version_name(name: &str) -> Option<u32> {
    name.strip_prefix('v')?.parse().ok()
}
