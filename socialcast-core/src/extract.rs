//! Content Extractor: splits a source page into front-matter metadata and
//! raw body text.
//!
//! The body is kept as raw markdown, not rendered to HTML, so the
//! summarization step receives the page without lossy transformation.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Mapping;
use tracing::{debug, error};

/// Delimiter separating the front-matter block from the body.
pub const FRONT_MATTER_DELIMITER: &str = "---";

/// A source content document, immutable once read.
#[derive(Debug, Clone)]
pub struct Page {
    pub path: PathBuf,
    pub page_name: String,
    pub front_matter: Mapping,
    pub body: String,
}

#[derive(Debug)]
pub enum ExtractError {
    Io(std::io::Error),
    /// The front-matter block is not valid YAML.
    FrontMatter(serde_yaml::Error),
    /// The front-matter block parsed, but is not a key-value mapping.
    NotAMapping,
}

impl From<std::io::Error> for ExtractError {
    fn from(e: std::io::Error) -> Self {
        ExtractError::Io(e)
    }
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::Io(e) => write!(f, "failed to read page: {e}"),
            ExtractError::FrontMatter(e) => write!(f, "failed to parse front matter: {e}"),
            ExtractError::NotAMapping => write!(f, "front matter is not a key-value mapping"),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Read and split a page document.
///
/// With `strip_date_prefix`, a leading `YYYY-MM-DD-` segment is removed
/// from the derived page name.
pub fn extract_page(path: &Path, strip_date_prefix: bool) -> Result<Page, ExtractError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        error!(error = ?e, path = %path.display(), "Failed to read page document");
        ExtractError::Io(e)
    })?;
    let (front_matter, body) = split_front_matter(&raw)?;
    let page_name = page_name_from_path(path, strip_date_prefix);
    debug!(
        page_name = %page_name,
        front_matter_keys = front_matter.len(),
        body_len = body.len(),
        "Extracted page"
    );
    Ok(Page {
        path: path.to_path_buf(),
        page_name,
        front_matter,
        body,
    })
}

/// Split a document on the front-matter delimiter.
///
/// If at least two delimiter occurrences are found, the first segment is
/// parsed as a YAML mapping and everything after the second delimiter is
/// the body (trimmed). Otherwise the whole document is the body with empty
/// metadata. A malformed metadata block is an explicit error, never
/// silently empty metadata.
pub fn split_front_matter(raw: &str) -> Result<(Mapping, String), ExtractError> {
    let parts: Vec<&str> = raw.splitn(3, FRONT_MATTER_DELIMITER).collect();
    if parts.len() < 3 {
        return Ok((Mapping::new(), raw.to_owned()));
    }
    let meta_block = parts[1];
    let front_matter = if meta_block.trim().is_empty() {
        Mapping::new()
    } else {
        let value: serde_yaml::Value = serde_yaml::from_str(meta_block).map_err(|e| {
            error!(error = %e, "Front matter block is not valid YAML");
            ExtractError::FrontMatter(e)
        })?;
        match value {
            serde_yaml::Value::Mapping(map) => map,
            serde_yaml::Value::Null => Mapping::new(),
            other => {
                error!(parsed = ?other, "Front matter parsed to a non-mapping value");
                return Err(ExtractError::NotAMapping);
            }
        }
    };
    let body = parts[2].trim().to_owned();
    Ok((front_matter, body))
}

/// Derive the page name from a document path: the filename stem, optionally
/// with a leading `YYYY-MM-DD-` date prefix stripped.
pub fn page_name_from_path(path: &Path, strip_date_prefix: bool) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if strip_date_prefix {
        strip_leading_date(&stem).to_owned()
    } else {
        stem
    }
}

fn strip_leading_date(name: &str) -> &str {
    let bytes = name.as_bytes();
    // YYYY-MM-DD- is 11 bytes: digits at 0..4, 5..7, 8..10, dashes between.
    if bytes.len() > 11
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit)
        && bytes[10] == b'-'
    {
        &name[11..]
    } else {
        name
    }
}
