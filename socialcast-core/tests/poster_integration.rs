use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use socialcast_core::config::PosterConfig;
use socialcast_core::contract::{Platform, PostResult, PostStatus};
use socialcast_core::platform::PlatformRegistry;
use socialcast_core::poster::{Poster, PLATFORM_RESULT_FILE};
use tempfile::tempdir;

/// Test double: records every call and succeeds or fails on demand.
struct ScriptedPlatform {
    key: &'static str,
    fail: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPlatform {
    fn new(key: &'static str, fail: bool, calls: Arc<Mutex<Vec<String>>>) -> Box<Self> {
        Box::new(ScriptedPlatform { key, fail, calls })
    }
}

#[async_trait]
impl Platform for ScriptedPlatform {
    fn key(&self) -> &str {
        self.key
    }

    async fn post_content(
        &self,
        content: &str,
        page_name: &str,
        _platform_folder: Option<&Path>,
    ) -> PostResult {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{page_name}", self.key));
        if self.fail {
            PostResult::failure(self.key, page_name, content, "simulated network outage")
        } else {
            PostResult::success(
                self.key,
                page_name,
                content,
                "post-1",
                format!("https://example.com/{page_name}"),
            )
        }
    }
}

fn page_folder_with(platforms: &[&str]) -> tempfile::TempDir {
    let tmp = tempdir().unwrap();
    let page = tmp.path().join("my-page");
    for platform in platforms {
        let dir = page.join(platform);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("content.txt"), format!("Post for {platform}\n")).unwrap();
    }
    tmp
}

fn fast_config(output: &Path) -> PosterConfig {
    PosterConfig {
        output_path: output.to_path_buf(),
        post_delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn one_failing_platform_does_not_abort_the_others() {
    let tmp = page_folder_with(&["Alpha", "Beta", "Gamma"]);
    let page = tmp.path().join("my-page");
    let output = tmp.path().join("posting_results.json");

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut registry = PlatformRegistry::new();
    registry.register(ScriptedPlatform::new("Alpha", false, calls.clone()));
    registry.register(ScriptedPlatform::new("Beta", true, calls.clone()));
    registry.register(ScriptedPlatform::new("Gamma", false, calls.clone()));

    let mut poster = Poster::new(registry, fast_config(&output));
    let results = poster.post_from_folder(&page).await.expect("Run should succeed");

    assert_eq!(results.len(), 3, "Every valid platform folder must be attempted");
    assert_eq!(
        calls.lock().unwrap().len(),
        3,
        "Each platform must be attempted exactly once"
    );

    let failing: Vec<&PostResult> = results
        .iter()
        .filter(|r| r.status == PostStatus::Error)
        .collect();
    assert_eq!(failing.len(), 1);
    assert_eq!(failing[0].platform, "Beta");
    assert!(
        !failing[0].error.as_deref().unwrap_or("").is_empty(),
        "Error results must carry a non-empty message"
    );
    assert_eq!(
        results.iter().filter(|r| r.is_success()).count(),
        2,
        "The other two platforms still receive results"
    );
}

#[tokio::test]
async fn results_are_flushed_per_folder_and_per_run() {
    let tmp = page_folder_with(&["Alpha"]);
    let page = tmp.path().join("my-page");
    let output = tmp.path().join("posting_results.json");

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut registry = PlatformRegistry::new();
    registry.register(ScriptedPlatform::new("Alpha", false, calls));

    let mut poster = Poster::new(registry, fast_config(&output));
    poster.post_from_folder(&page).await.unwrap();

    let run_level: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert!(run_level.is_array(), "Run-level file is a JSON array");
    assert_eq!(run_level.as_array().unwrap().len(), 1);

    let per_folder: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(page.join("Alpha").join(PLATFORM_RESULT_FILE)).unwrap(),
    )
    .unwrap();
    assert!(
        per_folder.is_object(),
        "Per-platform file is a single PostResult object"
    );
    assert_eq!(per_folder["platform"], "Alpha");
    assert_eq!(per_folder["status"], "success");
}

#[tokio::test]
async fn missing_content_and_unknown_platforms_are_skipped_not_failed() {
    let tmp = tempdir().unwrap();
    let page = tmp.path().join("my-page");
    fs::create_dir_all(page.join("Alpha")).unwrap(); // no content.txt
    fs::create_dir_all(page.join("Mystery")).unwrap();
    fs::write(page.join("Mystery").join("content.txt"), "orphan").unwrap();
    fs::write(page.join("stray.txt"), "not a folder").unwrap();
    let output = tmp.path().join("posting_results.json");

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut registry = PlatformRegistry::new();
    registry.register(ScriptedPlatform::new("Alpha", false, calls.clone()));

    let mut poster = Poster::new(registry, fast_config(&output));
    let results = poster.post_from_folder(&page).await.expect("Skips are not errors");

    assert!(results.is_empty(), "Nothing postable, nothing attempted");
    assert!(calls.lock().unwrap().is_empty());
    let run_level: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(run_level, serde_json::json!([]));
}

#[tokio::test]
async fn reruns_are_not_deduplicated() {
    let tmp = page_folder_with(&["Alpha"]);
    let page = tmp.path().join("my-page");
    let output = tmp.path().join("posting_results.json");

    for run in 0..2 {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = PlatformRegistry::new();
        registry.register(ScriptedPlatform::new("Alpha", false, calls.clone()));
        let mut poster = Poster::new(registry, fast_config(&output));

        let results = poster.post_from_folder(&page).await.unwrap();
        assert_eq!(
            results.len(),
            1,
            "Run {run}: unchanged content must still produce a fresh PostResult"
        );
        assert_eq!(calls.lock().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn specific_file_mode_posts_only_matching_content_files() {
    let tmp = page_folder_with(&["Alpha", "Beta"]);
    let page = tmp.path().join("my-page");
    fs::write(page.join("Alpha").join("notes.txt"), "not content").unwrap();
    let output = tmp.path().join("posting_results.json");

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut registry = PlatformRegistry::new();
    registry.register(ScriptedPlatform::new("Alpha", false, calls.clone()));
    registry.register(ScriptedPlatform::new("Beta", false, calls.clone()));

    let files: Vec<PathBuf> = vec![
        page.join("Alpha").join("content.txt"),
        page.join("Alpha").join("notes.txt"),      // not a content file
        page.join("Unknown").join("content.txt"),  // unregistered platform
    ];

    let mut poster = Poster::new(registry, fast_config(&output));
    let results = poster.post_files(&files).await.unwrap();

    assert_eq!(results.len(), 1, "Only the matching content file is posted");
    assert_eq!(results[0].platform, "Alpha");
    assert_eq!(results[0].page_name, "my-page");
    assert_eq!(calls.lock().unwrap().as_slice(), ["Alpha:my-page"]);
}

#[tokio::test]
async fn posted_text_is_trimmed_content() {
    let tmp = page_folder_with(&["Alpha"]);
    let page = tmp.path().join("my-page");
    let output = tmp.path().join("posting_results.json");

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut registry = PlatformRegistry::new();
    registry.register(ScriptedPlatform::new("Alpha", false, calls));

    let mut poster = Poster::new(registry, fast_config(&output));
    let results = poster.post_from_folder(&page).await.unwrap();

    assert_eq!(
        results[0].text, "Post for Alpha",
        "Content is trimmed before posting"
    );
}
