use std::path::{Path, PathBuf};

/// Join a site-relative URL onto an output root, mapping `/a/b/` to
/// `<root>/a/b/index.html`.
pub fn url_to_output_path(root: &Path, url: &str) -> PathBuf {
    let trimmed = url.trim_matches('/');
    let mut path = root.to_path_buf();
    if !trimmed.is_empty() {
        for segment in trimmed.split('/') {
            path.push(segment);
        }
    }
    if url.ends_with('/') || trimmed.is_empty() {
        path.push("index.html");
    }
    path
}

/// Normalize a source path to forward slashes for pattern matching and URLs
pub fn normalize_separators(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
