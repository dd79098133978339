use std::fs;
use std::path::Path;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::content::front_matter::{self, FrontMatter};
use crate::content::post::{slug_from_stem, split_teaser, Post};
use crate::utils::error::{BoxResult, BuildError, BuildReport};
use crate::utils::path::normalize_separators;

lazy_static! {
    /// Post files are date-prefixed Markdown documents
    static ref POST_FILE: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2}-(.+)\.(md|markdown)$").unwrap();
    static ref FIRST_HEADING: Regex = Regex::new(r"(?m)^#\s+(.+)$").unwrap();
}

/// Walk the posts directory and parse every recognized post file.
///
/// Files with malformed front matter or a missing date are recorded in
/// the report as author errors and skipped; the caller decides whether
/// that aborts the build.
pub fn discover_posts(
    config: &SiteConfig,
    posts_dir: &Path,
    report: &mut BuildReport,
) -> BoxResult<Vec<Post>> {
    let mut posts = Vec::new();

    if !posts_dir.is_dir() {
        debug!("Posts directory {} does not exist", posts_dir.display());
        return Ok(posts);
    }

    for entry in WalkDir::new(posts_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file_name = entry.file_name().to_string_lossy();
        if !POST_FILE.is_match(&file_name) {
            continue;
        }

        let rel_path = match entry.path().strip_prefix(&config.source) {
            Ok(rel) => normalize_separators(rel),
            Err(_) => normalize_separators(entry.path()),
        };

        if config
            .exclude
            .iter()
            .any(|pattern| glob_match::glob_match(pattern, &rel_path))
        {
            debug!("Excluding {}", rel_path);
            continue;
        }

        let content = fs::read_to_string(entry.path())?;
        match parse_post(entry.path(), &rel_path, &content) {
            Ok(Some(post)) => posts.push(post),
            Ok(None) => debug!("Skipping draft {}", rel_path),
            Err(err) => report.push(err),
        }
    }

    debug!("Discovered {} posts under {}", posts.len(), posts_dir.display());
    Ok(posts)
}

/// Parse one post file. Returns Ok(None) for drafts.
fn parse_post(path: &Path, rel_path: &str, content: &str) -> Result<Option<Post>, BuildError> {
    let doc = front_matter::extract(content);

    let yaml = doc.front_matter.as_deref().ok_or_else(|| BuildError::Author {
        path: path.to_path_buf(),
        line: Some(1),
        message: "post has no front-matter block".to_string(),
    })?;

    let fm: FrontMatter = front_matter::parse(yaml).map_err(|e| BuildError::Author {
        path: path.to_path_buf(),
        // The serde location is block-relative; the fence is line 1
        line: e.location().map(|loc| loc.line() + 1),
        message: format!("malformed front matter: {}", e),
    })?;

    if fm.draft {
        return Ok(None);
    }

    let date_line = front_matter::key_line(&doc, "date");

    let date = fm.date.as_ref().ok_or_else(|| BuildError::Author {
        path: path.to_path_buf(),
        line: None,
        message: "missing required field 'date'".to_string(),
    })?;

    let created = front_matter::parse_date(date.created()).map_err(|e| BuildError::Author {
        path: path.to_path_buf(),
        line: date_line,
        message: e,
    })?;

    let updated = match date.updated() {
        Some(value) => Some(front_matter::parse_date(value).map_err(|e| BuildError::Author {
            path: path.to_path_buf(),
            line: date_line,
            message: e,
        })?),
        None => None,
    };

    let (teaser, body) = split_teaser(&doc.body);

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let slug = slug_from_stem(&stem);

    let title = fm
        .title
        .or_else(|| {
            FIRST_HEADING
                .captures(&doc.body)
                .map(|c| c[1].trim().to_string())
        })
        .unwrap_or_else(|| slug.replace('-', " "));

    let mut categories = fm.categories;
    categories.sort();
    categories.dedup();
    let mut tags = fm.tags;
    tags.sort();
    tags.dedup();

    Ok(Some(Post {
        source_path: path.to_path_buf(),
        rel_path: rel_path.to_string(),
        title,
        created,
        updated,
        categories,
        tags,
        body,
        teaser,
        html: String::new(),
        teaser_html: String::new(),
        slug,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fs::write_file;

    fn write_post(dir: &Path, name: &str, content: &str) {
        write_file(dir.join("posts").join(name), content).unwrap();
    }

    fn base_config(source: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.source = source.to_path_buf();
        config
    }

    #[test]
    fn test_discovers_date_prefixed_files_only() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "2024-05-04-first.md",
            "---\ndate: 2024-05-04\ntags: [go]\n---\n# First\n\nHello.\n",
        );
        write_post(dir.path(), "notes.md", "# Not a post\n");
        write_post(dir.path(), "2024-05-05-draft.md", "---\ndate: 2024-05-05\ndraft: true\n---\nWip.\n");

        let config = base_config(dir.path());
        let mut report = BuildReport::new();
        let posts = discover_posts(&config, &dir.path().join("posts"), &mut report).unwrap();

        assert_eq!(posts.len(), 1);
        assert!(report.is_empty());
        let post = &posts[0];
        assert_eq!(post.slug, "first");
        assert_eq!(post.title, "First");
        assert_eq!(post.tags, vec!["go"]);
        assert_eq!(post.created.date().to_string(), "2024-05-04");
        assert_eq!(post.url(), "/posts/first/");
    }

    #[test]
    fn test_front_matter_values_taken_literally() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "2024-06-01-second.md",
            "---\ntitle: Custom Title\ndate:\n  created: 2024-06-01\n  updated: 2024-07-15\ncategories: [tooling, go, go]\ntags: [cli, unix]\n---\nBody.\n",
        );

        let config = base_config(dir.path());
        let mut report = BuildReport::new();
        let posts = discover_posts(&config, &dir.path().join("posts"), &mut report).unwrap();

        let post = &posts[0];
        assert_eq!(post.title, "Custom Title");
        assert_eq!(post.categories, vec!["go", "tooling"]);
        assert_eq!(post.tags, vec!["cli", "unix"]);
        assert_eq!(post.updated.unwrap().date().to_string(), "2024-07-15");
    }

    #[test]
    fn test_missing_date_is_author_error() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "2024-05-04-broken.md",
            "---\ntags: [go]\n---\nNo date here.\n",
        );

        let config = base_config(dir.path());
        let mut report = BuildReport::new();
        let posts = discover_posts(&config, &dir.path().join("posts"), &mut report).unwrap();

        assert!(posts.is_empty());
        assert_eq!(report.len(), 1);
        assert!(report.finish(true).is_err());
    }

    #[test]
    fn test_unparsable_date_is_author_error() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "2024-05-04-odd.md",
            "---\ndate: next tuesday\n---\nBody.\n",
        );

        let config = base_config(dir.path());
        let mut report = BuildReport::new();
        discover_posts(&config, &dir.path().join("posts"), &mut report).unwrap();
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_author_error_lines_point_into_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "2024-05-04-odd.md",
            "---\ntitle: Odd\ndate: next tuesday\n---\nBody.\n",
        );

        let config = base_config(dir.path());
        let mut report = BuildReport::new();
        discover_posts(&config, &dir.path().join("posts"), &mut report).unwrap();

        match &report.issues()[0] {
            BuildError::Author { line, message, .. } => {
                // `date:` sits on line 3 of the file
                assert_eq!(*line, Some(3));
                assert!(message.contains("next tuesday"));
            }
            other => panic!("expected Author error, got {:?}", other),
        }
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "2024-05-04-kept.md",
            "---\ndate: 2024-05-04\n---\nKept.\n",
        );
        write_post(
            dir.path(),
            "2024-05-05-skipped.md",
            "---\ndate: 2024-05-05\n---\nSkipped.\n",
        );

        let mut config = base_config(dir.path());
        config.exclude = vec!["posts/*skipped*".to_string()];
        let mut report = BuildReport::new();
        let posts = discover_posts(&config, &dir.path().join("posts"), &mut report).unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "kept");
    }
}
