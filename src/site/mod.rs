pub mod assembler;
pub mod feed;
pub mod search;
pub mod templates;

use log::{debug, info};
use rayon::prelude::*;

use crate::config::SiteConfig;
use crate::content::discover_posts;
use crate::markdown::MarkdownPipeline;
use crate::plugins::PluginRegistry;
use crate::taxonomy::TaxonomyIndex;
use crate::utils::error::{BoxResult, BuildReport};

/// Run the full build pipeline for one configuration.
///
/// Author errors are collected across discovery and rendering; in strict
/// mode they abort the build before a single output file is touched, so
/// a previous good build stays intact. In lenient mode they are logged
/// and the affected content is skipped or passed through.
pub fn build_site(config: &SiteConfig) -> BoxResult<()> {
    let mut report = BuildReport::new();

    let registry = PluginRegistry::from_config(config)?;
    let blog = registry.blog();
    let posts_dir = config.source.join(&blog.directory);

    let mut posts = discover_posts(config, &posts_dir, &mut report)?;
    info!("Rendering {} posts", posts.len());

    let pipeline = MarkdownPipeline::from_config(config);
    let rendered: Vec<_> = posts
        .par_iter()
        .map(|post| {
            let (html, errors) = pipeline.render(&post.body, &post.source_path);
            let teaser_html = pipeline.render_teaser(&post.teaser, &post.source_path);
            (html, teaser_html, errors)
        })
        .collect();
    for (post, (html, teaser_html, errors)) in posts.iter_mut().zip(rendered) {
        post.html = html;
        post.teaser_html = teaser_html;
        for error in errors {
            report.push(error);
        }
    }

    report.finish(config.strict)?;

    let taxonomy = TaxonomyIndex::build(&posts);
    debug!(
        "Taxonomy: {} categories, {} tags",
        taxonomy.categories.len(),
        taxonomy.tags.len()
    );

    assembler::assemble(config, &posts, &taxonomy, &registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fs::write_file;
    use std::fs;

    fn write_config(dir: &std::path::Path, extra: &str) -> SiteConfig {
        let yaml = format!("site_name: Test\n{}", extra);
        write_file(dir.join("inkpress.yml"), &yaml).unwrap();
        let mut config = crate::config::load_config(dir, None, false).unwrap();
        config.source = dir.to_path_buf();
        config.destination = dir.join("site");
        config
    }

    fn write_post(dir: &std::path::Path, name: &str, front: &str, body: &str) {
        let content = format!("---\n{}\n---\n\n{}\n", front, body);
        write_file(dir.join("posts").join(name), &content).unwrap();
    }

    #[test]
    fn test_end_to_end_build() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "");
        write_post(
            dir.path(),
            "2024-05-04-hello.md",
            "title: Hello\ndate: 2024-05-04\ntags: [intro]",
            "First paragraph.\n\n<!-- more -->\n\nSecond paragraph.",
        );

        build_site(&config).unwrap();

        let home = fs::read_to_string(config.destination.join("index.html")).unwrap();
        assert!(home.contains("Hello"));
        assert!(home.contains("First paragraph."));
        // Teaser cuts before the marker
        assert!(!home.contains("Second paragraph."));

        let post = fs::read_to_string(config.destination.join("posts/hello/index.html")).unwrap();
        assert!(post.contains("Second paragraph."));
        assert!(fs::metadata(config.destination.join("tags/intro/index.html")).is_ok());
    }

    #[test]
    fn test_strict_mode_writes_nothing_on_author_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "strict: true\n");
        write_post(
            dir.path(),
            "2024-05-04-good.md",
            "title: Good\ndate: 2024-05-04",
            "Fine.",
        );
        // No date field at all
        write_post(dir.path(), "2024-05-05-bad.md", "title: Bad", "Broken.");

        assert!(build_site(&config).is_err());
        assert!(!config.destination.exists());
        assert!(!assembler::staging_path(&config.destination).exists());
    }

    #[test]
    fn test_lenient_mode_skips_broken_posts() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "");
        write_post(
            dir.path(),
            "2024-05-04-good.md",
            "title: Good\ndate: 2024-05-04",
            "Fine.",
        );
        write_post(dir.path(), "2024-05-05-bad.md", "title: Bad", "Broken.");

        build_site(&config).unwrap();
        let home = fs::read_to_string(config.destination.join("index.html")).unwrap();
        assert!(home.contains("Good"));
        assert!(!home.contains("Bad"));
    }

    #[test]
    fn test_rebuild_replaces_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "");
        write_post(
            dir.path(),
            "2024-05-04-first.md",
            "title: First\ndate: 2024-05-04",
            "One.",
        );
        build_site(&config).unwrap();
        assert!(config.destination.join("posts/first/index.html").exists());

        fs::remove_file(dir.path().join("posts/2024-05-04-first.md")).unwrap();
        write_post(
            dir.path(),
            "2024-05-05-second.md",
            "title: Second\ndate: 2024-05-05",
            "Two.",
        );
        build_site(&config).unwrap();

        // The removed post leaves no stale page behind
        assert!(!config.destination.join("posts/first/index.html").exists());
        assert!(config.destination.join("posts/second/index.html").exists());
    }
}
