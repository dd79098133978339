use std::path::{Path, PathBuf};
use lazy_static::lazy_static;
use regex::Regex;

use crate::config::{NamedEntry, SiteConfig};
use crate::markdown::engine;
use crate::markdown::stages::admonitions::{self, Marker};
use crate::markdown::stages::{headings, highlight::Highlighter, snippets};
use crate::utils::error::BuildError;

lazy_static! {
    static ref FENCE: Regex = Regex::new(r"^(\s*)(```|~~~)").unwrap();
}

/// Ordered markdown extension pipeline.
///
/// The configuration only toggles extensions; the application order is
/// fixed here because stages are order-sensitive: snippet inclusion and
/// admonitions rewrite raw text before the CommonMark pass, syntax
/// highlighting consumes the escaped fenced blocks it emits, and heading
/// anchors run last over the final markup.
pub struct MarkdownPipeline {
    snippets_enabled: bool,
    snippet_base: PathBuf,
    admonition_enabled: bool,
    details_enabled: bool,
    highlighter: Option<Highlighter>,
    /// Some(permalink) when heading anchors are enabled
    toc: Option<bool>,
}

impl MarkdownPipeline {
    /// Build the pipeline from the enabled extension set
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut pipeline = MarkdownPipeline {
            snippets_enabled: false,
            snippet_base: config.source.clone(),
            admonition_enabled: false,
            details_enabled: false,
            highlighter: None,
            toc: None,
        };

        for entry in &config.markdown_extensions {
            match entry.name() {
                Some("snippets") => {
                    pipeline.snippets_enabled = true;
                    if let Some(base) = str_option(entry, "base_path") {
                        pipeline.snippet_base = config.source.join(base);
                    }
                }
                Some("admonition") => pipeline.admonition_enabled = true,
                Some("details") => pipeline.details_enabled = true,
                Some("highlight") => {
                    pipeline.highlighter =
                        Some(Highlighter::new(bool_option(entry, "anchor_linenums")));
                }
                Some("toc") => pipeline.toc = Some(flag_option(entry, "permalink")),
                // inline code needs no stage of its own; unknown names
                // were already flagged by config validation
                _ => {}
            }
        }

        pipeline
    }

    /// Render one markdown body to HTML.
    ///
    /// Pure apart from snippet file reads; identical input and
    /// configuration always yield byte-identical output. Recoverable
    /// problems are returned alongside the best-effort HTML.
    pub fn render(&self, body: &str, source_path: &Path) -> (String, Vec<BuildError>) {
        let mut errors = Vec::new();

        self.flag_disabled_syntax(body, source_path, &mut errors);

        let markdown = if self.snippets_enabled {
            snippets::expand(body, &self.snippet_base, source_path, &mut errors)
        } else {
            body.to_string()
        };

        let mut html = self.render_blocks(&markdown);

        if let Some(highlighter) = &self.highlighter {
            html = highlighter.highlight_document(&html, source_path, &mut errors);
        }

        if let Some(permalink) = self.toc {
            html = headings::add_anchors(&html, permalink);
        }

        (html, errors)
    }

    /// Render a teaser for list views.
    ///
    /// Same stages as `render` except heading anchors: several teasers
    /// share one page, so anchor ids would collide there. A teaser is a
    /// prefix of its body, so its problems are reported when the full
    /// body renders and are dropped here.
    pub fn render_teaser(&self, body: &str, source_path: &Path) -> String {
        let mut errors = Vec::new();

        let markdown = if self.snippets_enabled {
            snippets::expand(body, &self.snippet_base, source_path, &mut errors)
        } else {
            body.to_string()
        };

        let mut html = self.render_blocks(&markdown);

        if let Some(highlighter) = &self.highlighter {
            html = highlighter.highlight_document(&html, source_path, &mut errors);
        }

        html
    }

    /// Report extension syntax whose extension is disabled. The marker
    /// stays literal either way; strict builds turn these into failures.
    fn flag_disabled_syntax(&self, body: &str, source_path: &Path, errors: &mut Vec<BuildError>) {
        let mut in_fence = false;
        for (idx, line) in body.lines().enumerate() {
            if FENCE.is_match(line) {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }

            let disabled_extension = match admonitions::classify(line) {
                Some(Marker::Admonition) if !self.admonition_enabled => Some("admonition"),
                Some(Marker::Details) if !self.details_enabled => Some("details"),
                None if !self.snippets_enabled && snippets::is_marker(line) => Some("snippets"),
                _ => None,
            };

            if let Some(name) = disabled_extension {
                errors.push(BuildError::Author {
                    path: source_path.to_path_buf(),
                    line: Some(idx + 1),
                    message: format!(
                        "'{}' syntax used but the extension is not enabled; kept as literal text",
                        name
                    ),
                });
            }
        }
    }

    /// Block-level pass: admonition containers (recursing for their
    /// bodies) followed by the CommonMark render. Containers travel
    /// through the CommonMark pass as placeholders and are substituted
    /// back afterwards, so their inner HTML is carried verbatim.
    fn render_blocks(&self, markdown: &str) -> String {
        if !self.admonition_enabled && !self.details_enabled {
            return engine::render_markdown(markdown);
        }

        let mut containers = Vec::new();
        let expanded = admonitions::transform(
            markdown,
            self.admonition_enabled,
            self.details_enabled,
            |inner| self.render_blocks(inner),
            &mut containers,
        );
        admonitions::restore(&engine::render_markdown(&expanded), &containers)
    }
}

fn bool_option(entry: &NamedEntry, key: &str) -> bool {
    entry
        .options()
        .and_then(|v| v.get(key))
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// A flag that may be a bool or a marker string (e.g. `permalink: "¶"`)
fn flag_option(entry: &NamedEntry, key: &str) -> bool {
    match entry.options().and_then(|v| v.get(key)) {
        Some(serde_yaml::Value::Bool(b)) => *b,
        Some(serde_yaml::Value::String(_)) => true,
        _ => false,
    }
}

fn str_option<'a>(entry: &'a NamedEntry, key: &str) -> Option<&'a str> {
    entry.options().and_then(|v| v.get(key)).and_then(|v| v.as_str())
}
