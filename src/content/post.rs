use std::path::PathBuf;
use chrono::NaiveDateTime;

/// Marker splitting a post body into teaser and full text
pub const TEASER_MARKER: &str = "<!-- more -->";

/// One discovered post.
///
/// Created by discovery, HTML fields populated once by the renderer,
/// read-only afterwards. Taxonomy indices refer to posts by position
/// in the discovered list and never own them.
#[derive(Debug, Clone)]
pub struct Post {
    /// Absolute path of the source file
    pub source_path: PathBuf,
    /// Path relative to the source root, forward slashes
    pub rel_path: String,
    /// Post title
    pub title: String,
    /// Creation date from front matter
    pub created: NaiveDateTime,
    /// Optional update date from front matter
    pub updated: Option<NaiveDateTime>,
    /// Category labels, sorted and deduplicated
    pub categories: Vec<String>,
    /// Tag labels, sorted and deduplicated
    pub tags: Vec<String>,
    /// Raw Markdown body
    pub body: String,
    /// Raw Markdown teaser (body up to the marker, or the whole body)
    pub teaser: String,
    /// Rendered body HTML, populated by the render phase
    pub html: String,
    /// Rendered teaser HTML, populated by the render phase
    pub teaser_html: String,
    /// URL slug derived from the file name
    pub slug: String,
}

impl Post {
    /// Site-relative URL of the post page
    pub fn url(&self) -> String {
        format!("/posts/{}/", self.slug)
    }

    /// Whether the body declares an explicit teaser. The marker itself
    /// is stripped from the body at parse time, so this compares the
    /// two texts instead.
    pub fn has_teaser(&self) -> bool {
        self.teaser != self.body
    }
}

/// Split a body at the teaser marker. Without a marker the whole body
/// doubles as the teaser.
pub fn split_teaser(body: &str) -> (String, String) {
    match body.find(TEASER_MARKER) {
        Some(pos) => {
            let teaser = body[..pos].trim_end().to_string();
            let full = body.replacen(TEASER_MARKER, "", 1);
            (teaser, full)
        }
        None => (body.to_string(), body.to_string()),
    }
}

/// Derive a slug from a post file stem, stripping the date prefix
pub fn slug_from_stem(stem: &str) -> String {
    let without_date = stem
        .splitn(4, '-')
        .nth(3)
        .unwrap_or(stem);
    slug::slugify(without_date)
}
