use std::path::PathBuf;

use crate::config::types::NamedEntry;

/// Default source directory
pub fn default_source() -> PathBuf {
    PathBuf::from(".")
}

/// Default destination directory
pub fn default_destination() -> PathBuf {
    PathBuf::from("site")
}

/// Default site name
pub fn default_site_name() -> String {
    "My Blog".to_string()
}

/// Default theme name
pub fn default_theme_name() -> String {
    "ink".to_string()
}

/// Default publish branch
pub fn default_remote_branch() -> String {
    "gh-pages".to_string()
}

/// Markdown extensions enabled when the config lists none
pub fn default_markdown_extensions() -> Vec<NamedEntry> {
    vec![
        NamedEntry::Name("highlight".to_string()),
        NamedEntry::Name("toc".to_string()),
    ]
}

/// Plugins enabled when the config lists none
pub fn default_plugins() -> Vec<NamedEntry> {
    vec![
        NamedEntry::Name("blog".to_string()),
        NamedEntry::Name("search".to_string()),
    ]
}
