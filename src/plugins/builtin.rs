use std::any::Any;
use regex::Regex;
use serde::Deserialize;

use crate::plugins::{BuildPhase, Plugin};

/// Blog plugin: posts directory and which index page families to emit
#[derive(Debug, Clone)]
pub struct BlogPlugin {
    /// Posts directory, relative to the source root
    pub directory: String,
    /// Emit year/month archive pages
    pub archive: bool,
    /// Emit category index pages
    pub categories: bool,
}

impl Default for BlogPlugin {
    fn default() -> Self {
        BlogPlugin {
            directory: "posts".to_string(),
            archive: true,
            categories: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BlogOptions {
    directory: Option<String>,
    archive: Option<bool>,
    categories: Option<bool>,
}

impl Plugin for BlogPlugin {
    fn name(&self) -> &'static str {
        "blog"
    }

    fn configure(&mut self, options: Option<&serde_yaml::Value>) -> Result<(), String> {
        if let Some(value) = options {
            let opts: BlogOptions =
                serde_yaml::from_value(value.clone()).map_err(|e| format!("blog plugin: {}", e))?;
            if let Some(directory) = opts.directory {
                self.directory = directory;
            }
            if let Some(archive) = opts.archive {
                self.archive = archive;
            }
            if let Some(categories) = opts.categories {
                self.categories = categories;
            }
        }
        Ok(())
    }

    fn phase(&self) -> BuildPhase {
        BuildPhase::Discovery
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// RSS plugin: feed path filter and metadata field mapping
#[derive(Debug, Clone)]
pub struct RssPlugin {
    /// Pattern over source-relative paths; only matching posts enter the feed
    pub matcher: Regex,
    /// Front-matter field supplying the creation timestamp
    pub as_creation: String,
    /// Front-matter field supplying the update timestamp, if any
    pub as_update: Option<String>,
    /// Maximum number of feed entries
    pub length: usize,
}

impl Default for RssPlugin {
    fn default() -> Self {
        RssPlugin {
            matcher: Regex::new(".*").expect("wildcard pattern is valid"),
            as_creation: "date".to_string(),
            as_update: None,
            length: 20,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RssOptions {
    match_path: Option<String>,
    date_from_meta: Option<RssDateOptions>,
    length: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RssDateOptions {
    as_creation: Option<String>,
    as_update: Option<String>,
}

impl Plugin for RssPlugin {
    fn name(&self) -> &'static str {
        "rss"
    }

    fn configure(&mut self, options: Option<&serde_yaml::Value>) -> Result<(), String> {
        if let Some(value) = options {
            let opts: RssOptions =
                serde_yaml::from_value(value.clone()).map_err(|e| format!("rss plugin: {}", e))?;
            if let Some(pattern) = opts.match_path {
                self.matcher = Regex::new(&pattern)
                    .map_err(|e| format!("rss plugin: invalid match_path: {}", e))?;
            }
            if let Some(dates) = opts.date_from_meta {
                if let Some(as_creation) = dates.as_creation {
                    self.as_creation = as_creation;
                }
                self.as_update = dates.as_update;
            }
            if let Some(length) = opts.length {
                self.length = length;
            }
        }
        Ok(())
    }

    fn phase(&self) -> BuildPhase {
        BuildPhase::Assembly
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Search plugin: word separator for the index artifact
#[derive(Debug, Clone)]
pub struct SearchPlugin {
    /// Regex splitting page text into indexable words
    pub separator: String,
}

impl Default for SearchPlugin {
    fn default() -> Self {
        SearchPlugin {
            separator: r"[\s\-]+".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchOptions {
    separator: Option<String>,
}

impl Plugin for SearchPlugin {
    fn name(&self) -> &'static str {
        "search"
    }

    fn configure(&mut self, options: Option<&serde_yaml::Value>) -> Result<(), String> {
        if let Some(value) = options {
            let opts: SearchOptions = serde_yaml::from_value(value.clone())
                .map_err(|e| format!("search plugin: {}", e))?;
            if let Some(separator) = opts.separator {
                Regex::new(&separator)
                    .map_err(|e| format!("search plugin: invalid separator: {}", e))?;
                self.separator = separator;
            }
        }
        Ok(())
    }

    fn phase(&self) -> BuildPhase {
        BuildPhase::Assembly
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_options() {
        let mut plugin = BlogPlugin::default();
        let options: serde_yaml::Value =
            serde_yaml::from_str("directory: notes\narchive: false\n").unwrap();
        plugin.configure(Some(&options)).unwrap();
        assert_eq!(plugin.directory, "notes");
        assert!(!plugin.archive);
        assert!(plugin.categories);
    }

    #[test]
    fn test_rss_options() {
        let mut plugin = RssPlugin::default();
        let options: serde_yaml::Value = serde_yaml::from_str(
            "match_path: \"posts/.*\"\ndate_from_meta:\n  as_creation: date\n  as_update: updated\nlength: 5\n",
        )
        .unwrap();
        plugin.configure(Some(&options)).unwrap();
        assert!(plugin.matcher.is_match("posts/2024-01-01-a.md"));
        assert!(!plugin.matcher.is_match("pages/about.md"));
        assert_eq!(plugin.as_update.as_deref(), Some("updated"));
        assert_eq!(plugin.length, 5);
    }

    #[test]
    fn test_invalid_rss_pattern_is_rejected() {
        let mut plugin = RssPlugin::default();
        let options: serde_yaml::Value = serde_yaml::from_str("match_path: \"[\"").unwrap();
        assert!(plugin.configure(Some(&options)).is_err());
    }

    #[test]
    fn test_search_separator() {
        let mut plugin = SearchPlugin::default();
        let options: serde_yaml::Value = serde_yaml::from_str("separator: '[\\s\\-,]+'").unwrap();
        plugin.configure(Some(&options)).unwrap();
        assert_eq!(plugin.separator, "[\\s\\-,]+");
    }
}
