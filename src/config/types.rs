use std::collections::HashMap;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Theme color palette variant (one entry of the ordered `palette` list)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaletteVariant {
    /// Color scheme name (e.g. "default", "slate")
    #[serde(default)]
    pub scheme: String,

    /// Primary color name
    #[serde(default)]
    pub primary: Option<String>,

    /// Accent color name
    #[serde(default)]
    pub accent: Option<String>,

    /// Toggle control for switching to the next variant
    #[serde(default)]
    pub toggle: Option<PaletteToggle>,
}

/// Icon and label for a palette toggle control
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaletteToggle {
    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub name: String,
}

/// Font configuration block
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FontConfig {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub code: Option<String>,
}

/// Theme configuration block
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemeConfig {
    /// Theme name
    #[serde(default = "defaults::default_theme_name")]
    pub name: String,

    /// Site icon
    #[serde(default)]
    pub icon: Option<String>,

    /// Enabled theme feature flags; validated against the known set
    #[serde(default)]
    pub features: Vec<String>,

    /// Ordered list of color palette variants
    #[serde(default)]
    pub palette: Vec<PaletteVariant>,

    /// Font configuration
    #[serde(default)]
    pub font: Option<FontConfig>,
}

/// A markdown extension or plugin entry: either a bare name, or a name
/// carrying a nested options map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NamedEntry {
    /// `- admonition`
    Name(String),
    /// `- toc:\n    permalink: true`
    WithOptions(HashMap<String, serde_yaml::Value>),
}

impl NamedEntry {
    /// The entry's name (for the map form, its single key)
    pub fn name(&self) -> Option<&str> {
        match self {
            NamedEntry::Name(name) => Some(name),
            NamedEntry::WithOptions(map) => map.keys().next().map(|k| k.as_str()),
        }
    }

    /// The entry's options map, if any
    pub fn options(&self) -> Option<&serde_yaml::Value> {
        match self {
            NamedEntry::Name(_) => None,
            NamedEntry::WithOptions(map) => map.values().next(),
        }
    }
}

/// Site configuration structure, created once at build start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site name
    #[serde(default = "defaults::default_site_name")]
    pub site_name: String,

    /// Canonical site URL
    #[serde(default)]
    pub site_url: Option<String>,

    /// Site author
    #[serde(default)]
    pub site_author: Option<String>,

    /// Site description
    #[serde(default)]
    pub site_description: Option<String>,

    /// Repository URL
    #[serde(default)]
    pub repo_url: Option<String>,

    /// Repository display name (e.g. "user/project")
    #[serde(default)]
    pub repo_name: Option<String>,

    /// Copyright string rendered in the footer
    #[serde(default)]
    pub copyright: Option<String>,

    /// Theme block
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Enabled markdown extensions, in declaration order; the render
    /// pipeline applies them in its own fixed order regardless
    #[serde(default = "defaults::default_markdown_extensions")]
    pub markdown_extensions: Vec<NamedEntry>,

    /// Enabled plugins with per-plugin options
    #[serde(default = "defaults::default_plugins")]
    pub plugins: Vec<NamedEntry>,

    /// Branch the built site is published to. Recorded only; deployment
    /// is outside the build.
    #[serde(default = "defaults::default_remote_branch")]
    pub remote_branch: String,

    /// Strict mode: any warning-level condition becomes a fatal error
    #[serde(default)]
    pub strict: bool,

    /// Source directory holding config, content and assets
    #[serde(default = "defaults::default_source")]
    pub source: PathBuf,

    /// Destination directory for the generated site
    #[serde(default = "defaults::default_destination")]
    pub destination: PathBuf,

    /// Glob patterns of content files to skip during discovery
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        // serde_yaml applies the same field defaults when keys are absent
        serde_yaml::from_str("{}").expect("empty config must deserialize")
    }
}

impl SiteConfig {
    /// Base URL with no trailing slash, empty when unset
    pub fn base_url(&self) -> String {
        self.site_url
            .as_deref()
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_default()
    }

    /// Look up a plugin entry by name
    pub fn plugin_entry(&self, name: &str) -> Option<&NamedEntry> {
        self.plugins.iter().find(|e| e.name() == Some(name))
    }

    /// Names of all enabled markdown extensions
    pub fn extension_names(&self) -> Vec<&str> {
        self.markdown_extensions
            .iter()
            .filter_map(|e| e.name())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_entry_forms() {
        let entries: Vec<NamedEntry> =
            serde_yaml::from_str("- admonition\n- toc:\n    permalink: true\n").unwrap();
        assert_eq!(entries[0].name(), Some("admonition"));
        assert!(entries[0].options().is_none());
        assert_eq!(entries[1].name(), Some("toc"));
        let opts = entries[1].options().unwrap();
        assert_eq!(opts.get("permalink"), Some(&serde_yaml::Value::Bool(true)));
    }

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert!(!config.strict);
        assert_eq!(config.remote_branch, "gh-pages");
        assert_eq!(config.destination, PathBuf::from("site"));
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let mut config = SiteConfig::default();
        config.site_url = Some("https://example.com/blog/".to_string());
        assert_eq!(config.base_url(), "https://example.com/blog");
    }
}
