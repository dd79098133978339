use std::fs;
use std::path::{Path, PathBuf};
use log::debug;

use crate::config::types::SiteConfig;
use crate::config::validation;
use crate::utils::error::{BoxResult, BuildError};

/// Configuration file names to look for in the source directory
const CONFIG_FILES: [&str; 2] = ["inkpress.yml", "inkpress.yaml"];

/// Load the site configuration from the source directory.
///
/// Reads the first recognized config file, applies documented defaults
/// for absent keys, and validates the result. `strict_override` forces
/// strict mode on regardless of the config file.
pub fn load_config<P: AsRef<Path>>(
    source_dir: P,
    config_file: Option<&Path>,
    strict_override: bool,
) -> BoxResult<SiteConfig> {
    let source_dir = source_dir.as_ref();

    let config_path = match config_file {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(source_dir),
    };

    let mut config = match config_path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            parse_config_file(&path)?
        }
        None => {
            debug!("No configuration file found, using defaults");
            SiteConfig::default()
        }
    };

    if config.source == PathBuf::from(".") {
        config.source = source_dir.to_path_buf();
    }
    if config.destination.is_relative() {
        config.destination = config.source.join(&config.destination);
    }
    if strict_override {
        config.strict = true;
    }

    validation::validate_config(&mut config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Find the first default configuration file that exists
fn find_config_file(source_dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.join(name))
        .find(|path| path.exists())
}

/// Parse a YAML configuration file into a SiteConfig
fn parse_config_file(path: &Path) -> BoxResult<SiteConfig> {
    if !path.exists() {
        return Err(BuildError::Config(vec![format!(
            "configuration file not found: {}",
            path.display()
        )])
        .into());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        BuildError::Config(vec![format!(
            "failed to read configuration file {}: {}",
            path.display(),
            e
        )])
    })?;

    let config: SiteConfig = serde_yaml::from_str(&content).map_err(|e| {
        BuildError::Config(vec![format!(
            "failed to parse configuration ({}): {}",
            path.display(),
            e
        )])
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"
site_name: Field Notes
site_url: https://blog.example.com
site_author: Ada Example
site_description: Notes on systems and tooling
repo_url: https://github.com/ada/field-notes
repo_name: ada/field-notes
copyright: "© 2026 Ada Example"
remote_branch: published
strict: false
theme:
  name: ink
  icon: material/notebook
  features:
    - navigation.top
    - content.code.copy
  palette:
    - scheme: default
      primary: indigo
      accent: amber
      toggle:
        icon: material/weather-night
        name: Switch to dark mode
    - scheme: slate
      toggle:
        icon: material/weather-sunny
        name: Switch to light mode
  font:
    text: Roboto
    code: Roboto Mono
markdown_extensions:
  - admonition
  - details
  - snippets
  - highlight:
      anchor_linenums: true
  - toc:
      permalink: true
plugins:
  - blog:
      directory: posts
      archive: true
      categories: true
  - rss:
      match_path: "posts/.*"
      date_from_meta:
        as_creation: date
  - search:
      separator: '[\s\-]+'
"#;

    #[test]
    fn test_full_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkpress.yml");
        fs::write(&path, FULL_CONFIG).unwrap();

        let config = load_config(dir.path(), None, false).unwrap();

        assert_eq!(config.site_name, "Field Notes");
        assert_eq!(config.site_url.as_deref(), Some("https://blog.example.com"));
        assert_eq!(config.site_author.as_deref(), Some("Ada Example"));
        assert_eq!(config.repo_name.as_deref(), Some("ada/field-notes"));
        assert_eq!(config.copyright.as_deref(), Some("© 2026 Ada Example"));
        assert_eq!(config.remote_branch, "published");
        assert!(!config.strict);

        assert_eq!(config.theme.icon.as_deref(), Some("material/notebook"));
        assert_eq!(config.theme.features.len(), 2);
        assert_eq!(config.theme.palette.len(), 2);
        assert_eq!(config.theme.palette[0].scheme, "default");
        assert_eq!(config.theme.palette[0].primary.as_deref(), Some("indigo"));
        let toggle = config.theme.palette[1].toggle.as_ref().unwrap();
        assert_eq!(toggle.name, "Switch to light mode");
        let font = config.theme.font.as_ref().unwrap();
        assert_eq!(font.code.as_deref(), Some("Roboto Mono"));

        assert_eq!(
            config.extension_names(),
            vec!["admonition", "details", "snippets", "highlight", "toc"]
        );
        let blog = config.plugin_entry("blog").unwrap();
        let opts = blog.options().unwrap();
        assert_eq!(
            opts.get("directory"),
            Some(&serde_yaml::Value::String("posts".to_string()))
        );
        assert!(config.plugin_entry("rss").is_some());
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), None, false).unwrap();
        assert_eq!(config.site_name, "My Blog");
        assert_eq!(config.source, dir.path());
    }

    #[test]
    fn test_strict_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("inkpress.yml"), "site_name: X\n").unwrap();
        let config = load_config(dir.path(), None, true).unwrap();
        assert!(config.strict);
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("inkpress.yml"), "site_name: [unclosed\n").unwrap();
        assert!(load_config(dir.path(), None, false).is_err());
    }
}
