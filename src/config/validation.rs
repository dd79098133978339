use crate::config::types::SiteConfig;
use crate::utils::error::BuildError;

/// Theme feature flags the theme understands
pub const KNOWN_FEATURES: &[&str] = &[
    "navigation.top",
    "navigation.footer",
    "navigation.indexes",
    "navigation.sections",
    "navigation.tabs",
    "content.code.copy",
    "content.code.annotate",
    "search.share",
    "search.suggest",
    "toc.follow",
];

/// Markdown extensions the render pipeline knows how to apply
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "highlight",
    "inline-code",
    "admonition",
    "details",
    "snippets",
    "toc",
];

/// Plugins with a registered handler
pub const KNOWN_PLUGINS: &[&str] = &["blog", "rss", "search"];

/// Validate a loaded configuration, collecting every malformed field.
///
/// Under strict mode the collected issues become a fatal ConfigError;
/// otherwise each is logged as a warning and the offending value is
/// dropped or replaced by its documented default.
pub fn validate_config(config: &mut SiteConfig) -> Result<(), BuildError> {
    let mut issues = Vec::new();

    if config.site_name.trim().is_empty() {
        issues.push("site_name must not be empty".to_string());
        config.site_name = crate::config::defaults::default_site_name();
    }

    if let Some(url) = &config.site_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            issues.push(format!("site_url '{}' is not an absolute http(s) URL", url));
        }
    }

    if config.remote_branch.trim().is_empty() {
        issues.push("remote_branch must not be empty".to_string());
        config.remote_branch = crate::config::defaults::default_remote_branch();
    }

    let mut kept_features = Vec::new();
    for feature in &config.theme.features {
        if KNOWN_FEATURES.contains(&feature.as_str()) {
            kept_features.push(feature.clone());
        } else {
            issues.push(format!("unknown theme feature '{}'", feature));
        }
    }
    config.theme.features = kept_features;

    for (i, variant) in config.theme.palette.iter().enumerate() {
        if variant.scheme.trim().is_empty() {
            issues.push(format!("theme.palette[{}] is missing a scheme", i));
        }
    }

    for entry in &config.markdown_extensions {
        match entry.name() {
            Some(name) if !KNOWN_EXTENSIONS.contains(&name) => {
                issues.push(format!("unknown markdown extension '{}'", name));
            }
            None => issues.push("markdown extension entry has no name".to_string()),
            _ => {}
        }
    }

    for entry in &config.plugins {
        match entry.name() {
            Some(name) if !KNOWN_PLUGINS.contains(&name) => {
                issues.push(format!("unknown plugin '{}'", name));
            }
            None => issues.push("plugin entry has no name".to_string()),
            _ => {}
        }
    }

    if issues.is_empty() {
        return Ok(());
    }

    if config.strict {
        Err(BuildError::Config(issues))
    } else {
        for issue in &issues {
            log::warn!("config: {}", issue);
        }
        Ok(())
    }
}
