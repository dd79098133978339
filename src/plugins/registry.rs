//! Plugin registry resolving configuration entries to handlers

use std::collections::HashMap;
use log::debug;

use crate::config::SiteConfig;
use crate::plugins::builtin::{BlogPlugin, RssPlugin, SearchPlugin};
use crate::plugins::Plugin;
use crate::utils::error::BuildError;

/// Registry of configured plugins, keyed by name.
///
/// Names are resolved here once, at build start; the rest of the
/// pipeline asks for typed handles instead of looking up strings.
pub struct PluginRegistry {
    plugins: HashMap<String, Box<dyn Plugin>>,
    /// Declaration order, for deterministic reporting
    load_order: Vec<String>,
}

impl PluginRegistry {
    /// Instantiate and configure every plugin named in the config.
    ///
    /// Unknown names were flagged by config validation; a plugin that
    /// rejects its options is a configuration error here, fatal under
    /// strict mode and a skip-with-warning otherwise.
    pub fn from_config(config: &SiteConfig) -> Result<Self, BuildError> {
        let mut registry = PluginRegistry {
            plugins: HashMap::new(),
            load_order: Vec::new(),
        };
        let mut issues = Vec::new();

        for entry in &config.plugins {
            let name = match entry.name() {
                Some(name) => name,
                None => continue,
            };

            let mut plugin: Box<dyn Plugin> = match name {
                "blog" => Box::new(BlogPlugin::default()),
                "rss" => Box::new(RssPlugin::default()),
                "search" => Box::new(SearchPlugin::default()),
                _ => continue,
            };

            match plugin.configure(entry.options()) {
                Ok(()) => registry.register(plugin),
                Err(message) => issues.push(message),
            }
        }

        if !issues.is_empty() {
            if config.strict {
                return Err(BuildError::Config(issues));
            }
            for issue in &issues {
                log::warn!("config: {}", issue);
            }
        }

        Ok(registry)
    }

    fn register(&mut self, plugin: Box<dyn Plugin>) {
        let name = plugin.name().to_string();
        debug!("Registering plugin: {}", name);
        if !self.plugins.contains_key(&name) {
            self.load_order.push(name.clone());
        }
        self.plugins.insert(name, plugin);
    }

    /// Look up a plugin by name
    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins.get(name).map(|p| p.as_ref())
    }

    /// Names of registered plugins in declaration order
    pub fn names(&self) -> &[String] {
        &self.load_order
    }

    /// Blog settings; the defaults apply when the plugin is not enabled
    pub fn blog(&self) -> BlogPlugin {
        self.typed::<BlogPlugin>("blog").cloned().unwrap_or_default()
    }

    /// Feed settings, when the rss plugin is enabled
    pub fn rss(&self) -> Option<&RssPlugin> {
        self.typed::<RssPlugin>("rss")
    }

    /// Search settings, when the search plugin is enabled
    pub fn search(&self) -> Option<&SearchPlugin> {
        self.typed::<SearchPlugin>("search")
    }

    fn typed<T: 'static>(&self, name: &str) -> Option<&T> {
        self.plugins
            .get(name)
            .and_then(|p| p.as_any().downcast_ref::<T>())
    }
}
