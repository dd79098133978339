pub mod builtin;
pub mod registry;

pub use registry::PluginRegistry;

use std::any::Any;

/// Pipeline phase a plugin participates in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// Shapes what content is discovered (blog)
    Discovery,
    /// Contributes artifacts to the output tree (rss, search)
    Assembly,
}

/// A named handler behind a plugin entry in the configuration.
///
/// Plugins are configured once from their options bag and then consulted
/// at their declared phase; the registry is the only place a plugin name
/// is resolved.
pub trait Plugin: Any {
    /// Registry key
    fn name(&self) -> &'static str;

    /// Apply the options bag from the configuration entry
    fn configure(&mut self, options: Option<&serde_yaml::Value>) -> Result<(), String>;

    /// Phase this plugin runs at
    fn phase(&self) -> BuildPhase;

    /// Typed access for the pipeline stage that consumes this plugin
    fn as_any(&self) -> &dyn Any;
}
