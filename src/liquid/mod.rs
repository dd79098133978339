mod filters;

use liquid::{Object, Parser, ParserBuilder};

use crate::config::SiteConfig;
use crate::utils::error::{BoxResult, BuildError};

/// Create the Liquid parser with the site's custom filters registered
pub fn create_parser(config: &SiteConfig) -> BoxResult<Parser> {
    let parser = ParserBuilder::with_stdlib()
        .filter(filters::DateFormatFilterParser)
        .filter(filters::AbsoluteUrlFilterParser {
            base_url: config.base_url(),
        })
        .build()
        .map_err(|e| BuildError::Template(format!("failed to create parser: {}", e)))?;
    Ok(parser)
}

/// Parse and render a template in one step
pub fn render_template(parser: &Parser, source: &str, globals: &Object) -> BoxResult<String> {
    let template = parser
        .parse(source)
        .map_err(|e| BuildError::Template(format!("failed to parse template: {}", e)))?;
    let rendered = template
        .render(globals)
        .map_err(|e| BuildError::Template(format!("failed to render template: {}", e)))?;
    Ok(rendered)
}
