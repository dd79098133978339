use std::fmt;
use liquid_core::{Runtime, Value, ValueView, Result as LiquidResult};
use liquid_core::parser::{FilterArguments, ParameterReflection, ParseFilter};
use liquid_core::FilterReflection;

/// `absolute_url` filter: joins a site-relative path onto the configured
/// site URL. Values that are already absolute pass through unchanged.
#[derive(Debug, Clone)]
pub struct AbsoluteUrlFilter {
    base_url: String,
}

impl fmt::Display for AbsoluteUrlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "absolute_url")
    }
}

impl liquid_core::Filter for AbsoluteUrlFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let path = input.to_kstr().to_string();

        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Value::scalar(path));
        }
        if self.base_url.is_empty() {
            return Ok(Value::scalar(path));
        }

        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Value::scalar(joined))
    }
}

/// Parse filter factory for absolute_url
#[derive(Debug, Clone)]
pub struct AbsoluteUrlFilterParser {
    pub base_url: String,
}

impl FilterReflection for AbsoluteUrlFilterParser {
    fn name(&self) -> &str {
        "absolute_url"
    }

    fn description(&self) -> &str {
        "Prepends the configured site URL to a site-relative path"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for AbsoluteUrlFilterParser {
    fn parse(&self, _args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        Ok(Box::new(AbsoluteUrlFilter {
            base_url: self.base_url.clone(),
        }))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}
