use std::fmt;
use liquid_core::{Runtime, Value, ValueView, Result as LiquidResult};
use liquid_core::parser::{FilterArguments, ParameterReflection, ParseFilter};
use liquid_core::FilterReflection;
use chrono::NaiveDateTime;

/// `date_format` filter: renders an ISO date value as "04 May 2024"
#[derive(Debug, Clone)]
pub struct DateFormatFilter;

impl fmt::Display for DateFormatFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "date_format")
    }
}

impl liquid_core::Filter for DateFormatFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let date_str = input.to_kstr().to_string();

        let parsed = NaiveDateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(&date_str, "%Y-%m-%dT%H:%M:%S"));

        match parsed {
            Ok(dt) => Ok(Value::scalar(dt.format("%d %b %Y").to_string())),
            // Not a date: hand the value back untouched
            Err(_) => Ok(Value::scalar(date_str)),
        }
    }
}

/// Parse filter factory for date_format
#[derive(Debug, Clone)]
pub struct DateFormatFilterParser;

impl FilterReflection for DateFormatFilterParser {
    fn name(&self) -> &str {
        "date_format"
    }

    fn description(&self) -> &str {
        "Formats an ISO date-time value as '%d %b %Y'"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for DateFormatFilterParser {
    fn parse(&self, _args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        Ok(Box::new(DateFormatFilter))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}
