mod absolute_url;
mod date_format;

pub use absolute_url::AbsoluteUrlFilterParser;
pub use date_format::DateFormatFilterParser;
