pub mod engine;
pub mod pipeline;
pub mod stages;

pub use pipeline::MarkdownPipeline;
