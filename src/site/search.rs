use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::utils::error::{BoxResult, BuildError};

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// One page handed to the search collaborator
#[derive(Debug, Serialize)]
pub struct SearchDocument {
    pub location: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
struct SearchIndex<'a> {
    config: SearchIndexConfig<'a>,
    docs: &'a [SearchDocument],
}

#[derive(Debug, Serialize)]
struct SearchIndexConfig<'a> {
    separator: &'a str,
}

/// Strip markup and collapse whitespace, leaving indexable prose
pub fn plain_text(html: &str) -> String {
    let stripped = TAG.replace_all(html, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    WHITESPACE.replace_all(decoded.trim(), " ").to_string()
}

/// Serialize the search index artifact. The indexing implementation is
/// an external collaborator; this only supplies text and URL per page.
pub fn build_index(docs: &[SearchDocument], separator: &str) -> BoxResult<String> {
    let index = SearchIndex {
        config: SearchIndexConfig { separator },
        docs,
    };
    let json = serde_json::to_string(&index)
        .map_err(|e| BuildError::Template(format!("search index: {}", e)))?;
    Ok(json)
}
