use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"<h([1-6])>((?s).*?)</h[1-6]>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Add slug ids to every heading, with an optional permalink marker.
///
/// Ids are derived from the heading text; repeated headings get a
/// numeric suffix so deep links stay unique within a document.
pub fn add_anchors(html: &str, permalink: bool) -> String {
    let mut seen: HashMap<String, usize> = HashMap::new();

    HEADING
        .replace_all(html, |caps: &Captures| {
            let level = &caps[1];
            let inner = &caps[2];

            let text = TAG.replace_all(inner, "");
            let text = html_escape::decode_html_entities(&text);
            let mut id = slug::slugify(text.trim());
            if id.is_empty() {
                id = "section".to_string();
            }

            let count = seen.entry(id.clone()).or_insert(0);
            *count += 1;
            if *count > 1 {
                id = format!("{}-{}", id, *count - 1);
            }

            if permalink {
                format!(
                    "<h{level} id=\"{id}\">{inner}<a class=\"headerlink\" href=\"#{id}\" title=\"Permanent link\">&para;</a></h{level}>",
                )
            } else {
                format!("<h{level} id=\"{id}\">{inner}</h{level}>")
            }
        })
        .to_string()
}
