use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `!!! note "Title"` opens a callout, `??? note` a collapsed
    /// disclosure, `???+ note` an expanded one
    static ref MARKER: Regex =
        Regex::new(r#"^(!!!|\?\?\?\+?)\s+([A-Za-z][A-Za-z0-9_-]*)(?:\s+"([^"]*)")?\s*$"#).unwrap();
    static ref FENCE: Regex = Regex::new(r"^(\s*)(```|~~~)").unwrap();
}

/// Which block syntax a marker line opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Admonition,
    Details,
}

/// Classify a block marker line without transforming it
pub fn classify(line: &str) -> Option<Marker> {
    MARKER.captures(line).map(|caps| {
        if caps[1].starts_with("???") {
            Marker::Details
        } else {
            Marker::Admonition
        }
    })
}

/// Placeholder line standing in for container `index` until the main
/// CommonMark pass is done. A single-line HTML comment survives that
/// pass verbatim, whereas inlining the container HTML would let any
/// blank line inside it (legal in nested code blocks) terminate the
/// HTML block early.
fn placeholder(index: usize) -> String {
    format!("<!--inkpress-container-{}-->", index)
}

/// Substitute rendered containers back into the document HTML
pub fn restore(html: &str, containers: &[String]) -> String {
    let mut out = html.to_string();
    for (index, container) in containers.iter().enumerate() {
        out = out.replace(&placeholder(index), container);
    }
    out
}

/// Rewrite admonition and disclosure blocks into placeholders, pushing
/// the rendered container HTML into `containers` for `restore`.
///
/// Block bodies are indented four spaces; they are dedented and rendered
/// through `render_nested` so nested markdown (and nested admonitions)
/// come out as HTML before the main CommonMark pass sees the document.
pub fn transform<F>(
    body: &str,
    admonition_enabled: bool,
    details_enabled: bool,
    render_nested: F,
    containers: &mut Vec<String>,
) -> String
where
    F: Fn(&str) -> String,
{
    let lines: Vec<&str> = body.lines().collect();
    let mut out: Vec<String> = Vec::new();
    let mut in_fence = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if FENCE.is_match(line) {
            in_fence = !in_fence;
            out.push(line.to_string());
            i += 1;
            continue;
        }

        if in_fence {
            out.push(line.to_string());
            i += 1;
            continue;
        }

        let caps = match MARKER.captures(line) {
            Some(caps) => caps,
            None => {
                out.push(line.to_string());
                i += 1;
                continue;
            }
        };

        let marker = &caps[1];
        let collapsible = marker.starts_with("???");
        let enabled = if collapsible { details_enabled } else { admonition_enabled };
        if !enabled {
            // Unregistered syntax passes through as literal text
            out.push(line.to_string());
            i += 1;
            continue;
        }

        let kind = caps[2].to_lowercase();
        let title = caps
            .get(3)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| default_title(&kind));

        // Collect the indented block body
        let mut block_lines: Vec<String> = Vec::new();
        i += 1;
        while i < lines.len() {
            let body_line = lines[i];
            if body_line.trim().is_empty() {
                block_lines.push(String::new());
                i += 1;
            } else if let Some(stripped) = body_line.strip_prefix("    ") {
                block_lines.push(stripped.to_string());
                i += 1;
            } else {
                break;
            }
        }
        while block_lines.last().map(|l| l.is_empty()).unwrap_or(false) {
            block_lines.pop();
        }

        let inner = render_nested(&block_lines.join("\n"));
        let title_html = html_escape::encode_text(&title).to_string();

        let container = if collapsible {
            let open = if marker == "???+" { " open" } else { "" };
            format!(
                "<details class=\"{}\"{}>\n<summary>{}</summary>\n{}\n</details>",
                kind, open, title_html, inner.trim_end()
            )
        } else {
            format!(
                "<div class=\"admonition {}\">\n<p class=\"admonition-title\">{}</p>\n{}\n</div>",
                kind, title_html, inner.trim_end()
            )
        };

        out.push(String::new());
        out.push(placeholder(containers.len()));
        out.push(String::new());
        containers.push(container);
    }

    out.join("\n")
}

/// Default title is the capitalized kind
fn default_title(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::engine::render_markdown;

    fn render(body: &str) -> String {
        let mut containers = Vec::new();
        let expanded = transform(body, true, true, |md| render_markdown(md), &mut containers);
        restore(&render_markdown(&expanded), &containers)
    }

    #[test]
    fn test_admonition_block() {
        let out = render("!!! warning \"Careful\"\n    Mind the *gap*.\n\nAfter.");
        assert!(out.contains("<div class=\"admonition warning\">"));
        assert!(out.contains("<p class=\"admonition-title\">Careful</p>"));
        assert!(out.contains("<em>gap</em>"));
        assert!(out.contains("After."));
    }

    #[test]
    fn test_default_title() {
        let out = render("!!! note\n    Text.");
        assert!(out.contains("<p class=\"admonition-title\">Note</p>"));
    }

    #[test]
    fn test_collapsed_and_expanded_details() {
        let collapsed = render("??? info \"More\"\n    Hidden.");
        assert!(collapsed.contains("<details class=\"info\">"));
        assert!(collapsed.contains("<summary>More</summary>"));

        let expanded = render("???+ info\n    Shown.");
        assert!(expanded.contains("<details class=\"info\" open>"));
    }

    #[test]
    fn test_disabled_syntax_stays_literal() {
        let mut containers = Vec::new();
        let out = transform(
            "!!! note\n    Text.",
            false,
            false,
            |md| md.to_string(),
            &mut containers,
        );
        assert!(out.contains("!!! note"));
        assert!(containers.is_empty());
    }

    #[test]
    fn test_blank_line_in_nested_code_block_is_preserved() {
        let out = render("!!! note\n    ```text\n    first\n\n    second\n    ```");
        assert!(out.contains("admonition note"));
        // The blank line is literal code content, not block structure
        assert!(out.contains("first\n\nsecond"));
    }

    #[test]
    fn test_marker_inside_fence_is_untouched() {
        let out = render("```\n!!! note\n```");
        assert!(out.contains("!!! note"));
        assert!(!out.contains("admonition"));
    }

    #[test]
    fn test_title_is_escaped() {
        let out = render("!!! note \"<b>x</b>\"\n    Text.");
        assert!(!out.contains("<b>x</b>"));
        assert!(out.contains("&lt;b&gt;"));
    }
}
