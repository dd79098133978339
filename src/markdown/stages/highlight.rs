use std::path::Path;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use syntect::html::{ClassedHTMLGenerator, ClassStyle};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::utils::error::BuildError;

lazy_static! {
    static ref SYNTAXES: SyntaxSet = SyntaxSet::load_defaults_newlines();
    /// Fenced blocks as comrak emits them; code content is entity-escaped
    /// so it never contains a raw '<'
    static ref CODE_BLOCK: Regex =
        Regex::new(r#"<pre><code(?: class="language-([^"]+)")?>([^<]*)</code></pre>"#).unwrap();
}

/// Class-based syntax highlighter for fenced code blocks.
///
/// Output carries CSS classes only, so identical input always yields
/// byte-identical HTML regardless of any theme.
pub struct Highlighter {
    anchor_linenums: bool,
}

impl Highlighter {
    pub fn new(anchor_linenums: bool) -> Self {
        Highlighter { anchor_linenums }
    }

    /// Highlight every fenced block in a rendered document. Blocks are
    /// numbered in document order so line anchors are stable.
    pub fn highlight_document(
        &self,
        html: &str,
        source_path: &Path,
        errors: &mut Vec<BuildError>,
    ) -> String {
        let mut block_index = 0usize;
        CODE_BLOCK
            .replace_all(html, |caps: &Captures| {
                let lang = caps.get(1).map(|m| m.as_str()).unwrap_or("text");
                let code = html_escape::decode_html_entities(&caps[2]).to_string();
                let current = block_index;
                block_index += 1;

                match self.highlight_block(&code, lang, current) {
                    Ok(highlighted) => highlighted,
                    Err(message) => {
                        errors.push(BuildError::Render {
                            path: source_path.to_path_buf(),
                            message: format!("cannot highlight '{}' block: {}", lang, message),
                        });
                        // Recover by passing the escaped block through
                        caps[0].to_string()
                    }
                }
            })
            .to_string()
    }

    /// Highlight one code block with the given language token
    fn highlight_block(&self, code: &str, lang: &str, block: usize) -> Result<String, String> {
        let syntax = SYNTAXES
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| SYNTAXES.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAXES, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| e.to_string())?;
        }
        let highlighted = generator.finalize();

        if self.anchor_linenums {
            let count = code.lines().count().max(1);
            let anchors: String = (1..=count)
                .map(|n| {
                    format!(
                        "<a id=\"__codelineno-{block}-{n}\" href=\"#__codelineno-{block}-{n}\">{n}</a>\n"
                    )
                })
                .collect();
            Ok(format!(
                "<div class=\"highlight\"><table class=\"highlighttable\"><tbody><tr>\
                 <td class=\"linenos\"><pre>{}</pre></td>\
                 <td class=\"code\"><pre><code class=\"language-{}\">{}</code></pre></td>\
                 </tr></tbody></table></div>",
                anchors, lang, highlighted
            ))
        } else {
            Ok(format!(
                "<div class=\"highlight\"><pre><code class=\"language-{}\">{}</code></pre></div>",
                lang, highlighted
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::engine::render_markdown;

    #[test]
    fn test_highlights_fenced_block() {
        let html = render_markdown("```rust\nfn main() {}\n```");
        let mut errors = Vec::new();
        let out = Highlighter::new(false).highlight_document(&html, Path::new("a.md"), &mut errors);

        assert!(errors.is_empty());
        assert!(out.contains("<div class=\"highlight\">"));
        assert!(out.contains("language-rust"));
        assert!(out.contains("<span"));
    }

    #[test]
    fn test_line_anchors_are_numbered_per_block() {
        let html = render_markdown("```sh\necho one\necho two\n```\n\n```sh\necho three\n```");
        let mut errors = Vec::new();
        let out = Highlighter::new(true).highlight_document(&html, Path::new("a.md"), &mut errors);

        assert!(out.contains("__codelineno-0-1"));
        assert!(out.contains("__codelineno-0-2"));
        assert!(out.contains("__codelineno-1-1"));
        assert!(!out.contains("__codelineno-1-2"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let html = render_markdown("```klingon\nqapla\n```");
        let mut errors = Vec::new();
        let out = Highlighter::new(false).highlight_document(&html, Path::new("a.md"), &mut errors);
        assert!(errors.is_empty());
        assert!(out.contains("qapla"));
    }

    #[test]
    fn test_literal_markup_stays_inert() {
        let html = render_markdown("```text\n<script>alert(1)</script>\n```");
        let mut errors = Vec::new();
        let out = Highlighter::new(false).highlight_document(&html, Path::new("a.md"), &mut errors);
        assert!(!out.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_deterministic_output() {
        let html = render_markdown("```rust\nlet x = 1;\n```");
        let highlighter = Highlighter::new(true);
        let mut e1 = Vec::new();
        let mut e2 = Vec::new();
        let a = highlighter.highlight_document(&html, Path::new("a.md"), &mut e1);
        let b = highlighter.highlight_document(&html, Path::new("a.md"), &mut e2);
        assert_eq!(a, b);
    }
}
