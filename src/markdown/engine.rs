use comrak::Options;

/// Create the comrak options used for every post.
///
/// `unsafe_` is on because the admonition stage injects container HTML
/// ahead of the CommonMark pass; raw code spans are still escaped by
/// comrak itself.
pub fn create_options<'a>() -> Options<'a> {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;

    options.render.hardbreaks = false;
    options.render.github_pre_lang = false;
    options.render.unsafe_ = true;

    options
}

/// Render markdown to HTML using comrak
pub fn render_markdown(content: &str) -> String {
    comrak::markdown_to_html(content, &create_options())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_rendering() {
        let html = render_markdown("# Hello\n\nThis is **bold**.");
        assert!(html.contains("<h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_code_spans_are_escaped() {
        let html = render_markdown("Use `<script>alert(1)</script>` carefully.");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_fenced_block_language_class() {
        let html = render_markdown("```rust\nfn main() {}\n```");
        assert!(html.contains("language-rust"));
    }
}
