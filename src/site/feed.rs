use chrono::NaiveDateTime;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::plugins::builtin::RssPlugin;

/// Build the RSS feed document.
///
/// Only posts whose source-relative path matches the plugin's
/// `match_path` pattern are included; timestamps come from front matter,
/// never from the file system, so the feed is reproducible.
pub fn build_feed(
    config: &SiteConfig,
    posts: &[Post],
    chronological: &[usize],
    rss: &RssPlugin,
) -> String {
    let base = config.base_url();
    let entries: Vec<&Post> = chronological
        .iter()
        .map(|&i| &posts[i])
        .filter(|post| rss.matcher.is_match(&post.rel_path))
        .take(rss.length)
        .collect();

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n");
    xml.push_str("<channel>\n");
    push_element(&mut xml, "title", &config.site_name);
    push_element(&mut xml, "link", if base.is_empty() { "/" } else { &base });
    push_element(
        &mut xml,
        "description",
        config.site_description.as_deref().unwrap_or(""),
    );
    // Newest entry date keeps the build reproducible; wall-clock time
    // would change the output between identical builds
    if let Some(newest) = entries.first() {
        push_element(&mut xml, "lastBuildDate", &rfc822(&newest.created));
    }

    for post in entries {
        let link = format!("{}{}", base, post.url());
        xml.push_str("<item>\n");
        push_element(&mut xml, "title", &post.title);
        push_element(&mut xml, "link", &link);
        push_element(&mut xml, "guid", &link);
        push_element(&mut xml, "pubDate", &rfc822(&post.created));
        if rss.as_update.is_some() {
            if let Some(updated) = &post.updated {
                push_element(
                    &mut xml,
                    "atom:updated",
                    &updated.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                );
            }
        }
        push_element(&mut xml, "description", &post.teaser_html);
        for category in &post.categories {
            push_element(&mut xml, "category", category);
        }
        xml.push_str("</item>\n");
    }

    xml.push_str("</channel>\n</rss>\n");
    xml
}

fn push_element(xml: &mut String, name: &str, text: &str) {
    xml.push('<');
    xml.push_str(name);
    xml.push('>');
    xml.push_str(&html_escape::encode_text(text));
    xml.push_str("</");
    xml.push_str(name);
    xml.push_str(">\n");
}

fn rfc822(dt: &NaiveDateTime) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}
