use std::collections::HashMap;
use std::fs;

use crate::config::SiteConfig;

/// Base page chrome; every page renders into its `content` slot
const BASE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ page_title }} &middot; {{ site.name }}</title>
{% if site.description %}<meta name="description" content="{{ site.description }}">{% endif %}
{% if site.author %}<meta name="author" content="{{ site.author }}">{% endif %}
<link rel="stylesheet" href="/assets/css/site.css">
<link rel="alternate" type="application/rss+xml" title="{{ site.name }}" href="/feed.xml">
</head>
<body class="scheme-{{ site.scheme }}">
<header class="site-header">
<a class="site-title" href="/">{{ site.name }}</a>
<nav>
<a href="/tags/">Tags</a>
{% if categories_enabled %}<a href="/categories/">Categories</a>{% endif %}
{% if archive_enabled %}<a href="/archive/">Archive</a>{% endif %}
{% if site.repo_url %}<a href="{{ site.repo_url }}">{{ site.repo_name }}</a>{% endif %}
</nav>
</header>
<main>
{{ content }}
</main>
<footer class="site-footer">
{% if site.copyright %}<p>{{ site.copyright }}</p>{% endif %}
</footer>
</body>
</html>
"#;

/// Front page: chronological teaser list
const HOME: &str = r#"{% for post in posts %}
<article class="teaser">
<h2><a href="{{ post.url }}">{{ post.title }}</a></h2>
<time datetime="{{ post.created }}">{{ post.created | date_format }}</time>
{{ post.teaser_html }}
{% if post.more %}<p><a class="read-more" href="{{ post.url }}">Continue reading</a></p>{% endif %}
</article>
{% endfor %}
"#;

/// Single post page
const POST: &str = r#"<article class="post">
<h1>{{ post.title }}</h1>
<p class="post-meta">
<time datetime="{{ post.created }}">{{ post.created | date_format }}</time>
{% if post.updated %} &middot; updated <time datetime="{{ post.updated }}">{{ post.updated | date_format }}</time>{% endif %}
</p>
{{ post.html }}
{% if post.has_categories %}
<p class="post-categories">Filed under
{% for category in post.categories %}<a href="{{ category.url }}">{{ category.name }}</a> {% endfor %}
</p>
{% endif %}
{% if post.has_tags %}
<p class="post-tags">
{% for tag in post.tags %}<a class="tag" href="{{ tag.url }}">#{{ tag.name }}</a> {% endfor %}
</p>
{% endif %}
</article>
"#;

/// Taxonomy bucket page: one ordered post list under a heading
const LISTING: &str = r#"<h1>{{ listing_title }}</h1>
<ul class="post-list">
{% for post in posts %}
<li>
<time datetime="{{ post.created }}">{{ post.created | date_format }}</time>
<a href="{{ post.url }}">{{ post.title }}</a>
</li>
{% endfor %}
</ul>
"#;

/// Label cloud for tags and for the category overview
const CLOUD: &str = r#"<h1>{{ cloud_title }}</h1>
<p class="cloud">
{% for label in labels %}<a class="tag" href="{{ label.url }}">{{ label.name }} ({{ label.count }})</a>
{% endfor %}
</p>
"#;

/// Archive overview: years with month links
const ARCHIVE: &str = r#"<h1>Archive</h1>
{% for year in years %}
<h2><a href="{{ year.url }}">{{ year.label }}</a></h2>
<ul class="archive-months">
{% for month in year.months %}
<li><a href="{{ month.url }}">{{ month.label }}</a> ({{ month.count }})</li>
{% endfor %}
</ul>
{% endfor %}
"#;

/// Template sources by name. Defaults are embedded; a file named
/// `templates/<name>.liquid` under the source root overrides one.
pub struct TemplateSet {
    sources: HashMap<&'static str, String>,
}

const TEMPLATE_NAMES: [(&str, &str); 6] = [
    ("base", BASE),
    ("home", HOME),
    ("post", POST),
    ("listing", LISTING),
    ("cloud", CLOUD),
    ("archive", ARCHIVE),
];

impl TemplateSet {
    /// Load the template set, applying any site-local overrides
    pub fn load(config: &SiteConfig) -> Self {
        let override_dir = config.source.join("templates");
        let mut sources = HashMap::new();

        for (name, default) in TEMPLATE_NAMES {
            let override_path = override_dir.join(format!("{}.liquid", name));
            let source = match fs::read_to_string(&override_path) {
                Ok(content) => {
                    log::debug!("Using template override {}", override_path.display());
                    content
                }
                Err(_) => default.to_string(),
            };
            sources.insert(name, source);
        }

        TemplateSet { sources }
    }

    /// Template source by name
    pub fn get(&self, name: &str) -> &str {
        self.sources
            .get(name)
            .map(|s| s.as_str())
            .unwrap_or_default()
    }
}
