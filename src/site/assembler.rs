use std::path::{Path, PathBuf};
use liquid::model::Value;
use liquid::{Object, Parser};
use log::{debug, info};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::liquid::render_template;
use crate::plugins::builtin::BlogPlugin;
use crate::plugins::PluginRegistry;
use crate::site::templates::TemplateSet;
use crate::site::{feed, search};
use crate::taxonomy::{sort_posts, TaxonomyIndex};
use crate::utils::error::BoxResult;
use crate::utils::fs as fsutil;
use crate::utils::path::url_to_output_path;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Write the final site tree.
///
/// Everything goes to a staging directory first and is swapped into the
/// destination only once every page has been written, so a failed build
/// never leaves a partial tree where a successful one is expected.
pub fn assemble(
    config: &SiteConfig,
    posts: &[Post],
    taxonomy: &TaxonomyIndex,
    registry: &PluginRegistry,
) -> BoxResult<()> {
    let parser = crate::liquid::create_parser(config)?;
    let templates = TemplateSet::load(config);

    let staging = staging_path(&config.destination);
    fsutil::remove_directory(&staging)?;
    fsutil::create_directory(&staging)?;

    let assembler = SiteAssembler {
        config,
        posts,
        taxonomy,
        registry,
        blog: registry.blog(),
        parser,
        templates,
        staging: staging.clone(),
    };

    if let Err(e) = assembler.write_tree() {
        // Discard all partial output
        let _ = fsutil::remove_directory(&staging);
        return Err(e);
    }

    fsutil::swap_directory(&staging, &config.destination)?;
    info!(
        "Wrote {} posts to {}",
        posts.len(),
        config.destination.display()
    );
    Ok(())
}

/// Staging directory next to the destination
pub fn staging_path(destination: &Path) -> PathBuf {
    destination.with_extension("staging")
}

struct SiteAssembler<'a> {
    config: &'a SiteConfig,
    posts: &'a [Post],
    taxonomy: &'a TaxonomyIndex,
    registry: &'a PluginRegistry,
    blog: BlogPlugin,
    parser: Parser,
    templates: TemplateSet,
    staging: PathBuf,
}

impl<'a> SiteAssembler<'a> {
    fn write_tree(&self) -> BoxResult<()> {
        self.write_home()?;
        self.write_posts()?;
        self.write_tags()?;
        if self.blog.categories {
            self.write_categories()?;
        }
        if self.blog.archive {
            self.write_archive()?;
        }
        if let Some(rss) = self.registry.rss() {
            let xml = feed::build_feed(self.config, self.posts, &self.taxonomy.chronological, rss);
            self.write_output("/feed.xml", &xml)?;
        }
        if let Some(search_plugin) = self.registry.search() {
            let docs: Vec<search::SearchDocument> = self
                .taxonomy
                .chronological
                .iter()
                .map(|&i| {
                    let post = &self.posts[i];
                    search::SearchDocument {
                        location: post.url(),
                        title: post.title.clone(),
                        text: search::plain_text(&post.html),
                    }
                })
                .collect();
            let json = search::build_index(&docs, &search_plugin.separator)?;
            self.write_output("/search/search_index.json", &json)?;
        }

        // Static assets pass through untouched
        fsutil::copy_directory(self.config.source.join("assets"), self.staging.join("assets"))?;
        Ok(())
    }

    fn write_home(&self) -> BoxResult<()> {
        let mut globals = self.base_globals("Home");
        globals.insert("posts".into(), self.post_list(&self.taxonomy.chronological, true));
        let html = self.render_page("home", globals)?;
        self.write_output("/", &html)
    }

    fn write_posts(&self) -> BoxResult<()> {
        for post in self.posts {
            let mut globals = self.base_globals(&post.title);
            globals.insert("post".into(), Value::Object(self.post_value(post, false)));
            let html = self.render_page("post", globals)?;
            self.write_output(&post.url(), &html)?;
        }
        Ok(())
    }

    fn write_tags(&self) -> BoxResult<()> {
        let labels: Vec<Value> = self
            .taxonomy
            .tags
            .iter()
            .map(|(tag, bucket)| self.label_value(tag, bucket.len(), &tag_url(tag)))
            .collect();
        let mut globals = self.base_globals("Tags");
        globals.insert("cloud_title".into(), Value::scalar("Tags"));
        globals.insert("labels".into(), Value::Array(labels));
        let html = self.render_page("cloud", globals)?;
        self.write_output("/tags/", &html)?;

        for (tag, bucket) in &self.taxonomy.tags {
            self.write_listing(&tag_url(tag), &format!("Tagged \u{201c}{}\u{201d}", tag), bucket)?;
        }
        Ok(())
    }

    fn write_categories(&self) -> BoxResult<()> {
        let labels: Vec<Value> = self
            .taxonomy
            .categories
            .iter()
            .map(|(category, bucket)| {
                self.label_value(category, bucket.len(), &category_url(category))
            })
            .collect();
        let mut globals = self.base_globals("Categories");
        globals.insert("cloud_title".into(), Value::scalar("Categories"));
        globals.insert("labels".into(), Value::Array(labels));
        let html = self.render_page("cloud", globals)?;
        self.write_output("/categories/", &html)?;

        for (category, bucket) in &self.taxonomy.categories {
            self.write_listing(&category_url(category), category, bucket)?;
        }
        Ok(())
    }

    fn write_archive(&self) -> BoxResult<()> {
        // Overview, newest year first
        let years: Vec<Value> = self
            .taxonomy
            .archive
            .iter()
            .rev()
            .map(|(year, months)| {
                let month_values: Vec<Value> = months
                    .iter()
                    .rev()
                    .map(|(month, bucket)| {
                        let mut obj = Object::new();
                        obj.insert(
                            "label".into(),
                            Value::scalar(MONTH_NAMES[(*month - 1) as usize]),
                        );
                        obj.insert("url".into(), Value::scalar(month_url(*year, *month)));
                        obj.insert("count".into(), Value::scalar(bucket.len() as i64));
                        Value::Object(obj)
                    })
                    .collect();
                let mut obj = Object::new();
                obj.insert("label".into(), Value::scalar(year.to_string()));
                obj.insert("url".into(), Value::scalar(year_url(*year)));
                obj.insert("months".into(), Value::Array(month_values));
                Value::Object(obj)
            })
            .collect();

        let mut globals = self.base_globals("Archive");
        globals.insert("years".into(), Value::Array(years));
        let html = self.render_page("archive", globals)?;
        self.write_output("/archive/", &html)?;

        for (year, months) in &self.taxonomy.archive {
            let mut year_bucket: Vec<usize> =
                months.values().flat_map(|b| b.iter().copied()).collect();
            sort_posts(&mut year_bucket, self.posts);
            self.write_listing(&year_url(*year), &year.to_string(), &year_bucket)?;

            for (month, bucket) in months {
                let title = format!("{} {}", MONTH_NAMES[(*month - 1) as usize], year);
                self.write_listing(&month_url(*year, *month), &title, bucket)?;
            }
        }
        Ok(())
    }

    fn write_listing(&self, url: &str, title: &str, bucket: &[usize]) -> BoxResult<()> {
        let mut globals = self.base_globals(title);
        globals.insert("listing_title".into(), Value::scalar(title.to_string()));
        globals.insert("posts".into(), self.post_list(bucket, true));
        let html = self.render_page("listing", globals)?;
        self.write_output(url, &html)
    }

    /// Render a content template, then wrap it in the base chrome
    fn render_page(&self, template: &str, mut globals: Object) -> BoxResult<String> {
        let content = render_template(&self.parser, self.templates.get(template), &globals)?;
        globals.insert("content".into(), Value::scalar(content));
        render_template(&self.parser, self.templates.get("base"), &globals)
    }

    fn write_output(&self, url: &str, content: &str) -> BoxResult<()> {
        let path = url_to_output_path(&self.staging, url);
        debug!("Writing {}", path.display());
        fsutil::write_file(path, content)
    }

    fn base_globals(&self, page_title: &str) -> Object {
        let mut site = Object::new();
        site.insert("name".into(), Value::scalar(self.config.site_name.clone()));
        site.insert("url".into(), Value::scalar(self.config.base_url()));
        insert_optional(&mut site, "author", &self.config.site_author);
        insert_optional(&mut site, "description", &self.config.site_description);
        insert_optional(&mut site, "repo_url", &self.config.repo_url);
        insert_optional(&mut site, "repo_name", &self.config.repo_name);
        insert_optional(&mut site, "copyright", &self.config.copyright);
        let scheme = self
            .config
            .theme
            .palette
            .first()
            .map(|p| p.scheme.clone())
            .unwrap_or_else(|| "default".to_string());
        site.insert("scheme".into(), Value::scalar(scheme));

        let mut globals = Object::new();
        globals.insert("site".into(), Value::Object(site));
        globals.insert("page_title".into(), Value::scalar(page_title.to_string()));
        // Nav entries only for index families this build emits
        globals.insert("archive_enabled".into(), Value::scalar(self.blog.archive));
        globals.insert(
            "categories_enabled".into(),
            Value::scalar(self.blog.categories),
        );
        globals
    }

    fn post_list(&self, bucket: &[usize], brief: bool) -> Value {
        Value::Array(
            bucket
                .iter()
                .map(|&i| Value::Object(self.post_value(&self.posts[i], brief)))
                .collect(),
        )
    }

    fn post_value(&self, post: &Post, brief: bool) -> Object {
        let mut obj = Object::new();
        obj.insert("title".into(), Value::scalar(post.title.clone()));
        obj.insert("url".into(), Value::scalar(post.url()));
        obj.insert(
            "created".into(),
            Value::scalar(post.created.format("%Y-%m-%d %H:%M:%S").to_string()),
        );
        if let Some(updated) = &post.updated {
            obj.insert(
                "updated".into(),
                Value::scalar(updated.format("%Y-%m-%d %H:%M:%S").to_string()),
            );
        }
        obj.insert("teaser_html".into(), Value::scalar(post.teaser_html.clone()));
        obj.insert("more".into(), Value::scalar(post.has_teaser()));
        if !brief {
            obj.insert("html".into(), Value::scalar(post.html.clone()));
            obj.insert("has_categories".into(), Value::scalar(!post.categories.is_empty()));
            obj.insert("has_tags".into(), Value::scalar(!post.tags.is_empty()));
            obj.insert(
                "categories".into(),
                Value::Array(
                    post.categories
                        .iter()
                        .map(|c| self.label_value(c, 0, &category_url(c)))
                        .collect(),
                ),
            );
            obj.insert(
                "tags".into(),
                Value::Array(
                    post.tags
                        .iter()
                        .map(|t| self.label_value(t, 0, &tag_url(t)))
                        .collect(),
                ),
            );
        }
        obj
    }

    fn label_value(&self, name: &str, count: usize, url: &str) -> Value {
        let mut obj = Object::new();
        obj.insert("name".into(), Value::scalar(name.to_string()));
        obj.insert("url".into(), Value::scalar(url.to_string()));
        obj.insert("count".into(), Value::scalar(count as i64));
        Value::Object(obj)
    }
}

fn insert_optional(obj: &mut Object, key: &'static str, value: &Option<String>) {
    if let Some(v) = value {
        obj.insert(key.into(), Value::scalar(v.clone()));
    }
}

fn tag_url(tag: &str) -> String {
    format!("/tags/{}/", slug::slugify(tag))
}

fn category_url(category: &str) -> String {
    format!("/categories/{}/", slug::slugify(category))
}

fn year_url(year: i32) -> String {
    format!("/archive/{}/", year)
}

fn month_url(year: i32, month: u32) -> String {
    format!("/archive/{}/{:02}/", year, month)
}
