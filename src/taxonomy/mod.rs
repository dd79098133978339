use std::cmp::Ordering;
use std::collections::BTreeMap;
use chrono::Datelike;

use crate::content::Post;

/// Derived navigation structures, rebuilt fully on every build.
///
/// Indices hold positions into the discovered post list; posts outlive
/// every index. Category, tag and archive membership are independent
/// many-to-many relations, so one post may appear under several keys of
/// each axis.
#[derive(Debug, Default)]
pub struct TaxonomyIndex {
    /// All posts, newest first
    pub chronological: Vec<usize>,
    /// Category label to ordered posts
    pub categories: BTreeMap<String, Vec<usize>>,
    /// Tag label to ordered posts
    pub tags: BTreeMap<String, Vec<usize>>,
    /// Year, then month, to ordered posts
    pub archive: BTreeMap<i32, BTreeMap<u32, Vec<usize>>>,
}

impl TaxonomyIndex {
    /// Aggregate the full post set. Posts are never mutated.
    ///
    /// Every bucket is sorted here rather than relying on discovery
    /// order, which is file-system dependent.
    pub fn build(posts: &[Post]) -> Self {
        let mut index = TaxonomyIndex::default();

        for (i, post) in posts.iter().enumerate() {
            index.chronological.push(i);
            for category in &post.categories {
                index.categories.entry(category.clone()).or_default().push(i);
            }
            for tag in &post.tags {
                index.tags.entry(tag.clone()).or_default().push(i);
            }
            index
                .archive
                .entry(post.created.year())
                .or_default()
                .entry(post.created.month())
                .or_default()
                .push(i);
        }

        sort_posts(&mut index.chronological, posts);
        for bucket in index.categories.values_mut() {
            sort_posts(bucket, posts);
        }
        for bucket in index.tags.values_mut() {
            sort_posts(bucket, posts);
        }
        for months in index.archive.values_mut() {
            for bucket in months.values_mut() {
                sort_posts(bucket, posts);
            }
        }

        index
    }

    /// Distinct tag labels, for the tag cloud
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.keys().map(|k| k.as_str()).collect()
    }
}

/// Reverse-chronological by creation date, ties broken by path so the
/// order is total and deterministic
pub fn sort_posts(bucket: &mut [usize], posts: &[Post]) {
    bucket.sort_by(|&a, &b| {
        match posts[b].created.cmp(&posts[a].created) {
            Ordering::Equal => posts[a].rel_path.cmp(&posts[b].rel_path),
            other => other,
        }
    });
}
