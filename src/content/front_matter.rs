use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// A content file split into its front-matter block and body
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// YAML text between the `---` fences, if present
    pub front_matter: Option<String>,
    /// Everything after the closing fence
    pub body: String,
    /// 1-based line on which the body starts in the source file
    pub body_line: usize,
}

/// Split a document at its front-matter fences.
///
/// A document without a leading `---` fence has no front matter; the
/// whole text is the body.
pub fn extract(content: &str) -> RawDocument {
    let rest = match content.strip_prefix("---\n").or_else(|| content.strip_prefix("---\r\n")) {
        Some(rest) => rest,
        None => {
            return RawDocument {
                front_matter: None,
                body: content.to_string(),
                body_line: 1,
            }
        }
    };

    let mut yaml_lines = Vec::new();
    let mut body_lines = Vec::new();
    let mut in_body = false;
    // Line 1 is the opening fence
    let mut body_line = 1;

    for (i, line) in rest.lines().enumerate() {
        if in_body {
            body_lines.push(line);
        } else if line.trim_end() == "---" {
            in_body = true;
            body_line = i + 3;
        } else {
            yaml_lines.push(line);
        }
    }

    if !in_body {
        // Unterminated fence: treat the whole document as body
        return RawDocument {
            front_matter: None,
            body: content.to_string(),
            body_line: 1,
        };
    }

    RawDocument {
        front_matter: Some(yaml_lines.join("\n")),
        body: body_lines.join("\n"),
        body_line,
    }
}

/// The `date` field: either a single creation date, or a mapping with
/// separate creation and update dates.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DateField {
    Created(String),
    Detailed {
        created: String,
        #[serde(default)]
        updated: Option<String>,
    },
}

/// Recognized front-matter fields of a post
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FrontMatter {
    /// Post title; falls back to the first heading, then to the slug
    #[serde(default)]
    pub title: Option<String>,

    /// Creation (and optionally update) date. Required for posts.
    #[serde(default)]
    pub date: Option<DateField>,

    /// Category labels
    #[serde(default)]
    pub categories: Vec<String>,

    /// Tag labels
    #[serde(default)]
    pub tags: Vec<String>,

    /// Drafts are skipped during discovery
    #[serde(default)]
    pub draft: bool,
}

/// Parse the YAML front-matter block. The error keeps its location so
/// callers can report a source-file line.
pub fn parse(yaml: &str) -> Result<FrontMatter, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// 1-based source-file line of a top-level front-matter key.
///
/// The opening fence occupies line 1, so line `i` of the block is line
/// `i + 2` of the file.
pub fn key_line(doc: &RawDocument, key: &str) -> Option<usize> {
    let yaml = doc.front_matter.as_deref()?;
    let prefix = format!("{}:", key);
    yaml.lines()
        .position(|line| line.starts_with(&prefix))
        .map(|i| i + 2)
}

/// Parse a front-matter date value. Accepts a date, or a date with time.
pub fn parse_date(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        // Midnight for date-only values
        return Ok(date.and_hms_opt(0, 0, 0).expect("midnight is valid"));
    }
    Err(format!("unparsable date '{}'", value))
}

impl DateField {
    /// The creation date literal
    pub fn created(&self) -> &str {
        match self {
            DateField::Created(s) => s,
            DateField::Detailed { created, .. } => created,
        }
    }

    /// The update date literal, if declared
    pub fn updated(&self) -> Option<&str> {
        match self {
            DateField::Created(_) => None,
            DateField::Detailed { updated, .. } => updated.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_splits_fences() {
        let doc = extract("---\ndate: 2024-01-01\n---\n\nBody text.\n");
        assert_eq!(doc.front_matter.as_deref(), Some("date: 2024-01-01"));
        assert!(doc.body.contains("Body text."));
        assert_eq!(doc.body_line, 4);
    }

    #[test]
    fn test_extract_without_front_matter() {
        let doc = extract("Just a body.\n");
        assert!(doc.front_matter.is_none());
        assert_eq!(doc.body_line, 1);
    }

    #[test]
    fn test_extract_unterminated_fence() {
        let doc = extract("---\ndate: 2024-01-01\nno closing fence\n");
        assert!(doc.front_matter.is_none());
    }

    #[test]
    fn test_parse_literal_values() {
        let fm = parse("date: 2024-05-04\ncategories: [go, tooling]\ntags:\n  - cli\n  - unix\n")
            .unwrap();
        let date = fm.date.unwrap();
        assert_eq!(date.created(), "2024-05-04");
        assert!(date.updated().is_none());
        assert_eq!(fm.categories, vec!["go", "tooling"]);
        assert_eq!(fm.tags, vec!["cli", "unix"]);
    }

    #[test]
    fn test_key_line_is_file_relative() {
        let doc = extract("---\ntitle: X\ndate: someday\n---\nBody.\n");
        assert_eq!(key_line(&doc, "title"), Some(2));
        assert_eq!(key_line(&doc, "date"), Some(3));
        assert_eq!(key_line(&doc, "tags"), None);
    }

    #[test]
    fn test_parse_detailed_date() {
        let fm = parse("date:\n  created: 2024-05-04\n  updated: 2024-06-01\n").unwrap();
        let date = fm.date.unwrap();
        assert_eq!(date.created(), "2024-05-04");
        assert_eq!(date.updated(), Some("2024-06-01"));
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-05-04").is_ok());
        assert!(parse_date("2024-05-04 10:30:00").is_ok());
        assert!(parse_date("2024-05-04T10:30:00").is_ok());
        assert!(parse_date("May the 4th").is_err());
    }
}
