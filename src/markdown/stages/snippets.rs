use std::fs;
use std::path::Path;
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::error::BuildError;

lazy_static! {
    /// Verbatim inclusion marker: --8<-- "relative/path"
    static ref SNIPPET: Regex = Regex::new(r#"^--8<--\s+"([^"]+)"\s*$"#).unwrap();
    static ref FENCE: Regex = Regex::new(r"^(\s*)(```|~~~)").unwrap();
}

/// Whether a line is a snippet-inclusion marker
pub fn is_marker(line: &str) -> bool {
    SNIPPET.is_match(line)
}

/// Expand snippet-inclusion lines against `base_dir`.
///
/// A broken inclusion path is an author error; the marker line is kept
/// as literal text so a lenient build still produces output.
pub fn expand(
    body: &str,
    base_dir: &Path,
    source_path: &Path,
    errors: &mut Vec<BuildError>,
) -> String {
    let mut out = Vec::new();
    let mut in_fence = false;

    for line in body.lines() {
        if FENCE.is_match(line) {
            in_fence = !in_fence;
            out.push(line.to_string());
            continue;
        }

        if in_fence {
            out.push(line.to_string());
            continue;
        }

        match SNIPPET.captures(line) {
            Some(caps) => {
                let include_path = base_dir.join(&caps[1]);
                match fs::read_to_string(&include_path) {
                    Ok(content) => out.push(content.trim_end().to_string()),
                    Err(_) => {
                        errors.push(BuildError::Author {
                            path: source_path.to_path_buf(),
                            line: None,
                            message: format!(
                                "snippet inclusion path '{}' cannot be read",
                                caps[1].to_string()
                            ),
                        });
                        out.push(line.to_string());
                    }
                }
            }
            None => out.push(line.to_string()),
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fs::write_file;

    #[test]
    fn test_expands_inclusion() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path().join("shared/setup.sh"), "cargo install inkpress\n").unwrap();

        let mut errors = Vec::new();
        let body = "Before.\n\n--8<-- \"shared/setup.sh\"\n\nAfter.";
        let out = expand(body, dir.path(), Path::new("a.md"), &mut errors);

        assert!(out.contains("cargo install inkpress"));
        assert!(!out.contains("--8<--"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_broken_path_is_author_error_and_literal() {
        let dir = tempfile::tempdir().unwrap();
        let mut errors = Vec::new();
        let out = expand(
            "--8<-- \"missing.txt\"",
            dir.path(),
            Path::new("a.md"),
            &mut errors,
        );
        assert_eq!(errors.len(), 1);
        assert!(out.contains("--8<--"));
    }

    #[test]
    fn test_marker_inside_fence_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut errors = Vec::new();
        let body = "```\n--8<-- \"missing.txt\"\n```";
        let out = expand(body, dir.path(), Path::new("a.md"), &mut errors);
        assert!(errors.is_empty());
        assert!(out.contains("--8<--"));
    }
}
