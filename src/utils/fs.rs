use std::fs;
use std::path::Path;

use crate::utils::error::BoxResult;

/// Create a directory and any parent directories if they don't exist
pub fn create_directory<P: AsRef<Path>>(path: P) -> BoxResult<()> {
    fs::create_dir_all(path.as_ref())?;
    Ok(())
}

/// Remove a directory and all its contents
pub fn remove_directory<P: AsRef<Path>>(path: P) -> BoxResult<()> {
    if path.as_ref().exists() && path.as_ref().is_dir() {
        fs::remove_dir_all(path.as_ref())?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories as needed
pub fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> BoxResult<()> {
    if let Some(parent) = path.as_ref().parent() {
        create_directory(parent)?;
    }
    fs::write(path.as_ref(), contents)?;
    Ok(())
}

/// Copy a directory tree verbatim (static assets)
pub fn copy_directory<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> BoxResult<()> {
    let from = from.as_ref();
    let to = to.as_ref();
    if !from.is_dir() {
        return Ok(());
    }
    for entry in walkdir::WalkDir::new(from).into_iter().filter_map(|e| e.ok()) {
        let rel = entry.path().strip_prefix(from)?;
        let target = to.join(rel);
        if entry.file_type().is_dir() {
            create_directory(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                create_directory(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Replace `destination` with the contents of `staging` in one swap.
///
/// The old destination is moved aside first so a crash mid-swap never
/// leaves a half-written tree in the final output location.
pub fn swap_directory<P: AsRef<Path>, Q: AsRef<Path>>(staging: P, destination: Q) -> BoxResult<()> {
    let staging = staging.as_ref();
    let destination = destination.as_ref();

    let old = destination.with_extension("old");
    remove_directory(&old)?;

    if destination.exists() {
        fs::rename(destination, &old)?;
    }
    fs::rename(staging, destination)?;
    remove_directory(&old)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.txt");
        write_file(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_swap_directory_replaces_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("site");
        let staging = dir.path().join("site.staging");

        write_file(dest.join("index.html"), "old").unwrap();
        write_file(staging.join("index.html"), "new").unwrap();

        swap_directory(&staging, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("index.html")).unwrap(), "new");
        assert!(!staging.exists());
        assert!(!dest.with_extension("old").exists());
    }

    #[test]
    fn test_swap_directory_without_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("site");
        let staging = dir.path().join("site.staging");

        write_file(staging.join("index.html"), "new").unwrap();
        swap_directory(&staging, &dest).unwrap();
        assert!(dest.join("index.html").exists());
    }

    #[test]
    fn test_copy_directory() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("assets");
        write_file(src.join("css/site.css"), "body{}").unwrap();

        let out = dir.path().join("out");
        copy_directory(&src, &out).unwrap();
        assert_eq!(fs::read_to_string(out.join("css/site.css")).unwrap(), "body{}");
    }
}
