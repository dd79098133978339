use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Common result type for Inkpress operations
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// Error types for Inkpress operations
#[derive(Debug)]
pub enum BuildError {
    /// IO error wrapper
    Io(io::Error),
    /// Configuration error, carrying every malformed field found
    Config(Vec<String>),
    /// Authoring error in a content file (front matter, dates, snippet paths)
    Author {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },
    /// Markdown rendering error that could not be recovered by pass-through
    Render { path: PathBuf, message: String },
    /// Template processing error
    Template(String),
    /// Server error
    Server(String),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Io(err) => write!(f, "IO error: {}", err),
            BuildError::Config(issues) => {
                write!(f, "Configuration error ({} issue(s)):", issues.len())?;
                for issue in issues {
                    write!(f, "\n  - {}", issue)?;
                }
                Ok(())
            }
            BuildError::Author { path, line, message } => match line {
                Some(line) => write!(f, "Author error: {}:{}: {}", path.display(), line, message),
                None => write!(f, "Author error: {}: {}", path.display(), message),
            },
            BuildError::Render { path, message } => {
                write!(f, "Render error: {}: {}", path.display(), message)
            }
            BuildError::Template(msg) => write!(f, "Template error: {}", msg),
            BuildError::Server(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl Error for BuildError {}

impl From<io::Error> for BuildError {
    fn from(err: io::Error) -> Self {
        BuildError::Io(err)
    }
}

/// Collector for author and render errors across the full content set.
///
/// Config and IO errors abort immediately; these two classes are gathered
/// so a strict-mode build can report every problem in one pass instead of
/// failing on the first.
#[derive(Debug, Default)]
pub struct BuildReport {
    issues: Vec<BuildError>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an author or render issue
    pub fn push(&mut self, error: BuildError) {
        self.issues.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Collected issues, in discovery order
    pub fn issues(&self) -> &[BuildError] {
        &self.issues
    }

    /// Merge another report into this one
    pub fn extend(&mut self, other: BuildReport) {
        self.issues.extend(other.issues);
    }

    /// Emit every collected issue as a warning
    pub fn log_warnings(&self) {
        for issue in &self.issues {
            log::warn!("{}", issue);
        }
    }

    /// Close out the report. In strict mode any collected issue fails the
    /// build after all of them have been reported; otherwise they degrade
    /// to warnings and the build continues best-effort.
    pub fn finish(self, strict: bool) -> Result<(), BuildError> {
        if self.issues.is_empty() {
            return Ok(());
        }
        if strict {
            for issue in &self.issues {
                log::error!("{}", issue);
            }
            Err(BuildError::Config(vec![format!(
                "strict mode: {} content error(s), build aborted",
                self.issues.len()
            )]))
        } else {
            self.log_warnings();
            Ok(())
        }
    }
}
