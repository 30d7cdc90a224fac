//! Load-time failures. The frame loop itself never errors.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    Config(serde_json::Error),
    /// A required row (e.g. the taxi) never appeared in a level file.
    Missing(&'static str),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            LoadError::Parse { path, line, reason } => {
                write!(f, "{}:{line}: {reason}", path.display())
            }
            LoadError::Config(e) => write!(f, "invalid settings: {e}"),
            LoadError::Missing(what) => write!(f, "level has no {what} row"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Config(e)
    }
}
