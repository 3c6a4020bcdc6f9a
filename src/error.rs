use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

/// Errors that abort a sorting run
#[derive(Debug)]
pub enum Error {
    /// Input directory does not exist or is not a directory
    MissingDirectory(PathBuf),
    /// Directory listing failed
    ReadDir(PathBuf, std::io::Error),
    /// Schedule document could not be opened or its text extracted
    DocumentOpen(PathBuf, String),
    /// Destination folder creation failed
    CreateDir(PathBuf, std::io::Error),
    /// Photo copy failed
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// Config file unreadable or invalid
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingDirectory(path) => {
                write!(f, "Directory '{}' does not exist", path.display())
            }
            Error::ReadDir(path, err) => {
                write!(f, "Failed to read directory '{}': {}", path.display(), err)
            }
            Error::DocumentOpen(path, msg) => {
                write!(f, "Failed to open schedule '{}': {}", path.display(), msg)
            }
            Error::CreateDir(path, err) => {
                write!(f, "Failed to create folder '{}': {}", path.display(), err)
            }
            Error::Copy { from, to, source } => write!(
                f,
                "Failed to copy '{}' to '{}': {}",
                from.display(),
                to.display(),
                source
            ),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::ReadDir(_, err) | Error::CreateDir(_, err) => Some(err),
            Error::Copy { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
