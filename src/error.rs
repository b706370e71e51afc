use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum AppError {
    /// An I/O operation failed on a specific path.
    Io {
        op: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidBrand(String),
    Config(String),
    Decode(String),
}

impl AppError {
    pub fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        AppError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io { op, path, source } => {
                write!(f, "Failed to {} {}: {}", op, path.display(), source)
            }
            AppError::InvalidBrand(brand) => write!(f, "Invalid brand identifier: {:?}", brand),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        AppError::Decode(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
