use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Download failed: {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Extraction failed: {path}: {message}")]
    Decompression { path: PathBuf, message: String },
}

impl FetchError {
    pub fn transport<U: Into<String>, M: ToString>(url: U, message: M) -> Self {
        FetchError::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn decompression<P: Into<PathBuf>, M: ToString>(path: P, message: M) -> Self {
        FetchError::Decompression {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
