use crate::core::manifest::ManifestEntry;
use std::path::{Path, PathBuf};

/// Mirror serving the gzip-compressed MNIST files.
pub const MNIST_BASE_URL: &str = "https://storage.googleapis.com/cvdf-datasets/mnist/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub base_url: String,
    pub data_dir: PathBuf,
}

impl FetchConfig {
    pub fn new<U: Into<String>, P: Into<PathBuf>>(base_url: U, data_dir: P) -> Self {
        FetchConfig {
            base_url: base_url.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Default configuration: the public mirror and `<project root>/data`.
    pub fn resolve() -> Self {
        Self::new(MNIST_BASE_URL, get_data_dir())
    }

    pub fn archive_url(&self, entry: &ManifestEntry) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, entry.remote_archive_name)
        } else {
            format!("{}/{}", self.base_url, entry.remote_archive_name)
        }
    }
}

/// The entry point lives in `src/`; the project root is its parent.
fn get_data_dir() -> PathBuf {
    project_root().join("data")
}

fn project_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}
