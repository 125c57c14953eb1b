use std::path::{Path, PathBuf};

/// One dataset file: the names it may have on disk and the archive it ships in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Official hyphenated name, used when extracting.
    pub primary_name: &'static str,
    /// Dotted variant some mirrors and older tooling produce.
    pub alternate_name: &'static str,
    pub remote_archive_name: &'static str,
}

/// The four MNIST files, in the order they are fetched.
pub const MNIST_MANIFEST: [ManifestEntry; 4] = [
    ManifestEntry {
        primary_name: "train-images-idx3-ubyte",
        alternate_name: "train-images.idx3-ubyte",
        remote_archive_name: "train-images-idx3-ubyte.gz",
    },
    ManifestEntry {
        primary_name: "train-labels-idx1-ubyte",
        alternate_name: "train-labels.idx1-ubyte",
        remote_archive_name: "train-labels-idx1-ubyte.gz",
    },
    ManifestEntry {
        primary_name: "t10k-images-idx3-ubyte",
        alternate_name: "t10k-images.idx3-ubyte",
        remote_archive_name: "t10k-images-idx3-ubyte.gz",
    },
    ManifestEntry {
        primary_name: "t10k-labels-idx1-ubyte",
        alternate_name: "t10k-labels.idx1-ubyte",
        remote_archive_name: "t10k-labels-idx1-ubyte.gz",
    },
];

impl ManifestEntry {
    pub fn primary_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.primary_name)
    }

    pub fn alternate_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.alternate_name)
    }

    pub fn archive_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.remote_archive_name)
    }

    /// Returns whichever accepted output already exists, checking the primary name first.
    pub fn existing_output(&self, dir: &Path) -> Option<PathBuf> {
        [self.primary_path(dir), self.alternate_path(dir)]
            .into_iter()
            .find(|path| path.exists())
    }
}
