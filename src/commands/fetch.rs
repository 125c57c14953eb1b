use crate::core::config::FetchConfig;
use crate::core::download::{self, HttpTransport, Transport};
use crate::core::manifest::{ManifestEntry, MNIST_MANIFEST};
use crate::error::{FetchError, Result};
use crate::utils::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    AlreadyPresent(PathBuf),
    Downloaded(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub archive_name: &'static str,
    pub status: EntryStatus,
}

#[derive(Debug)]
pub enum FetchOutcome {
    /// Every entry was already on disk; nothing was requested.
    AllPresent,
    /// At least one entry was downloaded and no entry failed.
    Completed { downloaded: usize },
    /// The entry at `entry` (zero-based manifest index) failed and the
    /// remaining entries were skipped.
    Halted {
        entry: usize,
        archive_name: &'static str,
        error: FetchError,
    },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, FetchOutcome::Halted { .. })
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

#[derive(Debug)]
pub struct FetchReport {
    pub entries: Vec<EntryReport>,
    pub outcome: FetchOutcome,
}

/// Fetch the MNIST files into the project's `data` directory.
pub fn run() -> Result<FetchReport> {
    fetch_dataset(
        &FetchConfig::resolve(),
        &MNIST_MANIFEST,
        &HttpTransport::new(),
    )
}

/// Walk `manifest` in order, downloading and unpacking every entry that has
/// no output on disk under either accepted name.
///
/// Only a failure to create the target directory is returned as `Err`. A
/// download or extraction failure stops the walk and is reported through
/// [`FetchOutcome::Halted`]; entries completed before it are kept.
pub fn fetch_dataset<T: Transport + ?Sized>(
    config: &FetchConfig,
    manifest: &[ManifestEntry],
    transport: &T,
) -> Result<FetchReport> {
    let data_dir = config.data_dir.as_path();

    if fs::ensure_dir_exists(data_dir)? {
        println!("Created directory: {}", data_dir.display());
    }

    let mut entries = Vec::with_capacity(manifest.len());
    let mut downloaded = 0;

    for (index, entry) in manifest.iter().enumerate() {
        if let Some(existing) = entry.existing_output(data_dir) {
            println!("[OK] Found {}", display_name(&existing));
            entries.push(EntryReport {
                archive_name: entry.remote_archive_name,
                status: EntryStatus::AlreadyPresent(existing),
            });
            continue;
        }

        match fetch_entry(config, entry, transport) {
            Ok(output) => {
                downloaded += 1;
                entries.push(EntryReport {
                    archive_name: entry.remote_archive_name,
                    status: EntryStatus::Downloaded(output),
                });
            }
            Err(error) => {
                eprintln!(
                    "[ERROR] Failed to download or extract {}: {error}",
                    entry.remote_archive_name
                );
                return Ok(FetchReport {
                    entries,
                    outcome: FetchOutcome::Halted {
                        entry: index,
                        archive_name: entry.remote_archive_name,
                        error,
                    },
                });
            }
        }
    }

    println!();
    let outcome = if downloaded == 0 {
        println!("All MNIST data files are already present and ready to go!");
        FetchOutcome::AllPresent
    } else {
        println!(
            "Dataset successfully downloaded and extracted into {}.",
            data_dir.display()
        );
        FetchOutcome::Completed { downloaded }
    };

    Ok(FetchReport { entries, outcome })
}

fn fetch_entry<T: Transport + ?Sized>(
    config: &FetchConfig,
    entry: &ManifestEntry,
    transport: &T,
) -> Result<PathBuf> {
    let archive = entry.archive_path(&config.data_dir);
    let output = entry.primary_path(&config.data_dir);
    let url = config.archive_url(entry);

    println!("[DOWNLOADING] {}...", entry.remote_archive_name);
    let extracted = transport.download(&url, &archive).and_then(|()| {
        println!(
            "[EXTRACTING]  {} -> {}",
            entry.remote_archive_name, entry.primary_name
        );
        download::extract_gzip(&archive, &output)
    });

    // The archive goes away whether or not extraction worked
    let cleanup = fs::remove_file_if_exists(&archive);
    extracted?;
    cleanup?;

    Ok(output)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
