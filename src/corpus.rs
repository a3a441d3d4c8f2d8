/// Input enumeration
///
/// This module handles:
/// - Walking the labeled reference corpus on disk
/// - Listing the unlabeled test folder
///
/// How the corpus is stored is peripheral to the matching engine; all the
/// engine sees is a stream of (bytes, label) records. On disk the label is
/// the image file's parent directory name, which covers both flat
/// `root/<label>/*.jpg` layouts and split layouts like
/// `root/train/<label>/*.jpg`.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::PipelineError;
use crate::matcher::index::ReferenceRecord;

/// Image formats accepted in the reference corpus
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp"];

fn has_extension(path: &Path, accepted: &[&str]) -> bool {
    match path.extension() {
        Some(extension) => {
            let ext = extension.to_string_lossy().to_lowercase();
            accepted.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Lazily stream reference records from a corpus directory tree
///
/// Files are read one at a time as the index builder pulls them, so only
/// one raw file is in memory at once. Files that cannot be read are
/// dropped from the stream with a warning; the builder separately skips
/// files that read but do not decode.
pub fn reference_records(root: &Path) -> impl Iterator<Item = ReferenceRecord> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file() && has_extension(entry.path(), IMAGE_EXTENSIONS))
        .filter_map(|entry| {
            let path = entry.path();
            let label = path
                .parent()
                .and_then(|dir| dir.file_name())
                .map(|name| name.to_string_lossy().to_string())?;
            match fs::read(path) {
                Ok(bytes) => Some(ReferenceRecord { bytes, label }),
                Err(err) => {
                    eprintln!("⚠️  Error reading {}: {err}", path.display());
                    None
                }
            }
        })
}

/// List the `.jpg` files of the test folder, sorted by filename
///
/// Sorting keeps run-to-run logs reproducible; final results are keyed by
/// filename stem and independent of processing order either way.
pub fn test_images(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let entries = fs::read_dir(dir).map_err(|source| PipelineError::TestDirUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, &["jpg"]))
        .collect();
    files.sort();
    Ok(files)
}
