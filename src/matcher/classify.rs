/// Test-image classification against the frozen reference index
///
/// One outcome per test image, always keyed, regardless of whether the
/// image matched, missed, or could not even be decoded. The classifier
/// holds only shared references to the frozen index and category table,
/// so classifying image A can never affect image B and images may be
/// processed in parallel.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::category::CategoryTable;

use super::digest::{decode_image, ContentDigest};
use super::index::ReferenceIndex;

/// How a test image's category was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Exact content match against the reference index
    Matched,
    /// No content match; the default category was assigned
    Defaulted,
    /// The image could not be read or decoded; default assigned
    Errored,
}

/// The decision for one test image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationOutcome {
    /// Filename stem, the key in the final predictions document
    pub key: String,
    /// Coarse category assigned
    pub category: String,
    pub status: MatchStatus,
}

/// Decision engine for one run
///
/// Stateless across invocations apart from the read-only index and table.
pub struct Classifier<'a> {
    index: &'a ReferenceIndex,
    table: &'a CategoryTable,
    default_category: &'a str,
}

impl<'a> Classifier<'a> {
    pub fn new(
        index: &'a ReferenceIndex,
        table: &'a CategoryTable,
        default_category: &'a str,
    ) -> Self {
        Classifier {
            index,
            table,
            default_category,
        }
    }

    /// Classify raw file bytes under a given key
    pub fn classify_bytes(&self, key: &str, bytes: &[u8]) -> ClassificationOutcome {
        let image = match decode_image(bytes) {
            Ok(image) => image,
            Err(err) => {
                eprintln!("⚠️  Error decoding {key}: {err}");
                return self.errored(key);
            }
        };

        let digest = ContentDigest::of_pixels(&image);
        match self.index.lookup(digest) {
            Some(fine_label) => ClassificationOutcome {
                key: key.to_string(),
                category: self
                    .table
                    .resolve(fine_label, self.default_category)
                    .to_string(),
                status: MatchStatus::Matched,
            },
            None => ClassificationOutcome {
                key: key.to_string(),
                category: self.default_category.to_string(),
                status: MatchStatus::Defaulted,
            },
        }
    }

    /// Classify one test image file
    ///
    /// The key is always derived first, so even an unreadable file
    /// produces a keyed entry in the final report rather than vanishing.
    pub fn classify_file(&self, path: &Path) -> ClassificationOutcome {
        let key = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        match fs::read(path) {
            Ok(bytes) => self.classify_bytes(&key, &bytes),
            Err(err) => {
                eprintln!("⚠️  Error reading {}: {err}", path.display());
                self.errored(&key)
            }
        }
    }

    fn errored(&self, key: &str) -> ClassificationOutcome {
        ClassificationOutcome {
            key: key.to_string(),
            category: self.default_category.to_string(),
            status: MatchStatus::Errored,
        }
    }
}
