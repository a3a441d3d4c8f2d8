/// Reference index construction
///
/// Consumes the labeled reference corpus exactly once and produces the
/// digest -> fine-label index that classification probes. Only the digest
/// and the label are retained per entry; pixel buffers are dropped as soon
/// as they are digested, so memory stays bounded by the number of unique
/// digests rather than corpus size.

use std::collections::HashMap;

use super::digest::{decode_image, ContentDigest};

/// One labeled reference image, consumed while building the index
#[derive(Debug, Clone)]
pub struct ReferenceRecord {
    /// Raw (still compressed) file content
    pub bytes: Vec<u8>,
    /// Fine-grained label, e.g. "pizza"
    pub label: String,
}

/// Counters from one index build
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    /// Records successfully decoded and digested
    pub indexed: usize,
    /// Records skipped because their bytes failed to decode
    pub skipped: usize,
}

/// Frozen digest -> fine-label mapping
///
/// Read-only once built; safe to share across classification workers
/// without locking.
#[derive(Debug)]
pub struct ReferenceIndex {
    entries: HashMap<ContentDigest, String>,
}

impl ReferenceIndex {
    /// Look up the fine label for a digest
    pub fn lookup(&self, digest: ContentDigest) -> Option<&str> {
        self.entries.get(&digest).map(String::as_str)
    }

    /// Number of unique digests in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds a [`ReferenceIndex`] from a stream of records
pub struct ReferenceIndexBuilder {
    entries: HashMap<ContentDigest, String>,
    stats: BuildStats,
}

impl ReferenceIndexBuilder {
    pub fn new() -> Self {
        ReferenceIndexBuilder {
            entries: HashMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Digest one record and insert it into the index
    ///
    /// Collision policy: if two reference images decode to identical pixel
    /// buffers, the later-processed record wins (last write overwrites).
    /// A record whose bytes fail to decode is skipped; one bad file must
    /// not abort the build, and skipping leaves every other entry intact.
    pub fn add_record(&mut self, record: ReferenceRecord) {
        match decode_image(&record.bytes) {
            Ok(image) => {
                let digest = ContentDigest::of_pixels(&image);
                self.entries.insert(digest, record.label);
                self.stats.indexed += 1;
            }
            Err(err) => {
                eprintln!("⚠️  Skipping unreadable reference image ({err})");
                self.stats.skipped += 1;
            }
        }
    }

    /// Consume an entire record stream, reporting progress periodically
    pub fn ingest<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = ReferenceRecord>,
    {
        for record in records {
            self.add_record(record);
            let processed = self.stats.indexed + self.stats.skipped;
            if processed % 1000 == 0 {
                println!("⏳ Hashed {} reference images...", processed);
            }
        }
    }

    /// Freeze the index
    ///
    /// After this point no further writes happen; classification must only
    /// ever see the frozen index.
    pub fn finish(self) -> (ReferenceIndex, BuildStats) {
        (
            ReferenceIndex {
                entries: self.entries,
            },
            self.stats,
        )
    }
}

impl Default for ReferenceIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn record(seed: u8, label: &str) -> ReferenceRecord {
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(4, 4, |x, y| {
            Rgb([seed, x as u8, y as u8])
        }));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        ReferenceRecord {
            bytes,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_build_and_lookup() {
        let mut builder = ReferenceIndexBuilder::new();
        builder.ingest(vec![record(1, "pizza"), record(2, "ramen")]);
        let (index, stats) = builder.finish();

        assert_eq!(index.len(), 2);
        assert_eq!(stats.indexed, 2);
        assert_eq!(stats.skipped, 0);

        let probe = ContentDigest::of_pixels(&decode_image(&record(1, "pizza").bytes).unwrap());
        assert_eq!(index.lookup(probe), Some("pizza"));
    }

    #[test]
    fn test_duplicate_content_last_write_wins() {
        let mut builder = ReferenceIndexBuilder::new();
        builder.add_record(record(5, "pizza"));
        builder.add_record(record(5, "waffles"));
        let (index, stats) = builder.finish();

        assert_eq!(index.len(), 1);
        assert_eq!(stats.indexed, 2);

        let probe = ContentDigest::of_pixels(&decode_image(&record(5, "x").bytes).unwrap());
        assert_eq!(index.lookup(probe), Some("waffles"));
    }

    #[test]
    fn test_unreadable_record_skipped() {
        let mut builder = ReferenceIndexBuilder::new();
        builder.add_record(ReferenceRecord {
            bytes: b"corrupt".to_vec(),
            label: "pizza".to_string(),
        });
        builder.add_record(record(9, "ramen"));
        let (index, stats) = builder.finish();

        // The bad record is dropped, the good one still lands
        assert_eq!(index.len(), 1);
        assert_eq!(stats.indexed, 1);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_empty_stream_yields_empty_index() {
        let mut builder = ReferenceIndexBuilder::new();
        builder.ingest(Vec::new());
        let (index, _) = builder.finish();
        assert!(index.is_empty());
    }
}
