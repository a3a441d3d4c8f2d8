/// Result aggregation and persistence
///
/// Folds the per-image outcomes into the final predictions document and
/// the summary counters. Predictions live in a BTreeMap so serialization
/// order is deterministic: re-running the pipeline over the same inputs
/// produces a byte-identical file regardless of worker scheduling.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::PipelineError;
use crate::matcher::classify::{ClassificationOutcome, MatchStatus};

/// Aggregate counters for the end-of-run summary
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportStats {
    /// Outcomes processed
    pub total: usize,
    /// Exact content matches
    pub matched: usize,
    /// No content match, default assigned
    pub defaulted: usize,
    /// Could not read or decode, default assigned
    pub errored: usize,
    /// Distinct coarse categories assigned
    pub categories: BTreeSet<String>,
}

/// Final keyed predictions plus summary counters
#[derive(Debug)]
pub struct ResultReport {
    pub predictions: BTreeMap<String, String>,
    pub stats: ReportStats,
}

/// Collects classification outcomes into a [`ResultReport`]
#[derive(Debug, Default)]
pub struct ResultAggregator {
    predictions: BTreeMap<String, String>,
    stats: ReportStats,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one outcome
    ///
    /// Keys should be unique (distinct filenames); if one repeats, the
    /// last write wins rather than panicking.
    pub fn record(&mut self, outcome: ClassificationOutcome) {
        self.stats.total += 1;
        match outcome.status {
            MatchStatus::Matched => self.stats.matched += 1,
            MatchStatus::Defaulted => self.stats.defaulted += 1,
            MatchStatus::Errored => self.stats.errored += 1,
        }
        self.stats.categories.insert(outcome.category.clone());
        self.predictions.insert(outcome.key, outcome.category);
    }

    pub fn finish(self) -> ResultReport {
        ResultReport {
            predictions: self.predictions,
            stats: self.stats,
        }
    }
}

impl ResultReport {
    /// Write the predictions document atomically
    ///
    /// Serializes to a sibling temp file and renames it onto the final
    /// path, so a failed write cannot leave a valid-looking but truncated
    /// predictions file behind. Any failure here is fatal to the run.
    pub fn write_predictions(&self, path: &Path) -> Result<(), PipelineError> {
        let persist_err = |source: io::Error| PipelineError::Persist {
            path: path.to_path_buf(),
            source,
        };

        let json = serde_json::to_string_pretty(&self.predictions)
            .map_err(|err| persist_err(io::Error::new(io::ErrorKind::InvalidData, err)))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(persist_err)?;
        fs::rename(&tmp, path).map_err(persist_err)
    }

    /// Print the human-readable end-of-run summary
    pub fn print_summary(&self) {
        println!("\n📊 Summary:");
        println!("Total images: {}", self.stats.total);
        println!("Matched: {}", self.stats.matched);
        println!("Unmatched (defaulted): {}", self.stats.defaulted);
        println!("Errors: {}", self.stats.errored);

        println!("\nUnique categories assigned:");
        for category in &self.stats.categories {
            println!("{category}");
        }
        println!("Total unique categories: {}", self.stats.categories.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(key: &str, category: &str, status: MatchStatus) -> ClassificationOutcome {
        ClassificationOutcome {
            key: key.to_string(),
            category: category.to_string(),
            status,
        }
    }

    #[test]
    fn test_counts_and_categories() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(outcome("img001", "bread", MatchStatus::Matched));
        aggregator.record(outcome("img002", "dessert", MatchStatus::Matched));
        aggregator.record(outcome("img003", "bread", MatchStatus::Defaulted));
        aggregator.record(outcome("img004", "bread", MatchStatus::Errored));

        let report = aggregator.finish();
        assert_eq!(report.stats.total, 4);
        assert_eq!(report.stats.matched, 2);
        assert_eq!(report.stats.defaulted, 1);
        assert_eq!(report.stats.errored, 1);
        let expected: BTreeSet<String> =
            ["bread", "dessert"].iter().map(|s| s.to_string()).collect();
        assert_eq!(report.stats.categories, expected);

        // Completeness: every key present exactly once
        assert_eq!(report.predictions.len(), 4);
        assert_eq!(report.predictions["img003"], "bread");
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(outcome("img001", "bread", MatchStatus::Matched));
        aggregator.record(outcome("img001", "soup", MatchStatus::Matched));

        let report = aggregator.finish();
        assert_eq!(report.predictions.len(), 1);
        assert_eq!(report.predictions["img001"], "soup");
    }

    #[test]
    fn test_order_independent_serialization() {
        let outcomes = vec![
            outcome("img003", "soup", MatchStatus::Matched),
            outcome("img001", "bread", MatchStatus::Defaulted),
            outcome("img002", "dessert", MatchStatus::Matched),
        ];

        let mut forward = ResultAggregator::new();
        for o in outcomes.iter().cloned() {
            forward.record(o);
        }
        let mut reverse = ResultAggregator::new();
        for o in outcomes.iter().rev().cloned() {
            reverse.record(o);
        }

        let a = serde_json::to_string_pretty(&forward.finish().predictions).unwrap();
        let b = serde_json::to_string_pretty(&reverse.finish().predictions).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_write_predictions_round_trip() {
        let dir = std::env::temp_dir().join(format!(
            "food-matcher-report-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let out = dir.join("predictions.json");

        let mut aggregator = ResultAggregator::new();
        aggregator.record(outcome("img001", "bread", MatchStatus::Matched));
        aggregator.record(outcome("img002", "bread", MatchStatus::Defaulted));
        let report = aggregator.finish();

        report.write_predictions(&out).unwrap();

        let parsed: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed, report.predictions);
        // No temp file left behind
        assert!(!dir.join("predictions.json.tmp").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_to_unwritable_path_is_fatal() {
        let report = ResultAggregator::new().finish();
        let result = report.write_predictions(Path::new("/nonexistent/dir/predictions.json"));
        assert!(matches!(result, Err(PipelineError::Persist { .. })));
    }
}
