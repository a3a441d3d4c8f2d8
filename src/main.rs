use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;

// Declare the pipeline modules
mod category;
mod corpus;
mod error;
mod matcher;
mod report;

use category::CategoryTable;
use error::PipelineError;
use matcher::classify::{ClassificationOutcome, Classifier};
use matcher::index::ReferenceIndexBuilder;
use report::ResultAggregator;

/// Exact-match food image classifier
///
/// Hashes the decoded pixels of every labeled reference image, then
/// assigns each test image the coarse category of its byte-identical
/// reference counterpart, falling back to a fixed default category.
#[derive(Parser, Debug)]
#[command(name = "food-matcher", version)]
struct Cli {
    /// Reference corpus root; each image's parent directory names its fine label
    reference_dir: PathBuf,

    /// Folder of unlabeled .jpg test images
    test_dir: PathBuf,

    /// Output path for the predictions JSON
    #[arg(long, default_value = "predictions.json")]
    out: PathBuf,

    /// Category assigned when an image has no exact match
    #[arg(long, default_value = category::DEFAULT_CATEGORY)]
    default_category: String,

    /// Suppress per-image classification lines
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    // Stage 1: build the reference index. This must finish completely
    // before any classification starts; a partially built index would make
    // matches depend on how far the build had progressed.
    println!("🔍 Indexing reference corpus: {}", cli.reference_dir.display());
    let mut builder = ReferenceIndexBuilder::new();
    builder.ingest(corpus::reference_records(&cli.reference_dir));
    let (index, build_stats) = builder.finish();

    if index.is_empty() {
        return Err(PipelineError::EmptyCorpus {
            path: cli.reference_dir,
        });
    }
    println!(
        "✅ Indexed {} unique reference images ({} hashed, {} skipped)",
        index.len(),
        build_stats.indexed,
        build_stats.skipped
    );

    // Stage 2: classify. The index and table are frozen now, so test
    // images are independent and safe to process in parallel.
    let test_files = corpus::test_images(&cli.test_dir)?;
    println!("📁 Found {} images in test folder", test_files.len());

    let table = CategoryTable::new();
    let classifier = Classifier::new(&index, &table, &cli.default_category);

    let outcomes: Vec<ClassificationOutcome> = test_files
        .par_iter()
        .map(|path| {
            let outcome = classifier.classify_file(path);
            if !cli.quiet {
                let filename = path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy();
                println!("{filename}: {}", outcome.category);
            }
            outcome
        })
        .collect();

    // Stage 3: aggregate on a single thread and persist atomically.
    let mut aggregator = ResultAggregator::new();
    for outcome in outcomes {
        aggregator.record(outcome);
    }
    let report = aggregator.finish();

    report.write_predictions(&cli.out)?;
    report.print_summary();
    println!("\n💾 Predictions saved to {}", cli.out.display());

    Ok(())
}
