/// Fatal pipeline errors
///
/// Only conditions that abort the whole run live here. Per-item failures
/// (a reference record or test image that fails to decode) are recovered
/// locally and surface as degraded outcomes, never as error values.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No reference image could be indexed; classification without an
    /// index would default every test image, so this aborts the run.
    #[error("no reference image could be indexed from {path}")]
    EmptyCorpus { path: PathBuf },

    /// The test folder itself cannot be enumerated.
    #[error("cannot read test folder {path}: {source}")]
    TestDirUnreadable { path: PathBuf, source: io::Error },

    /// Writing the final predictions file failed. The temp-then-rename
    /// write never leaves a half-written file at the final path.
    #[error("failed to write predictions to {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },
}
