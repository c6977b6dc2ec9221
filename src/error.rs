use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    #[error("Please specify either an input or an input file. Use --help for more information")]
    MissingInput,

    #[error("Unable to read wordlist {}: {source}", path.display())]
    Wordlist { path: PathBuf, source: io::Error },

    #[error("Unable to remove existing output file {}: {source}", path.display())]
    StaleOutput { path: PathBuf, source: io::Error },

    #[error("Unable to write output to {}: {source}", path.display())]
    Output { path: PathBuf, source: io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unable to serialize record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unable to write csv record: {0}")]
    Csv(#[from] csv::Error),

    #[error("Http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
