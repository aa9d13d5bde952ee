use thiserror::Error;

/// Failures that terminate a scrape run.
///
/// Markup-level anomalies are deliberately absent: a malformed record
/// element degrades to blank fields instead of failing (see `extractor`).
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} fetching {url}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to write output: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
