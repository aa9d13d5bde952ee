pub mod client;
pub mod error;
pub mod extractor;
pub mod logger;
pub mod pipeline;
pub mod sink;

// Exporting types for convenience
pub use client::{Query, SiteClient};
pub use error::ScrapeError;
pub use extractor::Record;
pub use pipeline::{FailurePolicy, PageSource, Pipeline, PipelineConfig};
