use std::collections::VecDeque;
use std::sync::{mpsc, Mutex};
use std::thread;

use log::{error, info, warn};

use crate::client::Query;
use crate::error::ScrapeError;
use crate::extractor::{self, Record};

/// Where page content comes from. Production uses `SiteClient`; tests
/// substitute in-memory sources. One instance is shared read-only across
/// all page workers.
pub trait PageSource: Send + Sync {
    /// Derives the total page count for the query from the first page's
    /// pagination control. 0 means nothing to scrape, not an error.
    fn count_pages(&self, query: &Query) -> Result<usize, ScrapeError>;

    /// Raw content of one zero-based page.
    fn fetch_page(&self, query: &Query, page: usize) -> Result<String, ScrapeError>;
}

/// What to do when one or more pages have failed, decided only after every
/// worker has reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Discard everything and surface the first error.
    Abort,
    /// Keep the records from the pages that succeeded.
    Partial,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Ceiling on simultaneously in-flight page fetches.
    pub max_workers: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_workers: 8,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

pub struct Pipeline<S> {
    source: S,
    config: PipelineConfig,
}

impl<S: PageSource> Pipeline<S> {
    pub fn new(source: S, config: PipelineConfig) -> Self {
        Pipeline { source, config }
    }

    /// Runs one full scrape: count pages once, fetch and extract every page
    /// in parallel, merge all per-page results into a single collection.
    ///
    /// Page order is not preserved; the collection is the multiset union of
    /// the per-page results. A failed page never exits the process — the
    /// error travels back as data and `failure_policy` decides the outcome
    /// once all pages have reported.
    pub fn run(&self, query: &Query) -> Result<Vec<Record>, ScrapeError> {
        let pages = self.source.count_pages(query)?;
        info!("Found {} pages for '{}'", pages, query.term());
        if pages == 0 {
            return Ok(Vec::new());
        }

        let worker_count = self.config.max_workers.max(1).min(pages);
        let queue = Mutex::new((0..pages).collect::<VecDeque<usize>>());
        let (tx, rx) = mpsc::channel::<Result<Vec<Record>, ScrapeError>>();

        let mut collected = Vec::new();
        let mut first_error = None;
        let mut failed_pages = 0usize;

        thread::scope(|s| {
            for _ in 0..worker_count {
                let tx = tx.clone();
                let queue = &queue;
                let source = &self.source;
                s.spawn(move || loop {
                    let page = queue.lock().unwrap().pop_front();
                    let Some(page) = page else { break };

                    let result = source
                        .fetch_page(query, page)
                        .map(|html| extractor::extract_records(&html));
                    if tx.send(result).is_err() {
                        break;
                    }
                });
            }
            drop(tx);

            // Counting rendezvous: every page reports exactly once, in
            // whatever order the workers finish.
            for _ in 0..pages {
                match rx.recv() {
                    Ok(Ok(mut records)) => collected.append(&mut records),
                    Ok(Err(e)) => {
                        warn!("Page fetch failed: {}", e);
                        failed_pages += 1;
                        if first_error.is_none() {
                            first_error = Some(e);
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        match (first_error, self.config.failure_policy) {
            (None, _) => Ok(collected),
            (Some(e), FailurePolicy::Abort) => {
                error!("Aborting run: {} of {} pages failed", failed_pages, pages);
                Err(e)
            }
            (Some(e), FailurePolicy::Partial) => {
                warn!(
                    "Keeping partial results, {} of {} pages failed: {}",
                    failed_pages, pages, e
                );
                Ok(collected)
            }
        }
    }
}
