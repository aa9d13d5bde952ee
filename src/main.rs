use std::error::Error;

use job_scraper_lib::{logger, sink, Pipeline, PipelineConfig, Query, SiteClient};
use log::{error, info};

const OUTPUT_FILE: &str = "jobs.csv";

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();

    let term = match std::env::args().nth(1) {
        Some(t) if !t.trim().is_empty() => t,
        _ => {
            eprintln!("Usage: scrape <search term>");
            std::process::exit(2);
        }
    };

    let query = Query::new(&term);
    info!("Scraping listings for '{}'", query.term());

    let pipeline = Pipeline::new(SiteClient::new(), PipelineConfig::default());
    let jobs = match pipeline.run(&query) {
        Ok(jobs) => jobs,
        Err(e) => {
            // A failed run produces no output artifact.
            error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    sink::write_records(&jobs, OUTPUT_FILE)?;
    info!("Done, extracted {}", jobs.len());
    Ok(())
}
