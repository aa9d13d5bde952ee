use std::path::Path;

use log::info;

use crate::error::ScrapeError;
use crate::extractor::Record;

const HEADERS: [&str; 3] = ["LINK", "TITLE", "LOCATION"];

/// Writes the aggregated collection as CSV: a header row, then one row per
/// record. Called exactly once per run by the orchestrator, after all
/// aggregation is done — rows are never emitted from inside worker tasks.
pub fn write_records<P: AsRef<Path>>(records: &[Record], dest: P) -> Result<(), ScrapeError> {
    let mut writer = csv::Writer::from_path(dest.as_ref())?;

    writer.write_record(&HEADERS)?;
    for record in records {
        writer.write_record(&[
            record.url().as_str(),
            record.title.as_str(),
            record.location.as_str(),
        ])?;
    }
    writer.flush()?;

    info!("Wrote {} records to {:?}", records.len(), dest.as_ref());
    Ok(())
}
