use std::sync::mpsc;
use std::thread;

use scraper::{Html, Selector};

const ITEM_BASE: &str = "https://stackoverflow.com/jobs/";

/// One extracted job posting. Immutable once built; `id` is empty when the
/// source element lacks its identifier attribute.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub location: String,
}

impl Record {
    pub fn url(&self) -> String {
        format!("{}{}", ITEM_BASE, self.id)
    }
}

/// Collapses every run of whitespace to a single space and strips the ends.
/// Idempotent; empty input stays empty.
pub fn clean_string(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of page links inside the pagination control, 0 when the page
/// carries no pagination region at all.
pub fn count_pages_in(html: &str) -> usize {
    let document = Html::parse_document(html);
    let region = Selector::parse(".s-pagination").unwrap();
    let link = Selector::parse("a.s-pagination--item").unwrap();

    let mut pages = 0;
    for control in document.select(&region) {
        pages = control.select(&link).count();
    }
    pages
}

/// Pulls every job record out of one page of listing markup.
///
/// Field normalization fans out one worker per element; the rendezvous
/// below waits for exactly as many records as elements were found. A
/// malformed element yields a record with blank fields, never an error.
pub fn extract_records(html: &str) -> Vec<Record> {
    let document = Html::parse_document(html);
    let job_sel = Selector::parse(".-job").unwrap();
    let title_sel = Selector::parse("h2>a").unwrap();
    let location_sel = Selector::parse("h3 .fc-black-500").unwrap();

    // ElementRef borrows the parsed document and cannot cross threads, so
    // pull the raw fields on this thread before fanning out.
    let mut raw = Vec::new();
    for job in document.select(&job_sel) {
        let id = job.value().attr("data-jobid").unwrap_or("").to_string();
        let title: String = job.select(&title_sel).flat_map(|e| e.text()).collect();
        let location: String = job.select(&location_sel).flat_map(|e| e.text()).collect();
        raw.push((id, title, location));
    }

    let expected = raw.len();
    let (tx, rx) = mpsc::channel();
    let mut records = Vec::with_capacity(expected);

    thread::scope(|s| {
        for (id, title, location) in raw {
            let tx = tx.clone();
            s.spawn(move || {
                let record = Record {
                    id,
                    title: clean_string(&title),
                    location: clean_string(&location),
                };
                let _ = tx.send(record);
            });
        }
        drop(tx);

        for _ in 0..expected {
            if let Ok(record) = rx.recv() {
                records.push(record);
            }
        }
    });

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_string_collapses_whitespace() {
        assert_eq!(
            clean_string("  Senior \n\t Rust   Engineer "),
            "Senior Rust Engineer"
        );
    }

    #[test]
    fn clean_string_is_idempotent() {
        let once = clean_string("  a \t b \n c ");
        assert_eq!(clean_string(&once), once);
    }

    #[test]
    fn clean_string_keeps_empty_empty() {
        assert_eq!(clean_string(""), "");
        assert_eq!(clean_string("   \n\t "), "");
    }

    #[test]
    fn counts_pagination_links() {
        let html = r#"
            <div class="s-pagination">
                <a class="s-pagination--item" href="?pg=0">1</a>
                <a class="s-pagination--item" href="?pg=1">2</a>
                <a class="s-pagination--item" href="?pg=2">3</a>
            </div>"#;
        assert_eq!(count_pages_in(html), 3);
    }

    #[test]
    fn no_pagination_region_means_zero_pages() {
        assert_eq!(count_pages_in("<html><body><p>No jobs</p></body></html>"), 0);
    }

    #[test]
    fn extracts_all_records_from_a_page() {
        let html = r#"
            <div class="-job" data-jobid="101">
                <h2><a>  Rust   Engineer </a></h2>
                <h3><span class="fc-black-500"> Berlin,
                    Germany </span></h3>
            </div>
            <div class="-job" data-jobid="102">
                <h2><a>Backend Developer</a></h2>
                <h3><span class="fc-black-500">Remote</span></h3>
            </div>"#;

        let mut records = extract_records(html);
        records.sort_by(|a, b| a.id.cmp(&b.id));

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            Record {
                id: "101".into(),
                title: "Rust Engineer".into(),
                location: "Berlin, Germany".into(),
            }
        );
        assert_eq!(records[1].title, "Backend Developer");
        assert_eq!(records[1].location, "Remote");
    }

    #[test]
    fn missing_id_attribute_yields_blank_id() {
        let html = r#"
            <div class="-job">
                <h2><a>Unlabeled Role</a></h2>
                <h3><span class="fc-black-500">Oslo</span></h3>
            </div>"#;

        let records = extract_records(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "");
        assert_eq!(records[0].title, "Unlabeled Role");
        assert_eq!(records[0].location, "Oslo");
    }

    #[test]
    fn malformed_element_degrades_to_blank_fields() {
        let records = extract_records(r#"<div class="-job"></div>"#);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            Record {
                id: String::new(),
                title: String::new(),
                location: String::new(),
            }
        );
    }

    #[test]
    fn record_url_appends_the_id() {
        let record = Record {
            id: "42".into(),
            title: String::new(),
            location: String::new(),
        };
        assert_eq!(record.url(), "https://stackoverflow.com/jobs/42");
    }
}
