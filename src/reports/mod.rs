//! Report lookup
//!
//! Reports are JSON documents kept in a file-backed document store, one
//! collection per file.

mod store;

pub use store::DocumentStore;

use serde_json::{Map, Value};

use crate::logger;

/// Collection holding the crawl reports
pub const REPORTS_COLLECTION: &str = "Reports";

/// Find the report for `url`, narrowed to `timestamp` when given
///
/// Store failures are logged and reported as no match.
pub async fn get_report(store: &DocumentStore, url: &str, timestamp: Option<i64>) -> Option<Value> {
    let collection = match store.connect(REPORTS_COLLECTION).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Report lookup failed for {url}: {e}"));
            return None;
        }
    };

    let mut filter = Map::new();
    filter.insert("url".to_string(), Value::from(url));
    if let Some(ts) = timestamp {
        filter.insert("timestamp".to_string(), Value::from(ts));
    }

    collection.find_one(&filter).cloned()
}
