//! The startup CSV loader (§6.1).
//!
//! Single-threaded, runs once before the facade starts accepting
//! requests. A malformed line aborts the whole load rather than being
//! skipped, citing the offending line number.

use std::time::Instant;

use log::{info, warn};

use crate::errors::StoreError;
use crate::prefix::Prefix;
use crate::record::MAX_METRIC;
use crate::store::RouteStore;

/// Reads `path` (`;`-separated, no header, `prefix;next_hop` rows) and
/// inserts every row into `store`. Returns the number of rows inserted.
pub fn load_routes(store: &RouteStore, path: &str) -> Result<usize, StoreError> {
    info!("loading routing table from {path}");
    let started = Instant::now();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| StoreError::LoadError(format!("cannot open {path}: {e}")))?;

    let mut count = 0usize;
    for (line_no, result) in reader.records().enumerate() {
        let line_no = line_no + 1;
        let record = result.map_err(|e| {
            StoreError::LoadError(format!("line {line_no}: malformed CSV row ({e})"))
        })?;

        if record.len() != 2 {
            warn!("line {line_no}: expected 2 fields, found {}", record.len());
            return Err(StoreError::LoadError(format!(
                "line {line_no}: expected `prefix;next_hop`, found {} field(s)",
                record.len()
            )));
        }

        let prefix_text = record.get(0).unwrap().trim();
        let next_hop_text = record.get(1).unwrap().trim();

        let prefix: Prefix = prefix_text.parse().map_err(|_: StoreError| {
            warn!("line {line_no}: invalid prefix {prefix_text:?}");
            StoreError::LoadError(format!("line {line_no}: invalid prefix {prefix_text:?}"))
        })?;

        store.insert(&prefix, next_hop_text, MAX_METRIC);
        count += 1;
    }

    store.record_loaded(count);
    info!(
        "loaded {count} routes from {path} in {:.3}s",
        started.elapsed().as_secs_f64()
    );
    Ok(count)
}
