//! Sequential lookup loop: one record per query, in input order.

use std::time::Duration;

use crate::logger::RunLogger;
use crate::lookup::CategoryLookup;
use crate::record::LookupRecord;

/// Run every query through the engine, assigning 1-based sequence numbers by
/// position. Every input row produces exactly one output row; failures
/// arrive already degraded to sentinel outcomes, so the loop never aborts.
pub fn run_lookups<L: CategoryLookup>(
    engine: &mut L,
    queries: &[String],
    query_delay: Duration,
    logger: &RunLogger,
) -> Vec<LookupRecord> {
    let total = queries.len();
    let mut records = Vec::with_capacity(total);

    for (index, query) in queries.iter().enumerate() {
        let sequence_number = (index + 1) as u32;
        logger.info(&format!(
            "Processing {}/{}: {}",
            sequence_number, total, query
        ));

        // Fixed pause between consecutive queries; the first pays none.
        if index > 0 && !query_delay.is_zero() {
            std::thread::sleep(query_delay);
        }

        let outcome = engine.lookup(query);
        logger.record_outcome(outcome.kind());
        logger.advance(query);

        records.push(LookupRecord::new(sequence_number, query.clone(), &outcome));
    }

    debug_assert_eq!(records.len(), queries.len());
    records
}
