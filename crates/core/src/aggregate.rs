//! Streaming aggregation over object listings
//!
//! Counts objects and sums their sizes without materializing the listing.
//! A provider error ends the aggregation and no partial totals are returned.

use std::fmt;

use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::size::format_bytes;
use crate::stream::ObjectStream;
use crate::traits::{ObjectRecord, ObjectStore};

/// Totals for a single aggregation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationResult {
    /// Number of objects seen
    pub file_count: i64,

    /// Sum of object sizes in bytes
    pub total_bytes: i64,
}

impl AggregationResult {
    /// Totals saturate at `i64::MAX` instead of overflowing
    fn add(&mut self, record: &ObjectRecord) {
        self.file_count = self.file_count.saturating_add(1);
        self.total_bytes = self.total_bytes.saturating_add(record.size);
    }
}

/// Renders the summary line: `<count> files, <size>(<bytes>)`
impl fmt::Display for AggregationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {}({})",
            self.file_count,
            format_bytes(self.total_bytes),
            self.total_bytes
        )
    }
}

/// Consume a listing to the end, calling `on_record` for every record as it arrives
///
/// Returns `Error::Interrupted` as soon as `cancel` fires, and the first
/// provider error carried by the listing otherwise.
pub async fn aggregate<F>(
    mut stream: ObjectStream,
    cancel: &CancellationToken,
    mut on_record: F,
) -> Result<AggregationResult>
where
    F: FnMut(&ObjectRecord) -> Result<()>,
{
    let mut totals = AggregationResult::default();

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Interrupted),
            next = stream.next() => next,
        };

        match next {
            Some(Ok(record)) => {
                totals.add(&record);
                on_record(&record)?;
            }
            Some(Err(e)) => {
                tracing::debug!(
                    "Listing failed after {} objects: {e}",
                    totals.file_count
                );
                return Err(e);
            }
            None => return Ok(totals),
        }
    }
}

/// Aggregate every object in `bucket`, listing recursively
pub async fn aggregate_bucket<F>(
    store: &dyn ObjectStore,
    bucket: &str,
    cancel: &CancellationToken,
    on_record: F,
) -> Result<AggregationResult>
where
    F: FnMut(&ObjectRecord) -> Result<()>,
{
    if bucket.is_empty() {
        return Err(Error::InvalidName("Bucket name cannot be empty".into()));
    }

    tracing::debug!("Aggregating bucket {bucket}");
    aggregate(store.list_objects(bucket, true), cancel, on_record).await
}
