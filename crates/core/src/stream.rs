//! Lazy object listings
//!
//! An [`ObjectStream`] is forward-only: `None` means the listing was
//! exhausted cleanly, `Some(Err(_))` is the terminal failure. Nothing is
//! yielded after an error, even if the underlying source would continue.

use futures::stream::{self, BoxStream, Stream, StreamExt};

use crate::error::Result;
use crate::traits::ObjectRecord;

/// A lazily fetched, non-restartable sequence of object records
pub struct ObjectStream {
    inner: BoxStream<'static, Result<ObjectRecord>>,
    finished: bool,
}

impl ObjectStream {
    /// Wrap any stream of records
    pub fn new<S>(inner: S) -> Self
    where
        S: Stream<Item = Result<ObjectRecord>> + Send + 'static,
    {
        Self {
            inner: inner.boxed(),
            finished: false,
        }
    }

    /// Build a stream from already materialized items
    pub fn from_items(items: Vec<Result<ObjectRecord>>) -> Self {
        Self::new(stream::iter(items))
    }

    /// A listing with no objects
    pub fn empty() -> Self {
        Self::new(stream::empty())
    }

    /// Wait for the next record
    pub async fn next(&mut self) -> Option<Result<ObjectRecord>> {
        if self.finished {
            return None;
        }

        match self.inner.next().await {
            Some(Ok(record)) => Some(Ok(record)),
            Some(Err(e)) => {
                self.finished = true;
                Some(Err(e))
            }
            None => {
                self.finished = true;
                None
            }
        }
    }

    /// Whether the listing has reached its end, cleanly or not
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl std::fmt::Debug for ObjectStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStream")
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
