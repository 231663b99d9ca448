//! ls and count commands - Listing and bucket statistics
//!
//! Both commands stream the object listing of a bucket through the
//! aggregator; `ls` also echoes every key as it arrives.

use async_trait::async_trait;
use rsh_core::aggregate_bucket;

use crate::shell::{CommandHandler, CommandRegistry, Flow, Session};

pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        "ls",
        "List buckets: ls; list the objects of a bucket: ls <bucket>",
        List,
    );
    registry.register(
        "count",
        "Summarize object count and size: count [<bucket>]",
        Count,
    );
}

/// `ls [<bucket>]`
pub struct List;

#[async_trait]
impl CommandHandler for List {
    async fn run(&self, session: &mut Session, param: &str) -> Flow {
        if param.is_empty() {
            list_buckets(session).await;
        } else {
            summarize_bucket(session, param, true).await;
        }
        Flow::Continue
    }
}

/// `count [<bucket>]`
pub struct Count;

#[async_trait]
impl CommandHandler for Count {
    async fn run(&self, session: &mut Session, param: &str) -> Flow {
        if param.is_empty() {
            count_all_buckets(session).await;
        } else {
            count_bucket(session, param).await;
        }
        Flow::Continue
    }
}

async fn list_buckets(session: &mut Session) {
    let store = session.store();
    match store.list_buckets().await {
        Ok(buckets) => {
            for bucket in &buckets {
                session.out().println(&bucket.name);
            }
        }
        Err(e) => session.out().error(&e.to_string()),
    }
}

/// Aggregate one bucket and print its summary line
///
/// Returns `false` when the listing failed or was interrupted; nothing but
/// the error is printed in that case.
async fn summarize_bucket(session: &mut Session, bucket: &str, echo_keys: bool) -> bool {
    let store = session.store();
    let cancel = session.cancel_token().clone();
    let out = session.out();

    let result = aggregate_bucket(store.as_ref(), bucket, &cancel, |record| {
        if echo_keys {
            out.println(&record.key);
        }
        Ok(())
    })
    .await;

    match result {
        Ok(totals) => {
            if echo_keys && totals.file_count > 0 {
                out.blank_line();
            }
            out.println(&totals.to_string());
            true
        }
        Err(e) => {
            if e.is_provider() {
                tracing::debug!(bucket, "Listing rejected by provider: {e}");
            }
            out.error(&e.to_string());
            false
        }
    }
}

async fn count_bucket(session: &mut Session, bucket: &str) -> bool {
    if bucket.is_empty() {
        session.out().error("Bucket name cannot be empty");
        return true;
    }

    session.out().println(&format!("Bucket: {bucket}"));
    summarize_bucket(session, bucket, false).await
}

/// Count every bucket in listing order, stopping at the first failure
async fn count_all_buckets(session: &mut Session) {
    let store = session.store();
    let buckets = match store.list_buckets().await {
        Ok(buckets) => buckets,
        Err(e) => {
            session.out().error(&e.to_string());
            return;
        }
    };

    for (i, bucket) in buckets.iter().enumerate() {
        if !count_bucket(session, &bucket.name).await {
            tracing::debug!(
                "Skipping {} remaining buckets after failure",
                buckets.len() - i - 1
            );
            return;
        }
        if i + 1 < buckets.len() {
            session.out().blank_line();
        }
    }
}
