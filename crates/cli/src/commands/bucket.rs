//! mk and rm commands - Bucket and object lifecycle
//!
//! `rm <bucket>` force-removes the bucket together with its objects;
//! `rm <bucket>/<object>` removes a single object.

use async_trait::async_trait;
use rsh_core::parse_target;

use crate::shell::{CommandHandler, CommandRegistry, Flow, Session};

pub fn register(registry: &mut CommandRegistry) {
    registry.register("mk", "Create a bucket: mk <bucket>", MakeBucket);
    registry.register(
        "rm",
        "Remove a bucket: rm <bucket>; remove an object: rm <bucket>/<object>",
        Remove,
    );
}

/// `mk <bucket>`
pub struct MakeBucket;

#[async_trait]
impl CommandHandler for MakeBucket {
    async fn run(&self, session: &mut Session, param: &str) -> Flow {
        if param.is_empty() {
            session
                .out()
                .error("Create failed: bucket name cannot be empty");
            return Flow::Continue;
        }

        let store = session.store();
        match store.make_bucket(param).await {
            Ok(()) => session.out().success(&format!("Bucket '{param}' created")),
            Err(e) => session
                .out()
                .error(&format!("Failed to create bucket: {e}")),
        }
        Flow::Continue
    }
}

/// `rm <bucket>[/<object>]`
pub struct Remove;

#[async_trait]
impl CommandHandler for Remove {
    async fn run(&self, session: &mut Session, param: &str) -> Flow {
        let target = parse_target(param);
        if target.is_bucket() {
            remove_bucket(session, &target.bucket).await
        } else {
            remove_object(session, &target.bucket, &target.object).await
        }
    }
}

async fn remove_bucket(session: &mut Session, bucket: &str) -> Flow {
    if bucket.is_empty() {
        session
            .out()
            .error("Remove failed: bucket name cannot be empty");
        return Flow::Continue;
    }

    if session.settings().confirm_remove {
        let question = format!("Remove bucket '{bucket}' and all of its objects?");
        match session.confirm(&question).await {
            Ok(true) => {}
            Ok(false) => {
                session.out().println("Cancelled");
                return Flow::Continue;
            }
            Err(e) => return Flow::from_input_error(e),
        }
    }

    let store = session.store();
    match store.remove_bucket(bucket, true).await {
        Ok(()) => session.out().success(&format!("Bucket '{bucket}' removed")),
        Err(e) => session
            .out()
            .error(&format!("Failed to remove bucket: {e}")),
    }
    Flow::Continue
}

async fn remove_object(session: &mut Session, bucket: &str, object: &str) -> Flow {
    if bucket.is_empty() {
        session
            .out()
            .error("Remove failed: bucket and object names cannot be empty");
        return Flow::Continue;
    }

    if session.settings().confirm_remove {
        let question = format!("Remove object '{bucket}/{object}'?");
        match session.confirm(&question).await {
            Ok(true) => {}
            Ok(false) => {
                session.out().println("Cancelled");
                return Flow::Continue;
            }
            Err(e) => return Flow::from_input_error(e),
        }
    }

    let store = session.store();
    match store.remove_object(bucket, object).await {
        Ok(()) => session
            .out()
            .success(&format!("Object '{bucket}/{object}' removed")),
        Err(e) => session
            .out()
            .error(&format!("Failed to remove object: {e}")),
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use rsh_core::{Error, ShellSettings};

    use super::*;
    use crate::test_utils::{FakeStore, TestSession};

    fn confirming() -> ShellSettings {
        ShellSettings {
            timestamp_prompt: false,
            confirm_remove: true,
            ..ShellSettings::default()
        }
    }

    #[tokio::test]
    async fn test_mk_creates_bucket() {
        let mut test = TestSession::new(FakeStore::new(), "");

        assert!(matches!(
            MakeBucket.run(&mut test.session, "photos").await,
            Flow::Continue
        ));
        assert_eq!(test.output(), "✓ Bucket 'photos' created\n");
        assert_eq!(test.store.bucket_names(), vec!["photos"]);
    }

    #[tokio::test]
    async fn test_mk_empty_name_skips_store() {
        let mut test = TestSession::new(FakeStore::new(), "");

        MakeBucket.run(&mut test.session, "").await;
        assert_eq!(
            test.output(),
            "✗ Create failed: bucket name cannot be empty\n"
        );
        assert!(test.store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mk_existing_bucket_reports_provider_error() {
        let store = FakeStore::new().with_bucket("photos", &[]);
        let mut test = TestSession::new(store, "");

        MakeBucket.run(&mut test.session, "photos").await;
        assert_eq!(
            test.output(),
            "✗ Failed to create bucket: Conflict: BucketAlreadyOwnedByYou: photos\n"
        );
    }

    #[tokio::test]
    async fn test_rm_bucket_forces_removal() {
        let store = FakeStore::new().with_bucket("photos", &[("a", 1), ("b", 2)]);
        let mut test = TestSession::new(store, "");

        Remove.run(&mut test.session, "photos").await;
        assert_eq!(test.output(), "✓ Bucket 'photos' removed\n");
        assert_eq!(test.store.calls(), vec!["remove_bucket:photos:true"]);
        assert!(test.store.bucket_names().is_empty());
    }

    #[tokio::test]
    async fn test_rm_trailing_slash_removes_bucket() {
        let store = FakeStore::new().with_bucket("photos", &[]);
        let mut test = TestSession::new(store, "");

        Remove.run(&mut test.session, "photos/").await;
        assert_eq!(test.store.calls(), vec!["remove_bucket:photos:true"]);
    }

    #[tokio::test]
    async fn test_rm_object() {
        let store = FakeStore::new().with_bucket("photos", &[("2024/a.jpg", 1)]);
        let mut test = TestSession::new(store, "");

        Remove.run(&mut test.session, "photos/2024/a.jpg").await;
        assert_eq!(test.output(), "✓ Object 'photos/2024/a.jpg' removed\n");
        assert_eq!(
            test.store.calls(),
            vec!["remove_object:photos:2024/a.jpg"]
        );
    }

    #[tokio::test]
    async fn test_rm_missing_object() {
        let store = FakeStore::new().with_bucket("photos", &[]);
        let mut test = TestSession::new(store, "");

        Remove.run(&mut test.session, "photos/nope").await;
        assert_eq!(
            test.output(),
            "✗ Failed to remove object: Not found: photos/nope\n"
        );
    }

    #[tokio::test]
    async fn test_rm_empty_names_skip_store() {
        let mut test = TestSession::new(FakeStore::new(), "");

        Remove.run(&mut test.session, "").await;
        Remove.run(&mut test.session, "/object").await;
        assert_eq!(
            test.output(),
            "✗ Remove failed: bucket name cannot be empty\n\
             ✗ Remove failed: bucket and object names cannot be empty\n"
        );
        assert!(test.store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rm_confirmation_declined() {
        let store = FakeStore::new().with_bucket("photos", &[]);
        let mut test = TestSession::with_settings(store, "n\n", confirming());

        Remove.run(&mut test.session, "photos").await;
        assert_eq!(
            test.output(),
            "Remove bucket 'photos' and all of its objects? (y/n): Cancelled\n"
        );
        assert!(test.store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rm_confirmation_accepted() {
        let store = FakeStore::new().with_bucket("photos", &[("a", 1)]);
        let mut test = TestSession::with_settings(store, "y\n", confirming());

        Remove.run(&mut test.session, "photos/a").await;
        assert_eq!(
            test.output(),
            "Remove object 'photos/a'? (y/n): ✓ Object 'photos/a' removed\n"
        );
        assert_eq!(test.store.calls(), vec!["remove_object:photos:a"]);
    }

    #[tokio::test]
    async fn test_rm_confirmation_end_of_input_is_fatal() {
        let store = FakeStore::new().with_bucket("photos", &[]);
        let mut test = TestSession::with_settings(store, "", confirming());

        let flow = Remove.run(&mut test.session, "photos").await;
        assert!(matches!(flow, Flow::Fatal(Error::Io(_))));
        assert!(test.store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rm_confirmation_interrupted_continues() {
        let store = FakeStore::new().with_bucket("photos", &[]);
        let mut test = TestSession::with_settings(store, "y\n", confirming());
        test.cancel.cancel();

        let flow = Remove.run(&mut test.session, "photos").await;
        assert!(matches!(flow, Flow::Continue));
        assert!(test.store.calls().is_empty());
    }
}
