//! Test helpers: an in-memory object store and sessions over byte buffers

use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rsh_core::{
    BucketInfo, Error, ObjectRecord, ObjectStore, ObjectStream, Result, ShellSettings,
};
use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;

use crate::commands::build_registry;
use crate::output::{Formatter, OutputConfig};
use crate::shell::{CommandRegistry, Session};

/// Cloneable in-memory sink for formatter output
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct FakeBucket {
    name: String,
    objects: Vec<ObjectRecord>,
    /// Listing fails with this message after yielding this many records
    failure: Option<(usize, String)>,
}

/// In-memory store that records every call it receives
#[derive(Default)]
pub struct FakeStore {
    buckets: Mutex<Vec<FakeBucket>>,
    calls: Mutex<Vec<String>>,
    list_buckets_error: Option<String>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(self, name: &str, objects: &[(&str, i64)]) -> Self {
        self.push_bucket(name, objects, None)
    }

    pub fn with_failing_bucket(
        self,
        name: &str,
        objects: &[(&str, i64)],
        fail_after: usize,
        message: &str,
    ) -> Self {
        self.push_bucket(name, objects, Some((fail_after, message.to_string())))
    }

    pub fn with_list_buckets_error(mut self, message: &str) -> Self {
        self.list_buckets_error = Some(message.to_string());
        self
    }

    fn push_bucket(
        self,
        name: &str,
        objects: &[(&str, i64)],
        failure: Option<(usize, String)>,
    ) -> Self {
        self.buckets.lock().unwrap().push(FakeBucket {
            name: name.to_string(),
            objects: objects
                .iter()
                .map(|(key, size)| ObjectRecord::new(*key, *size))
                .collect(),
            failure,
        });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn bucket_names(&self) -> Vec<String> {
        self.buckets
            .lock()
            .unwrap()
            .iter()
            .map(|b| b.name.clone())
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        self.record("list_buckets".to_string());
        if let Some(message) = &self.list_buckets_error {
            return Err(Error::Network(message.clone()));
        }
        Ok(self
            .bucket_names()
            .into_iter()
            .map(BucketInfo::new)
            .collect())
    }

    async fn make_bucket(&self, bucket: &str) -> Result<()> {
        self.record(format!("make_bucket:{bucket}"));
        if self.bucket_names().iter().any(|b| b == bucket) {
            return Err(Error::Conflict(format!("BucketAlreadyOwnedByYou: {bucket}")));
        }
        self.buckets.lock().unwrap().push(FakeBucket {
            name: bucket.to_string(),
            objects: Vec::new(),
            failure: None,
        });
        Ok(())
    }

    async fn remove_bucket(&self, bucket: &str, force: bool) -> Result<()> {
        self.record(format!("remove_bucket:{bucket}:{force}"));
        let mut buckets = self.buckets.lock().unwrap();
        let Some(index) = buckets.iter().position(|b| b.name == bucket) else {
            return Err(Error::NotFound(format!("Bucket not found: {bucket}")));
        };
        if !force && !buckets[index].objects.is_empty() {
            return Err(Error::Conflict(format!("BucketNotEmpty: {bucket}")));
        }
        buckets.remove(index);
        Ok(())
    }

    fn list_objects(&self, bucket: &str, recursive: bool) -> ObjectStream {
        self.record(format!("list_objects:{bucket}:{recursive}"));
        let buckets = self.buckets.lock().unwrap();
        let Some(found) = buckets.iter().find(|b| b.name == bucket) else {
            return ObjectStream::from_items(vec![Err(Error::NotFound(format!(
                "Bucket not found: {bucket}"
            )))]);
        };

        let mut items: Vec<Result<ObjectRecord>> =
            found.objects.iter().cloned().map(Ok).collect();
        if let Some((after, message)) = &found.failure {
            items.truncate(*after);
            items.push(Err(Error::Network(message.clone())));
        }
        ObjectStream::from_items(items)
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.record(format!("remove_object:{bucket}:{key}"));
        let mut buckets = self.buckets.lock().unwrap();
        let Some(found) = buckets.iter_mut().find(|b| b.name == bucket) else {
            return Err(Error::NotFound(format!("Bucket not found: {bucket}")));
        };
        let Some(index) = found.objects.iter().position(|o| o.key == key) else {
            return Err(Error::NotFound(format!("{bucket}/{key}")));
        };
        found.objects.remove(index);
        Ok(())
    }
}

/// A session wired to in-memory input/output and a [`FakeStore`]
pub struct TestSession {
    pub session: Session,
    pub store: Arc<FakeStore>,
    pub buffer: SharedBuffer,
    pub cancel: CancellationToken,
}

impl TestSession {
    /// Plain output, no timestamp in the prompt, default commands
    pub fn new(store: FakeStore, input: &str) -> Self {
        Self::with_input_bytes(store, input.as_bytes().to_vec())
    }

    pub fn with_input_bytes(store: FakeStore, input: Vec<u8>) -> Self {
        Self::with_reader(store, Cursor::new(input))
    }

    pub fn with_reader(store: FakeStore, reader: impl AsyncBufRead + Unpin + Send + 'static) -> Self {
        Self::build(store, reader, build_registry(), test_settings())
    }

    pub fn with_registry(store: FakeStore, input: &str, registry: CommandRegistry) -> Self {
        Self::build(
            store,
            Cursor::new(input.as_bytes().to_vec()),
            registry,
            test_settings(),
        )
    }

    pub fn with_settings(store: FakeStore, input: &str, settings: ShellSettings) -> Self {
        Self::build(
            store,
            Cursor::new(input.as_bytes().to_vec()),
            build_registry(),
            settings,
        )
    }

    fn build(
        store: FakeStore,
        reader: impl AsyncBufRead + Unpin + Send + 'static,
        registry: CommandRegistry,
        settings: ShellSettings,
    ) -> Self {
        let store = Arc::new(store);
        let buffer = SharedBuffer::default();
        let cancel = CancellationToken::new();
        let out = Formatter::new(OutputConfig { no_color: true }, buffer.clone());

        let session = Session::new(store.clone(), Arc::new(registry), cancel.clone())
            .with_settings(settings)
            .with_input(reader)
            .with_output(out);

        Self {
            session,
            store,
            buffer,
            cancel,
        }
    }

    pub fn output(&self) -> String {
        self.buffer.contents()
    }
}

/// Shell settings with a fixed prompt
pub fn test_settings() -> ShellSettings {
    ShellSettings {
        timestamp_prompt: false,
        ..ShellSettings::default()
    }
}
