//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from rsh-core.

use std::collections::VecDeque;

use async_trait::async_trait;
use aws_smithy_types::error::display::DisplayErrorContext;
use futures::stream;

use rsh_core::{
    BucketInfo, Error, ObjectRecord, ObjectStore, ObjectStream, Result, StorageConfig,
};

/// Keys requested per ListObjectsV2 page
const LIST_PAGE_SIZE: i32 = 1000;

/// Maximum keys accepted by a single DeleteObjects call
const DELETE_BATCH_SIZE: usize = 1000;

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from the storage configuration
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;

        // Build credentials provider
        let credentials = aws_credential_types::Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None, // session token
            None, // expiry
            "rsh-static-credentials",
        );

        // Build SDK config
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(config.region.clone()))
            .endpoint_url(endpoint.as_str().trim_end_matches('/'))
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style())
            .build();

        tracing::debug!("S3 client configured for {endpoint}");

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Delete every object in a bucket
    async fn purge_bucket(&self, bucket: &str) -> Result<()> {
        let mut listing = self.list_objects(bucket, true);
        let mut batch = Vec::with_capacity(DELETE_BATCH_SIZE);
        let mut deleted = 0usize;

        while let Some(record) = listing.next().await {
            batch.push(record?.key);
            if batch.len() == DELETE_BATCH_SIZE {
                deleted += self.delete_batch(bucket, std::mem::take(&mut batch)).await?;
            }
        }
        if !batch.is_empty() {
            deleted += self.delete_batch(bucket, batch).await?;
        }

        tracing::debug!("Purged {deleted} objects from bucket {bucket}");
        Ok(())
    }

    async fn delete_batch(&self, bucket: &str, keys: Vec<String>) -> Result<usize> {
        use aws_sdk_s3::types::{Delete, ObjectIdentifier};

        let objects = keys
            .iter()
            .map(|k| ObjectIdentifier::builder().key(k).build())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::General(e.to_string()))?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(true)
            .build()
            .map_err(|e| Error::General(e.to_string()))?;

        let response = self
            .inner
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| provider_error(&e, bucket))?;

        if !response.errors().is_empty() {
            let failed: Vec<&str> = response.errors().iter().filter_map(|e| e.key()).collect();
            tracing::warn!("Failed to delete some objects: {:?}", failed);
            return Err(Error::General(format!(
                "Failed to delete {} objects from bucket {bucket}",
                failed.len()
            )));
        }

        Ok(keys.len())
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| provider_error(&e, "buckets"))?;

        Ok(response
            .buckets()
            .iter()
            .map(|b| BucketInfo::new(b.name().unwrap_or_default()))
            .collect())
    }

    async fn make_bucket(&self, bucket: &str) -> Result<()> {
        self.inner
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| provider_error(&e, bucket))?;

        Ok(())
    }

    async fn remove_bucket(&self, bucket: &str, force: bool) -> Result<()> {
        if force {
            self.purge_bucket(bucket).await?;
        }

        self.inner
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| provider_error(&e, bucket))?;

        Ok(())
    }

    fn list_objects(&self, bucket: &str, recursive: bool) -> ObjectStream {
        let pages = ListPages {
            client: self.inner.clone(),
            bucket: bucket.to_string(),
            recursive,
            continuation_token: None,
            buffered: VecDeque::new(),
            exhausted: false,
        };

        ObjectStream::new(stream::unfold(pages, |mut pages| async move {
            loop {
                if let Some(record) = pages.buffered.pop_front() {
                    return Some((Ok(record), pages));
                }
                if pages.exhausted {
                    return None;
                }
                if let Err(e) = pages.fetch().await {
                    pages.exhausted = true;
                    return Some((Err(e), pages));
                }
            }
        }))
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| provider_error(&e, &format!("{bucket}/{key}")))?;

        Ok(())
    }
}

/// Pagination state behind an object listing
struct ListPages {
    client: aws_sdk_s3::Client,
    bucket: String,
    recursive: bool,
    continuation_token: Option<String>,
    buffered: VecDeque<ObjectRecord>,
    exhausted: bool,
}

impl ListPages {
    /// Fetch the next page into the buffer
    async fn fetch(&mut self) -> Result<()> {
        let mut request = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .max_keys(LIST_PAGE_SIZE);

        if !self.recursive {
            request = request.delimiter("/");
        }

        if let Some(token) = &self.continuation_token {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| provider_error(&e, &self.bucket))?;

        for object in response.contents() {
            self.buffered.push_back(ObjectRecord::new(
                object.key().unwrap_or_default(),
                object.size().unwrap_or(0),
            ));
        }

        self.continuation_token = response.next_continuation_token().map(|s| s.to_string());
        self.exhausted =
            !response.is_truncated().unwrap_or(false) || self.continuation_token.is_none();

        tracing::debug!(
            "Fetched {} objects from bucket {} (more: {})",
            response.contents().len(),
            self.bucket,
            !self.exhausted
        );
        Ok(())
    }
}

fn provider_error<E: std::error::Error>(err: &E, subject: &str) -> Error {
    classify_error(DisplayErrorContext(err).to_string(), subject)
}

/// Map an SDK error message onto the shell's error kinds
fn classify_error(message: String, subject: &str) -> Error {
    if message.contains("NoSuchBucket") {
        Error::NotFound(format!("Bucket not found: {subject}"))
    } else if message.contains("NoSuchKey") || message.contains("NotFound") {
        Error::NotFound(subject.to_string())
    } else if message.contains("AccessDenied") || message.contains("InvalidAccessKeyId") {
        Error::Auth(message)
    } else if message.contains("BucketAlreadyExists")
        || message.contains("BucketAlreadyOwnedByYou")
        || message.contains("BucketNotEmpty")
    {
        Error::Conflict(message)
    } else {
        Error::Network(message)
    }
}
