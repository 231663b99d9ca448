//! ObjectStore trait definition
//!
//! This trait defines the storage operations the shell needs.
//! It allows the shell to be decoupled from the specific S3 SDK implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::stream::ObjectStream;

/// A bucket as returned by a bucket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,
}

impl BucketInfo {
    /// Create a new BucketInfo
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A single object produced by an object listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size: i64,
}

impl ObjectRecord {
    /// Create a new ObjectRecord
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List all buckets visible to the configured credentials
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// Create a bucket
    async fn make_bucket(&self, bucket: &str) -> Result<()>;

    /// Delete a bucket; with `force` its objects are deleted first
    async fn remove_bucket(&self, bucket: &str, force: bool) -> Result<()>;

    /// Open a lazy listing of the objects in a bucket
    ///
    /// Each call starts a fresh listing from the beginning of the bucket.
    fn list_objects(&self, bucket: &str, recursive: bool) -> ObjectStream;

    /// Delete a single object
    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()>;
}
