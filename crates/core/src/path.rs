//! Target parsing
//!
//! Handles arguments in the format: bucket[/object]
//! Only the first `/` separates bucket from object, so object keys may
//! contain further slashes.

/// A parsed `bucket[/object]` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTarget {
    /// Bucket name (may be empty when the argument starts with `/`)
    pub bucket: String,
    /// Object key (empty for the bucket itself)
    pub object: String,
}

impl ObjectTarget {
    /// Create a new ObjectTarget
    pub fn new(bucket: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            object: object.into(),
        }
    }

    /// Whether the target names a bucket rather than an object
    pub fn is_bucket(&self) -> bool {
        self.object.is_empty()
    }
}

impl std::fmt::Display for ObjectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.object.is_empty() {
            write!(f, "{}", self.bucket)
        } else {
            write!(f, "{}/{}", self.bucket, self.object)
        }
    }
}

/// Split an argument on its first `/` into bucket and object
pub fn parse_target(arg: &str) -> ObjectTarget {
    match arg.split_once('/') {
        Some((bucket, object)) => ObjectTarget::new(bucket, object),
        None => ObjectTarget::new(arg, ""),
    }
}
