//! rsh-core: Core library for the rsh object storage shell
//!
//! This crate provides the core functionality for the shell, including:
//! - Configuration loading
//! - `bucket[/object]` target parsing
//! - ObjectStore trait for storage operations
//! - Lazy object listings and streaming aggregation
//! - Human-readable size formatting
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod path;
pub mod size;
pub mod stream;
pub mod traits;

pub use aggregate::{AggregationResult, aggregate, aggregate_bucket};
pub use config::{
    ColorMode, Config, ConfigManager, DEFAULT_CONFIG_FILE, ShellSettings, StorageConfig,
};
pub use error::{Error, Result};
pub use path::{ObjectTarget, parse_target};
pub use size::format_bytes;
pub use stream::ObjectStream;
pub use traits::{BucketInfo, ObjectRecord, ObjectStore};
