//! Key-value backends for the cell store.
//!
//! Every backend offers the same small command set: named maps of byte
//! values (`hget`/`hset`/`hdel`), ordered sets of names (`zadd`/`zrange`)
//! and whole-key deletion. The store never inspects which backend it talks to.

use std::fmt::Debug;

use bytes::Bytes;

use crate::ooxml::error::{OoxmlError, Result};

#[cfg(feature = "disk")]
pub mod disk;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "disk")]
pub use disk::DiskBackend;
pub use memory::MemoryBackend;
#[cfg(feature = "redis")]
pub use self::redis::RedisBackend;

/// Trait for key-value backend implementations
///
/// Calls block until the backend answers. Errors are returned unchanged;
/// nothing is retried.
pub trait KvBackend: Send + Sync + Debug {
    /// Read `field` of map `map`
    fn hget(&self, map: &str, field: &str) -> Result<Option<Bytes>>;

    /// Store `value` under `field` of map `map`, creating the map if needed
    fn hset(&self, map: &str, field: &str, value: &[u8]) -> Result<()>;

    /// Remove `field` from map `map`; returns whether it existed
    fn hdel(&self, map: &str, field: &str) -> Result<bool>;

    /// Add `member` to ordered set `set` with `score`, updating the score if present
    fn zadd(&self, set: &str, score: i64, member: &str) -> Result<()>;

    /// All members of `set`, lowest score first
    fn zrange(&self, set: &str) -> Result<Vec<String>>;

    /// Delete whole maps or sets
    fn del(&self, keys: &[String]) -> Result<()>;

    /// Release backend resources. Later calls fail with a backend error;
    /// closing again does nothing.
    fn close(&self) -> Result<()>;
}

/// Error for a call on a backend that was closed.
pub(crate) fn closed_error() -> OoxmlError {
    OoxmlError::Backend("cell store backend is closed".to_string())
}
