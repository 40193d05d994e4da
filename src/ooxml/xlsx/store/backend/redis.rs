//! Redis backend.
//!
//! Maps are Redis hashes and sets are sorted sets, so the keyspace is
//! directly inspectable with `redis-cli`.

use bytes::Bytes;
use parking_lot::Mutex;
use redis::{Client, Commands, Connection, RedisResult};
use tracing::debug;

use super::{KvBackend, closed_error};
use crate::ooxml::error::Result;
use crate::ooxml::xlsx::store::config::RedisOptions;

/// Backend talking to a Redis server over one synchronous connection.
///
/// [`close`](KvBackend::close) drops the connection.
pub struct RedisBackend {
    address: String,
    connection: Mutex<Option<Connection>>,
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl RedisBackend {
    /// Connect to the server named by `options`.
    pub fn connect(options: &RedisOptions) -> Result<Self> {
        let address = options.url();
        debug!(
            "Connecting Redis cell store: address={}, dial_timeout={:?}, command_timeout={:?}",
            address,
            options.dial_timeout(),
            options.command_timeout()
        );

        let client = Client::open(address.as_str())?;
        let connection = match options.dial_timeout() {
            Some(timeout) => client.get_connection_with_timeout(timeout)?,
            None => client.get_connection()?,
        };
        if let Some(timeout) = options.command_timeout() {
            connection.set_read_timeout(Some(timeout))?;
            connection.set_write_timeout(Some(timeout))?;
        }

        Ok(Self {
            address,
            connection: Mutex::new(Some(connection)),
        })
    }

    /// Run `command` on the open connection.
    fn with_connection<T>(
        &self,
        command: impl FnOnce(&mut Connection) -> RedisResult<T>,
    ) -> Result<T> {
        let mut guard = self.connection.lock();
        let connection = guard.as_mut().ok_or_else(closed_error)?;
        Ok(command(connection)?)
    }
}

impl KvBackend for RedisBackend {
    fn hget(&self, map: &str, field: &str) -> Result<Option<Bytes>> {
        let value: Option<Vec<u8>> = self.with_connection(|c| c.hget(map, field))?;
        Ok(value.map(Bytes::from))
    }

    fn hset(&self, map: &str, field: &str, value: &[u8]) -> Result<()> {
        self.with_connection(|c| c.hset::<_, _, _, ()>(map, field, value))
    }

    fn hdel(&self, map: &str, field: &str) -> Result<bool> {
        let removed: i64 = self.with_connection(|c| c.hdel(map, field))?;
        Ok(removed > 0)
    }

    fn zadd(&self, set: &str, score: i64, member: &str) -> Result<()> {
        self.with_connection(|c| c.zadd::<_, _, _, ()>(set, member, score))
    }

    fn zrange(&self, set: &str) -> Result<Vec<String>> {
        self.with_connection(|c| c.zrange(set, 0, -1))
    }

    fn del(&self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return self.with_connection(|_| Ok(()));
        }
        self.with_connection(|c| c.del::<_, ()>(keys))
    }

    fn close(&self) -> Result<()> {
        if self.connection.lock().take().is_some() {
            debug!("Closed Redis cell store connection to {}", self.address);
        }
        Ok(())
    }
}
