//! In-process backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use parking_lot::RwLock;

use super::{KvBackend, closed_error};
use crate::ooxml::error::Result;

/// Backend keeping every map and set in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    maps: RwLock<HashMap<String, HashMap<String, Bytes>>>,
    sets: RwLock<HashMap<String, HashMap<String, i64>>>,
    closed: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(closed_error())
        } else {
            Ok(())
        }
    }
}

impl KvBackend for MemoryBackend {
    fn hget(&self, map: &str, field: &str) -> Result<Option<Bytes>> {
        self.check_open()?;
        Ok(self.maps.read().get(map).and_then(|m| m.get(field)).cloned())
    }

    fn hset(&self, map: &str, field: &str, value: &[u8]) -> Result<()> {
        self.check_open()?;
        self.maps
            .write()
            .entry(map.to_string())
            .or_default()
            .insert(field.to_string(), Bytes::copy_from_slice(value));
        Ok(())
    }

    fn hdel(&self, map: &str, field: &str) -> Result<bool> {
        self.check_open()?;
        Ok(self
            .maps
            .write()
            .get_mut(map)
            .is_some_and(|m| m.remove(field).is_some()))
    }

    fn zadd(&self, set: &str, score: i64, member: &str) -> Result<()> {
        self.check_open()?;
        self.sets
            .write()
            .entry(set.to_string())
            .or_default()
            .insert(member.to_string(), score);
        Ok(())
    }

    fn zrange(&self, set: &str) -> Result<Vec<String>> {
        self.check_open()?;
        let sets = self.sets.read();
        let Some(members) = sets.get(set) else {
            return Ok(Vec::new());
        };
        let mut scored: Vec<(i64, &String)> = members.iter().map(|(m, s)| (*s, m)).collect();
        scored.sort();
        Ok(scored.into_iter().map(|(_, m)| m.clone()).collect())
    }

    fn del(&self, keys: &[String]) -> Result<()> {
        self.check_open()?;
        let mut maps = self.maps.write();
        let mut sets = self.sets.write();
        for key in keys {
            maps.remove(key);
            sets.remove(key);
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.maps.write().clear();
            self.sets.write().clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xlsx::store::backend::tests::exercise_backend;

    #[test]
    fn test_memory_backend() {
        exercise_backend(&MemoryBackend::new());
    }
}
