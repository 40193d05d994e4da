//! On-disk backend.
//!
//! Maps and sets become directories under a root; fields and members become
//! files. Map fields hold the encoded record, set members hold their score.
//! Names are percent-encoded so that sheet names cannot escape the root.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use parking_lot::Mutex;
use tempfile::TempDir;
use tracing::debug;

use super::{KvBackend, closed_error};
use crate::ooxml::error::{OoxmlError, Result};

const MAPS_DIR: &str = "maps";
const SETS_DIR: &str = "sets";

/// Backend storing maps and sets as files.
#[derive(Debug)]
pub struct DiskBackend {
    root: PathBuf,
    /// Present when the root is a scratch directory owned by this backend
    scratch: Mutex<Option<TempDir>>,
    closed: AtomicBool,
}

impl DiskBackend {
    /// Use `root` as the storage directory, creating it if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        debug!("Opened disk cell store at {}", root.display());
        Ok(Self {
            root,
            scratch: Mutex::new(None),
            closed: AtomicBool::new(false),
        })
    }

    /// Store into a fresh scratch directory, removed on [`close`](KvBackend::close).
    pub fn scratch() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("tamarind-cells-").tempdir()?;
        debug!("Opened scratch disk cell store at {}", dir.path().display());
        Ok(Self {
            root: dir.path().to_path_buf(),
            scratch: Mutex::new(Some(dir)),
            closed: AtomicBool::new(false),
        })
    }

    /// Storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn check_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(closed_error())
        } else {
            Ok(())
        }
    }

    fn map_dir(&self, map: &str) -> PathBuf {
        self.root.join(MAPS_DIR).join(encode_name(map))
    }

    fn set_dir(&self, set: &str) -> PathBuf {
        self.root.join(SETS_DIR).join(encode_name(set))
    }
}

impl KvBackend for DiskBackend {
    fn hget(&self, map: &str, field: &str) -> Result<Option<Bytes>> {
        self.check_open()?;
        match fs::read(self.map_dir(map).join(encode_name(field))) {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn hset(&self, map: &str, field: &str, value: &[u8]) -> Result<()> {
        self.check_open()?;
        let dir = self.map_dir(map);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(encode_name(field)), value)?;
        Ok(())
    }

    fn hdel(&self, map: &str, field: &str) -> Result<bool> {
        self.check_open()?;
        remove(&self.map_dir(map).join(encode_name(field)), |p| fs::remove_file(p))
    }

    fn zadd(&self, set: &str, score: i64, member: &str) -> Result<()> {
        self.check_open()?;
        let dir = self.set_dir(set);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(encode_name(member)), score.to_string())?;
        Ok(())
    }

    fn zrange(&self, set: &str) -> Result<Vec<String>> {
        self.check_open()?;
        let entries = match fs::read_dir(self.set_dir(set)) {
            Ok(entries) => entries,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut scored = Vec::new();
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let member = file_name
                .to_str()
                .and_then(decode_name)
                .ok_or_else(|| OoxmlError::Backend(format!("unexpected file {:?}", file_name)))?;
            let score = fs::read_to_string(entry.path())?
                .trim()
                .parse::<i64>()
                .map_err(|e| OoxmlError::Backend(format!("bad score for {}: {}", member, e)))?;
            scored.push((score, member));
        }
        scored.sort();
        Ok(scored.into_iter().map(|(_, member)| member).collect())
    }

    fn del(&self, keys: &[String]) -> Result<()> {
        self.check_open()?;
        for key in keys {
            remove(&self.map_dir(key), |p| fs::remove_dir_all(p))?;
            remove(&self.set_dir(key), |p| fs::remove_dir_all(p))?;
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        if let Some(dir) = self.scratch.lock().take() {
            debug!("Removing scratch disk cell store at {}", dir.path().display());
            dir.close()?;
        }
        Ok(())
    }
}

/// Run a removal, treating an already-missing path as success.
fn remove<F>(path: &Path, op: F) -> Result<bool>
where
    F: FnOnce(&Path) -> std::io::Result<()>,
{
    match op(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == IoErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Percent-encode every byte outside `[A-Za-z0-9_-]`.
fn encode_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for &b in name.as_bytes() {
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
            out.push(b as char);
        } else {
            out.push('%');
            out.push_str(&format!("{:02X}", b));
        }
    }
    out
}

fn decode_name(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
