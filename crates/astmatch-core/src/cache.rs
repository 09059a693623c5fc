//! Per-root content cache (component C).
//!
//! Scoped to a translation-unit root: maps a filename to its full byte
//! content, loaded lazily on first access. A root built from in-memory text
//! pre-seeds the cache so `raw_signature()` never touches the filesystem.

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use parking_lot::Mutex;

use astmatch_error::{Error, ErrorKind, Result};

/// Thread-safe, lazily-populated byte cache keyed by filename.
#[derive(Default)]
pub struct ContentCache {
    files: Mutex<HashMap<String, Arc<[u8]>>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the cache with in-memory content so a later `get_content`
    /// for this filename never reads from disk.
    pub fn seed(&self, filename: impl Into<String>, content: impl Into<Arc<[u8]>>) {
        self.files.lock().insert(filename.into(), content.into());
    }

    /// Return the UTF-8 slice `[start, end)` of `filename`'s content,
    /// reading and caching the whole file on first access.
    pub fn get_content(&self, filename: &str, start: usize, end: usize) -> Result<String> {
        if start == end {
            return Ok(String::new());
        }
        let bytes = self.load(filename)?;
        let slice = bytes.get(start..end).ok_or_else(|| {
            Error::new(
                ErrorKind::Unexpected,
                format!(
                    "byte range {start}..{end} out of bounds for {filename} ({} bytes)",
                    bytes.len()
                ),
            )
        })?;
        String::from_utf8(slice.to_vec())
            .map_err(|e| Error::new(ErrorKind::EncodingError, e.to_string()).set_source(e))
    }

    fn load(&self, filename: &str) -> Result<Arc<[u8]>> {
        if let Some(existing) = self.files.lock().get(filename) {
            return Ok(existing.clone());
        }
        tracing::debug!(file = filename, "content_cache: loading file from disk");
        let content: Arc<[u8]> = fs::read(filename)
            .map_err(|e| {
                Error::from(e)
                    .with_operation("content_cache::get_content")
                    .with_context("file", filename.to_string())
            })?
            .into();
        self.files.lock().insert(filename.to_string(), content.clone());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_content_is_sliced_without_disk_access() {
        let cache = ContentCache::new();
        cache.seed("test.cpp", Arc::<[u8]>::from(b"int a = 3;".as_slice()));
        assert_eq!(cache.get_content("test.cpp", 0, 3).unwrap(), "int");
        assert_eq!(cache.get_content("test.cpp", 4, 5).unwrap(), "a");
    }

    #[test]
    fn zero_length_range_is_empty_without_touching_cache() {
        let cache = ContentCache::new();
        assert_eq!(cache.get_content("missing.cpp", 4, 4).unwrap(), "");
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let cache = ContentCache::new();
        let err = cache.get_content("/nonexistent/path/astmatch.cpp", 0, 1);
        assert!(err.is_err());
    }
}
