use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use crate::errors::AppResult;

/// A collection of records persisted as a single JSON array file.
///
/// Every access goes through one async lock, so a load-mutate-save cycle run
/// through [`JsonStore::update`] never interleaves with another one on the same
/// store. Saves write a temporary sibling file and rename it over the target,
/// so a reader sees either the old array or the new one, never a partial file.
pub struct JsonStore<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record. A file that does not exist yet is an empty collection.
    pub async fn load_all(&self) -> AppResult<Vec<T>> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Replaces the persisted contents with `records`.
    pub async fn save_all(&self, records: Vec<T>) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        self.write(records).await
    }

    /// Runs a full load-mutate-save cycle under the store lock.
    ///
    /// If `mutate` returns an error nothing is written.
    pub async fn update<R, F>(&self, mutate: F) -> AppResult<R>
    where
        R: Send,
        F: FnOnce(&mut Vec<T>) -> AppResult<R> + Send,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.read().await?;
        let result = mutate(&mut records)?;
        self.write(records).await?;
        Ok(result)
    }

    async fn read(&self) -> AppResult<Vec<T>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Store file {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::error!("Failed to read {}: {}", self.path.display(), e);
                return Err(e.into());
            }
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let records = serde_json::from_slice(&data).map_err(|e| {
            tracing::error!("Corrupt store file {}: {}", self.path.display(), e);
            e
        })?;
        Ok(records)
    }

    async fn write(&self, records: Vec<T>) -> AppResult<()> {
        let path = self.path.clone();
        let count = records.len();

        // Serialization and the rename are blocking, keep them off the runtime threads
        tokio::task::spawn_blocking(move || write_atomic(&path, &records)).await??;

        tracing::trace!("Persisted {} records to {}", count, self.path.display());
        Ok(())
    }
}

fn write_atomic<T: Serialize>(path: &Path, records: &[T]) -> AppResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let data = serde_json::to_vec_pretty(records)?;
    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(&data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| {
        tracing::error!("Failed to replace {}: {}", path.display(), e.error);
        e.error
    })?;
    Ok(())
}

/// Next identifier for a collection: one past the largest, or 1 when empty.
pub fn next_id(ids: impl IntoIterator<Item = u64>) -> u64 {
    ids.into_iter().max().map_or(1, |max| max + 1)
}
