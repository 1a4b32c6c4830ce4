//! One JSON array document on disk

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::shared::errors::{DomainResult, InfraError};

/// A collection persisted as a single JSON array.
///
/// Every mutation loads the whole document, edits it in memory and writes it
/// back through a sibling temp file plus rename. Mutations are serialised by
/// an async mutex held across the full read-modify-write cycle; reads take no
/// lock because the rename makes each write visible all at once.
///
/// Only one process may write a given data directory.
pub struct JsonCollection<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current document. A missing or blank file is an empty collection.
    pub async fn read_all(&self) -> Result<Vec<T>, InfraError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Run `f` against the loaded document and persist the result.
    ///
    /// Nothing is written when `f` fails.
    pub async fn mutate<R, F>(&self, f: F) -> DomainResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> DomainResult<R>,
    {
        let _guard = self.write_lock.lock().await;

        let mut items = self.read_all().await?;
        let out = f(&mut items)?;
        self.write_all(&items).await?;
        Ok(out)
    }

    async fn write_all(&self, items: &[T]) -> Result<(), InfraError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(items)?;
        let temp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&temp_path, body).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), records = items.len(), "Collection written");
        Ok(())
    }
}
