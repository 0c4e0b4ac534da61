use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{Record, Store};
use crate::error::ShopError;

/// Flat-file backing: one pretty-printed JSON array per store.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Record> JsonFileStore<T> {
    /// Opens a store at `path`, seeding the file with an empty array when it
    /// does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ShopError> {
        let path = path.into();
        match fs::try_exists(&path).await {
            Ok(true) => {}
            Ok(false) => fs::write(&path, "[]")
                .await
                .map_err(|e| io_err(&path, &e))?,
            Err(e) => return Err(io_err(&path, &e)),
        }
        Ok(Self {
            path,
            _record: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<T: Record> Store<T> for JsonFileStore<T> {
    async fn load(&self) -> Result<Vec<T>, ShopError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_err(&self.path, &e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            ShopError::MalformedStore(self.path.display().to_string(), e.to_string())
        })
    }

    async fn save(&self, records: &[T]) -> Result<(), ShopError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| ShopError::Io(self.path.display().to_string(), e.to_string()))?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| io_err(&self.path, &e))
    }
}

fn io_err(path: &Path, err: &std::io::Error) -> ShopError {
    ShopError::Io(path.display().to_string(), err.to_string())
}
