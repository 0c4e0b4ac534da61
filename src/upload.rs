use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::error::ShopError;

/// Web path prefix stored files are served under.
pub const UPLOAD_ROUTE: &str = "/uploads";

/// Persists uploaded files under one directory and hands out servable
/// reference paths. No content-type, size or extension checks.
pub struct UploadSink {
    dir: PathBuf,
}

impl UploadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes one uploaded file and returns its reference path. The stored
    /// name is a fresh UUID joined with the client-supplied name, stripped
    /// of any path components.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<String, ShopError> {
        let filename = format!("{}-{}", Uuid::new_v4(), sanitize(original_name));
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ShopError::Upload(e.to_string()))?;
        fs::write(self.dir.join(&filename), data)
            .await
            .map_err(|e| ShopError::Upload(e.to_string()))?;
        Ok(format!("{UPLOAD_ROUTE}/{filename}"))
    }

    /// Deletes the file behind a reference returned by [`UploadSink::store`].
    /// A reference whose file is already gone is not an error.
    pub async fn remove(&self, reference: &str) -> Result<(), ShopError> {
        let name = reference.rsplit('/').next().unwrap_or(reference);
        match fs::remove_file(self.dir.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ShopError::Upload(e.to_string())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn sanitize(name: &str) -> String {
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if name.is_empty() {
        "file".to_string()
    } else {
        name.to_string()
    }
}
