use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ShopError;

/// A persisted entity. Stores only need identity on top of serde.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> Uuid;
}

/// Repository over one ordered record collection. Backings are whole-file
/// (or whole-sequence) read/write; there are no partial updates.
#[async_trait]
pub trait Store<T: Record>: Send + Sync {
    /// Full sequence in storage order. A missing backing file reads as empty.
    async fn load(&self) -> Result<Vec<T>, ShopError>;

    /// Overwrites the full sequence.
    async fn save(&self, records: &[T]) -> Result<(), ShopError>;
}

#[async_trait]
impl<T: Record, S: Store<T>> Store<T> for Arc<S> {
    async fn load(&self) -> Result<Vec<T>, ShopError> {
        S::load(self).await
    }

    async fn save(&self, records: &[T]) -> Result<(), ShopError> {
        S::save(self, records).await
    }
}

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
