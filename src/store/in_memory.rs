use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Record, Store};
use crate::error::ShopError;

/// Backing that keeps the full sequence in process memory. Used by the test
/// suite; also the seam where an embedded engine would slot in.
pub struct InMemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T: Record> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Record> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Store<T> for InMemoryStore<T> {
    async fn load(&self) -> Result<Vec<T>, ShopError> {
        Ok(self.records.lock().await.clone())
    }

    async fn save(&self, records: &[T]) -> Result<(), ShopError> {
        *self.records.lock().await = records.to_vec();
        Ok(())
    }
}
