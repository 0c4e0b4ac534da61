mod auth_tests;
mod simulation_tests;
mod store_tests;

use tempfile::TempDir;

use crate::models::{Product, User};
use crate::service::ShopService;
use crate::store::InMemoryStore;
use crate::upload::UploadSink;

/// In-memory stores plus a throwaway upload directory. The `TempDir` must be
/// kept alive for the duration of the test.
pub fn create_test_service() -> (
    ShopService<InMemoryStore<User>, InMemoryStore<Product>>,
    TempDir,
) {
    let uploads_dir = TempDir::new().expect("create upload tempdir");
    let service = ShopService::new(
        InMemoryStore::new(),
        InMemoryStore::new(),
        UploadSink::new(uploads_dir.path()),
    );
    (service, uploads_dir)
}
