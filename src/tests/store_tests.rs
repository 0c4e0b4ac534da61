use tempfile::TempDir;

use crate::error::ShopError;
use crate::models::{Product, User};
use crate::store::{JsonFileStore, Store};

async fn open_store(dir: &TempDir) -> JsonFileStore<Product> {
    JsonFileStore::open(dir.path().join("products.json"))
        .await
        .unwrap()
}

#[tokio::test]
async fn open_seeds_missing_file() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let contents = tokio::fs::read_to_string(store.path()).await.unwrap();
    assert_eq!(contents, "[]");
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let records = vec![
        Product::new(
            "Desk".to_string(),
            120.0,
            Some("oak".to_string()),
            Some("Furniture".to_string()),
            None,
        ),
        Product::new(
            "Mug".to_string(),
            9.0,
            None,
            None,
            Some("/uploads/mug.png".to_string()),
        ),
    ];
    store.save(&records).await.unwrap();
    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, records);

    // save(load()) leaves the content unchanged
    store.save(&loaded).await.unwrap();
    assert_eq!(store.load().await.unwrap(), records);
}

#[tokio::test]
async fn existing_content_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = open_store(&dir).await;
        store
            .save(&[Product::new("Desk".to_string(), 120.0, None, None, None)])
            .await
            .unwrap();
    }
    // Re-opening must not reseed the file
    let store = open_store(&dir).await;
    assert_eq!(store.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn blank_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("users.json");
    tokio::fs::write(&path, "\n").await.unwrap();
    let store = JsonFileStore::<User>::open(path).await.unwrap();
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_file_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("users.json");
    tokio::fs::write(&path, "{ definitely not an array").await.unwrap();
    let store = JsonFileStore::<User>::open(path).await.unwrap();
    let result = store.load().await;
    assert!(matches!(result, Err(ShopError::MalformedStore(_, _))));
}
