pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod upload;

pub use error::ShopError;
pub use service::ShopService;
pub use store::{InMemoryStore, JsonFileStore};
pub use upload::UploadSink;

#[cfg(test)]
mod tests; // Include integration tests
