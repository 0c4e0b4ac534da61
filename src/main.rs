use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use http::{Method, header};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use shoplite::api::{handlers, openapi::ApiDoc};
use shoplite::config::CONFIG;
use shoplite::models::{Product, User};
use shoplite::service::ShopService;
use shoplite::store::JsonFileStore;
use shoplite::upload::UploadSink;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.as_str())
        .init();

    // Stores are seeded with an empty array when their files are absent
    let users = JsonFileStore::<User>::open(CONFIG.users_file.as_str()).await?;
    let products = JsonFileStore::<Product>::open(CONFIG.products_file.as_str()).await?;
    tokio::fs::create_dir_all(&CONFIG.upload_dir).await?;
    let uploads = UploadSink::new(CONFIG.upload_dir.as_str());
    let service = Arc::new(ShopService::new(users, products, uploads));

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(handlers::routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service("/uploads", ServeDir::new(&CONFIG.upload_dir))
        .fallback_service(ServeDir::new(&CONFIG.public_dir))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    let addr = SocketAddr::from(([0, 0, 0, 0], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
