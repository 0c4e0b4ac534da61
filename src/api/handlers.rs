use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    extract::multipart::MultipartError,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::api::models::{
    ClusterQuery, ErrorResponse, LoginRequest, LoginResponse, MessageResponse, ProductResponse,
    SignupRequest, SignupResponse, UpdateProductRequest,
};
use crate::error::ShopError;
use crate::models::{Product, ProductPatch, User};
use crate::service::{
    ClusterAssignment, FeatureImportance, ModelEvaluation, NewProduct, ScoredProduct, ShopService,
    UploadedFile,
};
use crate::store::JsonFileStore;

// Newtype wrapper for ShopError to implement IntoResponse
pub struct ApiError(ShopError);

impl From<ShopError> for ApiError {
    fn from(err: ShopError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ShopError::MissingField(_)
            | ShopError::InvalidField(_, _)
            | ShopError::EmailAlreadyRegistered(_) => StatusCode::BAD_REQUEST,
            ShopError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ShopError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            ShopError::MalformedStore(_, _) | ShopError::Io(_, _) | ShopError::Upload(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!("{}", self.0);
        }
        (
            status,
            Json(ErrorResponse {
                message: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// Define API routes
pub fn routes(service: Arc<ShopService<JsonFileStore<User>, JsonFileStore<Product>>>) -> Router {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/products", get(list_products))
        .route(
            "/upload",
            post(create_product).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/products/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/ai/feature-importance", get(feature_importance))
        .route("/ai/cluster", get(cluster))
        .route("/ai/recommend", get(recommend))
        .route("/ai/model-eval", get(model_eval))
        .with_state(service)
}

/// Rejects absent and empty values, per the required-field rules.
fn require(field: &'static str, value: Option<String>) -> Result<String, ShopError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ShopError::MissingField(field)),
    }
}

fn multipart_err(err: MultipartError) -> ShopError {
    ShopError::Upload(err.to_string())
}

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Signup success", body = SignupResponse),
        (status = 400, description = "Missing fields or email already registered", body = ErrorResponse)
    )
)]
pub(super) async fn signup(
    State(service): State<Arc<ShopService<JsonFileStore<User>, JsonFileStore<Product>>>>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let name = require("name", req.name)?;
    let email = require("email", req.email)?;
    let password = require("password", req.password)?;
    let user = service.signup(name, email, password).await?;
    Ok(Json(SignupResponse {
        message: "Signup success".to_string(),
        user: user.public(),
    }))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub(super) async fn login(
    State(service): State<Arc<ShopService<JsonFileStore<User>, JsonFileStore<Product>>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = require("email", req.email)?;
    let password = require("password", req.password)?;
    let (user, token) = service.login(&email, &password).await?;
    Ok(Json(LoginResponse {
        message: "Login success".to_string(),
        token,
        user: user.public(),
    }))
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "Full catalog in storage order", body = [Product])
    )
)]
pub(super) async fn list_products(
    State(service): State<Arc<ShopService<JsonFileStore<User>, JsonFileStore<Product>>>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(service.list_products().await?))
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = crate::api::models::CreateProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product uploaded", body = ProductResponse),
        (status = 400, description = "Missing name or price", body = ErrorResponse)
    )
)]
pub(super) async fn create_product(
    State(service): State<Arc<ShopService<JsonFileStore<User>, JsonFileStore<Product>>>>,
    mut form: Multipart,
) -> Result<Json<ProductResponse>, ApiError> {
    let mut name = None;
    let mut price = None;
    let mut description = None;
    let mut category = None;
    let mut image = None;

    while let Some(field) = form.next_field().await.map_err(multipart_err)? {
        let Some(field_name) = field.name().map(str::to_owned) else {
            continue;
        };
        match field_name.as_str() {
            "name" => name = Some(field.text().await.map_err(multipart_err)?),
            "price" => price = Some(field.text().await.map_err(multipart_err)?),
            "description" => description = Some(field.text().await.map_err(multipart_err)?),
            "category" => category = Some(field.text().await.map_err(multipart_err)?),
            "image" => {
                let original = field.file_name().map(str::to_owned);
                let data = field.bytes().await.map_err(multipart_err)?;
                // A file input submitted without a selection arrives as an
                // empty nameless part; treat it as no image.
                if original.is_none() && data.is_empty() {
                    continue;
                }
                image = Some(UploadedFile {
                    name: original.unwrap_or_else(|| "file".to_string()),
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }

    let name = require("name", name)?;
    let price_raw = require("price", price)?;
    let price = parse_price(&price_raw)?;

    let product = service
        .create_product(
            NewProduct {
                name,
                price,
                description,
                category,
            },
            image,
        )
        .await?;
    Ok(Json(ProductResponse {
        message: "Product uploaded!".to_string(),
        product,
    }))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    request_body = UpdateProductRequest,
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 404, description = "Unknown product", body = ErrorResponse)
    )
)]
pub(super) async fn update_product(
    State(service): State<Arc<ShopService<JsonFileStore<User>, JsonFileStore<Product>>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product_id = parse_id(&id)?;
    if let Some(price) = req.price {
        if !price.is_finite() || price < 0.0 {
            return Err(ShopError::InvalidField("price", price.to_string()).into());
        }
    }
    let product = service
        .update_product(
            product_id,
            ProductPatch {
                name: req.name,
                price: req.price,
                description: req.description,
                category: req.category,
            },
        )
        .await?;
    Ok(Json(ProductResponse {
        message: "Product updated".to_string(),
        product,
    }))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Unknown product", body = ErrorResponse)
    )
)]
pub(super) async fn delete_product(
    State(service): State<Arc<ShopService<JsonFileStore<User>, JsonFileStore<Product>>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let product_id = parse_id(&id)?;
    service.delete_product(product_id).await?;
    Ok(Json(MessageResponse {
        message: "Product deleted".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/ai/feature-importance",
    responses(
        (status = 200, description = "Fixed feature importance table", body = [FeatureImportance])
    )
)]
pub(super) async fn feature_importance(
    State(service): State<Arc<ShopService<JsonFileStore<User>, JsonFileStore<Product>>>>,
) -> Json<Vec<FeatureImportance>> {
    Json(service.feature_importance())
}

#[utoipa::path(
    get,
    path = "/ai/cluster",
    params(ClusterQuery),
    responses(
        (status = 200, description = "Random cluster assignment", body = ClusterAssignment)
    )
)]
pub(super) async fn cluster(
    State(service): State<Arc<ShopService<JsonFileStore<User>, JsonFileStore<Product>>>>,
    Query(query): Query<ClusterQuery>,
) -> Json<ClusterAssignment> {
    Json(service.assign_cluster(query.user))
}

#[utoipa::path(
    get,
    path = "/ai/recommend",
    responses(
        (status = 200, description = "Top 5 randomly scored products", body = [ScoredProduct])
    )
)]
pub(super) async fn recommend(
    State(service): State<Arc<ShopService<JsonFileStore<User>, JsonFileStore<Product>>>>,
) -> Result<Json<Vec<ScoredProduct>>, ApiError> {
    Ok(Json(service.recommendations().await?))
}

#[utoipa::path(
    get,
    path = "/ai/model-eval",
    responses(
        (status = 200, description = "Fixed evaluation metrics", body = ModelEvaluation)
    )
)]
pub(super) async fn model_eval(
    State(service): State<Arc<ShopService<JsonFileStore<User>, JsonFileStore<Product>>>>,
) -> Json<ModelEvaluation> {
    Json(service.model_evaluation())
}

/// An id that does not parse cannot name any product, so it reads as 404.
fn parse_id(raw: &str) -> Result<Uuid, ShopError> {
    Uuid::parse_str(raw).map_err(|_| ShopError::ProductNotFound(raw.to_string()))
}

fn parse_price(raw: &str) -> Result<f64, ShopError> {
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ShopError::InvalidField("price", raw.to_string())),
    }
}
