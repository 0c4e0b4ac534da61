use utoipa::OpenApi;

use crate::{
    api::models::{
        CreateProductForm, ErrorResponse, LoginRequest, LoginResponse, MessageResponse,
        ProductResponse, SignupRequest, SignupResponse, UpdateProductRequest,
    },
    models::{Product, PublicUser},
    service::{ClusterAssignment, FeatureImportance, ModelEvaluation, ScoredProduct},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::signup,
        super::handlers::login,
        super::handlers::list_products,
        super::handlers::create_product,
        super::handlers::update_product,
        super::handlers::delete_product,
        super::handlers::feature_importance,
        super::handlers::cluster,
        super::handlers::recommend,
        super::handlers::model_eval
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        UpdateProductRequest,
        CreateProductForm,
        SignupResponse,
        LoginResponse,
        ProductResponse,
        MessageResponse,
        ErrorResponse,
        Product,
        PublicUser,
        FeatureImportance,
        ClusterAssignment,
        ScoredProduct,
        ModelEvaluation
    )),
    info(
        title = "Shoplite API",
        description = "Auth, product catalog and simulated recommendation endpoints",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
