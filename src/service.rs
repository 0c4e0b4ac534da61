use rand::Rng;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ShopError;
use crate::models::{Product, ProductPatch, User};
use crate::store::Store;
use crate::upload::UploadSink;

const CLUSTER_LABELS: [&str; 4] = [
    "Tech Enthusiast",
    "Fashion Lover",
    "Budget Shopper",
    "Lifestyle Shopper",
];

/// One uploaded file as received by the HTTP layer.
pub struct UploadedFile {
    pub name: String,
    pub data: Vec<u8>,
}

/// Parameters for a new catalog entry, already presence-validated by the
/// HTTP layer.
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: u32,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ClusterAssignment {
    pub user: String,
    pub cluster: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub product: Product,
    pub ai_score: u32,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelEvaluation {
    pub rmse: f64,
    pub mae: f64,
    pub precision_at_k: f64,
    pub note: String,
}

/// Application logic over the two injected stores and the upload sink.
///
/// Mutating operations hold the owning store's mutex for the whole
/// load-mutate-save cycle, so two writers on the same store cannot lose
/// each other's update. Reads take no lock.
pub struct ShopService<U, P> {
    users: U,
    products: P,
    uploads: UploadSink,
    users_write: Mutex<()>,
    products_write: Mutex<()>,
}

impl<U: Store<User>, P: Store<Product>> ShopService<U, P> {
    pub fn new(users: U, products: P, uploads: UploadSink) -> Self {
        Self {
            users,
            products,
            uploads,
            users_write: Mutex::new(()),
            products_write: Mutex::new(()),
        }
    }

    // AUTH

    pub async fn signup(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<User, ShopError> {
        info!("Signing up {}", email);
        let _guard = self.users_write.lock().await;
        let mut users = self.users.load().await?;
        if users.iter().any(|u| u.email == email) {
            return Err(ShopError::EmailAlreadyRegistered(email));
        }
        let user = User::new(name, email, password);
        users.push(user.clone());
        self.users.save(&users).await?;
        debug!("User created with ID: {}", user.id);
        Ok(user)
    }

    /// Exact email + password match. The token is derived from the user id
    /// alone; it is a client-side session marker, not a verifiable credential.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), ShopError> {
        let users = self.users.load().await?;
        let user = users
            .into_iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or(ShopError::InvalidCredentials)?;
        info!("Login for user {}", user.id);
        let token = format!("token-{}", user.id);
        Ok((user, token))
    }

    // CATALOG

    pub async fn list_products(&self) -> Result<Vec<Product>, ShopError> {
        self.products.load().await
    }

    /// Stores the image (when supplied) before touching the catalog, then
    /// appends the new record.
    pub async fn create_product(
        &self,
        new: NewProduct,
        image: Option<UploadedFile>,
    ) -> Result<Product, ShopError> {
        let image_ref = match image {
            Some(file) => Some(self.uploads.store(&file.name, &file.data).await?),
            None => None,
        };
        let product = Product::new(new.name, new.price, new.description, new.category, image_ref);
        info!("Creating product {} ({})", product.name, product.id);
        let _guard = self.products_write.lock().await;
        let mut products = self.products.load().await?;
        products.push(product.clone());
        self.products.save(&products).await?;
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, ShopError> {
        let _guard = self.products_write.lock().await;
        let mut products = self.products.load().await?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ShopError::ProductNotFound(id.to_string()))?;
        product.apply(patch);
        let updated = product.clone();
        self.products.save(&products).await?;
        info!("Updated product {}", updated.id);
        Ok(updated)
    }

    /// Removes the record and, when it references an image, the underlying
    /// file. Image removal is idempotent.
    pub async fn delete_product(&self, id: Uuid) -> Result<(), ShopError> {
        let _guard = self.products_write.lock().await;
        let mut products = self.products.load().await?;
        let idx = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ShopError::ProductNotFound(id.to_string()))?;
        let removed = products.remove(idx);
        if let Some(image) = &removed.image {
            self.uploads.remove(image).await?;
        }
        self.products.save(&products).await?;
        info!("Deleted product {}", id);
        Ok(())
    }

    // SIMULATION

    pub fn feature_importance(&self) -> Vec<FeatureImportance> {
        [
            ("Purchase History", 34),
            ("Search Frequency", 22),
            ("Category Preference", 18),
            ("Click Behavior", 15),
            ("Rating Behavior", 11),
        ]
        .into_iter()
        .map(|(feature, importance)| FeatureImportance {
            feature: feature.to_string(),
            importance,
        })
        .collect()
    }

    pub fn assign_cluster(&self, user: Option<String>) -> ClusterAssignment {
        let mut rng = rand::rng();
        let cluster = CLUSTER_LABELS[rng.random_range(0..CLUSTER_LABELS.len())];
        ClusterAssignment {
            user: user.unwrap_or_else(|| "Unknown".to_string()),
            cluster: cluster.to_string(),
            description: "Simulated K-Means clustering result".to_string(),
        }
    }

    /// Annotates every product with a uniform random score in [60, 100] and
    /// returns the top 5 by descending score. Not deterministic.
    pub async fn recommendations(&self) -> Result<Vec<ScoredProduct>, ShopError> {
        let products = self.products.load().await?;
        let mut rng = rand::rng();
        let mut scored: Vec<ScoredProduct> = products
            .into_iter()
            .map(|product| ScoredProduct {
                product,
                ai_score: rng.random_range(60..=100),
            })
            .collect();
        scored.sort_by(|a, b| b.ai_score.cmp(&a.ai_score));
        scored.truncate(5);
        Ok(scored)
    }

    pub fn model_evaluation(&self) -> ModelEvaluation {
        ModelEvaluation {
            rmse: 0.83,
            mae: 0.57,
            precision_at_k: 0.89,
            note: "Simulated evaluation metrics".to_string(),
        }
    }
}
