use async_trait::async_trait;

mod error;
mod http;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use error::ApiError;
pub use http::HttpFlyerApi;
pub use types::{DayMeal, ExtractAck, FlyerItem, FlyerSummary, MealPlan, StoredFlyer};

/// Remote calls the client makes: one catalog listing plus the backend pipeline.
#[async_trait]
pub trait FlyerApi: Send + Sync {
    async fn fetch_catalog(&self, postal_code: &str) -> Result<Vec<FlyerSummary>, ApiError>;

    async fn fetch_and_store(&self, merchant_name: &str, postal_code: &str) -> Result<StoredFlyer, ApiError>;

    async fn extract_items(&self, store_name: &str, image_path: &str) -> Result<ExtractAck, ApiError>;

    async fn generate_meal_plan(&self, store_name: &str) -> Result<MealPlan, ApiError>;

    async fn flyer_items(&self, store_name: &str) -> Result<Vec<FlyerItem>, ApiError>;

    /// Host named in catalog connection errors.
    fn catalog_host(&self) -> String {
        "the flyer catalog".to_string()
    }
}
