use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{ApiError, ExtractAck, FlyerApi, FlyerItem, FlyerSummary, MealPlan, StoredFlyer};
use super::types::DayMeal;

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Catalog { postal_code: String },
    Store { merchant_name: String, postal_code: String },
    Extract { store_name: String, image_path: String },
    Generate { store_name: String },
    Items { store_name: String },
}

/// Scripted `FlyerApi` that records every call. An unscripted call answers 599.
#[derive(Debug, Default)]
pub struct MockApi {
    catalog: Mutex<VecDeque<Result<Vec<FlyerSummary>, ApiError>>>,
    store: Mutex<VecDeque<Result<StoredFlyer, ApiError>>>,
    extract: Mutex<VecDeque<Result<ExtractAck, ApiError>>>,
    generate: Mutex<VecDeque<Result<MealPlan, ApiError>>>,
    items: Mutex<VecDeque<Result<Vec<FlyerItem>, ApiError>>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_catalog(&self, resp: Result<Vec<FlyerSummary>, ApiError>) {
        self.catalog.lock().unwrap().push_back(resp);
    }

    pub fn push_store(&self, resp: Result<StoredFlyer, ApiError>) {
        self.store.lock().unwrap().push_back(resp);
    }

    pub fn push_extract(&self, resp: Result<ExtractAck, ApiError>) {
        self.extract.lock().unwrap().push_back(resp);
    }

    pub fn push_generate(&self, resp: Result<MealPlan, ApiError>) {
        self.generate.lock().unwrap().push_back(resp);
    }

    pub fn push_items(&self, resp: Result<Vec<FlyerItem>, ApiError>) {
        self.items.lock().unwrap().push_back(resp);
    }

    /// Queue a full successful pipeline run.
    pub fn push_happy_pipeline(&self) {
        self.push_store(Ok(StoredFlyer { image_path: "x.jpg".into(), message: Some("stored".into()) }));
        self.push_extract(Ok(ExtractAck { message: Some("ok".into()) }));
        self.push_generate(Ok(sample_meal_plan()));
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T, ApiError>>>) -> Result<T, ApiError> {
    queue.lock().unwrap().pop_front().unwrap_or_else(|| {
        Err(ApiError::Status {
            status: StatusCode::from_u16(599).unwrap(),
            detail: Some("mock response queue is empty".into()),
        })
    })
}

#[async_trait]
impl FlyerApi for MockApi {
    async fn fetch_catalog(&self, postal_code: &str) -> Result<Vec<FlyerSummary>, ApiError> {
        self.record(MockCall::Catalog { postal_code: postal_code.into() });
        pop(&self.catalog)
    }

    async fn fetch_and_store(&self, merchant_name: &str, postal_code: &str) -> Result<StoredFlyer, ApiError> {
        self.record(MockCall::Store { merchant_name: merchant_name.into(), postal_code: postal_code.into() });
        pop(&self.store)
    }

    async fn extract_items(&self, store_name: &str, image_path: &str) -> Result<ExtractAck, ApiError> {
        self.record(MockCall::Extract { store_name: store_name.into(), image_path: image_path.into() });
        pop(&self.extract)
    }

    async fn generate_meal_plan(&self, store_name: &str) -> Result<MealPlan, ApiError> {
        self.record(MockCall::Generate { store_name: store_name.into() });
        pop(&self.generate)
    }

    async fn flyer_items(&self, store_name: &str) -> Result<Vec<FlyerItem>, ApiError> {
        self.record(MockCall::Items { store_name: store_name.into() });
        pop(&self.items)
    }
}

pub fn flyer(id: i64, merchant: &str, categories: &[&str]) -> FlyerSummary {
    FlyerSummary {
        id,
        merchant: merchant.into(),
        flyer_run_id: Some(id * 10),
        thumbnail_url: Some(format!("https://f.wishabi.net/thumb/{id}.jpg")),
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn sample_meal_plan() -> MealPlan {
    let days = [
        ("Monday", "Pasta"),
        ("Tuesday", "Chicken stir-fry"),
        ("Wednesday", "Tacos"),
        ("Thursday", "Lentil soup"),
        ("Friday", "Salmon with rice"),
    ];
    MealPlan {
        days: days
            .iter()
            .map(|(d, m)| DayMeal { day: d.to_string(), meal: m.to_string() })
            .collect(),
        shopping_list: vec!["Milk".into(), "Eggs".into()],
    }
}

pub fn status_error(code: u16, detail: Option<&str>) -> ApiError {
    ApiError::Status {
        status: StatusCode::from_u16(code).unwrap(),
        detail: detail.map(str::to_string),
    }
}
