use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ApiError;

/// One flyer as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyerSummary {
    pub id: i64,
    #[serde(default)]
    pub merchant: String,
    #[serde(default)]
    pub flyer_run_id: Option<i64>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl FlyerSummary {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.trim() == category)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogResponse {
    #[serde(default)]
    pub flyers: Vec<FlyerSummary>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StoreRequest<'a> {
    pub merchant_name: &'a str,
    pub postal_code: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoreResponse {
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Backend confirmation that the flyer image is stored and where.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFlyer {
    pub image_path: String,
    pub message: Option<String>,
}

/// A success body without a usable `image_path` cannot feed the extract stage.
impl TryFrom<StoreResponse> for StoredFlyer {
    type Error = ApiError;

    fn try_from(resp: StoreResponse) -> Result<Self, ApiError> {
        let image_path = resp
            .image_path
            .filter(|p| !p.trim().is_empty())
            .ok_or(ApiError::MissingField("image_path"))?;
        Ok(StoredFlyer { image_path, message: resp.message })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ExtractAck {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub store_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    pub meal_plan: Map<String, Value>,
    #[serde(default)]
    pub shopping_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayMeal {
    pub day: String,
    pub meal: String,
}

/// Days stay in the order the server sent them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPlan {
    pub days: Vec<DayMeal>,
    pub shopping_list: Vec<String>,
}

impl From<GenerateResponse> for MealPlan {
    fn from(resp: GenerateResponse) -> Self {
        let days = resp
            .meal_plan
            .into_iter()
            .map(|(day, meal)| DayMeal {
                day,
                meal: match meal {
                    Value::String(s) => s,
                    other => other.to_string(),
                },
            })
            .collect();
        MealPlan { days, shopping_list: resp.shopping_list }
    }
}

/// A stored flyer item as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyerItem {
    pub name: String,
    pub price: f64,
    pub selling_unit: String,
    #[serde(default)]
    pub selling_value: Option<f64>,
    #[serde(default)]
    pub measured_quantity_value: Option<f64>,
    #[serde(default)]
    pub measured_quantity_unit: Option<String>,
    pub store: String,
    #[serde(default)]
    pub notes: Option<String>,
}
