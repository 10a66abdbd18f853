use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::Form;
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;

use super::error::ApiError;
use super::types::{
    CatalogResponse, ExtractAck, FlyerItem, FlyerSummary, GenerateRequest, GenerateResponse,
    MealPlan, StoreRequest, StoreResponse, StoredFlyer,
};
use super::FlyerApi;

const STORE_PATH: &str = "/api/flyer/fetch-and-store/";
const EXTRACT_PATH: &str = "/api/flyer/extract/";
const GENERATE_PATH: &str = "/api/mealplan/generate/";
const ITEMS_PATH: &str = "/api/flyer/items/";

/// Live client for the flyer catalog and the meal-plan backend.
#[derive(Clone)]
pub struct HttpFlyerApi {
    http: HttpClient,
    cfg: ClientConfig,
}

impl HttpFlyerApi {
    pub fn new(cfg: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = cfg.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::from_reqwest)?;
        Ok(Self { http, cfg })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.cfg.api_base.trim_end_matches('/'), path)
    }

    fn items_endpoint(&self, store_name: &str) -> Result<Url, ApiError> {
        let raw = self.endpoint(ITEMS_PATH);
        let mut url = Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(raw.clone()))?
            .pop_if_empty()
            .push(store_name);
        Ok(url)
    }
}

#[async_trait]
impl FlyerApi for HttpFlyerApi {
    async fn fetch_catalog(&self, postal_code: &str) -> Result<Vec<FlyerSummary>, ApiError> {
        let response = self
            .http
            .get(&self.cfg.catalog_url)
            .query(&[
                ("locale", self.cfg.locale.as_str()),
                ("postal_code", postal_code),
                ("sid", self.cfg.sid.as_str()),
            ])
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        let parsed: CatalogResponse = read_json(response).await?;
        Ok(parsed.flyers)
    }

    async fn fetch_and_store(&self, merchant_name: &str, postal_code: &str) -> Result<StoredFlyer, ApiError> {
        let response = self
            .http
            .post(self.endpoint(STORE_PATH))
            .json(&StoreRequest { merchant_name, postal_code })
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        let parsed: StoreResponse = read_json(response).await?;
        StoredFlyer::try_from(parsed)
    }

    async fn extract_items(&self, store_name: &str, image_path: &str) -> Result<ExtractAck, ApiError> {
        let form = Form::new()
            .text("store_name", store_name.to_string())
            .text("image_path", image_path.to_string());
        let response = self
            .http
            .post(self.endpoint(EXTRACT_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        read_json(response).await
    }

    async fn generate_meal_plan(&self, store_name: &str) -> Result<MealPlan, ApiError> {
        let response = self
            .http
            .post(self.endpoint(GENERATE_PATH))
            .json(&GenerateRequest { store_name })
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        let parsed: GenerateResponse = read_json(response).await?;
        Ok(parsed.into())
    }

    async fn flyer_items(&self, store_name: &str) -> Result<Vec<FlyerItem>, ApiError> {
        let url = self.items_endpoint(store_name)?;
        let response = self.http.get(url).send().await.map_err(ApiError::from_reqwest)?;
        read_json(response).await
    }

    fn catalog_host(&self) -> String {
        Url::parse(&self.cfg.catalog_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.cfg.catalog_url.clone())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(ApiError::from_reqwest)?;
    if !status.is_success() {
        return Err(ApiError::from_status(status, &body));
    }
    decode(&body)
}

pub(crate) fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::Decode)
}
