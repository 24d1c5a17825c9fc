//! HTTP client for the tenant API
//!
//! All requests go to `<api base>/v1/<tenant key>/` and carry the
//! `Api-Token` header.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

use responsum_core::branding::{tenant_base_url, API_TOKEN_HEADER, USER_AGENT};
use responsum_core::{ExampleConfig, Model};

use crate::ApiError;

/// `param-filter` query value: each property maps to the accepted values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelFilter(BTreeMap<String, Vec<String>>);

impl ModelFilter {
    /// Filter on one property matching exactly one value
    pub fn by(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::default().with(property, [value])
    }

    pub fn with<I, V>(mut self, property: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.0
            .insert(property.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// `{"name":["Belgium"]}`
    pub fn to_param(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Client for one tenant
#[derive(Clone)]
pub struct ResponsumClient {
    base_url: String,
    api_token: String,
    client: reqwest::Client,
}

impl ResponsumClient {
    pub fn new(api_base_url: &str, tenant_key: &str, api_token: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            base_url: tenant_base_url(api_base_url, tenant_key),
            api_token: api_token.into(),
            client,
        })
    }

    pub fn from_config(config: &ExampleConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, &config.tenant_key, config.api_token.clone())
    }

    /// Tenant base URL, ending with `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET uuids/{amount}`: uuids in the tenant's preferred format
    pub async fn get_uuids(&self, amount: u32) -> Result<Vec<String>, ApiError> {
        let path = format!("uuids/{}", amount);
        let request = self.client.get(self.url(&path));
        self.send(format!("GET {}", path), request).await
    }

    /// `GET {model_type}?param-filter=...`
    pub async fn filter_models<T: DeserializeOwned>(
        &self,
        model_type: &str,
        filter: &ModelFilter,
    ) -> Result<Vec<T>, ApiError> {
        let request = self
            .client
            .get(self.url(model_type))
            .query(&[("param-filter", filter.to_param())]);
        self.send(format!("GET {}", model_type), request).await
    }

    /// `POST create`: models and links to create, returns the created models
    pub async fn create(&self, models: &[Model]) -> Result<Vec<serde_json::Value>, ApiError> {
        let request = self.client.post(self.url("create")).json(models);
        self.send("POST create".to_string(), request).await
    }

    /// `PATCH update`: partial models, returns the updated models
    pub async fn update(&self, models: &[Model]) -> Result<Vec<serde_json::Value>, ApiError> {
        let request = self.client.patch(self.url("update")).json(models);
        self.send("PATCH update".to_string(), request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: String,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!("Calling tenant API: {}", endpoint);

        let response = match request.header(API_TOKEN_HEADER, &self.api_token).send().await {
            Ok(response) => response,
            Err(source) => return Err(ApiError::Transport { endpoint, source }),
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
            tracing::debug!("Tenant API {} returned {}", endpoint, status);
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        match response.json().await {
            Ok(data) => Ok(data),
            Err(source) => Err(ApiError::Decode { endpoint, source }),
        }
    }
}
