use crate::api::error::{ApiError, Operation};
use crate::api::traits::PropertyApi;
use crate::api::types::{ApiConfig, DEFAULT_FEATURED_LIMIT};
use crate::filter::PropertyFilter;
use crate::models::{NearbyPlace, Property};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

/// `PropertyApi` over the backend's JSON endpoints
#[derive(Debug, Clone)]
pub struct HttpPropertyApi {
    client: Client,
    base_url: Url,
}

impl HttpPropertyApi {
    /// Create a client for the default local backend
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(ApiConfig::default())
    }

    /// Create a client with custom connection settings
    pub fn with_config(config: ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: config.base_url,
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let mut value =
                HeaderValue::from_str(cookie).map_err(|_| ApiError::InvalidSessionCookie)?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        // Cookies set by the backend are replayed on later calls.
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { client, base_url })
    }

    /// `{base}/api/properties/{segments..}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: base URLs without a path are rejected in `with_config`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["api", "properties"])
                .extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|source| {
                warn!("Request to {} failed: {}", operation, source);
                ApiError::Transport { operation, source }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Backend returned status {} for {}", status, operation);
            return Err(ApiError::Status { operation, status });
        }

        response
            .json()
            .await
            .map_err(|source| ApiError::Decode { operation, source })
    }
}

#[async_trait]
impl PropertyApi for HttpPropertyApi {
    async fn search_properties(&self, filter: &PropertyFilter) -> Result<Vec<Property>, ApiError> {
        let operation = Operation::SearchProperties;
        filter
            .validate()
            .map_err(|source| ApiError::InvalidFilter { operation, source })?;

        let url = self.endpoint(&["search"]);
        debug!("POST {} with filter {:?}", url, filter);

        let properties: Vec<Property> = self
            .fetch(operation, self.client.post(url).json(filter))
            .await?;

        info!("Search matched {} properties", properties.len());
        Ok(properties)
    }

    async fn get_featured_properties(&self, limit: Option<u32>) -> Result<Vec<Property>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_FEATURED_LIMIT).to_string();
        let url = self.endpoint(&["featured", limit.as_str()]);
        debug!("GET {}", url);

        self.fetch(Operation::GetFeaturedProperties, self.client.get(url))
            .await
    }

    async fn get_property_by_id(&self, id: &str) -> Result<Property, ApiError> {
        let url = self.endpoint(&[id]);
        debug!("GET {}", url);

        self.fetch(Operation::GetPropertyById, self.client.get(url))
            .await
    }

    async fn get_nearby_places(&self, property_id: &str) -> Result<Vec<NearbyPlace>, ApiError> {
        let url = self.endpoint(&[property_id, "nearby"]);
        debug!("GET {}", url);

        self.fetch(Operation::GetNearbyPlaces, self.client.get(url))
            .await
    }

    fn backend_name(&self) -> &str {
        self.base_url.as_str()
    }
}
