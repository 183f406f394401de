use crate::api::error::ApiError;
use crate::filter::PropertyFilter;
use crate::models::{NearbyPlace, Property};
use async_trait::async_trait;

/// Read access to the listings backend.
///
/// Implementations do not retry, cache or reorder; a failed call is reported
/// to the caller as-is.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// Listings matching `filter`, in the order the backend returns them
    async fn search_properties(&self, filter: &PropertyFilter) -> Result<Vec<Property>, ApiError>;

    /// Up to `limit` featured listings, 6 when `limit` is `None`
    async fn get_featured_properties(&self, limit: Option<u32>) -> Result<Vec<Property>, ApiError>;

    async fn get_property_by_id(&self, id: &str) -> Result<Property, ApiError>;

    async fn get_nearby_places(&self, property_id: &str) -> Result<Vec<NearbyPlace>, ApiError>;

    /// Where requests go, for log lines
    fn backend_name(&self) -> &str;
}
