//! Client for a city real-estate listings backend: search filters, their
//! query-string form, the HTTP façade and display helpers.

pub mod api;
pub mod filter;
pub mod format;
pub mod models;
pub mod query;

pub use api::{ApiConfig, ApiError, HttpPropertyApi, PropertyApi};
pub use filter::{FilterError, FilterWarning, PropertyFilter};
pub use models::{NearbyPlace, Property};
pub use query::{QueryMap, QueryValue};
