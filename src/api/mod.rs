pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::HttpPropertyApi;
pub use error::{ApiError, Operation};
pub use traits::PropertyApi;
pub use types::{ApiConfig, DEFAULT_FEATURED_LIMIT};
