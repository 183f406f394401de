use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use crate::filter::FilterError;

/// Façade call an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SearchProperties,
    GetFeaturedProperties,
    GetPropertyById,
    GetNearbyPlaces,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SearchProperties => "search properties",
            Self::GetFeaturedProperties => "fetch featured properties",
            Self::GetPropertyById => "fetch property",
            Self::GetNearbyPlaces => "fetch nearby places",
        })
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("session cookie is not a valid header value")]
    InvalidSessionCookie,

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to {operation}: {source}")]
    InvalidFilter {
        operation: Operation,
        #[source]
        source: FilterError,
    },

    #[error("failed to {operation}: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// `StatusCode` displays as code plus reason, e.g. `500 Internal Server Error`
    #[error("failed to {operation}: {status}")]
    Status {
        operation: Operation,
        status: StatusCode,
    },

    #[error("failed to {operation}: malformed response body: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::InvalidFilter { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
            Self::InvalidBaseUrl { .. } | Self::InvalidSessionCookie | Self::Client(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
