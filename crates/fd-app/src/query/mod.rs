//! Cached reads of collections and single records.

mod entity_queries;

pub use entity_queries::EntityQueries;

use fd_core::ports::{ApiError, GENERIC_ERROR_MESSAGE};
use fd_core::QueryKey;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The record is gone, e.g. deleted from another session.
    #[error("{key} not found")]
    NotFound { key: QueryKey },

    #[error("{message}")]
    Request { key: QueryKey, message: String },

    #[error("cached value for {key} could not be decoded: {message}")]
    Decode { key: QueryKey, message: String },
}

impl QueryError {
    pub fn from_api(key: QueryKey, err: ApiError) -> Self {
        match err {
            ApiError::NotFound(_) => QueryError::NotFound { key },
            other => QueryError::Request {
                key,
                message: other.to_string(),
            },
        }
    }

    /// Page-level errors replace the whole view instead of a single field.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::NotFound { .. })
    }

    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Outcome of a read, handed to the view as data rather than thrown.
///
/// `data` may hold the last good value alongside an `error`; views check
/// `error` before rendering the happy path.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub data: Option<T>,
    pub error: Option<QueryError>,
    /// `data` is a previously cached value, not the answer to this request.
    pub is_stale: bool,
}

impl<T> QueryResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            is_stale: false,
        }
    }

    pub fn cached(data: Option<T>) -> Self {
        Self {
            data,
            error: None,
            is_stale: false,
        }
    }

    pub fn failed(data: Option<T>, error: QueryError) -> Self {
        Self {
            is_stale: data.is_some(),
            data,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Decode a cache slot into a typed value.
pub(crate) fn decode_slot<T: serde::de::DeserializeOwned>(
    key: &QueryKey,
    value: Option<fd_core::ports::CacheValue>,
) -> Result<Option<T>, QueryError> {
    value
        .map(|v| {
            serde_json::from_value(v).map_err(|e| QueryError::Decode {
                key: key.clone(),
                message: e.to_string(),
            })
        })
        .transpose()
}
