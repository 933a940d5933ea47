use serde::Deserialize;
use thiserror::Error;

use crate::models::PaginatedResponse;

/// List endpoints answer with a page envelope, or a bare array when the
/// backend has pagination disabled
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page(PaginatedResponse<T>),
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Page(page) => page.results,
            Listing::Plain(items) => items,
        }
    }
}

/// Error type for caisse API operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 400 Bad Request, usually a business rule such as insufficient funds
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 401 Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests (throttled)
    #[error("Throttled. Retry after {retry_after} s")]
    Throttled { retry_after: u64 },
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// Message suitable for showing to the operator as-is
    pub fn user_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg) => msg.clone(),
            ApiError::Unauthorized(_) => "Not logged in. Check CAISSE_API_TOKEN.".to_string(),
            ApiError::Throttled { retry_after } => {
                format!("Too many requests, try again in {} seconds", retry_after)
            }
            ApiError::ServerError(..) | ApiError::HttpError(..) => {
                "The server could not complete the request".to_string()
            }
            ApiError::RequestError(_) => "Could not reach the server".to_string(),
            ApiError::DeserializationError(_) => "Unexpected response from the server".to_string(),
        }
    }
}
