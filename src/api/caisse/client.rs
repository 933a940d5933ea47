use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{ApiError, Listing};
use crate::models::{
    Caisse, CaisseDetail, CaisseOperation, CreateCaisseRequest, OperationsQuery,
    PaginatedResponse, TransferRequest, TransferResponse,
};
use crate::utils::extract_clean_error;

/// REST client for the cash register endpoints of the SmartStore backend
pub struct CaisseClient {
    http_client: HttpClient,
    base_url: String,
}

impl CaisseClient {
    /// Create a new client.
    ///
    /// `api_token` is sent as `Authorization: Token <token>` on every request.
    pub fn new(
        base_url: &str,
        api_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .default_headers(Self::create_headers(api_token)?)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_headers(api_token: Option<&str>) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));

        if let Some(token) = api_token.filter(|t| !t.is_empty()) {
            let auth_value = HeaderValue::from_str(&format!("Token {}", token)).map_err(|e| {
                ApiError::RequestError(format!("Failed to create auth header: {}", e))
            })?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and decode its JSON body, mapping non-2xx statuses to [`ApiError`]
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, retry_after, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /caisse/
    pub async fn list_caisses(&self) -> Result<Vec<Caisse>, ApiError> {
        let listing: Listing<Caisse> =
            self.send_json(self.http_client.get(self.url("caisse/"))).await?;
        let caisses = listing.into_items();
        debug!("Fetched {} cash registers", caisses.len());
        Ok(caisses)
    }

    /// GET /caisse/{id}/
    pub async fn get_caisse(&self, caisse_id: i64) -> Result<CaisseDetail, ApiError> {
        let url = self.url(&format!("caisse/{}/", caisse_id));
        self.send_json(self.http_client.get(url)).await
    }

    /// POST /caisse/
    pub async fn create_caisse(&self, name: &str) -> Result<Caisse, ApiError> {
        let body = CreateCaisseRequest { name: name.trim().to_string() };
        self.send_json(self.http_client.post(self.url("caisse/")).json(&body)).await
    }

    /// POST /caisse/{id}/deposit/
    pub async fn deposit(
        &self,
        caisse_id: i64,
        request: &TransferRequest,
    ) -> Result<TransferResponse, ApiError> {
        let url = self.url(&format!("caisse/{}/deposit/", caisse_id));
        self.send_json(self.http_client.post(url).json(request)).await
    }

    /// POST /caisse/{id}/withdraw/
    pub async fn withdraw(
        &self,
        caisse_id: i64,
        request: &TransferRequest,
    ) -> Result<TransferResponse, ApiError> {
        let url = self.url(&format!("caisse/{}/withdraw/", caisse_id));
        self.send_json(self.http_client.post(url).json(request)).await
    }

    /// GET /caisse-operations/ with paging and filters
    pub async fn list_operations(
        &self,
        query: &OperationsQuery,
    ) -> Result<PaginatedResponse<CaisseOperation>, ApiError> {
        let request = self
            .http_client
            .get(self.url("caisse-operations/"))
            .query(&query.to_params());
        self.send_json(request).await
    }
}

/// Map an HTTP error status and body to an [`ApiError`]
pub(crate) fn map_error_status(
    status: StatusCode,
    retry_after: Option<u64>,
    body: &str,
) -> ApiError {
    let message = extract_clean_error(body);

    match status.as_u16() {
        400 => ApiError::BadRequest(message),
        401 => ApiError::Unauthorized(message),
        403 => ApiError::Forbidden(message),
        404 => ApiError::NotFound(message),
        429 => {
            let retry_after = retry_after.unwrap_or(1);
            warn!("Throttled by backend, retry after {} s", retry_after);
            ApiError::Throttled { retry_after }
        }
        code @ 500..=599 => {
            warn!("Server error {}: {}", code, message);
            ApiError::ServerError(code, message)
        }
        code => ApiError::HttpError(code, message),
    }
}
