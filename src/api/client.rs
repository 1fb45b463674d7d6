use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{NewTransaction, Transaction, TransactionPatch};

use super::{
    ApiResponse, ApiStatus, DeleteResponse, LoginRequest, LoginResponse, RemoteSummary,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// HTTP client for the finance backend.
/// Every failure is reported through [`ApiResponse::error`]; nothing is retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request to {} failed: {}", url, e);
                return ApiResponse::err(e.to_string());
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return ApiResponse::err(e.to_string()),
        };

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|body| body.get("error")?.as_str().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP error: {}", status.as_u16()));
            warn!("{} returned {}: {}", url, status, message);
            return ApiResponse::err(message);
        }

        match serde_json::from_str(&text) {
            Ok(data) => ApiResponse::ok(data),
            Err(e) => {
                warn!("Malformed response from {}: {}", url, e);
                ApiResponse::err(e.to_string())
            }
        }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> ApiResponse<LoginResponse> {
        self.request(Method::POST, "/auth/login", Some(credentials))
            .await
    }

    pub async fn get_transactions(&self) -> ApiResponse<Vec<Transaction>> {
        self.request::<_, ()>(Method::GET, "/transactions", None)
            .await
    }

    pub async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> ApiResponse<Transaction> {
        self.request(Method::POST, "/transactions", Some(transaction))
            .await
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        patch: &TransactionPatch,
    ) -> ApiResponse<Transaction> {
        self.request(Method::PUT, &format!("/transactions/{}", id), Some(patch))
            .await
    }

    pub async fn delete_transaction(&self, id: &str) -> ApiResponse<DeleteResponse> {
        self.request::<_, ()>(Method::DELETE, &format!("/transactions/{}", id), None)
            .await
    }

    pub async fn get_financial_summary(&self) -> ApiResponse<RemoteSummary> {
        self.request::<_, ()>(Method::GET, "/summary", None).await
    }

    pub async fn get_api_status(&self) -> ApiResponse<ApiStatus> {
        self.request::<_, ()>(Method::GET, "/status", None).await
    }
}
