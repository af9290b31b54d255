//! HTTP client for task API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the task backend, handling authentication, status checks and response
//! parsing.

use super::error::ApiError;
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Shape of the backend's error bodies.
///
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Makes requests to the backend and tries to conform response data to the
/// requested type.
///
pub struct Client {
    access_token: Option<String>,
    base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and optional access
    /// token.
    ///
    pub fn new(base_url: &str, access_token: Option<&str>) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidBaseUrl(base_url.to_owned()));
        }
        Ok(Client {
            access_token: access_token.map(str::to_owned),
            base_url: base_url.to_owned(),
            http_client: reqwest::Client::builder().build()?,
        })
    }

    /// Return deserialized data for the resource at path.
    ///
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::parse(response).await
    }

    /// Send body to path. Any success status counts, whatever the body.
    ///
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(())
    }

    /// Send body to path. Any success status counts, whatever the body.
    ///
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send(self.request(Method::PUT, path).json(body)).await?;
        Ok(())
    }

    /// Prepare request with authorization header if a token is set.
    ///
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        log::debug!("{} {}", method, request_url);
        let request = self.http_client.request(method, &request_url);
        match &self.access_token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Make request and return the response, or an error carrying the
    /// server's message for non-success statuses.
    ///
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let response_bytes = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&response_bytes)
            .ok()
            .and_then(|body| body.message);
        log::error!(
            "API request failed with status {}: {}",
            status,
            String::from_utf8_lossy(&response_bytes)
        );
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response_bytes = response.bytes().await?;
        serde_json::from_slice::<T>(&response_bytes).map_err(|e| {
            log::error!(
                "Failed to deserialize API response: {}. Response body: {}",
                e,
                String::from_utf8_lossy(&response_bytes)
            );
            ApiError::Deserialization(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_base_url_without_scheme() {
        assert!(matches!(
            Client::new("localhost:5000", None),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = Client::new("http://localhost:5000/api/", Some("token")).unwrap();
        assert_eq!(client.base_url, "http://localhost:5000/api");
        assert_eq!(client.access_token.as_deref(), Some("token"));
    }
}
