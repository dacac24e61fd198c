//! HTTP transport for the reservation REST API

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::ErrorBody;

use crate::{ClientConfig, ClientError, ClientResult, Session};

/// Verb-shaped HTTP client; attaches the session token to every request
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl RestClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig, session: Session) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Session context this client reads its token from
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.session.token().map(|t| format!("Bearer {t}"))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let mut request = self.client.get(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "PUT");
        let mut request = self.client.put(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "DELETE");
        let mut request = self.client.delete(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: ErrorBody =
                serde_json::from_str(&text).unwrap_or_else(|_| ErrorBody::new(text.clone()));
            tracing::warn!(status = %status, message = %body.message, "request failed");
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(body.message)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(body.message)),
                StatusCode::BAD_REQUEST => Err(ClientError::Rejected {
                    code: body.code,
                    message: body.message,
                }),
                _ => Err(ClientError::Internal(body.message)),
            };
        }

        response.json().await.map_err(Into::into)
    }
}
