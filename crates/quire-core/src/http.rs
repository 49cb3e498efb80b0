//! HTTP plumbing for the backend client
//!
//! Centralizes request dispatch so every call site gets the same failure
//! conversion: transport errors, non-2xx statuses, and undecodable bodies
//! all collapse into `HttpError`. Callers never touch reqwest directly.

use reqwest::multipart::Form;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::ClientConfig;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Unexpected status: {status}")]
    Status { status: u16 },
    #[error("Decode error: {message}")]
    Decode { message: String },
}

/// Thin wrapper over reqwest carrying the base URL and bearer credential.
/// The credential is issued by the embedding application's auth layer.
pub struct HttpClient {
    client: Client,
    base_url: String,
    bearer: String,
}

impl HttpClient {
    pub fn new(config: &ClientConfig, bearer: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer: bearer.to_string(),
        }
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<reqwest::Url, HttpError> {
        let url = format!("{}{}", self.base_url, path);
        if params.is_empty() {
            reqwest::Url::parse(&url).map_err(|_| HttpError::InvalidUrl { url })
        } else {
            reqwest::Url::parse_with_params(&url, params.iter().map(|(k, v)| (*k, v.as_str())))
                .map_err(|_| HttpError::InvalidUrl { url })
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, HttpError> {
        let url = self.endpoint(path, params)?;
        self.execute(self.client.get(url)).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let url = self.endpoint(path, &[])?;
        self.execute(self.client.post(url).json(body)).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, HttpError> {
        let url = self.endpoint(path, &[])?;
        self.execute(self.client.post(url).multipart(form)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), HttpError> {
        let url = self.endpoint(path, &[])?;
        let _: serde_json::Value = self.execute(self.client.delete(url)).await?;
        Ok(())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, HttpError> {
        let response = request
            .bearer_auth(&self.bearer)
            .send()
            .await
            .map_err(|e| HttpError::RequestFailed {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(HttpError::Status { status });
        }

        response.json::<T>().await.map_err(|e| HttpError::Decode {
            message: e.to_string(),
        })
    }
}
