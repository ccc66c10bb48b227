//! BioNexusClient - REST gateway to the Renaiscent analysis service.
//!
//! This is the single outbound call boundary of the client. It sends
//! the user's query text with fixed search parameters and returns the
//! parsed JSON response as-is; the contract with the remote service is
//! opaque beyond "valid JSON". Failures are returned as typed errors
//! so the caller decides how to present them.

use async_trait::async_trait;
use bionexus_core::ClientConfig;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Fixed number of results requested per query.
const MAX_RESULTS: u32 = 5;

/// Fixed confidence floor for returned results.
const MIN_CONFIDENCE: f64 = 0.3;

/// Errors produced by the query boundary.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request never completed (connect failure, timeout, ...).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body was not valid JSON.
    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    /// The client itself could not be constructed.
    #[error("Client setup failed: {0}")]
    Setup(String),
}

/// The single outbound call boundary to the remote analysis service.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// Sends one query and awaits the parsed JSON response.
    async fn ask(&self, query: &str) -> Result<Value, GatewayError>;
}

/// Gateway implementation that talks to the Renaiscent HTTP API.
#[derive(Clone)]
pub struct BioNexusClient {
    client: Client,
    endpoint: String,
}

impl BioNexusClient {
    /// Creates a client for the endpoint and timeout in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| GatewayError::Setup(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Overrides the endpoint after construction.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl AnalysisGateway for BioNexusClient {
    async fn ask(&self, query: &str) -> Result<Value, GatewayError> {
        let body = QueryRequest::new(query);

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| GatewayError::Transport {
                message: err.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| GatewayError::InvalidBody(err.to_string()))
    }
}

/// Request payload for the `/api/query` endpoint.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    max_results: u32,
    min_confidence: f64,
    include_details: bool,
}

impl<'a> QueryRequest<'a> {
    fn new(query: &'a str) -> Self {
        Self {
            query,
            max_results: MAX_RESULTS,
            min_confidence: MIN_CONFIDENCE,
            include_details: true,
        }
    }
}

fn map_http_error(status: StatusCode, body: String) -> GatewayError {
    // Some deployments wrap errors as {"error": "..."}; fall back to
    // the raw body otherwise.
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body);

    GatewayError::Http {
        status: status.as_u16(),
        message,
    }
}
