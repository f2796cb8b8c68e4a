use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared_http::Method;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// User agent for outgoing requests.
const USER_AGENT_VALUE: &str = concat!("satchel/", env!("CARGO_PKG_VERSION"));

/// A fully resolved request, ready for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
    pub timeout: Duration,
}

/// Whatever came back: status plus the decoded body.
///
/// Bodies that are not JSON are kept as a JSON string, empty bodies as `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

/// No response was obtained.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{description}")]
pub struct TransportFailure {
    pub description: String,
}

impl TransportFailure {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Port for the network layer under the request client.
///
/// Timeouts are enforced here and reported as a failure whose description
/// mentions `timeout`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportFailure>;
}

/// Transport over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportFailure> {
        let client = Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| TransportFailure::new(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    fn describe(err: reqwest::Error) -> TransportFailure {
        if err.is_timeout() {
            TransportFailure::new(format!("request timeout: {}", err))
        } else if err.is_connect() {
            TransportFailure::new(format!("connection fail: {}", err))
        } else {
            TransportFailure::new(format!("request error: {}", err))
        }
    }

    fn query_pairs(body: &serde_json::Map<String, Value>) -> Vec<(String, String)> {
        body.iter()
            .map(|(name, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), value)
            })
            .collect()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportFailure> {
        let mut builder = self
            .client
            .request(Self::method(request.method), &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &request.body {
            Value::Null => builder,
            Value::Object(fields) if request.method.sends_query() => {
                if fields.is_empty() {
                    builder
                } else {
                    builder.query(&Self::query_pairs(fields))
                }
            }
            _ if request.method.sends_query() => builder,
            body => builder.json(body),
        };

        let response = builder.send().await.map_err(Self::describe)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(Self::describe)?;

        debug!(status, bytes = text.len(), url = %request.url, "response received");

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(TransportResponse { status, body })
    }
}
