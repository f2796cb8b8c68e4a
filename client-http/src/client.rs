use crate::error::RequestError;
use crate::transport::{Transport, TransportFailure, TransportRequest, TransportResponse};
use satchel::{AuthTokenProvider, BusyGuard, UiFeedback};
use serde_json::Value;
use shared::config::AppConfig;
use shared_http::messages::{http_status_message, network_failure_message};
use shared_http::{ApiResponse, Method, RequestDescriptor, RequestOptions};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Per-call timeout unless overridden with [`RequestClient::with_timeout`].
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Label shown by the busy indicator.
pub const BUSY_LABEL: &str = "Loading...";

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Normalizing request client.
///
/// Every request resolves to an [`ApiResponse`] or is rejected with a
/// [`RequestError`] carrying a human-readable message. Requests are
/// independent: nothing is deduplicated and completions are unordered.
pub struct RequestClient {
    base_url: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn AuthTokenProvider>,
    feedback: Arc<dyn UiFeedback>,
}

impl RequestClient {
    pub fn new(
        config: &AppConfig,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn AuthTokenProvider>,
        feedback: Arc<dyn UiFeedback>,
    ) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            transport,
            tokens,
            feedback,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dispatch a request and normalize whatever happens to it.
    ///
    /// The busy indicator, when requested, is shown before dispatch and
    /// hidden exactly once before the outcome is interpreted. Failure
    /// messages are surfaced through UI feedback only when the descriptor
    /// asks for it.
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<ApiResponse, RequestError> {
        let method = descriptor.method;
        let url = format!("{}{}", self.base_url, descriptor.path);

        let outcome = {
            let _busy = BusyGuard::engage(self.feedback.as_ref(), BUSY_LABEL, descriptor.show_busy);

            let request = TransportRequest {
                method,
                url: url.clone(),
                headers: self.build_headers(&descriptor.headers),
                body: descriptor.body,
                timeout: self.timeout,
            };

            debug!(%method, %url, "dispatching request");
            self.transport.send(request).await
        };

        let result = Self::normalize(outcome);

        if let Err(e) = &result {
            warn!(%method, %url, error = %e, "request failed");
            if descriptor.surface_error {
                self.feedback.notify(e.message());
            }
        }

        result
    }

    pub async fn get(
        &self,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, RequestError> {
        self.send(Method::Get, path, body, options).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, RequestError> {
        self.send(Method::Post, path, body, options).await
    }

    pub async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, RequestError> {
        self.send(Method::Put, path, body, options).await
    }

    pub async fn delete(
        &self,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, RequestError> {
        self.send(Method::Delete, path, body, options).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, RequestError> {
        let body = body.unwrap_or_else(|| Value::Object(Default::default()));
        self.request(RequestDescriptor::with_options(method, path, body, options))
            .await
    }

    /// Default content type, then caller headers, then the bearer token.
    fn build_headers(&self, caller: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        set_header(&mut headers, CONTENT_TYPE, JSON_CONTENT_TYPE.to_string());

        for (name, value) in caller {
            set_header(&mut headers, name, value.clone());
        }

        match self.tokens.token() {
            Ok(Some(token)) if !token.is_empty() => {
                set_header(&mut headers, AUTHORIZATION, format!("Bearer {}", token));
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Failed to read auth token, sending request without it"),
        }

        headers
    }

    fn normalize(
        outcome: Result<TransportResponse, TransportFailure>,
    ) -> Result<ApiResponse, RequestError> {
        match outcome {
            Ok(TransportResponse { status: 200, body }) => {
                let response = ApiResponse::from(body);
                if response.is_success() {
                    Ok(response)
                } else {
                    Err(RequestError::Business {
                        code: response.code,
                        message: response.failure_message(),
                    })
                }
            }
            Ok(TransportResponse { status, .. }) => Err(RequestError::Http {
                status,
                message: http_status_message(status),
            }),
            Err(failure) => Err(RequestError::Network {
                message: network_failure_message(&failure.description).to_string(),
                description: failure.description,
            }),
        }
    }
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Header names are case-insensitive; a later value replaces any spelling
/// of the same name.
fn set_header(headers: &mut BTreeMap<String, String>, name: &str, value: String) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value);
}
