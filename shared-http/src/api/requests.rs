use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// HTTP verbs the client issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// GET carries its body as query parameters.
    pub fn sends_query(&self) -> bool {
        matches!(self, Method::Get)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call knobs shared by the convenience wrappers.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestOptions {
    pub headers: BTreeMap<String, String>,
    /// Show the busy indicator while the request is in flight
    pub show_busy: bool,
    /// Surface failure messages through UI feedback
    pub surface_error: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: BTreeMap::new(),
            show_busy: true,
            surface_error: true,
        }
    }
}

impl RequestOptions {
    /// No busy indicator and no user-facing notification.
    pub fn silent() -> Self {
        Self {
            show_busy: false,
            surface_error: false,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// A single request as the caller describes it. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    pub path: String,
    pub method: Method,
    pub body: Value,
    pub headers: BTreeMap<String, String>,
    pub show_busy: bool,
    pub surface_error: bool,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self::with_options(method, path, Value::Object(Default::default()), RequestOptions::default())
    }

    pub fn with_options(
        method: Method,
        path: impl Into<String>,
        body: Value,
        options: RequestOptions,
    ) -> Self {
        Self {
            path: path.into(),
            method,
            body,
            headers: options.headers,
            show_busy: options.show_busy,
            surface_error: options.surface_error,
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn show_busy(mut self, show: bool) -> Self {
        self.show_busy = show;
        self
    }

    pub fn surface_error(mut self, surface: bool) -> Self {
        self.surface_error = surface;
        self
    }
}
