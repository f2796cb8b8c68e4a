use serde_json::Value;

/// Business status code that marks success.
pub const SUCCESS_CODE: i64 = 200;

/// Fallback when a failing envelope carries no message.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Business envelope carried inside a 200 response.
///
/// `{ code?, success?, message?, msg?, data? }`. Fields with the wrong JSON
/// type read as absent; the raw body is kept untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub code: Option<i64>,
    pub success: Option<bool>,
    pub message: Option<String>,
    pub msg: Option<String>,
    pub data: Option<Value>,
    pub raw: Value,
}

impl From<Value> for ApiResponse {
    fn from(body: Value) -> Self {
        let text = |field: &str| body.get(field).and_then(Value::as_str).map(str::to_string);

        Self {
            code: body.get("code").and_then(Value::as_i64),
            success: body.get("success").and_then(Value::as_bool),
            message: text("message"),
            msg: text("msg"),
            data: body.get("data").cloned(),
            raw: body,
        }
    }
}

impl ApiResponse {
    /// An explicit `success` flag decides when present; otherwise `code == 200`.
    pub fn is_success(&self) -> bool {
        match self.success {
            Some(flag) => flag,
            None => self.code == Some(SUCCESS_CODE),
        }
    }

    /// First non-empty of `message`, `msg`, else the generic failure text.
    pub fn failure_message(&self) -> String {
        [&self.message, &self.msg]
            .into_iter()
            .flatten()
            .find(|m| !m.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}
