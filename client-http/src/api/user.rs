use crate::client::RequestClient;
use crate::error::RequestError;
use serde_json::{Value, json};
use shared_http::{ApiResponse, RequestOptions};
use std::sync::Arc;

/// User account endpoints.
#[derive(Clone, Debug)]
pub struct UserApi {
    client: Arc<RequestClient>,
}

impl UserApi {
    pub fn new(client: Arc<RequestClient>) -> Self {
        Self { client }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<ApiResponse, RequestError> {
        let body = json!({ "username": username, "password": password });
        self.client
            .post("/auth/login", Some(body), RequestOptions::default())
            .await
    }

    pub async fn get_user_info(&self) -> Result<ApiResponse, RequestError> {
        self.client
            .get("/user/info", None, RequestOptions::default())
            .await
    }

    pub async fn update_user_info(&self, info: Value) -> Result<ApiResponse, RequestError> {
        self.client
            .put("/user/info", Some(info), RequestOptions::default())
            .await
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<ApiResponse, RequestError> {
        let body = json!({ "oldPassword": old_password, "newPassword": new_password });
        self.client
            .post("/user/change-password", Some(body), RequestOptions::default())
            .await
    }

    pub async fn logout(&self) -> Result<ApiResponse, RequestError> {
        self.client
            .post("/auth/logout", None, RequestOptions::default())
            .await
    }
}
