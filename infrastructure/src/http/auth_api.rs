//! [`AuthApi`] over the request gateway

use super::gateway::RequestGateway;
use async_trait::async_trait;
use llmdesk_application::ports::auth_api::{ApiError, AuthApi, Delivery};
use llmdesk_domain::{
    ApiKeys, AuthResponse, LoginCredentials, PasswordChange, ProfileUpdate, Registration, User,
};
use reqwest::Method;
use serde_json::{Value, json};
use std::sync::Arc;

/// Backend paths, relative to the API base URL
pub mod paths {
    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const REGISTER: &str = "/api/v1/auth/register";
    pub const LOGOUT: &str = "/api/v1/auth/logout";
    pub const ME: &str = "/api/v1/auth/me";
    pub const API_KEYS: &str = "/api/v1/auth/api-keys";
    pub const PROFILE: &str = "/api/v1/auth/profile";
    pub const CHANGE_PASSWORD: &str = "/api/v1/auth/change-password";
}

pub struct HttpAuthApi {
    gateway: Arc<RequestGateway>,
}

impl HttpAuthApi {
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        self.gateway
            .post(paths::LOGIN, credentials, Delivery::Anonymous)
            .await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.gateway
            .post(paths::REGISTER, registration, Delivery::Anonymous)
            .await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.gateway
            .unit(Method::POST, paths::LOGOUT, None::<&Value>, Delivery::Silent)
            .await
    }

    async fn current_user(&self, delivery: Delivery) -> Result<User, ApiError> {
        self.gateway.get(paths::ME, delivery).await
    }

    async fn update_api_keys(&self, keys: &ApiKeys) -> Result<User, ApiError> {
        self.gateway
            .patch(paths::API_KEYS, &json!({ "apiKeys": keys }), Delivery::Notify)
            .await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.gateway
            .patch(paths::PROFILE, update, Delivery::Notify)
            .await
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        self.gateway
            .unit(Method::POST, paths::CHANGE_PASSWORD, Some(change), Delivery::Notify)
            .await
    }
}
