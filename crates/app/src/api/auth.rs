//! Authentication client.

use async_trait::async_trait;
use confeitaria::{
    gateway::{ApiError, AuthGateway},
    users::{BearerToken, Credentials, LoginResponse, User},
};
use reqwest::Method;

use super::client::{ApiClient, send_json};

/// `AuthGateway` over HTTP.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: ApiClient,
}

impl AuthClient {
    /// Wrap a shared client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for AuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        send_json(
            self.client
                .request(Method::POST, "auth/login")
                .json(credentials),
        )
        .await
    }

    async fn current_user(&self, token: &BearerToken) -> Result<User, ApiError> {
        send_json(self.client.authorized(Method::GET, "auth/me", token)).await
    }
}
