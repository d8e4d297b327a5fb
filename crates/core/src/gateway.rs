//! Backend gateways
//!
//! Async seams between the storefront cores and the REST API. The HTTP
//! implementations live in the application crate; tests use the generated
//! mocks.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    catalog::{AdminFilter, CatalogFilter, FilterError},
    products::{
        AdminProduct, AdminProductPage, DashboardStats, Product, ProductDraft, ProductId,
        ProductPage, ProductPatch,
    },
    users::{BearerToken, Credentials, LoginResponse, User},
};

/// Errors returned by backend calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, timeout).
    #[error("connection error: {0}")]
    Connection(String),

    /// The backend rejected the bearer token or the credentials (401).
    #[error("unauthorized")]
    Unauthorized,

    /// The user is authenticated but lacks the required role (403).
    #[error("access denied")]
    Forbidden,

    /// The requested resource does not exist (404).
    #[error("not found")]
    NotFound,

    /// Any other non-success status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,

        /// Backend message, or the status reason when none was sent.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The request was rejected before being sent.
    #[error("invalid request")]
    InvalidFilter(#[from] FilterError),
}

impl ApiError {
    /// Whether the error must end the current session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Authentication endpoints.
#[automock]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `POST /auth/login`.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// `GET /auth/me` with the given token.
    async fn current_user(&self, token: &BearerToken) -> Result<User, ApiError>;
}

/// Public catalog endpoints.
#[automock]
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// `GET /doces` with the given filter.
    async fn list(&self, filter: &CatalogFilter) -> Result<ProductPage, ApiError>;

    /// `GET /doces/{id}`.
    async fn get(&self, id: ProductId) -> Result<Product, ApiError>;

    /// `GET /doces/search?nome=`.
    async fn search_by_name(&self, name: &str) -> Result<ProductPage, ApiError>;

    /// `GET /doces/price-range?min=&max=`.
    async fn by_price_range(&self, min: Decimal, max: Decimal) -> Result<ProductPage, ApiError>;

    /// `GET /doces/cheapest?limit=`.
    async fn cheapest(&self, limit: u32) -> Result<ProductPage, ApiError>;

    /// `GET /doces/expensive?limit=`.
    async fn expensive(&self, limit: u32) -> Result<ProductPage, ApiError>;

    /// `GET /doces/recent?limit=`.
    async fn recent(&self, limit: u32) -> Result<ProductPage, ApiError>;

    /// `GET /doces/stats`, returned verbatim.
    async fn stats(&self) -> Result<serde_json::Value, ApiError>;
}

/// Admin endpoints. Every call is bearer-authenticated.
#[automock]
#[async_trait]
pub trait AdminGateway: Send + Sync {
    /// `GET /admin/doces/dashboard`.
    async fn dashboard(&self, token: &BearerToken) -> Result<DashboardStats, ApiError>;

    /// `GET /admin/doces/reports/statistics`.
    async fn detailed_stats(&self, token: &BearerToken) -> Result<DashboardStats, ApiError>;

    /// `GET /admin/doces` with the given filter.
    async fn list(
        &self,
        token: &BearerToken,
        filter: &AdminFilter,
    ) -> Result<AdminProductPage, ApiError>;

    /// `GET /admin/doces/available`.
    async fn available(&self, token: &BearerToken) -> Result<AdminProductPage, ApiError>;

    /// `GET /admin/doces/unavailable`.
    async fn unavailable(&self, token: &BearerToken) -> Result<AdminProductPage, ApiError>;

    /// `POST /admin/doces`.
    async fn create(
        &self,
        token: &BearerToken,
        draft: &ProductDraft,
    ) -> Result<AdminProduct, ApiError>;

    /// `PUT /admin/doces/{id}`.
    async fn update(
        &self,
        token: &BearerToken,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<AdminProduct, ApiError>;

    /// `DELETE /admin/doces/{id}`.
    async fn delete(&self, token: &BearerToken, id: ProductId) -> Result<(), ApiError>;

    /// `PUT /admin/doces/{id}/toggle-availability`.
    async fn toggle_availability(
        &self,
        token: &BearerToken,
        id: ProductId,
    ) -> Result<AdminProduct, ApiError>;

    /// `PUT /admin/doces/{id}/availability?disponivel=`.
    async fn set_availability(
        &self,
        token: &BearerToken,
        id: ProductId,
        available: bool,
    ) -> Result<AdminProduct, ApiError>;

    /// `PUT /admin/doces/batch/availability?disponivel=` with the ids as body.
    async fn batch_update_availability(
        &self,
        token: &BearerToken,
        ids: &[ProductId],
        available: bool,
    ) -> Result<(), ApiError>;
}
