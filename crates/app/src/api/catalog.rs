//! Public catalog client.

use async_trait::async_trait;
use confeitaria::{
    catalog::{CatalogFilter, limit_pairs, price_range_pairs},
    gateway::{ApiError, CatalogGateway},
    products::{Product, ProductId, ProductPage},
};
use reqwest::Method;
use rust_decimal::Decimal;

use super::client::{ApiClient, send_json};

/// `CatalogGateway` over HTTP. No authentication required.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: ApiClient,
}

impl CatalogClient {
    /// Wrap a shared client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn page(&self, path: &str, query: &[(&str, String)]) -> Result<ProductPage, ApiError> {
        send_json(self.client.request(Method::GET, path).query(query)).await
    }
}

#[async_trait]
impl CatalogGateway for CatalogClient {
    async fn list(&self, filter: &CatalogFilter) -> Result<ProductPage, ApiError> {
        let query = filter.query_pairs()?;

        self.page("doces", &query).await
    }

    async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        send_json(self.client.request(Method::GET, &format!("doces/{id}"))).await
    }

    async fn search_by_name(&self, name: &str) -> Result<ProductPage, ApiError> {
        self.page("doces/search", &[("nome", name.to_string())])
            .await
    }

    async fn by_price_range(&self, min: Decimal, max: Decimal) -> Result<ProductPage, ApiError> {
        let query = price_range_pairs(min, max)?;

        self.page("doces/price-range", &query).await
    }

    async fn cheapest(&self, limit: u32) -> Result<ProductPage, ApiError> {
        let query = limit_pairs(limit)?;

        self.page("doces/cheapest", &query).await
    }

    async fn expensive(&self, limit: u32) -> Result<ProductPage, ApiError> {
        let query = limit_pairs(limit)?;

        self.page("doces/expensive", &query).await
    }

    async fn recent(&self, limit: u32) -> Result<ProductPage, ApiError> {
        let query = limit_pairs(limit)?;

        self.page("doces/recent", &query).await
    }

    async fn stats(&self) -> Result<serde_json::Value, ApiError> {
        send_json(self.client.request(Method::GET, "doces/stats")).await
    }
}
