//! Admin product management client. Every call carries the bearer token.

use async_trait::async_trait;
use confeitaria::{
    catalog::AdminFilter,
    gateway::{AdminGateway, ApiError},
    products::{
        AdminProduct, AdminProductPage, DashboardStats, ProductDraft, ProductId, ProductPatch,
    },
    users::BearerToken,
};
use reqwest::Method;

use super::client::{ApiClient, send_empty, send_json};

/// `AdminGateway` over HTTP.
#[derive(Debug, Clone)]
pub struct AdminClient {
    client: ApiClient,
}

impl AdminClient {
    /// Wrap a shared client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminGateway for AdminClient {
    async fn dashboard(&self, token: &BearerToken) -> Result<DashboardStats, ApiError> {
        send_json(
            self.client
                .authorized(Method::GET, "admin/doces/dashboard", token),
        )
        .await
    }

    async fn detailed_stats(&self, token: &BearerToken) -> Result<DashboardStats, ApiError> {
        send_json(
            self.client
                .authorized(Method::GET, "admin/doces/reports/statistics", token),
        )
        .await
    }

    async fn list(
        &self,
        token: &BearerToken,
        filter: &AdminFilter,
    ) -> Result<AdminProductPage, ApiError> {
        send_json(
            self.client
                .authorized(Method::GET, "admin/doces", token)
                .query(&filter.query_pairs()),
        )
        .await
    }

    async fn available(&self, token: &BearerToken) -> Result<AdminProductPage, ApiError> {
        send_json(
            self.client
                .authorized(Method::GET, "admin/doces/available", token),
        )
        .await
    }

    async fn unavailable(&self, token: &BearerToken) -> Result<AdminProductPage, ApiError> {
        send_json(
            self.client
                .authorized(Method::GET, "admin/doces/unavailable", token),
        )
        .await
    }

    async fn create(
        &self,
        token: &BearerToken,
        draft: &ProductDraft,
    ) -> Result<AdminProduct, ApiError> {
        send_json(
            self.client
                .authorized(Method::POST, "admin/doces", token)
                .json(draft),
        )
        .await
    }

    async fn update(
        &self,
        token: &BearerToken,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<AdminProduct, ApiError> {
        send_json(
            self.client
                .authorized(Method::PUT, &format!("admin/doces/{id}"), token)
                .json(patch),
        )
        .await
    }

    async fn delete(&self, token: &BearerToken, id: ProductId) -> Result<(), ApiError> {
        send_empty(
            self.client
                .authorized(Method::DELETE, &format!("admin/doces/{id}"), token),
        )
        .await
    }

    async fn toggle_availability(
        &self,
        token: &BearerToken,
        id: ProductId,
    ) -> Result<AdminProduct, ApiError> {
        send_json(self.client.authorized(
            Method::PUT,
            &format!("admin/doces/{id}/toggle-availability"),
            token,
        ))
        .await
    }

    async fn set_availability(
        &self,
        token: &BearerToken,
        id: ProductId,
        available: bool,
    ) -> Result<AdminProduct, ApiError> {
        send_json(
            self.client
                .authorized(
                    Method::PUT,
                    &format!("admin/doces/{id}/availability"),
                    token,
                )
                .query(&[("disponivel", available)]),
        )
        .await
    }

    async fn batch_update_availability(
        &self,
        token: &BearerToken,
        ids: &[ProductId],
        available: bool,
    ) -> Result<(), ApiError> {
        send_empty(
            self.client
                .authorized(Method::PUT, "admin/doces/batch/availability", token)
                .query(&[("disponivel", available)])
                .json(ids),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN_BRIGADEIRO_JSON, serve_once};

    use super::*;

    fn token() -> BearerToken {
        BearerToken::new("jwt-admin")
    }

    #[tokio::test]
    async fn dashboard_reads_stats_with_bearer() -> TestResult {
        let backend = serve_once(
            200,
            r#"{
                "totalDoces": 10,
                "docesDisponiveis": 8,
                "docesIndisponiveis": 2,
                "percentualDisponiveis": 80.0,
                "precoMinimo": 3.5,
                "precoMaximo": 45.0,
                "precoMedio": 15.25
            }"#,
        )
        .await?;

        let admin = AdminClient::new(backend.client.clone());
        let stats = admin.dashboard(&token()).await?;

        assert_eq!(stats.total_products, 10);
        assert_eq!(stats.average_price, Some(Decimal::new(1525, 2)));

        let request = backend.request().await?;

        assert_eq!(
            request.request_line(),
            "GET /api/admin/doces/dashboard HTTP/1.1"
        );
        assert_eq!(request.header("authorization"), Some("Bearer jwt-admin"));

        Ok(())
    }

    #[tokio::test]
    async fn list_sends_admin_filter() -> TestResult {
        let backend = serve_once(
            200,
            &format!(r#"{{"doces": [{ADMIN_BRIGADEIRO_JSON}], "total": 1}}"#),
        )
        .await?;

        let admin = AdminClient::new(backend.client.clone());
        let page = admin
            .list(
                &token(),
                &AdminFilter {
                    available: Some(false),
                    search: Some("brig".to_string()),
                },
            )
            .await?;

        assert_eq!(
            page.products.first().map(|product| product.created_at.date()),
            Some(date(2024, 5, 1))
        );
        assert_eq!(
            backend.request().await?.request_line(),
            "GET /api/admin/doces?disponivel=false&search=brig HTTP/1.1"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_posts_the_draft() -> TestResult {
        let backend = serve_once(201, ADMIN_BRIGADEIRO_JSON).await?;
        let admin = AdminClient::new(backend.client.clone());

        let created = admin
            .create(
                &token(),
                &ProductDraft {
                    name: "Brigadeiro".to_string(),
                    price: Decimal::new(1250, 2),
                    description: None,
                    image: None,
                    available: Some(false),
                },
            )
            .await?;

        assert_eq!(created.product.id, 1);

        let request = backend.request().await?;

        assert_eq!(request.request_line(), "POST /api/admin/doces HTTP/1.1");
        assert_eq!(
            request.json_body()?,
            serde_json::json!({ "nome": "Brigadeiro", "valor": 12.5, "disponivel": false })
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_availability_uses_query_flag() -> TestResult {
        let backend = serve_once(200, ADMIN_BRIGADEIRO_JSON).await?;
        let admin = AdminClient::new(backend.client.clone());

        admin.set_availability(&token(), 1, true).await?;

        assert_eq!(
            backend.request().await?.request_line(),
            "PUT /api/admin/doces/1/availability?disponivel=true HTTP/1.1"
        );

        Ok(())
    }

    #[tokio::test]
    async fn batch_update_sends_ids_as_body() -> TestResult {
        let backend = serve_once(200, "").await?;
        let admin = AdminClient::new(backend.client.clone());

        admin
            .batch_update_availability(&token(), &[1, 2, 3], false)
            .await?;

        let request = backend.request().await?;

        assert_eq!(
            request.request_line(),
            "PUT /api/admin/doces/batch/availability?disponivel=false HTTP/1.1"
        );
        assert_eq!(request.json_body()?, serde_json::json!([1, 2, 3]));

        Ok(())
    }

    #[tokio::test]
    async fn delete_ignores_the_body() -> TestResult {
        let backend = serve_once(204, "").await?;
        let admin = AdminClient::new(backend.client.clone());

        admin.delete(&token(), 4).await?;

        assert_eq!(
            backend.request().await?.request_line(),
            "DELETE /api/admin/doces/4 HTTP/1.1"
        );

        Ok(())
    }

    #[tokio::test]
    async fn forbidden_is_reported() -> TestResult {
        let backend = serve_once(403, r#"{"message":"Acesso negado"}"#).await?;
        let admin = AdminClient::new(backend.client.clone());

        let result = admin.toggle_availability(&token(), 1).await;

        assert!(
            matches!(result, Err(ApiError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }
}
