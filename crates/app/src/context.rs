//! Storefront Context
//!
//! Owns the cart, the session and the backend clients for one run of the
//! storefront. Admin operations pass the access guard first; a 401 from any
//! of them ends the session.

use std::{fmt, sync::Arc};

use confeitaria::{
    cart::{CartEngine, CheckoutError},
    catalog::AdminFilter,
    gateway::{AdminGateway, ApiError, AuthGateway, CatalogGateway},
    guard::{Decision, Requirement, decide},
    products::{
        AdminProduct, AdminProductPage, DashboardStats, Product, ProductDraft, ProductId,
        ProductPatch,
    },
    session::{SessionError, SessionStore},
    storage::{FileStore, Store},
    users::{BearerToken, Credentials},
    validation::{FieldErrors, validate_draft, validate_patch},
};
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    api::{AdminClient, ApiClient, AuthClient, CatalogClient},
    config::{AppConfig, ConfigError},
};

/// Locations of the protected admin views.
pub mod routes {
    use confeitaria::products::ProductId;

    /// Login view.
    pub const LOGIN: &str = "/login";

    /// Admin dashboard; also where a login without a target lands.
    pub const ADMIN: &str = "/admin";

    /// Admin product listing.
    pub const ADMIN_PRODUCTS: &str = "/admin/products";

    /// New product form.
    pub const ADMIN_NEW_PRODUCT: &str = "/admin/products/new";

    /// Edit form for one product.
    pub fn admin_edit_product(id: ProductId) -> String {
        format!("/admin/products/{id}/edit")
    }
}

/// Errors surfaced by storefront operations.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The access guard did not allow the operation.
    #[error("{0}")]
    Guard(Decision),

    /// The product form failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] FieldErrors),

    /// The product cannot be ordered right now.
    #[error("{name} is not available")]
    Unavailable {
        /// Product name.
        name: String,
    },

    /// No checkout link could be built.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Storefront backed by the local file store and the REST API.
pub type HttpStorefront = Storefront<FileStore, AuthClient>;

/// One storefront run: cart, session and backend clients.
pub struct Storefront<S: Store, A: AuthGateway> {
    cart: CartEngine<S>,
    session: SessionStore<A, S>,
    catalog: Arc<dyn CatalogGateway>,
    admin: Arc<dyn AdminGateway>,
    whatsapp_number: String,
}

impl<S, A> fmt::Debug for Storefront<S, A>
where
    S: Store + fmt::Debug,
    A: AuthGateway + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("cart", &self.cart)
            .field("session", &self.session)
            .field("whatsapp_number", &self.whatsapp_number)
            .finish_non_exhaustive()
    }
}

impl HttpStorefront {
    /// Build the storefront from configuration.
    ///
    /// The cart is loaded right away; the session stays uninitialized until
    /// [`Storefront::restore_session`] runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let client = ApiClient::new(&config.api)?;
        let store = FileStore::new(&config.storage.data_dir);

        debug!(
            api_url = client.base_url(),
            data_dir = %store.dir().display(),
            "storefront configured"
        );

        Ok(Self::new(
            store.clone(),
            SessionStore::new(AuthClient::new(client.clone()), store),
            Arc::new(CatalogClient::new(client.clone())),
            Arc::new(AdminClient::new(client)),
            config.checkout.whatsapp_number.clone(),
        ))
    }
}

impl<S: Store, A: AuthGateway> Storefront<S, A> {
    /// Assemble a storefront, loading the cart from `cart_store`.
    pub fn new(
        cart_store: S,
        session: SessionStore<A, S>,
        catalog: Arc<dyn CatalogGateway>,
        admin: Arc<dyn AdminGateway>,
        whatsapp_number: impl Into<String>,
    ) -> Self {
        Self {
            cart: CartEngine::load(cart_store),
            session,
            catalog,
            admin,
            whatsapp_number: whatsapp_number.into(),
        }
    }

    /// Cart engine.
    pub fn cart(&self) -> &CartEngine<S> {
        &self.cart
    }

    /// Mutable cart engine.
    pub fn cart_mut(&mut self) -> &mut CartEngine<S> {
        &mut self.cart
    }

    /// Session store.
    pub fn session(&self) -> &SessionStore<A, S> {
        &self.session
    }

    /// Public catalog.
    pub fn catalog(&self) -> &dyn CatalogGateway {
        self.catalog.as_ref()
    }

    /// Restore and validate the persisted session.
    pub async fn restore_session(&mut self) {
        self.session.initialize().await;
    }

    /// Log in and return the location to continue at: `from` when given,
    /// the admin dashboard otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`]; the session is left untouched.
    pub async fn login(
        &mut self,
        credentials: &Credentials,
        from: Option<&str>,
    ) -> Result<String, SessionError> {
        self.session.login(credentials).await?;

        Ok(from
            .filter(|from| !from.is_empty() && *from != routes::LOGIN)
            .unwrap_or(routes::ADMIN)
            .to_string())
    }

    /// Forget the logged in user.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Fetch product `id` and add `quantity` of it to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the product cannot be fetched or is unavailable.
    pub async fn add_to_cart(
        &mut self,
        id: ProductId,
        quantity: u32,
    ) -> Result<Product, StorefrontError> {
        let product = self.catalog.get(id).await?;

        if !product.available {
            return Err(StorefrontError::Unavailable { name: product.name });
        }

        self.cart.add_item(product.clone(), quantity);

        Ok(product)
    }

    /// Checkout link for the current cart, addressed to the configured number.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Checkout`] for an empty cart or a bad number.
    pub fn checkout_link(&self) -> Result<Url, StorefrontError> {
        Ok(self.cart.build_checkout_link(&self.whatsapp_number)?)
    }

    /// Guard check for a view at `location`.
    pub fn guard(&self, requirement: Requirement, location: &str) -> Decision {
        decide(self.session.access(), requirement, location)
    }

    /// Bearer token to use for a protected operation at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Guard`] with the guard decision unless it
    /// allows access.
    pub fn authorize(
        &self,
        requirement: Requirement,
        location: &str,
    ) -> Result<BearerToken, StorefrontError> {
        match self.guard(requirement, location) {
            Decision::Allow => self.session.token().cloned().ok_or_else(|| {
                StorefrontError::Guard(Decision::RedirectToLogin {
                    from: location.to_string(),
                })
            }),
            decision => Err(StorefrontError::Guard(decision)),
        }
    }

    /// Dashboard statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the guard refuses or the backend call fails.
    pub async fn dashboard(&mut self) -> Result<DashboardStats, StorefrontError> {
        let token = self.authorize(Requirement::Admin, routes::ADMIN)?;
        let result = self.admin.dashboard(&token).await;

        self.settle(result)
    }

    /// Detailed statistics report.
    ///
    /// # Errors
    ///
    /// Returns an error if the guard refuses or the backend call fails.
    pub async fn detailed_stats(&mut self) -> Result<DashboardStats, StorefrontError> {
        let token = self.authorize(Requirement::Admin, routes::ADMIN)?;
        let result = self.admin.detailed_stats(&token).await;

        self.settle(result)
    }

    /// Every product, available or not, matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the guard refuses or the backend call fails.
    pub async fn admin_products(
        &mut self,
        filter: &AdminFilter,
    ) -> Result<AdminProductPage, StorefrontError> {
        let token = self.authorize(Requirement::Admin, routes::ADMIN_PRODUCTS)?;
        let result = match filter.available {
            Some(true) if filter.search.is_none() => self.admin.available(&token).await,
            Some(false) if filter.search.is_none() => self.admin.unavailable(&token).await,
            _ => self.admin.list(&token, filter).await,
        };

        self.settle(result)
    }

    /// Validate and create a product.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] without calling the backend
    /// when the form is invalid.
    pub async fn create_product(
        &mut self,
        draft: &ProductDraft,
    ) -> Result<AdminProduct, StorefrontError> {
        let token = self.authorize(Requirement::Admin, routes::ADMIN_NEW_PRODUCT)?;

        validate_draft(draft)?;

        let result = self.admin.create(&token, draft).await;
        let created = self.settle(result)?;

        info!(id = created.product.id, name = %created.product.name, "product created");

        Ok(created)
    }

    /// Validate and apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] without calling the backend
    /// when a present field is invalid.
    pub async fn update_product(
        &mut self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<AdminProduct, StorefrontError> {
        let token = self.authorize(Requirement::Admin, &routes::admin_edit_product(id))?;

        validate_patch(patch)?;

        let result = self.admin.update(&token, id, patch).await;

        self.settle(result)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the guard refuses or the backend call fails.
    pub async fn delete_product(&mut self, id: ProductId) -> Result<(), StorefrontError> {
        let token = self.authorize(Requirement::Admin, routes::ADMIN_PRODUCTS)?;
        let result = self.admin.delete(&token, id).await;

        self.settle(result)?;

        info!(id, "product deleted");

        Ok(())
    }

    /// Flip a product's availability.
    ///
    /// # Errors
    ///
    /// Returns an error if the guard refuses or the backend call fails.
    pub async fn toggle_availability(
        &mut self,
        id: ProductId,
    ) -> Result<AdminProduct, StorefrontError> {
        let token = self.authorize(Requirement::Admin, routes::ADMIN_PRODUCTS)?;
        let result = self.admin.toggle_availability(&token, id).await;

        self.settle(result)
    }

    /// Set a product's availability.
    ///
    /// # Errors
    ///
    /// Returns an error if the guard refuses or the backend call fails.
    pub async fn set_availability(
        &mut self,
        id: ProductId,
        available: bool,
    ) -> Result<AdminProduct, StorefrontError> {
        let token = self.authorize(Requirement::Admin, routes::ADMIN_PRODUCTS)?;
        let result = self.admin.set_availability(&token, id, available).await;

        self.settle(result)
    }

    /// Set the availability of several products at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the guard refuses or the backend call fails.
    pub async fn batch_update_availability(
        &mut self,
        ids: &[ProductId],
        available: bool,
    ) -> Result<(), StorefrontError> {
        let token = self.authorize(Requirement::Admin, routes::ADMIN_PRODUCTS)?;
        let result = self
            .admin
            .batch_update_availability(&token, ids, available)
            .await;

        self.settle(result)
    }

    fn settle<T>(&mut self, result: Result<T, ApiError>) -> Result<T, StorefrontError> {
        result.map_err(|error| {
            if error.is_unauthorized() {
                self.session.handle_unauthorized();
            }

            StorefrontError::Api(error)
        })
    }
}
