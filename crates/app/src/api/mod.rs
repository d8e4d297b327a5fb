//! HTTP clients for the storefront REST API.
//!
//! Each client implements one of the gateway traits from `confeitaria::gateway`
//! on top of a shared [`ApiClient`].

mod admin;
mod auth;
mod catalog;
mod client;

pub use admin::AdminClient;
pub use auth::AuthClient;
pub use catalog::CatalogClient;
pub use client::ApiClient;
